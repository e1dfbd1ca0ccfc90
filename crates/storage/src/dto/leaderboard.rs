use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters accepted by the leaderboard listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardFilter {
    /// Fetch a single entry; every other parameter is ignored when set.
    pub id: Option<Uuid>,
    /// Sort by score. Omit for no explicit ordering.
    pub order_ascending: Option<bool>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    /// Only entries that have this person as a member.
    pub filter_person_id: Option<Uuid>,
    /// Jump to the page holding the first entry this person is a member of.
    pub find_person_id: Option<Uuid>,
    /// Exact team size. Defaults to 4 unless `filter_person_id` is set.
    pub team_size: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    pub entry_id: Uuid,
    pub score: i32,
    pub team_size: i32,
    pub members: Vec<MemberInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberInfo {
    pub person_id: Uuid,
    pub name: String,
}

impl From<crate::models::Person> for MemberInfo {
    fn from(person: crate::models::Person) -> Self {
        Self {
            person_id: person.person_id,
            name: person.name,
        }
    }
}
