use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{LeaderboardEntry, Person};

/// Query parameters accepted by the people listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeopleFilter {
    /// Fetch a single person; paging and ordering are ignored when set.
    pub id: Option<Uuid>,
    /// Load the entries each returned person is a member of.
    #[serde(default)]
    pub include_entries: bool,
    /// Sort by name. Omit for no explicit ordering.
    pub order_ascending: Option<bool>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    pub person_id: Uuid,
    pub name: String,
    /// Present only when entries were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard_entries: Option<Vec<EntryInfo>>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            person_id: person.person_id,
            name: person.name,
            leaderboard_entries: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntryInfo {
    pub entry_id: Uuid,
    pub score: i32,
    pub team_size: i32,
}

impl From<LeaderboardEntry> for EntryInfo {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            entry_id: entry.entry_id,
            score: entry.score,
            team_size: entry.team_size,
        }
    }
}

/// Request payload for adding a person
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePersonRequest {
    /// Generated when omitted.
    pub person_id: Option<Uuid>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

impl From<CreatePersonRequest> for Person {
    fn from(req: CreatePersonRequest) -> Self {
        match req.person_id {
            Some(id) => Person::with_id(id, req.name),
            None => Person::new(req.name),
        }
    }
}
