use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A scored submission. `team_size` is the intended number of members and is
/// not required to match the rows in `leaderboard_entry_members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub entry_id: Uuid,
    pub score: i32,
    pub team_size: i32,
}

impl LeaderboardEntry {
    pub fn new(score: i32, team_size: i32) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            score,
            team_size,
        }
    }
}

/// One row of the entry/person join relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct EntryMember {
    pub entry_id: Uuid,
    pub person_id: Uuid,
}
