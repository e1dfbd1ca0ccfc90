use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardEntryResponse;
use crate::dto::person::PersonResponse;
use crate::error::Result;
use crate::models::Person;
use crate::query::{EntrySelection, PageQuery, PersonSelection};

pub mod leaderboard;
pub mod memory;
pub mod person;
pub mod seed;

/// Count and fetch over one kind of selection.
#[async_trait]
pub trait Paginate<S>: Send + Sync
where
    S: Send + Sync,
{
    type Row: Send;

    /// Rows matching the selection, ignoring the window.
    async fn count(&self, selection: &S) -> Result<i64>;

    async fn fetch(&self, query: &PageQuery<S>) -> Result<Vec<Self::Row>>;
}

#[async_trait]
pub trait EntryStore: Paginate<EntrySelection, Row = LeaderboardEntryResponse> {
    /// Zero-based position of the first row, under the query's selection and
    /// sort, that has `person_id` as a member. The window is ignored.
    async fn member_rank(
        &self,
        query: &PageQuery<EntrySelection>,
        person_id: Uuid,
    ) -> Result<Option<i64>>;
}

#[async_trait]
pub trait PersonStore: Paginate<PersonSelection, Row = PersonResponse> {
    async fn insert(&self, person: &Person) -> Result<()>;
}
