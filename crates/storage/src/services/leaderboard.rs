use crate::dto::common::PagedResult;
use crate::dto::leaderboard::{LeaderboardEntryResponse, LeaderboardFilter};
use crate::error::Result;
use crate::query::{PAGE_SIZE, PageQuery};
use crate::repository::EntryStore;

use super::fetch_page;

/// Get one page of leaderboard entries, members included
pub async fn get_leaderboard_entries<S>(
    store: &S,
    filter: &LeaderboardFilter,
) -> Result<PagedResult<LeaderboardEntryResponse>>
where
    S: EntryStore + ?Sized,
{
    let mut page = filter.page;

    if filter.id.is_none()
        && let Some(person_id) = filter.find_person_id
    {
        let ranking = PageQuery::entries(filter, 0);
        match store.member_rank(&ranking, person_id).await? {
            Some(rank) => {
                page = u32::try_from(rank / PAGE_SIZE).unwrap_or(u32::MAX);
                tracing::debug!(%person_id, rank, page, "Located page for person");
            }
            None => {
                tracing::debug!(%person_id, "Person not on this leaderboard, keeping requested page");
            }
        }
    }

    let query = PageQuery::entries(filter, page);
    tracing::debug!(?query, "Querying leaderboard entries");

    fetch_page(store, query).await
}
