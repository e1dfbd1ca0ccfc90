use crate::dto::common::PagedResult;
use crate::error::Result;
use crate::query::{PageQuery, Window, clamp_page};
use crate::repository::Paginate;

pub mod leaderboard;
pub mod people;

/// Counts the selection, clamps the requested page and fetches it.
///
/// Rows are read from the clamped page, so a request past the end returns
/// the page the caller is told about rather than an unrelated empty window.
pub async fn fetch_page<S, P>(store: &P, mut query: PageQuery<S>) -> Result<PagedResult<P::Row>>
where
    S: Send + Sync,
    P: Paginate<S> + ?Sized,
{
    let count = store.count(&query.selection).await?;
    let page = clamp_page(query.window.page_index(), count);

    if let Window::Page(requested) = &mut query.window {
        *requested = page;
    }

    let values = store.fetch(&query).await?;

    tracing::debug!(count, page, returned = values.len(), "Fetched page");

    Ok(PagedResult::new(count, page, values))
}
