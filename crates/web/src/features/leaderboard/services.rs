use sqlx::PgPool;
use storage::{
    dto::{
        common::PagedResult,
        leaderboard::{LeaderboardEntryResponse, LeaderboardFilter},
    },
    error::Result,
    repository::leaderboard::LeaderboardRepository,
    services::leaderboard,
};

/// Get leaderboard entries with filtering and pagination
pub async fn get_leaderboard_entries(
    pool: &PgPool,
    filter: &LeaderboardFilter,
) -> Result<PagedResult<LeaderboardEntryResponse>> {
    let repo = LeaderboardRepository::new(pool);
    leaderboard::get_leaderboard_entries(&repo, filter).await
}
