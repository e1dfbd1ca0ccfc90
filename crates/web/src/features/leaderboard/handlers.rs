use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PagedResult,
        leaderboard::{LeaderboardEntryResponse, LeaderboardFilter},
    },
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardFilter),
    responses(
        (status = 200, description = "Leaderboard page retrieved successfully", body = PagedResult<LeaderboardEntryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard_entries(
    State(db): State<Database>,
    Query(filter): Query<LeaderboardFilter>,
) -> Result<Response, WebError> {
    let result = services::get_leaderboard_entries(db.pool(), &filter).await?;

    Ok(Json(result).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn parse(uri: &str) -> LeaderboardFilter {
        let uri: Uri = uri.parse().unwrap();
        Query::<LeaderboardFilter>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_defaults_when_no_parameters() {
        let filter = parse("/api/leaderboard");
        assert_eq!(filter.page, 0);
        assert_eq!(filter.order_ascending, None);
        assert_eq!(filter.team_size, None);
        assert!(filter.id.is_none());
    }

    #[test]
    fn test_parses_tri_state_order_and_filters() {
        let member = "0b8e5c3a-6f1e-4c2b-9d7a-2f4e1a3b5c6d";
        let filter = parse(&format!(
            "/api/leaderboard?order_ascending=false&page=3&team_size=2&filter_person_id={member}"
        ));
        assert_eq!(filter.order_ascending, Some(false));
        assert_eq!(filter.page, 3);
        assert_eq!(filter.team_size, Some(2));
        assert_eq!(filter.filter_person_id.unwrap().to_string(), member);
    }
}
