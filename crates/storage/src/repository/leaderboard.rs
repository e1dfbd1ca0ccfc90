use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::leaderboard::{LeaderboardEntryResponse, MemberInfo};
use crate::error::Result;
use crate::query::{EntrySelection, PageQuery, SortDirection};

use super::{EntryStore, Paginate};

#[derive(FromRow)]
struct EntryRow {
    entry_id: Uuid,
    score: i32,
    team_size: i32,
}

#[derive(FromRow)]
struct MemberRow {
    entry_id: Uuid,
    person_id: Uuid,
    name: String,
}

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Members of every listed entry, keyed by entry id
    async fn load_members(&self, entry_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<MemberInfo>>> {
        if entry_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT m.entry_id, p.person_id, p.name
            FROM leaderboard_entry_members m
            INNER JOIN people p ON p.person_id = m.person_id
            WHERE m.entry_id = ANY($1)
            ORDER BY p.name, p.person_id
            "#,
        )
        .bind(entry_ids)
        .fetch_all(self.pool)
        .await?;

        let mut members: HashMap<Uuid, Vec<MemberInfo>> = HashMap::new();
        for row in rows {
            members.entry(row.entry_id).or_default().push(MemberInfo {
                person_id: row.person_id,
                name: row.name,
            });
        }

        Ok(members)
    }
}

#[async_trait]
impl Paginate<EntrySelection> for LeaderboardRepository<'_> {
    type Row = LeaderboardEntryResponse;

    async fn count(&self, selection: &EntrySelection) -> Result<i64> {
        let mut query = count_query(selection);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    async fn fetch(
        &self,
        query: &PageQuery<EntrySelection>,
    ) -> Result<Vec<LeaderboardEntryResponse>> {
        let rows: Vec<EntryRow> = fetch_query(query)
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        let entry_ids: Vec<Uuid> = rows.iter().map(|row| row.entry_id).collect();
        let mut members = self.load_members(&entry_ids).await?;

        let entries = rows
            .into_iter()
            .map(|row| LeaderboardEntryResponse {
                members: members.remove(&row.entry_id).unwrap_or_default(),
                entry_id: row.entry_id,
                score: row.score,
                team_size: row.team_size,
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl EntryStore for LeaderboardRepository<'_> {
    async fn member_rank(
        &self,
        query: &PageQuery<EntrySelection>,
        person_id: Uuid,
    ) -> Result<Option<i64>> {
        let rank = rank_query(query, person_id)
            .build_query_scalar::<Option<i64>>()
            .fetch_one(self.pool)
            .await?;

        Ok(rank)
    }
}

fn push_conditions(query: &mut QueryBuilder<'static, Postgres>, selection: &EntrySelection) {
    query.push(" WHERE 1=1");

    if let Some(id) = selection.id {
        query.push(" AND e.entry_id = ");
        query.push_bind(id);
    }

    if let Some(team_size) = selection.team_size {
        query.push(" AND e.team_size = ");
        query.push_bind(team_size);
    }

    if let Some(member_id) = selection.member_id {
        query.push(
            " AND EXISTS (SELECT 1 FROM leaderboard_entry_members m \
             WHERE m.entry_id = e.entry_id AND m.person_id = ",
        );
        query.push_bind(member_id);
        query.push(")");
    }
}

/// Ties always fall back to the id so paging is stable.
fn order_terms(sort: Option<SortDirection>) -> &'static str {
    match sort {
        Some(SortDirection::Ascending) => "e.score ASC, e.entry_id",
        Some(SortDirection::Descending) => "e.score DESC, e.entry_id",
        None => "e.entry_id",
    }
}

fn count_query(selection: &EntrySelection) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM leaderboard_entries e");
    push_conditions(&mut query, selection);
    query
}

fn fetch_query(page: &PageQuery<EntrySelection>) -> QueryBuilder<'static, Postgres> {
    let mut query =
        QueryBuilder::new("SELECT e.entry_id, e.score, e.team_size FROM leaderboard_entries e");
    push_conditions(&mut query, &page.selection);

    query.push(" ORDER BY ");
    query.push(order_terms(page.sort));
    query.push(" LIMIT ");
    query.push_bind(page.window.take());
    query.push(" OFFSET ");
    query.push_bind(page.window.skip());

    query
}

fn rank_query(page: &PageQuery<EntrySelection>, person_id: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("WITH ordered AS (SELECT e.entry_id, ROW_NUMBER() OVER (ORDER BY ");
    query.push(order_terms(page.sort));
    query.push(") - 1 AS position FROM leaderboard_entries e");
    push_conditions(&mut query, &page.selection);
    query.push(
        ") SELECT MIN(o.position) FROM ordered o \
         INNER JOIN leaderboard_entry_members m ON m.entry_id = o.entry_id \
         WHERE m.person_id = ",
    );
    query.push_bind(person_id);

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::leaderboard::LeaderboardFilter;

    #[test]
    fn test_count_query_for_default_listing() {
        let page = PageQuery::entries(&LeaderboardFilter::default(), 0);
        let query = count_query(&page.selection);
        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM leaderboard_entries e WHERE 1=1 AND e.team_size = $1"
        );
    }

    #[test]
    fn test_fetch_query_with_member_filter_and_sort() {
        let filter = LeaderboardFilter {
            filter_person_id: Some(Uuid::new_v4()),
            order_ascending: Some(false),
            ..Default::default()
        };
        let page = PageQuery::entries(&filter, 1);
        let query = fetch_query(&page);
        let sql = query.sql();

        assert!(!sql.contains("e.team_size ="));
        assert!(sql.contains("AND EXISTS (SELECT 1 FROM leaderboard_entry_members m"));
        assert!(sql.contains("m.person_id = $1)"));
        assert!(sql.ends_with("ORDER BY e.score DESC, e.entry_id LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_fetch_query_by_id() {
        let filter = LeaderboardFilter {
            id: Some(Uuid::new_v4()),
            team_size: Some(2),
            ..Default::default()
        };
        let query = fetch_query(&PageQuery::entries(&filter, 0));
        assert_eq!(
            query.sql(),
            "SELECT e.entry_id, e.score, e.team_size FROM leaderboard_entries e \
             WHERE 1=1 AND e.entry_id = $1 ORDER BY e.entry_id LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_rank_query_uses_active_sort() {
        let filter = LeaderboardFilter {
            order_ascending: Some(true),
            ..Default::default()
        };
        let query = rank_query(&PageQuery::entries(&filter, 0), Uuid::new_v4());
        let sql = query.sql();

        assert!(sql.starts_with(
            "WITH ordered AS (SELECT e.entry_id, ROW_NUMBER() OVER (ORDER BY e.score ASC, e.entry_id)"
        ));
        assert!(sql.contains("AND e.team_size = $1)"));
        assert!(sql.ends_with("WHERE m.person_id = $2"));
    }
}
