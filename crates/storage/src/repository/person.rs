use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::person::{EntryInfo, PersonResponse};
use crate::error::Result;
use crate::models::Person;
use crate::query::{PageQuery, PersonSelection, SortDirection};

use super::{Paginate, PersonStore};

#[derive(FromRow)]
struct MembershipRow {
    person_id: Uuid,
    entry_id: Uuid,
    score: i32,
    team_size: i32,
}

pub struct PersonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Entries each listed person is a member of, best score first
    async fn load_entries(&self, person_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<EntryInfo>>> {
        if person_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT m.person_id, e.entry_id, e.score, e.team_size
            FROM leaderboard_entry_members m
            INNER JOIN leaderboard_entries e ON e.entry_id = m.entry_id
            WHERE m.person_id = ANY($1)
            ORDER BY e.score DESC, e.entry_id
            "#,
        )
        .bind(person_ids)
        .fetch_all(self.pool)
        .await?;

        let mut entries: HashMap<Uuid, Vec<EntryInfo>> = HashMap::new();
        for row in rows {
            entries.entry(row.person_id).or_default().push(EntryInfo {
                entry_id: row.entry_id,
                score: row.score,
                team_size: row.team_size,
            });
        }

        Ok(entries)
    }
}

#[async_trait]
impl Paginate<PersonSelection> for PersonRepository<'_> {
    type Row = PersonResponse;

    async fn count(&self, selection: &PersonSelection) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM people p");
        push_conditions(&mut query, selection);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    async fn fetch(&self, query: &PageQuery<PersonSelection>) -> Result<Vec<PersonResponse>> {
        let people: Vec<Person> = fetch_query(query)
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        if !query.selection.include_entries {
            return Ok(people.into_iter().map(PersonResponse::from).collect());
        }

        let person_ids: Vec<Uuid> = people.iter().map(|person| person.person_id).collect();
        let mut entries = self.load_entries(&person_ids).await?;

        let people = people
            .into_iter()
            .map(|person| PersonResponse {
                leaderboard_entries: Some(entries.remove(&person.person_id).unwrap_or_default()),
                person_id: person.person_id,
                name: person.name,
            })
            .collect();

        Ok(people)
    }
}

#[async_trait]
impl PersonStore for PersonRepository<'_> {
    async fn insert(&self, person: &Person) -> Result<()> {
        sqlx::query("INSERT INTO people (person_id, name) VALUES ($1, $2)")
            .bind(person.person_id)
            .bind(&person.name)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

fn push_conditions(query: &mut QueryBuilder<'static, Postgres>, selection: &PersonSelection) {
    query.push(" WHERE 1=1");

    if let Some(id) = selection.id {
        query.push(" AND p.person_id = ");
        query.push_bind(id);
    }
}

fn order_terms(sort: Option<SortDirection>) -> &'static str {
    match sort {
        Some(SortDirection::Ascending) => "p.name ASC, p.person_id",
        Some(SortDirection::Descending) => "p.name DESC, p.person_id",
        None => "p.person_id",
    }
}

fn fetch_query(page: &PageQuery<PersonSelection>) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT p.person_id, p.name FROM people p");
    push_conditions(&mut query, &page.selection);

    query.push(" ORDER BY ");
    query.push(order_terms(page.sort));
    query.push(" LIMIT ");
    query.push_bind(page.window.take());
    query.push(" OFFSET ");
    query.push_bind(page.window.skip());

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::person::PeopleFilter;

    #[test]
    fn test_fetch_query_sorted_by_name() {
        let filter = PeopleFilter {
            order_ascending: Some(true),
            page: 4,
            ..Default::default()
        };
        let query = fetch_query(&PageQuery::people(&filter));
        assert_eq!(
            query.sql(),
            "SELECT p.person_id, p.name FROM people p WHERE 1=1 \
             ORDER BY p.name ASC, p.person_id LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_fetch_query_by_id() {
        let filter = PeopleFilter {
            id: Some(Uuid::new_v4()),
            order_ascending: Some(false),
            ..Default::default()
        };
        let query = fetch_query(&PageQuery::people(&filter));
        assert_eq!(
            query.sql(),
            "SELECT p.person_id, p.name FROM people p WHERE 1=1 AND p.person_id = $1 \
             ORDER BY p.person_id LIMIT $2 OFFSET $3"
        );
    }
}
