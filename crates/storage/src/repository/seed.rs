use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::Result;
use crate::seed::SeedData;

/// Rows per multi-row INSERT, keeps binds well under the Postgres limit.
const INSERT_CHUNK: usize = 1000;

pub struct SeedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeedRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Loads generated fixtures in a single transaction
    pub async fn insert(&self, data: &SeedData) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for chunk in data.people.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<Postgres>::new("INSERT INTO people (person_id, name) ");
            query.push_values(chunk, |mut row, person| {
                row.push_bind(person.person_id).push_bind(&person.name);
            });
            query.build().execute(&mut *tx).await?;
        }

        for chunk in data.entries.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<Postgres>::new(
                "INSERT INTO leaderboard_entries (entry_id, score, team_size) ",
            );
            query.push_values(chunk, |mut row, entry| {
                row.push_bind(entry.entry_id)
                    .push_bind(entry.score)
                    .push_bind(entry.team_size);
            });
            query.build().execute(&mut *tx).await?;
        }

        for chunk in data.members.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<Postgres>::new(
                "INSERT INTO leaderboard_entry_members (entry_id, person_id) ",
            );
            query.push_values(chunk, |mut row, member| {
                row.push_bind(member.entry_id).push_bind(member.person_id);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(
            people = data.people.len(),
            entries = data.entries.len(),
            members = data.members.len(),
            "Seed data inserted"
        );

        Ok(())
    }
}
