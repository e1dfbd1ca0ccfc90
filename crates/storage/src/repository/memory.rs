//! In-process store with the same query semantics as the Postgres
//! repositories. Rows keep insertion order when no sort is requested.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::leaderboard::{LeaderboardEntryResponse, MemberInfo};
use crate::dto::person::{EntryInfo, PersonResponse};
use crate::error::{Result, StorageError};
use crate::models::{LeaderboardEntry, Person};
use crate::query::{EntrySelection, PageQuery, PersonSelection, SortDirection, Window};
use crate::seed::SeedData;

use super::{EntryStore, Paginate, PersonStore};

#[derive(Default)]
struct Tables {
    people: Vec<Person>,
    entries: Vec<LeaderboardEntry>,
    /// Join rows keyed by entry id.
    members: HashMap<Uuid, Vec<Uuid>>,
}

impl Tables {
    fn member_ids(&self, entry_id: Uuid) -> &[Uuid] {
        self.members
            .get(&entry_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn person(&self, person_id: Uuid) -> Option<&Person> {
        self.people.iter().find(|p| p.person_id == person_id)
    }

    fn selected_entries(&self, query: &PageQuery<EntrySelection>) -> Vec<&LeaderboardEntry> {
        let mut entries: Vec<&LeaderboardEntry> = self
            .entries
            .iter()
            .filter(|e| query.selection.matches(e, self.member_ids(e.entry_id)))
            .collect();

        // sort_by_key is stable, ties keep insertion order
        match query.sort {
            Some(SortDirection::Ascending) => entries.sort_by_key(|e| e.score),
            Some(SortDirection::Descending) => {
                entries.sort_by_key(|e| std::cmp::Reverse(e.score))
            }
            None => {}
        }

        entries
    }

    fn selected_people(&self, query: &PageQuery<PersonSelection>) -> Vec<&Person> {
        let mut people: Vec<&Person> = self
            .people
            .iter()
            .filter(|p| query.selection.id.is_none_or(|id| p.person_id == id))
            .collect();

        match query.sort {
            Some(SortDirection::Ascending) => people.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(SortDirection::Descending) => people.sort_by(|a, b| b.name.cmp(&a.name)),
            None => {}
        }

        people
    }

    fn members_of(&self, entry_id: Uuid) -> Vec<MemberInfo> {
        let mut members: Vec<MemberInfo> = self
            .member_ids(entry_id)
            .iter()
            .filter_map(|&id| self.person(id).cloned())
            .map(MemberInfo::from)
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.person_id.cmp(&b.person_id)));
        members
    }

    fn entries_of(&self, person_id: Uuid) -> Vec<EntryInfo> {
        let mut entries: Vec<EntryInfo> = self
            .entries
            .iter()
            .filter(|e| self.member_ids(e.entry_id).contains(&person_id))
            .cloned()
            .map(EntryInfo::from)
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.entry_id.cmp(&b.entry_id)));
        entries
    }
}

fn paged<'a, T>(rows: Vec<&'a T>, window: Window) -> impl Iterator<Item = &'a T> {
    rows.into_iter()
        .skip(usize::try_from(window.skip()).unwrap_or(usize::MAX))
        .take(usize::try_from(window.take()).unwrap_or(0))
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(data: SeedData) -> Self {
        let mut members: HashMap<Uuid, Vec<Uuid>> = HashMap::with_capacity(data.entries.len());
        for member in data.members {
            members
                .entry(member.entry_id)
                .or_default()
                .push(member.person_id);
        }

        Self {
            tables: RwLock::new(Tables {
                people: data.people,
                entries: data.entries,
                members,
            }),
        }
    }

    /// Stores an entry and its join rows. Every member must already exist.
    pub async fn add_entry(&self, entry: LeaderboardEntry, member_ids: &[Uuid]) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.entries.iter().any(|e| e.entry_id == entry.entry_id) {
            return Err(StorageError::ConstraintViolation(format!(
                "leaderboard entry {} already exists",
                entry.entry_id
            )));
        }

        for (i, person_id) in member_ids.iter().enumerate() {
            if tables.person(*person_id).is_none() {
                return Err(StorageError::ConstraintViolation(format!(
                    "person {} does not exist",
                    person_id
                )));
            }
            if member_ids[..i].contains(person_id) {
                return Err(StorageError::ConstraintViolation(format!(
                    "person {} listed twice for entry {}",
                    person_id, entry.entry_id
                )));
            }
        }

        tables.members.insert(entry.entry_id, member_ids.to_vec());
        tables.entries.push(entry);

        Ok(())
    }
}

#[async_trait]
impl Paginate<EntrySelection> for MemoryStore {
    type Row = LeaderboardEntryResponse;

    async fn count(&self, selection: &EntrySelection) -> Result<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .entries
            .iter()
            .filter(|e| selection.matches(e, tables.member_ids(e.entry_id)))
            .count();

        Ok(count as i64)
    }

    async fn fetch(
        &self,
        query: &PageQuery<EntrySelection>,
    ) -> Result<Vec<LeaderboardEntryResponse>> {
        let tables = self.tables.read().await;
        let entries = paged(tables.selected_entries(query), query.window)
            .map(|e| LeaderboardEntryResponse {
                entry_id: e.entry_id,
                score: e.score,
                team_size: e.team_size,
                members: tables.members_of(e.entry_id),
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn member_rank(
        &self,
        query: &PageQuery<EntrySelection>,
        person_id: Uuid,
    ) -> Result<Option<i64>> {
        let tables = self.tables.read().await;
        let rank = tables
            .selected_entries(query)
            .iter()
            .position(|e| tables.member_ids(e.entry_id).contains(&person_id))
            .map(|position| position as i64);

        Ok(rank)
    }
}

#[async_trait]
impl Paginate<PersonSelection> for MemoryStore {
    type Row = PersonResponse;

    async fn count(&self, selection: &PersonSelection) -> Result<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .people
            .iter()
            .filter(|p| selection.id.is_none_or(|id| p.person_id == id))
            .count();

        Ok(count as i64)
    }

    async fn fetch(&self, query: &PageQuery<PersonSelection>) -> Result<Vec<PersonResponse>> {
        let tables = self.tables.read().await;
        let people = paged(tables.selected_people(query), query.window)
            .map(|p| PersonResponse {
                person_id: p.person_id,
                name: p.name.clone(),
                leaderboard_entries: query
                    .selection
                    .include_entries
                    .then(|| tables.entries_of(p.person_id)),
            })
            .collect();

        Ok(people)
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn insert(&self, person: &Person) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.person(person.person_id).is_some() {
            return Err(StorageError::ConstraintViolation(format!(
                "person {} already exists",
                person.person_id
            )));
        }

        tables.people.push(person.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_person_is_rejected() {
        let store = MemoryStore::new();
        let person = Person::new("Grace");

        store.insert(&person).await.unwrap();
        let err = store.insert(&person).await.unwrap_err();

        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_entry_requires_existing_distinct_members() {
        let store = MemoryStore::new();
        let person = Person::new("Linus");
        store.insert(&person).await.unwrap();

        let unknown = store
            .add_entry(LeaderboardEntry::new(10, 1), &[Uuid::new_v4()])
            .await;
        assert!(matches!(unknown, Err(StorageError::ConstraintViolation(_))));

        let twice = store
            .add_entry(
                LeaderboardEntry::new(10, 2),
                &[person.person_id, person.person_id],
            )
            .await;
        assert!(matches!(twice, Err(StorageError::ConstraintViolation(_))));

        let count = Paginate::<EntrySelection>::count(&store, &EntrySelection::default())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_seeded_store_queries_scale() {
        use std::time::{Duration, Instant};

        use rand::SeedableRng;
        use rand::rngs::StdRng;

        use crate::dto::leaderboard::LeaderboardFilter;
        use crate::seed::NameGenerator;
        use crate::services::leaderboard::get_leaderboard_entries;

        let names = NameGenerator::from_word_lists("brave\nquiet\nswift", "otter\nheron").unwrap();
        let data = SeedData::generate(&mut StdRng::seed_from_u64(11), &names, 8_000);
        // The default listing only holds teams of four.
        let team_of_four = data
            .entries
            .iter()
            .find(|e| e.team_size == 4)
            .map(|e| e.entry_id)
            .unwrap();
        let target = data
            .members
            .iter()
            .find(|m| m.entry_id == team_of_four)
            .map(|m| m.person_id)
            .unwrap();
        let store = MemoryStore::from_seed(data);

        let started = Instant::now();
        let listing = get_leaderboard_entries(&store, &LeaderboardFilter::default())
            .await
            .unwrap();
        let filter = LeaderboardFilter {
            order_ascending: Some(false),
            find_person_id: Some(target),
            ..Default::default()
        };
        let found = get_leaderboard_entries(&store, &filter).await.unwrap();
        let elapsed = started.elapsed();

        assert!(listing.count > 0);
        assert!(
            found
                .values
                .iter()
                .any(|e| e.members.iter().any(|m| m.person_id == target))
        );
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_members_sorted_by_name() {
        let store = MemoryStore::new();
        let zed = Person::new("Zed");
        let amy = Person::new("Amy");
        store.insert(&zed).await.unwrap();
        store.insert(&amy).await.unwrap();
        store
            .add_entry(
                LeaderboardEntry::new(7, 2),
                &[zed.person_id, amy.person_id],
            )
            .await
            .unwrap();

        let query = PageQuery {
            selection: EntrySelection::default(),
            sort: None,
            window: Window::Page(0),
        };
        let entries = store.fetch(&query).await.unwrap();

        let names: Vec<&str> = entries[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }
}
