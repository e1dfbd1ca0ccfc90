//! Deterministic fixture generation.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! always produces the same people, entries and memberships.

use rand::Rng;
use rand::seq::index;
use uuid::{Builder, Uuid};

use crate::error::{Result, StorageError};
use crate::models::{EntryMember, LeaderboardEntry, Person};

/// Builds names like `BraveQuietOtter` from two word lists.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    adjectives: Vec<String>,
    animals: Vec<String>,
}

impl NameGenerator {
    /// Parses newline-separated word lists. Blank lines are skipped and each
    /// word is title-cased.
    pub fn from_word_lists(adjectives: &str, animals: &str) -> Result<Self> {
        let adjectives = parse_words(adjectives);
        let animals = parse_words(animals);

        if adjectives.len() < 2 {
            return Err(StorageError::InvalidSeed(
                "at least two adjectives are required".to_string(),
            ));
        }
        if animals.is_empty() {
            return Err(StorageError::InvalidSeed(
                "at least one animal is required".to_string(),
            ));
        }

        Ok(Self {
            adjectives,
            animals,
        })
    }

    /// Two different adjectives followed by an animal.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let picked = index::sample(rng, self.adjectives.len(), 2);
        let animal = &self.animals[rng.gen_range(0..self.animals.len())];

        format!(
            "{}{}{}",
            self.adjectives[picked.index(0)],
            self.adjectives[picked.index(1)],
            animal
        )
    }
}

fn parse_words(list: &str) -> Vec<String> {
    list.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub people: Vec<Person>,
    pub entries: Vec<LeaderboardEntry>,
    pub members: Vec<EntryMember>,
}

impl SeedData {
    /// Generates `people` persons and as many entries.
    ///
    /// Each entry gets a score in `0..i32::MAX`, a team size in `1..=4` and
    /// that many distinct members (fewer if there are not enough people).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, names: &NameGenerator, people: usize) -> Self {
        let people: Vec<Person> = (0..people)
            .map(|_| Person::with_id(random_uuid(rng), names.generate(rng)))
            .collect();

        let mut entries = Vec::with_capacity(people.len());
        let mut members = Vec::new();

        for _ in 0..people.len() {
            let entry = LeaderboardEntry {
                entry_id: random_uuid(rng),
                score: rng.gen_range(0..i32::MAX),
                team_size: rng.gen_range(1..=4),
            };

            let team = (entry.team_size as usize).min(people.len());
            for picked in index::sample(rng, people.len(), team) {
                members.push(EntryMember {
                    entry_id: entry.entry_id,
                    person_id: people[picked].person_id,
                });
            }

            entries.push(entry);
        }

        Self {
            people,
            entries,
            members,
        }
    }
}
