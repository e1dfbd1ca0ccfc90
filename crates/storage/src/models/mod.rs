mod leaderboard_entry;
mod person;

pub use leaderboard_entry::{EntryMember, LeaderboardEntry};
pub use person::Person;
