pub mod common;
pub mod leaderboard;
pub mod person;
