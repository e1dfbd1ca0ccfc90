pub mod leaderboard;
pub mod people;
