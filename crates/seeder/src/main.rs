use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use storage::{
    Database,
    dto::leaderboard::LeaderboardFilter,
    repository::{memory::MemoryStore, seed::SeedRepository},
    seed::{NameGenerator, SeedData},
    services::leaderboard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADJECTIVES: &str = include_str!("../data/adjectives.txt");
const DEFAULT_ANIMALS: &str = include_str!("../data/animals.txt");

#[derive(Parser)]
#[command(name = "leaderboard-seed")]
#[command(about = "Generates random people and leaderboard entries", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Number of people to create; the same number of entries is created
    #[arg(long, default_value_t = 50_000)]
    people: usize,

    /// Seed for the random generator, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Newline-separated adjective list
    #[arg(long)]
    adjectives: Option<PathBuf>,

    /// Newline-separated animal list
    #[arg(long)]
    animals: Option<PathBuf>,

    /// Generate into memory and print the first leaderboard page instead of writing
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("seeder={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let adjectives = read_word_list(cli.adjectives.as_deref(), DEFAULT_ADJECTIVES)?;
    let animals = read_word_list(cli.animals.as_deref(), DEFAULT_ANIMALS)?;
    let names = NameGenerator::from_word_lists(&adjectives, &animals)
        .context("Invalid word lists")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, people = cli.people, "Generating seed data");

    let mut rng = StdRng::seed_from_u64(seed);
    let data = SeedData::generate(&mut rng, &names, cli.people);
    tracing::info!(
        people = data.people.len(),
        entries = data.entries.len(),
        members = data.members.len(),
        "Seed data generated"
    );

    if cli.dry_run {
        return preview(data).await;
    }

    let database_url = cli
        .database_url
        .context("DATABASE_URL is required unless --dry-run is set")?;

    let db = Database::new(&database_url)
        .await
        .context("Failed to initialize database")?;

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    SeedRepository::new(db.pool())
        .insert(&data)
        .await
        .context("Failed to insert seed data")?;

    tracing::info!("Seeding completed");

    Ok(())
}

fn read_word_list(path: Option<&Path>, fallback: &str) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display())),
        None => Ok(fallback.to_string()),
    }
}

async fn preview(data: SeedData) -> anyhow::Result<()> {
    let store = MemoryStore::from_seed(data);
    let filter = LeaderboardFilter {
        order_ascending: Some(false),
        ..Default::default()
    };
    let page = leaderboard::get_leaderboard_entries(&store, &filter).await?;

    tracing::info!(count = page.count, "Top teams of four (dry run)");
    for entry in page.values {
        let members: Vec<&str> = entry.members.iter().map(|m| m.name.as_str()).collect();
        tracing::info!("{:>10}  {}", entry.score, members.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_word_lists_are_usable() {
        assert!(NameGenerator::from_word_lists(DEFAULT_ADJECTIVES, DEFAULT_ANIMALS).is_ok());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["leaderboard-seed", "--dry-run", "--seed", "9"]).unwrap();
        assert_eq!(cli.people, 50_000);
        assert_eq!(cli.seed, Some(9));
        assert!(cli.dry_run);
        assert!(cli.adjectives.is_none());
    }

    #[test]
    fn test_missing_word_list_file_is_an_error() {
        let result = read_word_list(Some(Path::new("/nonexistent/words.txt")), "");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_preview() {
        let names = NameGenerator::from_word_lists(DEFAULT_ADJECTIVES, DEFAULT_ANIMALS).unwrap();
        let data = SeedData::generate(&mut StdRng::seed_from_u64(5), &names, 100);
        preview(data).await.unwrap();
    }
}
