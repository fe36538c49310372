use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use student_management_api::config::{self, StoreBackend};
use student_management_api::database::seed::{seed_if_empty, SeedOutcome};
use student_management_api::database::DatabaseManager;
use student_management_api::{is_production, serve, AppState};

#[derive(Parser)]
#[command(name = "student-api")]
#[command(about = "Student Management API server")]
#[command(version)]
struct Args {
    #[arg(long, global = true, help = "Override the listen port")]
    port: Option<u16>,

    #[arg(long, global = true, help = "Use the in-memory store regardless of DATABASE_URL")]
    memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Create tables and load seed data, then exit")]
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.database.backend = StoreBackend::Memory;
    }

    tracing::info!(
        "Starting Student Management API in {:?} mode ({:?} store)",
        config.environment,
        config.database.backend
    );
    if config.uses_default_jwt_key() {
        if is_production!() {
            anyhow::bail!("JWT_KEY must be set in production");
        }
        tracing::warn!("Using the built-in JWT key; set JWT_KEY outside development");
    }
    tracing::warn!("User passwords are stored and compared in plaintext");

    let store = DatabaseManager::connect(&config).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Seed => {
            match seed_if_empty(store.as_ref()).await? {
                SeedOutcome::Seeded { users, students } => {
                    println!("Seeded {} users and {} students", users, students)
                }
                SeedOutcome::AlreadyPopulated => println!("Store already populated; nothing to do"),
            }
            Ok(())
        }
        Command::Serve => {
            if config.seed.seed_on_startup {
                seed_if_empty(store.as_ref()).await?;
            }
            let state = AppState::new(config, store)?;
            tracing::info!("Bearer tokens expire after {} minutes", state.tokens.lifetime().num_minutes());
            serve(state).await
        }
    }
}
