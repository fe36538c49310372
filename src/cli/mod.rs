pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "students")]
#[command(about = "Command-line client for the Student Management API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "STUDENTS_API_URL",
        default_value = "http://localhost:5001",
        help = "API base URL"
    )]
    pub server: String,

    #[arg(long, global = true, env = "STUDENTS_TOKEN", hide_env_values = true, help = "Bearer token from `students auth login`")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Student record operations")]
    Student {
        #[command(subcommand)]
        cmd: commands::student::StudentCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = client::ApiClient::new(&cli.server, cli.token.clone())?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Student { cmd } => commands::student::handle(cmd, &client, output_format).await,
    }
}
