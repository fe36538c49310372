use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and print a bearer token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, env = "STUDENTS_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },
}

pub async fn handle(cmd: AuthCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let login = client.login(&username, &password).await?;
            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    &format!("Logged in as {}", login.username),
                    Some(json!({
                        "token": login.token,
                        "username": login.username,
                        "expiresAt": login.expires_at,
                    })),
                ),
                OutputFormat::Text => {
                    output_success(
                        &output_format,
                        &format!("Logged in as {} (expires {})", login.username, login.expires_at),
                        None,
                    )?;
                    println!("export STUDENTS_TOKEN={}", login.token);
                    Ok(())
                }
            }
        }
    }
}
