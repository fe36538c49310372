use std::io::Read;

use anyhow::Context;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_students, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum StudentCommands {
    #[command(about = "List all students")]
    List,

    #[command(about = "Show one student")]
    Get {
        #[arg(help = "Student ID")]
        id: i32,
    },

    #[command(about = "Create student from JSON on stdin")]
    Create,

    #[command(about = "Replace student from JSON on stdin")]
    Update {
        #[arg(help = "Student ID to update")]
        id: i32,
    },

    #[command(about = "Delete student")]
    Delete {
        #[arg(help = "Student ID to delete")]
        id: i32,
    },
}

pub async fn handle(cmd: StudentCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        StudentCommands::List => {
            let students = client.list_students().await?;
            output_students(&output_format, &students)
        }
        StudentCommands::Get { id } => {
            let student = client.get_student(id).await?;
            output_students(&output_format, std::slice::from_ref(&student))
        }
        StudentCommands::Create => {
            let body = read_stdin_json()?;
            let student = client.create_student(&body).await?;
            output_success(
                &output_format,
                &format!("Created student {}", student.id),
                Some(json!({ "student": student })),
            )
        }
        StudentCommands::Update { id } => {
            let body = with_path_id(read_stdin_json()?, id)?;
            client.update_student(id, &body).await?;
            output_success(&output_format, &format!("Updated student {}", id), None)
        }
        StudentCommands::Delete { id } => {
            client.delete_student(id).await?;
            output_success(&output_format, &format!("Deleted student {}", id), None)
        }
    }
}

fn read_stdin_json() -> anyhow::Result<Value> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    serde_json::from_str(&input).context("stdin is not valid JSON")
}

/// Fill in the body id from the path when absent; the server requires them to match
fn with_path_id(mut body: Value, id: i32) -> anyhow::Result<Value> {
    let object = body
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("student JSON must be an object"))?;
    object.entry("id").or_insert(json!(id));
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_id_fills_missing_body_id() {
        let body = with_path_id(json!({ "nome": "Ana" }), 4).unwrap();
        assert_eq!(body["id"], 4);
    }

    #[test]
    fn explicit_body_id_is_left_for_the_server_to_check() {
        let body = with_path_id(json!({ "id": 9 }), 4).unwrap();
        assert_eq!(body["id"], 9);
        assert!(with_path_id(json!([1, 2]), 4).is_err());
    }
}
