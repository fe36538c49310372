use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Student;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output students as JSON or as a fixed-width table
pub fn output_students(output_format: &OutputFormat, students: &[Student]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(students)?);
        }
        OutputFormat::Text => {
            if students.is_empty() {
                println!("No students found");
                return Ok(());
            }
            println!("{}", student_header());
            for student in students {
                println!("{}", student_row(student));
            }
        }
    }
    Ok(())
}

fn student_header() -> String {
    format!(
        "{:>4}  {:<14} {:>5} {:>5} {:>6}  {:<10}  {}",
        "ID", "NOME", "IDADE", "SERIE", "NOTA", "NASCIMENTO", "ENDERECO"
    )
}

fn student_row(student: &Student) -> String {
    format!(
        "{:>4}  {:<14} {:>5} {:>5} {:>6.1}  {:<10}  {}",
        student.id,
        student.nome,
        student.idade,
        student.serie,
        student.nota_media,
        student.data_nascimento.format("%Y-%m-%d").to_string(),
        student.endereco
    )
}
