use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Student, StudentData, User};
use crate::database::store::Store;

const STUDENT_COLUMNS: &str =
    "id, nome, idade, serie, nota_media, endereco, nome_pai, nome_mae, data_nascimento";

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

const CREATE_STUDENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        nome TEXT NOT NULL,
        idade INTEGER NOT NULL,
        serie INTEGER NOT NULL,
        nota_media DOUBLE PRECISION NOT NULL,
        endereco TEXT NOT NULL,
        nome_pai TEXT NOT NULL,
        nome_mae TEXT NOT NULL,
        data_nascimento DATE NOT NULL
    )
"#;

const INSERT_USER: &str =
    "INSERT INTO users (username, password) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING";

const INSERT_STUDENT: &str =
    "INSERT INTO students (nome, idade, serie, nota_media, endereco, nome_pai, nome_mae, data_nascimento)
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

/// Classify an UPDATE that did not write exactly one row. A concurrent delete
/// explains it; anything else is a conflict.
fn missed_update(id: i32, rows_affected: u64, still_exists: bool) -> DatabaseError {
    if still_exists {
        DatabaseError::Conflict(format!("update of student {} affected {} rows", id, rows_affected))
    } else {
        DatabaseError::NotFound(id)
    }
}

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_STUDENTS).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let sql = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);
        let students = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(students)
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DatabaseError> {
        let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn insert_student(&self, data: StudentData) -> Result<Student, DatabaseError> {
        let sql = format!("{} RETURNING {}", INSERT_STUDENT, STUDENT_COLUMNS);
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&data.nome)
            .bind(data.idade)
            .bind(data.serie)
            .bind(data.nota_media)
            .bind(&data.endereco)
            .bind(&data.nome_pai)
            .bind(&data.nome_mae)
            .bind(data.data_nascimento)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "insert student"))?;
        Ok(student)
    }

    async fn update_student(&self, id: i32, data: StudentData) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE students
             SET nome = $2, idade = $3, serie = $4, nota_media = $5,
                 endereco = $6, nome_pai = $7, nome_mae = $8, data_nascimento = $9
             WHERE id = $1",
        )
        .bind(id)
        .bind(&data.nome)
        .bind(data.idade)
        .bind(data.serie)
        .bind(data.nota_media)
        .bind(&data.endereco)
        .bind(&data.nome_pai)
        .bind(&data.nome_mae)
        .bind(data.data_nascimento)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, format!("update student {}", id)))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let still_exists = self.get_student(id).await?.is_some();
        Err(missed_update(id, result.rows_affected(), still_exists))
    }

    async fn delete_student(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, format!("delete student {}", id)))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }

    async fn seed(&self, users: &[(&str, &str)], students: Vec<StudentData>) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // EXCLUSIVE blocks other seeders and writers until commit; plain reads proceed
        sqlx::query("LOCK TABLE students IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for &(username, password) in users {
            sqlx::query(INSERT_USER)
                .bind(username)
                .bind(password)
                .execute(&mut *tx)
                .await?;
        }

        for data in &students {
            sqlx::query(INSERT_STUDENT)
                .bind(&data.nome)
                .bind(data.idade)
                .bind(data.serie)
                .bind(data.nota_media)
                .bind(&data.endereco)
                .bind(&data.nome_pai)
                .bind(&data.nome_mae)
                .bind(data.data_nascimento)
                .execute(&mut *tx)
                .await
                .map_err(|e| DatabaseError::from_write(e, "seed students"))?;
        }

        tx.commit().await?;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
