use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Student, StudentData, User};

/// Persistence boundary for users and students.
///
/// Apart from `seed`, every method touches at most one student row, so those
/// only need single-statement atomicity. `update_student` reports `NotFound` when the row
/// is gone and `Conflict` when the backend rejected the write for any other
/// concurrency reason.
#[async_trait]
pub trait Store: Send + Sync {
    /// Prepare tables or in-memory structures. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DatabaseError>;

    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError>;

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DatabaseError>;

    async fn insert_student(&self, data: StudentData) -> Result<Student, DatabaseError>;

    async fn update_student(&self, id: i32, data: StudentData) -> Result<(), DatabaseError>;

    async fn delete_student(&self, id: i32) -> Result<(), DatabaseError>;

    /// Insert `users` and `students` in one unit, only if no student exists yet.
    /// Returns false when the store was already populated. Concurrent callers
    /// seed at most once and a failure leaves nothing behind.
    async fn seed(&self, users: &[(&str, &str)], students: Vec<StudentData>) -> Result<bool, DatabaseError>;

    fn backend_name(&self) -> &'static str;
}
