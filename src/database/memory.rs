use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Student, StudentData, User};
use crate::database::store::Store;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    students: BTreeMap<i32, Student>,
    next_student_id: i32,
    next_user_id: i32,
}

impl Tables {
    fn insert_user(&mut self, username: &str, password: &str) {
        if self.users.iter().any(|u| u.username == username) {
            return;
        }
        let id = self.next_user_id;
        self.next_user_id += 1;
        self.users.push(User::new(id, username, password));
    }

    fn insert_student(&mut self, data: StudentData) -> Student {
        let id = self.next_student_id;
        self.next_student_id += 1;
        let student = Student::from_data(id, data);
        self.students.insert(id, student.clone());
        student
    }
}

/// In-process store used for development and tests.
/// Ids are never reused, matching a postgres SERIAL column.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_student_id: 1,
                next_user_id: 1,
                ..Default::default()
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.matches(username, password)).cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().cloned().collect())
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DatabaseError> {
        Ok(self.tables.read().await.students.get(&id).cloned())
    }

    async fn insert_student(&self, data: StudentData) -> Result<Student, DatabaseError> {
        Ok(self.tables.write().await.insert_student(data))
    }

    async fn seed(&self, users: &[(&str, &str)], students: Vec<StudentData>) -> Result<bool, DatabaseError> {
        // One write guard covers the emptiness check and every insert
        let mut tables = self.tables.write().await;
        if !tables.students.is_empty() {
            return Ok(false);
        }
        for &(username, password) in users {
            tables.insert_user(username, password);
        }
        for data in students {
            tables.insert_student(data);
        }
        Ok(true)
    }

    async fn update_student(&self, id: i32, data: StudentData) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.students.get_mut(&id) {
            Some(existing) => {
                existing.overwrite(data);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(id)),
        }
    }

    async fn delete_student(&self, id: i32) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables
            .students
            .remove(&id)
            .map(|_| ())
            .ok_or(DatabaseError::NotFound(id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
