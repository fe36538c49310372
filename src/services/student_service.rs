use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::database::models::{Student, StudentPayload};
use crate::database::{DatabaseError, Store};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// CRUD over student records. Every operation takes the verified caller and
/// the store handle explicitly; nothing is read from ambient request state.
pub struct StudentService;

impl StudentService {
    pub async fn list_all(store: &dyn Store, caller: &AuthUser) -> Result<Vec<Student>, ApiError> {
        let students = store.list_students().await?;
        debug!("{} listed {} students", caller.username, students.len());
        Ok(students)
    }

    pub async fn get_by_id(store: &dyn Store, caller: &AuthUser, id: i32) -> Result<Student, ApiError> {
        debug!("{} reading student {}", caller.username, id);
        store
            .get_student(id)
            .await?
            .ok_or_else(|| ApiError::student_not_found(id))
    }

    /// Insert a new student. Any id in the payload is ignored; the store assigns one.
    pub async fn create(
        store: &dyn Store,
        caller: &AuthUser,
        payload: StudentPayload,
    ) -> Result<Student, ApiError> {
        let data = payload.validate().map_err(invalid_fields)?;
        let student = store.insert_student(data).await?;
        info!("{} created student {}", caller.username, student.id);
        Ok(student)
    }

    /// Replace every field of an existing student
    pub async fn update(
        store: &dyn Store,
        caller: &AuthUser,
        id: i32,
        payload: StudentPayload,
    ) -> Result<(), ApiError> {
        if payload.id != Some(id) {
            return Err(ApiError::bad_request("Student ID does not match"));
        }

        let data = payload.validate().map_err(invalid_fields)?;

        if store.get_student(id).await?.is_none() {
            return Err(ApiError::student_not_found(id));
        }

        match store.update_student(id, data).await {
            Ok(()) => {
                info!("{} updated student {}", caller.username, id);
                Ok(())
            }
            Err(DatabaseError::NotFound(_)) => Err(ApiError::student_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(store: &dyn Store, caller: &AuthUser, id: i32) -> Result<(), ApiError> {
        store.delete_student(id).await?;
        info!("{} deleted student {}", caller.username, id);
        Ok(())
    }
}

fn invalid_fields(field_errors: BTreeMap<String, String>) -> ApiError {
    ApiError::validation_error("One or more validation errors occurred", Some(field_errors))
}
