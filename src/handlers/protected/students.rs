// handlers/protected/students.rs - /api/students[/:id] handlers
//
// All routes sit behind jwt_auth_middleware, so an AuthUser extension is
// always present by the time these run.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::database::models::{Student, StudentPayload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::StudentService;

/// GET /api/students - list every student
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Vec<Student>> {
    let students = StudentService::list_all(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(students))
}

/// GET /api/students/:id - single student
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Student> {
    let Path(id) = id?;
    let student = StudentService::get_by_id(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(student))
}

/// POST /api/students - create, 201 with Location
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<Student> {
    let Json(payload) = payload?;
    let student = StudentService::create(state.store.as_ref(), &caller, payload).await?;
    let location = format!("/api/students/{}", student.id);
    Ok(ApiResponse::created(student, location))
}

/// PUT /api/students/:id - full replacement, 204
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    StudentService::update(state.store.as_ref(), &caller, id, payload).await?;
    Ok(ApiResponse::no_content())
}

/// DELETE /api/students/:id - 204
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    StudentService::delete(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::no_content())
}
