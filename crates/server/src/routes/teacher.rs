use crate::{
    auth::CurrentUser,
    dtos::student::{RemovalResponse, StudentDetailResponse, StudentQueryParams, StudentResponse},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::roster::RosterService;
use uuid::Uuid;

/// Students with progress in the caller's modules
#[utoipa::path(
    get,
    path = "/teacher/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Students ordered by username", body = Vec<StudentResponse>),
        (status = 403, description = "Teacher role required"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Teacher"
)]
pub async fn list_students(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<StudentQueryParams>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = RosterService::teacher_students(&state.db, &user, params.q.as_deref()).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// A student's progress and submissions within the caller's modules
#[utoipa::path(
    get,
    path = "/teacher/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student detail", body = StudentDetailResponse),
        (status = 403, description = "Teacher role required"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Teacher"
)]
pub async fn get_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StudentDetailResponse>> {
    let detail = RosterService::student_detail(&state.db, &user, id).await?;
    Ok(Json(detail.into()))
}

/// Delete a student's progress and submissions in the caller's modules
#[utoipa::path(
    delete,
    path = "/teacher/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Rows removed", body = RemovalResponse),
        (status = 403, description = "Teacher role required"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Teacher"
)]
pub async fn remove_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RemovalResponse>> {
    let summary = RosterService::remove_student_data(&state.db, &user, id).await?;
    Ok(Json(summary.into()))
}
