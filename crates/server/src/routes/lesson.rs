use crate::{
    auth::CurrentUser,
    dtos::lesson::{LessonResponse, ProgressResponse},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::progress::ProgressService;
use uuid::Uuid;

/// Open a lesson. Locked lessons come back without content and with the reason.
#[utoipa::path(
    get,
    path = "/lessons/{id}",
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson with the caller's access and progress", body = LessonResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Lessons"
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LessonResponse>> {
    let view = ProgressService::view_lesson(&state.db, user.id, id).await?;
    Ok(Json(view.into()))
}

/// Mark a lesson as passed
#[utoipa::path(
    post,
    path = "/lessons/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson marked complete", body = ProgressResponse),
        (status = 403, description = "Lesson is locked"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Lessons"
)]
pub async fn complete_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProgressResponse>> {
    let (row, lesson) = ProgressService::complete_lesson(&state.db, user.id, id).await?;
    Ok(Json(ProgressResponse::new(row, &lesson)))
}
