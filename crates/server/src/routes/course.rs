use crate::{
    auth::CurrentUser, dtos::course::CourseOutlineResponse, error::ApiResult, state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::course::CourseService;
use uuid::Uuid;

/// Get a course's modules with their lessons and tests, in order
#[utoipa::path(
    get,
    path = "/courses/{id}/outline",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course outline", body = CourseOutlineResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn get_course_outline(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CourseOutlineResponse>> {
    let outline = CourseService::get_outline(&state.db, id).await?;
    Ok(Json(outline.into()))
}
