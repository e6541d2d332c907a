use crate::{auth::CurrentUser, dtos::lesson::ProgressResponse, error::ApiResult, state::AppState};
use axum::{Json, extract::State};
use database::services::progress::ProgressService;

/// The caller's lesson progress, in lesson order
#[utoipa::path(
    get,
    path = "/me/progress",
    responses(
        (status = 200, description = "Progress records", body = Vec<ProgressResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Profile"
)]
pub async fn get_my_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<ProgressResponse>>> {
    let rows = ProgressService::student_progress(&state.db, user.id).await?;

    Ok(Json(
        rows.into_iter()
            .map(|(row, lesson)| ProgressResponse::new(row, &lesson))
            .collect(),
    ))
}
