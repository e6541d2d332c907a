use crate::{
    auth::CurrentUser,
    dtos::submission::{
        GradeSubmissionRequest, SubmissionDetailResponse, SubmissionResponse, raw_score,
    },
    error::ApiResult,
    routes::parse_keys,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::{
    access::AccessService, grading::GradingService, submission::SubmissionService,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Get a submission with its answers. Visible to its student and the module's teachers.
#[utoipa::path(
    get,
    path = "/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission with answers", body = SubmissionDetailResponse),
        (status = 403, description = "Not the owner or a teacher of the module"),
        (status = 404, description = "Submission not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Submissions"
)]
pub async fn get_submission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SubmissionDetailResponse>> {
    let (submission, answers) = SubmissionService::find_with_answers(&state.db, id).await?;
    if submission.student_id != user.id {
        AccessService::require_grader_of(&state.db, &user, id).await?;
    }

    let max_possible_score = GradingService::max_possible_score(&state.db, submission.test_id).await?;

    Ok(Json(SubmissionDetailResponse {
        submission: submission.into(),
        max_possible_score,
        answers: answers.into_iter().map(Into::into).collect(),
    }))
}

/// Score the open-ended answers of a submission and finalize its result
#[utoipa::path(
    post,
    path = "/submissions/{id}/grade",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = GradeSubmissionRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmissionResponse),
        (status = 400, description = "Malformed answer id"),
        (status = 403, description = "Not a teacher of the module"),
        (status = 404, description = "Submission not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Submissions"
)]
pub async fn grade_submission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<GradeSubmissionRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    AccessService::require_grader_of(&state.db, &user, id).await?;

    let scores: HashMap<Uuid, String> = parse_keys(request.scores)?
        .into_iter()
        .filter_map(|(answer_id, value)| raw_score(&value).map(|raw| (answer_id, raw)))
        .collect();

    let submission = SubmissionService::teacher_grade(&state.db, id, &scores).await?;
    Ok(Json(submission.into()))
}
