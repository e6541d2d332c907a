use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};
use std::collections::HashMap;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub mod course;
pub mod health;
pub mod lesson;
pub mod profile;
pub mod submission;
pub mod teacher;

/// Every endpoint that requires an authenticated caller
pub fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(course::get_course_outline))
        .routes(routes!(lesson::get_lesson))
        .routes(routes!(lesson::complete_lesson))
        .routes(routes!(test::get_module_test))
        .routes(routes!(test::submit_test))
        .routes(routes!(profile::get_my_progress))
        .routes(routes!(submission::get_submission))
        .routes(routes!(submission::grade_submission))
        .routes(routes!(teacher::list_students))
        .routes(routes!(teacher::get_student, teacher::remove_student))
}

/// Parses map keys as UUIDs, rejecting the request on the first malformed key
fn parse_keys<V>(entries: HashMap<String, V>) -> ApiResult<HashMap<Uuid, V>> {
    entries
        .into_iter()
        .map(|(key, value)| {
            Uuid::parse_str(&key)
                .map(|id| (id, value))
                .map_err(|_| ApiError::BadRequest(format!("invalid id {key}")))
        })
        .collect()
}
