use crate::dtos::{lesson::ProgressResponse, submission::SubmissionResponse};
use database::{
    entities::users,
    services::roster::{RemovalSummary, StudentDetail},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StudentQueryParams {
    /// Case-insensitive match on username or email
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<users::Model> for StudentResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSubmissionResponse {
    pub test_title: String,
    pub submission: SubmissionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    pub student: StudentResponse,
    pub progress: Vec<ProgressResponse>,
    pub submissions: Vec<StudentSubmissionResponse>,
}

impl From<StudentDetail> for StudentDetailResponse {
    fn from(detail: StudentDetail) -> Self {
        Self {
            student: detail.student.into(),
            progress: detail
                .progress
                .into_iter()
                .map(|(row, lesson)| ProgressResponse::new(row, &lesson))
                .collect(),
            submissions: detail
                .submissions
                .into_iter()
                .map(|(submission, test)| StudentSubmissionResponse {
                    test_title: test.title,
                    submission: submission.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemovalResponse {
    pub progress: u64,
    pub submissions: u64,
    pub answers: u64,
}

impl From<RemovalSummary> for RemovalResponse {
    fn from(summary: RemovalSummary) -> Self {
        Self {
            progress: summary.progress,
            submissions: summary.submissions,
            answers: summary.answers,
        }
    }
}
