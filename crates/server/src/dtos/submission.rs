use chrono::NaiveDateTime;
use database::entities::{answers, questions, submissions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Answers keyed by question id
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitTestRequest {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

/// Scores keyed by answer id. Values may be numbers or strings;
/// anything that is not a whole number within range is stored as 0.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeSubmissionRequest {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub scores: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub id: String,
    pub test_id: String,
    pub student_id: String,
    /// Percentage of the test's maximum score
    pub score: f64,
    pub passed: bool,
    /// `pending` until every open-ended answer has been graded
    pub status: String,
    pub submitted_at: NaiveDateTime,
}

impl From<submissions::Model> for SubmissionResponse {
    fn from(submission: submissions::Model) -> Self {
        Self {
            id: submission.id.to_string(),
            test_id: submission.test_id.to_string(),
            student_id: submission.student_id.to_string(),
            score: submission.score,
            passed: submission.passed,
            status: submission.status.to_string(),
            submitted_at: submission.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub id: String,
    pub question_id: String,
    pub question_text: String,
    pub question_type: String,
    pub answer_text: String,
    pub score: i32,
    pub max_score: i32,
}

impl From<(answers::Model, questions::Model)> for AnswerResponse {
    fn from((answer, question): (answers::Model, questions::Model)) -> Self {
        Self {
            id: answer.id.to_string(),
            question_id: question.id.to_string(),
            question_text: question.text,
            question_type: question.question_type.to_string(),
            answer_text: answer.answer_text,
            score: answer.score,
            max_score: question.max_score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionDetailResponse {
    pub submission: SubmissionResponse,
    pub max_possible_score: i64,
    pub answers: Vec<AnswerResponse>,
}

/// Text form of a submitted score, `None` when it cannot be read as one
pub fn raw_score(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
