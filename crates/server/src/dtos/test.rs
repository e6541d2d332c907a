use crate::dtos::{access::AccessResponse, submission::SubmissionResponse};
use database::{
    entities::{questions, submissions},
    services::progress::TestView,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionResponse {
    pub label: String,
    pub text: String,
}

/// A question as shown to students, without its correct answer
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub id: String,
    pub text: String,
    /// `choice` or `open_ended`
    pub question_type: String,
    pub options: Vec<OptionResponse>,
    pub max_score: i32,
}

impl From<questions::Model> for QuestionResponse {
    fn from(question: questions::Model) -> Self {
        let options = question
            .options()
            .into_iter()
            .map(|(label, text)| OptionResponse {
                label: label.to_string(),
                text: text.to_string(),
            })
            .collect();

        Self {
            id: question.id.to_string(),
            text: question.text,
            question_type: question.question_type.to_string(),
            options,
            max_score: question.max_score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub passing_score: i32,
    pub questions: Vec<QuestionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestViewResponse {
    pub module_id: String,
    pub module_title: String,
    pub access: AccessResponse,
    pub test: Option<TestResponse>,
    /// The caller's most recent attempt, which is the result shown
    pub latest_submission: Option<SubmissionResponse>,
}

impl TestViewResponse {
    pub fn new(view: TestView, latest: Option<submissions::Model>) -> Self {
        let test = view.test.map(|(test, questions)| TestResponse {
            id: test.id.to_string(),
            title: test.title,
            description: test.description,
            passing_score: test.passing_score,
            questions: questions.into_iter().map(Into::into).collect(),
        });

        Self {
            module_id: view.module.id.to_string(),
            module_title: view.module.title,
            access: view.access.into(),
            test,
            latest_submission: latest.map(Into::into),
        }
    }
}
