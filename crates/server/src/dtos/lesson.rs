use crate::dtos::access::AccessResponse;
use chrono::NaiveDateTime;
use database::{
    entities::{lessons, progress},
    services::progress::LessonView,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub lesson_id: String,
    pub lesson_title: String,
    pub passed: bool,
    pub completed_at: Option<NaiveDateTime>,
}

impl ProgressResponse {
    pub fn new(row: progress::Model, lesson: &lessons::Model) -> Self {
        Self {
            lesson_id: lesson.id.to_string(),
            lesson_title: lesson.title.clone(),
            passed: row.passed,
            completed_at: row.completed_at,
        }
    }
}

/// Lesson materials; only filled in when the lesson is accessible
#[derive(Debug, Serialize, ToSchema)]
pub struct LessonContent {
    pub content: String,
    pub video_url: Option<String>,
    pub video_file: Option<String>,
    pub image_file: Option<String>,
    pub pdf_file: Option<String>,
    pub assignment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub is_free_preview: bool,
    pub access: AccessResponse,
    pub content: Option<LessonContent>,
    pub progress: Option<ProgressResponse>,
}

impl From<LessonView> for LessonResponse {
    fn from(view: LessonView) -> Self {
        let LessonView {
            lesson,
            access,
            progress,
        } = view;

        let progress = progress.map(|row| ProgressResponse::new(row, &lesson));
        let content = access.is_granted().then(|| LessonContent {
            content: lesson.content,
            video_url: lesson.video_url,
            video_file: lesson.video_file,
            image_file: lesson.image_file,
            pdf_file: lesson.pdf_file,
            assignment: lesson.assignment,
        });

        Self {
            id: lesson.id.to_string(),
            module_id: lesson.module_id.to_string(),
            title: lesson.title,
            is_free_preview: lesson.is_free_preview,
            access: access.into(),
            content,
            progress,
        }
    }
}
