use database::services::course::{CourseOutline, ModuleOutline};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseOutlineResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub modules: Vec<ModuleOutlineResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleOutlineResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lessons: Vec<LessonSummary>,
    pub test_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
    pub is_free_preview: bool,
}

impl From<ModuleOutline> for ModuleOutlineResponse {
    fn from(outline: ModuleOutline) -> Self {
        Self {
            id: outline.module.id.to_string(),
            title: outline.module.title,
            description: outline.module.description,
            lessons: outline
                .lessons
                .into_iter()
                .map(|lesson| LessonSummary {
                    id: lesson.id.to_string(),
                    title: lesson.title,
                    is_free_preview: lesson.is_free_preview,
                })
                .collect(),
            test_id: outline.test.map(|test| test.id.to_string()),
        }
    }
}

impl From<CourseOutline> for CourseOutlineResponse {
    fn from(outline: CourseOutline) -> Self {
        Self {
            id: outline.course.id.to_string(),
            title: outline.course.title,
            description: outline.course.description,
            modules: outline.modules.into_iter().map(Into::into).collect(),
        }
    }
}
