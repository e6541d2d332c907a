use crate::{
    entities::{courses, lessons, modules, tests},
    error::{ServiceError, ServiceResult},
    services::progress::ProgressService,
};
use futures::future::try_join_all;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ModuleOutline {
    pub module: modules::Model,
    /// In creation order
    pub lessons: Vec<lessons::Model>,
    pub test: Option<tests::Model>,
}

#[derive(Debug, Clone)]
pub struct CourseOutline {
    pub course: courses::Model,
    /// In creation order
    pub modules: Vec<ModuleOutline>,
}

pub struct CourseService;

impl CourseService {
    /// Get a course with its modules, their lessons and tests
    pub async fn get_outline(db: &DatabaseConnection, course_id: Uuid) -> ServiceResult<CourseOutline> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", course_id))?;

        let modules = modules::Entity::find()
            .filter(modules::Column::CourseId.eq(course_id))
            .order_by_asc(modules::Column::CreatedAt)
            .order_by_asc(modules::Column::Id)
            .all(db)
            .await?;

        let module_futures = modules.into_iter().map(|module| async move {
            let lessons = ProgressService::module_lessons(db, module.id).await?;
            let test = ProgressService::find_test_for_module(db, module.id).await?;

            Ok::<_, ServiceError>(ModuleOutline {
                module,
                lessons,
                test,
            })
        });

        let modules = try_join_all(module_futures).await?;
        Ok(CourseOutline { course, modules })
    }
}
