use crate::{
    entities::{module_teachers, modules, submissions, tests, users},
    error::{ServiceError, ServiceResult},
};
use log::debug;
use models::access::is_teacher_of;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

/// Role and module-assignment checks, invoked explicitly at each entry point
pub struct AccessService;

impl AccessService {
    pub async fn find_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> ServiceResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }

    /// Ids of the teachers assigned to a module
    pub async fn module_teacher_ids<C: ConnectionTrait>(
        db: &C,
        module_id: Uuid,
    ) -> Result<Vec<Uuid>, DbErr> {
        module_teachers::Entity::find()
            .select_only()
            .column(module_teachers::Column::UserId)
            .filter(module_teachers::Column::ModuleId.eq(module_id))
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }

    /// Ids of the modules a user is assigned to teach
    pub async fn taught_module_ids<C: ConnectionTrait>(
        db: &C,
        teacher: &users::Model,
    ) -> Result<Vec<Uuid>, DbErr> {
        let modules = teacher.find_related(modules::Entity).all(db).await?;
        Ok(modules.into_iter().map(|module| module.id).collect())
    }

    pub async fn is_teacher_of_module<C: ConnectionTrait>(
        db: &C,
        user: &users::Model,
        module_id: Uuid,
    ) -> Result<bool, DbErr> {
        let teachers = Self::module_teacher_ids(db, module_id).await?;
        Ok(is_teacher_of(&user.id, user.role, &teachers))
    }

    /// Rejects anyone who does not hold the teacher role
    pub fn require_teacher(user: &users::Model) -> ServiceResult<()> {
        if user.role.is_teacher() {
            Ok(())
        } else {
            debug!("User {} with role {} denied teacher access", user.id, user.role);
            Err(ServiceError::forbidden("teacher role required"))
        }
    }

    /// Rejects anyone who is not a teacher assigned to the module
    pub async fn require_teacher_of_module<C: ConnectionTrait>(
        db: &C,
        user: &users::Model,
        module_id: Uuid,
    ) -> ServiceResult<()> {
        Self::require_teacher(user)?;

        if Self::is_teacher_of_module(db, user, module_id).await? {
            Ok(())
        } else {
            debug!("Teacher {} is not assigned to module {module_id}", user.id);
            Err(ServiceError::forbidden("not assigned to this module"))
        }
    }

    /// Rejects anyone who is not a teacher of the module owning the submission's test
    pub async fn require_grader_of<C: ConnectionTrait>(
        db: &C,
        user: &users::Model,
        submission_id: Uuid,
    ) -> ServiceResult<submissions::Model> {
        let submission = submissions::Entity::find_by_id(submission_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("submission", submission_id))?;

        let test = tests::Entity::find_by_id(submission.test_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("test", submission.test_id))?;

        Self::require_teacher_of_module(db, user, test.module_id).await?;
        Ok(submission)
    }
}
