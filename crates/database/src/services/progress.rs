use crate::{
    entities::{lessons, modules, progress, questions, tests},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::{debug, info};
use models::access::{Access, Unavailable, lesson_access, test_access};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::OnConflict,
};
use std::collections::HashSet;
use uuid::Uuid;

/// A lesson as seen by one student
#[derive(Debug, Clone)]
pub struct LessonView {
    pub lesson: lessons::Model,
    pub access: Access,
    /// Present whenever access is granted
    pub progress: Option<progress::Model>,
}

/// A module's test as seen by one student
#[derive(Debug, Clone)]
pub struct TestView {
    pub module: modules::Model,
    pub access: Access,
    /// The test and its questions, present only when access is granted
    pub test: Option<(tests::Model, Vec<questions::Model>)>,
}

/// Decides lesson and test accessibility from accumulated progress
pub struct ProgressService;

impl ProgressService {
    /// Lessons of a module in creation order
    pub async fn module_lessons<C: ConnectionTrait>(
        db: &C,
        module_id: Uuid,
    ) -> Result<Vec<lessons::Model>, DbErr> {
        lessons::Entity::find()
            .filter(lessons::Column::ModuleId.eq(module_id))
            .order_by_asc(lessons::Column::CreatedAt)
            .order_by_asc(lessons::Column::Id)
            .all(db)
            .await
    }

    /// The subset of `lesson_ids` the student has passed
    async fn passed_lessons<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_ids: Vec<Uuid>,
    ) -> Result<HashSet<Uuid>, DbErr> {
        if lesson_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = progress::Entity::find()
            .filter(progress::Column::StudentId.eq(student_id))
            .filter(progress::Column::LessonId.is_in(lesson_ids))
            .filter(progress::Column::Passed.eq(true))
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|row| row.lesson_id).collect())
    }

    pub async fn can_access_lesson<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson: &lessons::Model,
    ) -> Result<Access, DbErr> {
        if lesson.is_free_preview {
            return Ok(Access::Granted);
        }

        let ordered: Vec<Uuid> = Self::module_lessons(db, lesson.module_id)
            .await?
            .into_iter()
            .map(|lesson| lesson.id)
            .collect();
        let passed = Self::passed_lessons(db, student_id, ordered.clone()).await?;

        Ok(lesson_access(&lesson.id, false, &ordered, &passed))
    }

    /// Whether the student has passed every lesson of the module.
    ///
    /// This does not consider whether the module has a test; see [`Self::view_test`].
    pub async fn can_access_test<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        module_id: Uuid,
    ) -> Result<Access, DbErr> {
        let ordered: Vec<Uuid> = Self::module_lessons(db, module_id)
            .await?
            .into_iter()
            .map(|lesson| lesson.id)
            .collect();
        let passed = Self::passed_lessons(db, student_id, ordered.clone()).await?;

        Ok(test_access(&ordered, &passed))
    }

    /// The test belonging to a module, if one has been created
    pub async fn find_test_for_module<C: ConnectionTrait>(
        db: &C,
        module_id: Uuid,
    ) -> Result<Option<tests::Model>, DbErr> {
        tests::Entity::find()
            .filter(tests::Column::ModuleId.eq(module_id))
            .one(db)
            .await
    }

    /// Returns the student's progress row for a lesson, creating an unpassed one if absent
    pub async fn ensure_progress<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<progress::Model, DbErr> {
        if let Some(existing) = Self::find_progress(db, student_id, lesson_id).await? {
            return Ok(existing);
        }

        let row = progress::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            lesson_id: Set(lesson_id),
            passed: Set(false),
            completed_at: Set(None),
        };

        // A concurrent request may have created the row in between
        progress::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([progress::Column::StudentId, progress::Column::LessonId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::find_progress(db, student_id, lesson_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("progress for lesson {lesson_id}")))
    }

    async fn find_progress<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<Option<progress::Model>, DbErr> {
        progress::Entity::find()
            .filter(progress::Column::StudentId.eq(student_id))
            .filter(progress::Column::LessonId.eq(lesson_id))
            .one(db)
            .await
    }

    /// Opens a lesson for a student, recording that they started it when access is granted
    pub async fn view_lesson<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> ServiceResult<LessonView> {
        let lesson = lessons::Entity::find_by_id(lesson_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("lesson", lesson_id))?;

        let access = Self::can_access_lesson(db, student_id, &lesson).await?;
        if !access.is_granted() {
            debug!("Lesson {lesson_id} locked for student {student_id}: {access:?}");
            return Ok(LessonView {
                lesson,
                access,
                progress: None,
            });
        }

        let progress = Self::ensure_progress(db, student_id, lesson_id).await?;
        Ok(LessonView {
            lesson,
            access,
            progress: Some(progress),
        })
    }

    /// Opens a module's test for a student
    pub async fn view_test<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        module_id: Uuid,
    ) -> ServiceResult<TestView> {
        let module = modules::Entity::find_by_id(module_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("module", module_id))?;

        let Some(test) = Self::find_test_for_module(db, module_id).await? else {
            return Ok(TestView {
                module,
                access: Access::Unavailable(Unavailable::TestNotCreated),
                test: None,
            });
        };

        let access = Self::can_access_test(db, student_id, module_id).await?;
        if !access.is_granted() {
            debug!("Test for module {module_id} locked for student {student_id}");
            return Ok(TestView {
                module,
                access,
                test: None,
            });
        }

        let questions = questions::Entity::find()
            .filter(questions::Column::TestId.eq(test.id))
            .order_by_asc(questions::Column::CreatedAt)
            .order_by_asc(questions::Column::Id)
            .all(db)
            .await?;

        Ok(TestView {
            module,
            access,
            test: Some((test, questions)),
        })
    }

    /// Marks a lesson passed. Repeated calls leave `completed_at` untouched.
    pub async fn mark_lesson_complete<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> ServiceResult<progress::Model> {
        lessons::Entity::find_by_id(lesson_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("lesson", lesson_id))?;

        let row = Self::ensure_progress(db, student_id, lesson_id).await?;
        if row.passed {
            return Ok(row);
        }

        let mut active: progress::ActiveModel = row.into();
        active.passed = Set(true);
        active.completed_at = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await?;

        info!("Student {student_id} completed lesson {lesson_id}");
        Ok(updated)
    }

    /// Marks a lesson passed on behalf of a student, refusing lessons still locked to them
    pub async fn complete_lesson<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        lesson_id: Uuid,
    ) -> ServiceResult<(progress::Model, lessons::Model)> {
        let view = Self::view_lesson(db, student_id, lesson_id).await?;
        if let Some(message) = view.access.message() {
            return Err(ServiceError::forbidden(message));
        }

        let row = Self::mark_lesson_complete(db, student_id, lesson_id).await?;
        Ok((row, view.lesson))
    }

    /// All of a student's progress rows with their lessons, in lesson creation order
    pub async fn student_progress<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
    ) -> Result<Vec<(progress::Model, lessons::Model)>, DbErr> {
        let rows = progress::Entity::find()
            .filter(progress::Column::StudentId.eq(student_id))
            .find_also_related(lessons::Entity)
            .order_by_asc(lessons::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, lesson)| lesson.map(|lesson| (row, lesson)))
            .collect())
    }
}
