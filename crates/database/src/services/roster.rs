use crate::{
    entities::{answers, lessons, progress, submissions, tests, users},
    error::{ServiceError, ServiceResult},
    services::access::AccessService,
};
use log::info;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Rows deleted by [`RosterService::remove_student_data`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    pub progress: u64,
    pub submissions: u64,
    pub answers: u64,
}

/// A student's record within one teacher's modules
#[derive(Debug, Clone)]
pub struct StudentDetail {
    pub student: users::Model,
    /// In lesson creation order
    pub progress: Vec<(progress::Model, lessons::Model)>,
    /// Newest first
    pub submissions: Vec<(submissions::Model, tests::Model)>,
}

/// Teacher-facing views and administration of students, scoped to the teacher's modules
pub struct RosterService;

impl RosterService {
    async fn find_student<C: ConnectionTrait>(db: &C, student_id: Uuid) -> ServiceResult<users::Model> {
        users::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .filter(|user| user.role.is_student())
            .ok_or_else(|| ServiceError::not_found("student", student_id))
    }

    async fn lesson_ids_in<C: ConnectionTrait>(db: &C, module_ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr> {
        lessons::Entity::find()
            .select_only()
            .column(lessons::Column::Id)
            .filter(lessons::Column::ModuleId.is_in(module_ids.to_vec()))
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }

    async fn test_ids_in<C: ConnectionTrait>(db: &C, module_ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr> {
        tests::Entity::find()
            .select_only()
            .column(tests::Column::Id)
            .filter(tests::Column::ModuleId.is_in(module_ids.to_vec()))
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }

    /// Deletes every progress row and submission (with its answers) the student
    /// has in the teacher's modules, in one transaction. Data in other modules
    /// is left untouched.
    pub async fn remove_student_data(
        db: &DatabaseConnection,
        teacher: &users::Model,
        student_id: Uuid,
    ) -> ServiceResult<RemovalSummary> {
        AccessService::require_teacher(teacher)?;

        let txn = db.begin().await?;
        Self::find_student(&txn, student_id).await?;

        let module_ids = AccessService::taught_module_ids(&txn, teacher).await?;
        if module_ids.is_empty() {
            txn.commit().await?;
            return Ok(RemovalSummary::default());
        }

        let lesson_ids = Self::lesson_ids_in(&txn, &module_ids).await?;
        let test_ids = Self::test_ids_in(&txn, &module_ids).await?;

        let progress = progress::Entity::delete_many()
            .filter(progress::Column::StudentId.eq(student_id))
            .filter(progress::Column::LessonId.is_in(lesson_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        let submission_ids: Vec<Uuid> = submissions::Entity::find()
            .select_only()
            .column(submissions::Column::Id)
            .filter(submissions::Column::StudentId.eq(student_id))
            .filter(submissions::Column::TestId.is_in(test_ids))
            .into_tuple::<Uuid>()
            .all(&txn)
            .await?;

        let answers = answers::Entity::delete_many()
            .filter(answers::Column::SubmissionId.is_in(submission_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        let submissions = submissions::Entity::delete_many()
            .filter(submissions::Column::Id.is_in(submission_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        let summary = RemovalSummary {
            progress,
            submissions,
            answers,
        };
        info!(
            "Teacher {} removed data of student {student_id}: {summary:?}",
            teacher.id
        );
        Ok(summary)
    }

    /// Students with progress in the teacher's modules, ordered by username.
    ///
    /// `query` filters case-insensitively on username or email.
    pub async fn teacher_students<C: ConnectionTrait>(
        db: &C,
        teacher: &users::Model,
        query: Option<&str>,
    ) -> ServiceResult<Vec<users::Model>> {
        AccessService::require_teacher(teacher)?;

        let module_ids = AccessService::taught_module_ids(db, teacher).await?;
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        let lesson_ids = Self::lesson_ids_in(db, &module_ids).await?;
        let student_ids: Vec<Uuid> = progress::Entity::find()
            .select_only()
            .column(progress::Column::StudentId)
            .filter(progress::Column::LessonId.is_in(lesson_ids))
            .distinct()
            .into_tuple::<Uuid>()
            .all(db)
            .await?;

        let students = users::Entity::find()
            .filter(users::Column::Id.is_in(student_ids))
            .order_by_asc(users::Column::Username)
            .all(db)
            .await?;

        let needle = query
            .map(|query| query.trim().to_lowercase())
            .filter(|query| !query.is_empty());

        Ok(students
            .into_iter()
            .filter(|user| user.role.is_student())
            .filter(|user| match &needle {
                Some(needle) => {
                    user.username.to_lowercase().contains(needle)
                        || user.email.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect())
    }

    /// The student's progress and submissions within the teacher's modules
    pub async fn student_detail<C: ConnectionTrait>(
        db: &C,
        teacher: &users::Model,
        student_id: Uuid,
    ) -> ServiceResult<StudentDetail> {
        AccessService::require_teacher(teacher)?;
        let student = Self::find_student(db, student_id).await?;

        let module_ids = AccessService::taught_module_ids(db, teacher).await?;
        if module_ids.is_empty() {
            return Ok(StudentDetail {
                student,
                progress: Vec::new(),
                submissions: Vec::new(),
            });
        }

        let progress = progress::Entity::find()
            .filter(progress::Column::StudentId.eq(student_id))
            .find_also_related(lessons::Entity)
            .filter(lessons::Column::ModuleId.is_in(module_ids.clone()))
            .order_by_asc(lessons::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(row, lesson)| lesson.map(|lesson| (row, lesson)))
            .collect();

        let tests_by_id: BTreeMap<Uuid, tests::Model> = tests::Entity::find()
            .filter(tests::Column::ModuleId.is_in(module_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|test| (test.id, test))
            .collect();

        let submissions = submissions::Entity::find()
            .filter(submissions::Column::StudentId.eq(student_id))
            .filter(submissions::Column::TestId.is_in(tests_by_id.keys().copied().collect::<Vec<_>>()))
            .order_by_desc(submissions::Column::SubmittedAt)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|submission| {
                tests_by_id
                    .get(&submission.test_id)
                    .cloned()
                    .map(|test| (submission, test))
            })
            .collect();

        Ok(StudentDetail {
            student,
            progress,
            submissions,
        })
    }
}
