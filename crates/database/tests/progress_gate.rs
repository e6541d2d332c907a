mod common;

use database::{
    entities::progress,
    error::ServiceError,
    services::progress::ProgressService,
};
use models::{
    access::{Access, LockReason, Unavailable},
    role::Role,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

#[tokio::test]
async fn lessons_unlock_in_creation_order() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    // Inserted out of order on purpose
    let third = common::lesson(&db, module.id, "Lesson 3", 30).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;
    let second = common::lesson(&db, module.id, "Lesson 2", 20).await;

    common::passed(&db, student.id, first.id).await;

    let access = ProgressService::can_access_lesson(&db, student.id, &first).await.unwrap();
    assert_eq!(access, Access::Granted);
    let access = ProgressService::can_access_lesson(&db, student.id, &second).await.unwrap();
    assert_eq!(access, Access::Granted);
    let access = ProgressService::can_access_lesson(&db, student.id, &third).await.unwrap();
    assert_eq!(access, Access::Locked(LockReason::PreviousLessonIncomplete));
}

#[tokio::test]
async fn first_lesson_is_always_open() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;

    let access = ProgressService::can_access_lesson(&db, student.id, &first).await.unwrap();
    assert!(access.is_granted());
}

#[tokio::test]
async fn free_preview_ignores_progress() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    common::lesson(&db, module.id, "Lesson 1", 10).await;
    let preview = common::lesson_with_preview(&db, module.id, "Preview", 20, true).await;

    let access = ProgressService::can_access_lesson(&db, student.id, &preview).await.unwrap();
    assert_eq!(access, Access::Granted);
}

#[tokio::test]
async fn progress_in_other_modules_does_not_count() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let basics = common::module(&db, course.id, "Basics", 0).await;
    let advanced = common::module(&db, course.id, "Advanced", 10).await;
    let other = common::lesson(&db, basics.id, "Basics 1", 10).await;
    common::lesson(&db, advanced.id, "Advanced 1", 10).await;
    let locked = common::lesson(&db, advanced.id, "Advanced 2", 20).await;

    common::passed(&db, student.id, other.id).await;

    let access = ProgressService::can_access_lesson(&db, student.id, &locked).await.unwrap();
    assert!(!access.is_granted());
}

#[tokio::test]
async fn locked_lesson_view_records_nothing() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;
    let second = common::lesson(&db, module.id, "Lesson 2", 20).await;

    let view = ProgressService::view_lesson(&db, student.id, second.id).await.unwrap();
    assert!(!view.access.is_granted());
    assert!(view.progress.is_none());

    let view = ProgressService::view_lesson(&db, student.id, first.id).await.unwrap();
    let row = view.progress.expect("progress created on view");
    assert!(!row.passed);
    assert!(row.completed_at.is_none());

    let rows = progress::Entity::find()
        .filter(progress::Column::StudentId.eq(student.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn viewing_twice_keeps_one_progress_row() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;

    let a = ProgressService::view_lesson(&db, student.id, first.id).await.unwrap();
    let b = ProgressService::view_lesson(&db, student.id, first.id).await.unwrap();
    assert_eq!(a.progress.map(|row| row.id), b.progress.map(|row| row.id));
}

#[tokio::test]
async fn missing_lesson_is_not_found() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;

    let err = ProgressService::view_lesson(&db, student.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "lesson", .. }));
}

#[tokio::test]
async fn mark_complete_is_idempotent() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;

    let once = ProgressService::mark_lesson_complete(&db, student.id, first.id).await.unwrap();
    assert!(once.passed);
    assert!(once.completed_at.is_some());

    let twice = ProgressService::mark_lesson_complete(&db, student.id, first.id).await.unwrap();
    assert_eq!(twice.id, once.id);
    assert_eq!(twice.completed_at, once.completed_at);
}

#[tokio::test]
async fn test_requires_every_lesson() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;
    let second = common::lesson(&db, module.id, "Lesson 2", 20).await;
    let test = common::module_test(&db, module.id, 70).await;
    common::choice_question(&db, test.id, "A", 1, 0).await;

    common::passed(&db, student.id, first.id).await;
    let view = ProgressService::view_test(&db, student.id, module.id).await.unwrap();
    assert_eq!(view.access, Access::Locked(LockReason::LessonsIncomplete));
    assert!(view.test.is_none());

    ProgressService::mark_lesson_complete(&db, student.id, second.id).await.unwrap();
    let view = ProgressService::view_test(&db, student.id, module.id).await.unwrap();
    assert_eq!(view.access, Access::Granted);
    let (found, questions) = view.test.expect("test visible once unlocked");
    assert_eq!(found.id, test.id);
    assert_eq!(questions.len(), 1);
}

#[tokio::test]
async fn module_without_test_is_unavailable() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;

    let view = ProgressService::view_test(&db, student.id, module.id).await.unwrap();
    assert_eq!(view.access, Access::Unavailable(Unavailable::TestNotCreated));
}

#[tokio::test]
async fn student_progress_follows_lesson_order() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let second = common::lesson(&db, module.id, "Lesson 2", 20).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;

    ProgressService::mark_lesson_complete(&db, student.id, second.id).await.unwrap();
    ProgressService::mark_lesson_complete(&db, student.id, first.id).await.unwrap();

    let titles: Vec<String> = ProgressService::student_progress(&db, student.id)
        .await
        .unwrap()
        .into_iter()
        .map(|(_, lesson)| lesson.title)
        .collect();
    assert_eq!(titles, ["Lesson 1", "Lesson 2"]);
}

#[tokio::test]
async fn completing_a_locked_lesson_is_forbidden() {
    let db = common::setup().await;
    let student = common::user(&db, "alice", Role::Student).await;
    let course = common::course(&db, "Rust").await;
    let module = common::module(&db, course.id, "Basics", 0).await;
    let first = common::lesson(&db, module.id, "Lesson 1", 10).await;
    let second = common::lesson(&db, module.id, "Lesson 2", 20).await;

    let err = ProgressService::complete_lesson(&db, student.id, second.id)
        .await
        .unwrap_err();
    match err {
        ServiceError::Forbidden(message) => assert_eq!(message, "complete the previous lesson"),
        other => panic!("expected forbidden, got {other:?}"),
    }

    let rows = progress::Entity::find()
        .filter(progress::Column::StudentId.eq(student.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 0);

    let (row, lesson) = ProgressService::complete_lesson(&db, student.id, first.id).await.unwrap();
    assert!(row.passed);
    assert_eq!(lesson.id, first.id);

    let (row, _) = ProgressService::complete_lesson(&db, student.id, second.id).await.unwrap();
    assert!(row.passed);
}
