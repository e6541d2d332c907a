#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use database::entities::{
    courses, lessons, module_teachers, modules, progress, questions, tests, users,
};
use migration::{Migrator, MigratorTrait};
use models::{question::QuestionType, role::Role};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// A fresh, migrated in-memory database
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Fixed base time so creation order is deterministic
pub fn at(minutes: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .expect("valid base time")
        + TimeDelta::minutes(minutes)
}

pub async fn user(db: &DatabaseConnection, username: &str, role: Role) -> users::Model {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        role: Set(role),
        is_teacher_approved: Set(role.is_teacher()),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn course(db: &DatabaseConnection, title: &str) -> courses::Model {
    courses::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(String::new()),
        published: Set(true),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert course")
}

pub async fn module(
    db: &DatabaseConnection,
    course_id: Uuid,
    title: &str,
    minutes: i64,
) -> modules::Model {
    modules::ActiveModel {
        id: Set(Uuid::new_v4()),
        course_id: Set(course_id),
        title: Set(title.to_string()),
        description: Set(String::new()),
        created_at: Set(at(minutes)),
    }
    .insert(db)
    .await
    .expect("insert module")
}

pub async fn assign_teacher(db: &DatabaseConnection, module_id: Uuid, user_id: Uuid) {
    module_teachers::ActiveModel {
        id: Set(Uuid::new_v4()),
        module_id: Set(module_id),
        user_id: Set(user_id),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("assign teacher");
}

pub async fn lesson(
    db: &DatabaseConnection,
    module_id: Uuid,
    title: &str,
    minutes: i64,
) -> lessons::Model {
    lesson_with_preview(db, module_id, title, minutes, false).await
}

pub async fn lesson_with_preview(
    db: &DatabaseConnection,
    module_id: Uuid,
    title: &str,
    minutes: i64,
    is_free_preview: bool,
) -> lessons::Model {
    lessons::ActiveModel {
        id: Set(Uuid::new_v4()),
        module_id: Set(module_id),
        title: Set(title.to_string()),
        content: Set(format!("{title} content")),
        video_url: Set(None),
        video_file: Set(None),
        image_file: Set(None),
        pdf_file: Set(None),
        assignment: Set(String::new()),
        is_free_preview: Set(is_free_preview),
        author_id: Set(None),
        created_at: Set(at(minutes)),
    }
    .insert(db)
    .await
    .expect("insert lesson")
}

pub async fn module_test(db: &DatabaseConnection, module_id: Uuid, passing_score: i32) -> tests::Model {
    tests::ActiveModel {
        id: Set(Uuid::new_v4()),
        module_id: Set(module_id),
        title: Set("Module test".to_string()),
        description: Set(String::new()),
        passing_score: Set(passing_score),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert test")
}

pub async fn choice_question(
    db: &DatabaseConnection,
    test_id: Uuid,
    correct_answer: &str,
    max_score: i32,
    minutes: i64,
) -> questions::Model {
    questions::ActiveModel {
        id: Set(Uuid::new_v4()),
        test_id: Set(test_id),
        text: Set("Pick one".to_string()),
        question_type: Set(QuestionType::Choice),
        option_a: Set(Some("Paris".to_string())),
        option_b: Set(Some("Rome".to_string())),
        option_c: Set(None),
        option_d: Set(None),
        correct_answer: Set(Some(correct_answer.to_string())),
        max_score: Set(max_score),
        created_at: Set(at(minutes)),
    }
    .insert(db)
    .await
    .expect("insert choice question")
}

pub async fn open_question(
    db: &DatabaseConnection,
    test_id: Uuid,
    max_score: i32,
    minutes: i64,
) -> questions::Model {
    questions::ActiveModel {
        id: Set(Uuid::new_v4()),
        test_id: Set(test_id),
        text: Set("Explain".to_string()),
        question_type: Set(QuestionType::OpenEnded),
        option_a: Set(None),
        option_b: Set(None),
        option_c: Set(None),
        option_d: Set(None),
        correct_answer: Set(None),
        max_score: Set(max_score),
        created_at: Set(at(minutes)),
    }
    .insert(db)
    .await
    .expect("insert open-ended question")
}

pub async fn passed(db: &DatabaseConnection, student_id: Uuid, lesson_id: Uuid) -> progress::Model {
    progress::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(student_id),
        lesson_id: Set(lesson_id),
        passed: Set(true),
        completed_at: Set(Some(at(60))),
    }
    .insert(db)
    .await
    .expect("insert progress")
}
