use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one progress row per student and lesson
        manager
            .create_index(
                Index::create()
                    .name("idx_progress_student_lesson")
                    .table(Progress::Table)
                    .col(Progress::StudentId)
                    .col(Progress::LessonId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A module owns at most one test
        manager
            .create_index(
                Index::create()
                    .name("idx_tests_module_id")
                    .table(Tests::Table)
                    .col(Tests::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_teachers_module_user")
                    .table(ModuleTeachers::Table)
                    .col(ModuleTeachers::ModuleId)
                    .col(ModuleTeachers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_teachers_user_id")
                    .table(ModuleTeachers::Table)
                    .col(ModuleTeachers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_teachers_course_user")
                    .table(CourseTeachers::Table)
                    .col(CourseTeachers::CourseId)
                    .col(CourseTeachers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lessons are always read per module in creation order
        manager
            .create_index(
                Index::create()
                    .name("idx_lessons_module_created_at")
                    .table(Lessons::Table)
                    .col(Lessons::ModuleId)
                    .col(Lessons::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_course_id")
                    .table(Modules::Table)
                    .col(Modules::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_test_id")
                    .table(Questions::Table)
                    .col(Questions::TestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_student_test")
                    .table(Submissions::Table)
                    .col(Submissions::StudentId)
                    .col(Submissions::TestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_answers_submission_id")
                    .table(Answers::Table)
                    .col(Answers::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_answers_submission_id",
            "idx_submissions_student_test",
            "idx_questions_test_id",
            "idx_modules_course_id",
            "idx_lessons_module_created_at",
            "idx_course_teachers_course_user",
            "idx_module_teachers_user_id",
            "idx_module_teachers_module_user",
            "idx_tests_module_id",
            "idx_progress_student_lesson",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    CourseId,
    UserId,
}

#[derive(Iden)]
enum Modules {
    Table,
    CourseId,
}

#[derive(Iden)]
enum ModuleTeachers {
    Table,
    ModuleId,
    UserId,
}

#[derive(Iden)]
enum Lessons {
    Table,
    ModuleId,
    CreatedAt,
}

#[derive(Iden)]
enum Tests {
    Table,
    ModuleId,
}

#[derive(Iden)]
enum Questions {
    Table,
    TestId,
}

#[derive(Iden)]
enum Submissions {
    Table,
    StudentId,
    TestId,
}

#[derive(Iden)]
enum Answers {
    Table,
    SubmissionId,
}

#[derive(Iden)]
enum Progress {
    Table,
    StudentId,
    LessonId,
}
