use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .text()
                            .not_null()
                            .default("student"),
                    )
                    .col(
                        ColumnDef::new(Users::IsTeacherApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(
                        ColumnDef::new(Courses::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create course_teachers junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CourseTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTeachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseTeachers::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTeachers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseTeachers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-course_id")
                            .from(CourseTeachers::Table, CourseTeachers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_teachers-user_id")
                            .from(CourseTeachers::Table, CourseTeachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create modules table
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Modules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Modules::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Modules::Title).string().not_null())
                    .col(ColumnDef::new(Modules::Description).text().not_null())
                    .col(ColumnDef::new(Modules::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-modules-course_id")
                            .from(Modules::Table, Modules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create module_teachers junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(ModuleTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleTeachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ModuleTeachers::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(ModuleTeachers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ModuleTeachers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-module_teachers-module_id")
                            .from(ModuleTeachers::Table, ModuleTeachers::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-module_teachers-user_id")
                            .from(ModuleTeachers::Table, ModuleTeachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lessons table
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lessons::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lessons::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::Content).text().not_null())
                    .col(ColumnDef::new(Lessons::VideoUrl).string())
                    .col(ColumnDef::new(Lessons::VideoFile).string())
                    .col(ColumnDef::new(Lessons::ImageFile).string())
                    .col(ColumnDef::new(Lessons::PdfFile).string())
                    .col(ColumnDef::new(Lessons::Assignment).text().not_null())
                    .col(
                        ColumnDef::new(Lessons::IsFreePreview)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Lessons::AuthorId).uuid())
                    .col(ColumnDef::new(Lessons::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lessons-module_id")
                            .from(Lessons::Table, Lessons::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lessons-author_id")
                            .from(Lessons::Table, Lessons::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tests table
        manager
            .create_table(
                Table::create()
                    .table(Tests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tests::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(Tests::Title).string().not_null())
                    .col(ColumnDef::new(Tests::Description).text().not_null())
                    .col(
                        ColumnDef::new(Tests::PassingScore)
                            .integer()
                            .not_null()
                            .default(70),
                    )
                    .col(ColumnDef::new(Tests::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tests-module_id")
                            .from(Tests::Table, Tests::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create questions table
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::TestId).uuid().not_null())
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .col(
                        ColumnDef::new(Questions::QuestionType)
                            .text()
                            .not_null()
                            .default("choice"),
                    )
                    .col(ColumnDef::new(Questions::OptionA).string())
                    .col(ColumnDef::new(Questions::OptionB).string())
                    .col(ColumnDef::new(Questions::OptionC).string())
                    .col(ColumnDef::new(Questions::OptionD).string())
                    .col(ColumnDef::new(Questions::CorrectAnswer).string())
                    .col(
                        ColumnDef::new(Questions::MaxScore)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Questions::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-questions-test_id")
                            .from(Questions::Table, Questions::TestId)
                            .to(Tests::Table, Tests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create submissions table
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::TestId).uuid().not_null())
                    .col(ColumnDef::new(Submissions::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(Submissions::Score)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Submissions::Passed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submissions-test_id")
                            .from(Submissions::Table, Submissions::TestId)
                            .to(Tests::Table, Tests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submissions-student_id")
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create answers table
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Answers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Answers::SubmissionId).uuid().not_null())
                    .col(ColumnDef::new(Answers::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(Answers::AnswerText).text().not_null())
                    .col(
                        ColumnDef::new(Answers::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-answers-submission_id")
                            .from(Answers::Table, Answers::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-answers-question_id")
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create progress table
        manager
            .create_table(
                Table::create()
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Progress::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Progress::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Progress::LessonId).uuid().not_null())
                    .col(
                        ColumnDef::new(Progress::Passed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Progress::CompletedAt).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-progress-student_id")
                            .from(Progress::Table, Progress::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-progress-lesson_id")
                            .from(Progress::Table, Progress::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tests::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ModuleTeachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseTeachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Role,
    IsTeacherApproved,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Published,
    CreatedAt,
}

#[derive(Iden)]
enum CourseTeachers {
    Table,
    Id,
    CourseId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Modules {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum ModuleTeachers {
    Table,
    Id,
    ModuleId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
    ModuleId,
    Title,
    Content,
    VideoUrl,
    VideoFile,
    ImageFile,
    PdfFile,
    Assignment,
    IsFreePreview,
    AuthorId,
    CreatedAt,
}

#[derive(Iden)]
enum Tests {
    Table,
    Id,
    ModuleId,
    Title,
    Description,
    PassingScore,
    CreatedAt,
}

#[derive(Iden)]
enum Questions {
    Table,
    Id,
    TestId,
    Text,
    QuestionType,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectAnswer,
    MaxScore,
    CreatedAt,
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    TestId,
    StudentId,
    Score,
    Passed,
    Status,
    SubmittedAt,
}

#[derive(Iden)]
enum Answers {
    Table,
    Id,
    SubmissionId,
    QuestionId,
    AnswerText,
    Score,
}

#[derive(Iden)]
enum Progress {
    Table,
    Id,
    StudentId,
    LessonId,
    Passed,
    CompletedAt,
}
