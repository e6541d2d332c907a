use crate::{
    entities::{answers, questions, submissions, tests},
    error::{ServiceError, ServiceResult},
    services::{grading::GradingService, progress::ProgressService},
};
use chrono::Utc;
use log::{debug, info};
use models::grading::SubmissionStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Orchestrates a test attempt from creation through final grading
pub struct SubmissionService;

impl SubmissionService {
    /// Creates an ungraded attempt. Students may attempt a test any number of times.
    pub async fn start_submission<C: ConnectionTrait>(
        db: &C,
        test_id: Uuid,
        student_id: Uuid,
    ) -> Result<submissions::Model, DbErr> {
        submissions::ActiveModel {
            id: Set(Uuid::new_v4()),
            test_id: Set(test_id),
            student_id: Set(student_id),
            score: Set(0.0),
            passed: Set(false),
            status: Set(SubmissionStatus::Pending),
            submitted_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
    }

    /// Creates exactly one answer per question of the test.
    ///
    /// Questions missing from `answers_by_question` get an empty answer.
    /// Entries for questions outside the test are ignored.
    pub async fn record_answers<C: ConnectionTrait>(
        db: &C,
        submission: &submissions::Model,
        answers_by_question: &HashMap<Uuid, String>,
    ) -> Result<Vec<answers::Model>, DbErr> {
        let questions = questions::Entity::find()
            .filter(questions::Column::TestId.eq(submission.test_id))
            .order_by_asc(questions::Column::CreatedAt)
            .order_by_asc(questions::Column::Id)
            .all(db)
            .await?;

        let mut recorded = Vec::with_capacity(questions.len());
        for question in questions {
            let answer_text = answers_by_question
                .get(&question.id)
                .cloned()
                .unwrap_or_default();

            let answer = answers::ActiveModel {
                id: Set(Uuid::new_v4()),
                submission_id: Set(submission.id),
                question_id: Set(question.id),
                answer_text: Set(answer_text),
                score: Set(0),
            }
            .insert(db)
            .await?;
            recorded.push(answer);
        }

        debug!(
            "Recorded {} answers for submission {}",
            recorded.len(),
            submission.id
        );
        Ok(recorded)
    }

    /// Creates a submission, records its answers and auto-grades it in one transaction.
    ///
    /// The returned submission is `graded` for all-choice tests and `pending`
    /// when open-ended answers need a teacher.
    pub async fn submit_and_grade(
        db: &DatabaseConnection,
        test_id: Uuid,
        student_id: Uuid,
        answers_by_question: &HashMap<Uuid, String>,
    ) -> ServiceResult<submissions::Model> {
        let txn = db.begin().await?;

        tests::Entity::find_by_id(test_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("test", test_id))?;

        let submission = Self::start_submission(&txn, test_id, student_id).await?;
        Self::record_answers(&txn, &submission, answers_by_question).await?;
        let submission = GradingService::auto_grade(&txn, submission).await?;

        txn.commit().await?;

        info!(
            "Student {student_id} submitted test {test_id}: submission {} is {}",
            submission.id, submission.status
        );
        Ok(submission)
    }

    /// Submits a student's answers, refusing tests whose module lessons are not all passed
    pub async fn submit_test(
        db: &DatabaseConnection,
        test_id: Uuid,
        student_id: Uuid,
        answers_by_question: &HashMap<Uuid, String>,
    ) -> ServiceResult<submissions::Model> {
        let test = tests::Entity::find_by_id(test_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("test", test_id))?;

        let access = ProgressService::can_access_test(db, student_id, test.module_id).await?;
        if let Some(message) = access.message() {
            debug!("Test {test_id} locked for student {student_id}");
            return Err(ServiceError::forbidden(message));
        }

        Self::submit_and_grade(db, test_id, student_id, answers_by_question).await
    }

    /// Applies a teacher's scores to the open-ended answers of a submission and
    /// recomputes its final score, in one transaction.
    ///
    /// Scores for choice answers or for answers outside the submission are ignored.
    /// Authorization is the caller's responsibility.
    pub async fn teacher_grade(
        db: &DatabaseConnection,
        submission_id: Uuid,
        scores_by_answer: &HashMap<Uuid, String>,
    ) -> ServiceResult<submissions::Model> {
        let txn = db.begin().await?;

        let submission = submissions::Entity::find_by_id(submission_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("submission", submission_id))?;

        for (answer, question) in GradingService::answers_with_questions(&txn, submission_id).await? {
            let raw_score = scores_by_answer.get(&answer.id).map(String::as_str);
            GradingService::apply_manual_score(&txn, answer, &question, raw_score).await?;
        }

        let submission = GradingService::update_final_score(&txn, submission).await?;
        txn.commit().await?;

        Ok(submission)
    }

    /// A submission with its answers and their questions
    pub async fn find_with_answers<C: ConnectionTrait>(
        db: &C,
        submission_id: Uuid,
    ) -> ServiceResult<(submissions::Model, Vec<(answers::Model, questions::Model)>)> {
        let submission = submissions::Entity::find_by_id(submission_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("submission", submission_id))?;

        let answers = GradingService::answers_with_questions(db, submission_id).await?;
        Ok((submission, answers))
    }

    /// The student's most recent attempt at a test, which governs the displayed result.
    ///
    /// Attempts sharing a timestamp are ordered by id.
    pub async fn latest_submission<C: ConnectionTrait>(
        db: &C,
        student_id: Uuid,
        test_id: Uuid,
    ) -> Result<Option<submissions::Model>, DbErr> {
        submissions::Entity::find()
            .filter(submissions::Column::StudentId.eq(student_id))
            .filter(submissions::Column::TestId.eq(test_id))
            .order_by_desc(submissions::Column::SubmittedAt)
            .order_by_desc(submissions::Column::Id)
            .one(db)
            .await
    }
}
