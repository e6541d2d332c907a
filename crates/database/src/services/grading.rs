use crate::{
    entities::{answers, questions, submissions, tests},
    error::{ServiceError, ServiceResult},
};
use log::{debug, info, warn};
use models::{
    grading::{FinalScore, ManualScore, SubmissionStatus, status_after_auto_grade},
    question::QuestionType,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

/// Scores submissions and derives their final result
pub struct GradingService;

impl GradingService {
    /// Sum of `max_score` over every question of a test
    pub async fn max_possible_score<C: ConnectionTrait>(db: &C, test_id: Uuid) -> Result<i64, DbErr> {
        let questions = questions::Entity::find()
            .filter(questions::Column::TestId.eq(test_id))
            .all(db)
            .await?;

        Ok(questions
            .iter()
            .map(|question| i64::from(question.max_score))
            .sum())
    }

    /// A submission's answers paired with their questions
    pub async fn answers_with_questions<C: ConnectionTrait>(
        db: &C,
        submission_id: Uuid,
    ) -> Result<Vec<(answers::Model, questions::Model)>, DbErr> {
        let rows = answers::Entity::find()
            .filter(answers::Column::SubmissionId.eq(submission_id))
            .find_also_related(questions::Entity)
            .all(db)
            .await?;

        let mut pairs: Vec<_> = rows
            .into_iter()
            .filter_map(|(answer, question)| question.map(|question| (answer, question)))
            .collect();
        pairs.sort_by(|(_, a), (_, b)| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(pairs)
    }

    /// Scores every choice answer, then either finalizes the submission or
    /// leaves it pending when open-ended answers await a teacher.
    ///
    /// Running it again over the same answers yields the same result.
    pub async fn auto_grade<C: ConnectionTrait>(
        db: &C,
        submission: submissions::Model,
    ) -> ServiceResult<submissions::Model> {
        let pairs = Self::answers_with_questions(db, submission.id).await?;

        for (answer, question) in &pairs {
            let Some(score) = question.auto_score(&answer.answer_text) else {
                continue;
            };

            debug!(
                "Answer {} to question {} scored {score}/{}",
                answer.id, question.id, question.max_score
            );

            if answer.score != score {
                let mut active: answers::ActiveModel = answer.clone().into();
                active.score = Set(score);
                active.update(db).await?;
            }
        }

        let status = status_after_auto_grade(pairs.iter().map(|(_, question)| question.question_type));
        if status == SubmissionStatus::Graded {
            return Self::update_final_score(db, submission).await;
        }

        info!("Submission {} awaits manual grading", submission.id);
        if submission.status == SubmissionStatus::Pending {
            return Ok(submission);
        }

        let mut active: submissions::ActiveModel = submission.into();
        active.status = Set(SubmissionStatus::Pending);
        Ok(active.update(db).await?)
    }

    /// Recomputes the final percentage and pass/fail outcome from the current
    /// answer scores and marks the submission graded.
    pub async fn update_final_score<C: ConnectionTrait>(
        db: &C,
        submission: submissions::Model,
    ) -> ServiceResult<submissions::Model> {
        let test = tests::Entity::find_by_id(submission.test_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("test", submission.test_id))?;

        let total: i64 = answers::Entity::find()
            .filter(answers::Column::SubmissionId.eq(submission.id))
            .all(db)
            .await?
            .iter()
            .map(|answer| i64::from(answer.score))
            .sum();
        let max_possible = Self::max_possible_score(db, test.id).await?;
        let result = FinalScore::compute(total, max_possible, test.passing_score);

        let mut active: submissions::ActiveModel = submission.into();
        active.score = Set(result.percent);
        active.passed = Set(result.passed);
        active.status = Set(SubmissionStatus::Graded);
        let graded = active.update(db).await?;

        info!(
            "Submission {} graded: {total}/{max_possible} = {:.1}%, passed: {}",
            graded.id, result.percent, result.passed
        );
        Ok(graded)
    }

    /// Stores a teacher's score for an open-ended answer.
    ///
    /// Invalid or out-of-range input is coerced into `[0, max_score]`.
    /// Returns `None` without writing anything when the question is auto-graded.
    pub async fn apply_manual_score<C: ConnectionTrait>(
        db: &C,
        answer: answers::Model,
        question: &questions::Model,
        raw_score: Option<&str>,
    ) -> Result<Option<answers::Model>, DbErr> {
        if question.question_type != QuestionType::OpenEnded {
            debug!("Ignoring manual score for auto-graded answer {}", answer.id);
            return Ok(None);
        }

        let score = ManualScore::coerce(raw_score, question.max_score);
        if score.coerced {
            warn!(
                "Manual score {raw_score:?} for answer {} coerced to {} (max {})",
                answer.id, score.value, question.max_score
            );
        }

        let mut active: answers::ActiveModel = answer.into();
        active.score = Set(score.value);
        Ok(Some(active.update(db).await?))
    }
}
