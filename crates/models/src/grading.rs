use crate::question::QuestionType;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Passing threshold, in percent, for a newly created test
pub const DEFAULT_PASSING_SCORE: i32 = 70;

/// Default weight of a newly created question
pub const DEFAULT_MAX_SCORE: i32 = 1;

/// Grading state of a submission
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[cfg_attr(feature = "database", derive(sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
    /// Waiting for a teacher to score open-ended answers
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "pending"))]
    Pending,
    #[cfg_attr(feature = "database", sea_orm(string_value = "graded"))]
    Graded,
}

/// The status a submission lands in once its choice answers are scored.
///
/// Any open-ended question keeps the submission pending for manual review.
pub fn status_after_auto_grade<I>(question_types: I) -> SubmissionStatus
where
    I: IntoIterator<Item = QuestionType>,
{
    if question_types
        .into_iter()
        .any(|question_type| question_type == QuestionType::OpenEnded)
    {
        SubmissionStatus::Pending
    } else {
        SubmissionStatus::Graded
    }
}

/// A teacher-entered score after coercion into `[0, max_score]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualScore {
    pub value: i32,
    /// Set when the raw input was missing, non-numeric, or out of range
    pub coerced: bool,
}

impl ManualScore {
    /// Coerces raw form input into a valid score.
    ///
    /// Input that does not parse as an integer becomes 0. Parsed values are
    /// clamped to `[0, max_score]`.
    pub fn coerce(raw: Option<&str>, max_score: i32) -> Self {
        let max_score = max_score.max(0);

        let Some(parsed) = raw.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
            return Self {
                value: 0,
                coerced: true,
            };
        };

        let value = parsed.clamp(0, i64::from(max_score));
        Self {
            value: value as i32,
            coerced: value != parsed,
        }
    }
}

/// A submission's percentage result and pass/fail outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalScore {
    pub percent: f64,
    pub passed: bool,
}

impl FinalScore {
    /// Derives the final result from the earned total and the test's maximum.
    ///
    /// A test worth nothing scores 0%, which passes only at a 0% threshold.
    pub fn compute(total: i64, max_possible: i64, passing_score: i32) -> Self {
        let percent = if max_possible > 0 {
            total as f64 * 100.0 / max_possible as f64
        } else {
            0.0
        };

        Self {
            percent,
            passed: percent >= f64::from(passing_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_choice_is_graded() {
        let status = status_after_auto_grade([QuestionType::Choice, QuestionType::Choice]);
        assert_eq!(status, SubmissionStatus::Graded);
    }

    #[test]
    fn test_open_ended_keeps_pending() {
        let status = status_after_auto_grade([QuestionType::Choice, QuestionType::OpenEnded]);
        assert_eq!(status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_no_questions_is_graded() {
        let status = status_after_auto_grade(Vec::<QuestionType>::new());
        assert_eq!(status, SubmissionStatus::Graded);
    }

    #[test]
    fn test_manual_score_in_range() {
        assert_eq!(
            ManualScore::coerce(Some("3"), 5),
            ManualScore {
                value: 3,
                coerced: false
            }
        );
        assert_eq!(ManualScore::coerce(Some(" 5 "), 5).value, 5);
    }

    #[test]
    fn test_manual_score_clamped() {
        let over = ManualScore::coerce(Some("12"), 5);
        assert_eq!(over.value, 5);
        assert!(over.coerced);

        let under = ManualScore::coerce(Some("-2"), 5);
        assert_eq!(under.value, 0);
        assert!(under.coerced);
    }

    #[test]
    fn test_manual_score_invalid_input_is_zero() {
        for raw in [Some("abc"), Some(""), Some("4.5"), None] {
            let score = ManualScore::coerce(raw, 5);
            assert_eq!(score.value, 0, "input {raw:?}");
            assert!(score.coerced, "input {raw:?}");
        }
    }

    #[test]
    fn test_final_score_full_marks() {
        let score = FinalScore::compute(10, 10, 70);
        assert_eq!(score.percent, 100.0);
        assert!(score.passed);
    }

    #[test]
    fn test_final_score_below_threshold() {
        let score = FinalScore::compute(5, 10, 70);
        assert_eq!(score.percent, 50.0);
        assert!(!score.passed);
    }

    #[test]
    fn test_final_score_threshold_is_inclusive() {
        assert!(FinalScore::compute(7, 10, 70).passed);
    }

    #[test]
    fn test_final_score_empty_test() {
        let score = FinalScore::compute(0, 0, 70);
        assert_eq!(score.percent, 0.0);
        assert!(!score.passed);

        assert!(FinalScore::compute(0, 0, 0).passed);
    }
}
