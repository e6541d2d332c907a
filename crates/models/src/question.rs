use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// How a question's answers get scored
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
pub enum QuestionType {
    /// Scored automatically against the stored correct answer
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "choice"))]
    Choice,
    /// Scored by a teacher
    #[cfg_attr(feature = "database", sea_orm(string_value = "open_ended"))]
    OpenEnded,
}

impl QuestionType {
    pub fn is_auto_gradable(self) -> bool {
        self == Self::Choice
    }
}

/// Lowercases and trims an answer so that `"Paris "` and `"paris"` compare equal
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether a given answer matches the expected one
pub fn answer_matches(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

/// Score for an answer to an auto-gradable question.
///
/// Returns `None` for open-ended questions, which only a teacher may score.
/// A choice question with no stored answer key scores 0.
pub fn auto_score(
    question_type: QuestionType,
    max_score: i32,
    correct_answer: Option<&str>,
    given: &str,
) -> Option<i32> {
    if !question_type.is_auto_gradable() {
        return None;
    }

    match correct_answer {
        Some(expected) if answer_matches(given, expected) => Some(max_score),
        _ => Some(0),
    }
}
