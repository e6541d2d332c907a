use models::question::{QuestionType, auto_score};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub test_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub question_type: QuestionType,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    /// Only meaningful for choice questions
    pub correct_answer: Option<String>,
    pub max_score: i32,
    pub created_at: DateTime,
}

impl Model {
    /// The labelled, non-empty options of a choice question
    pub fn options(&self) -> Vec<(char, &str)> {
        if self.question_type != QuestionType::Choice {
            return Vec::new();
        }

        [
            ('A', &self.option_a),
            ('B', &self.option_b),
            ('C', &self.option_c),
            ('D', &self.option_d),
        ]
        .into_iter()
        .filter_map(|(label, option)| {
            option
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| (label, text))
        })
        .collect()
    }

    /// Automatic score for `answer_text`, `None` when a teacher must grade it
    pub fn auto_score(&self, answer_text: &str) -> Option<i32> {
        auto_score(
            self.question_type,
            self.max_score,
            self.correct_answer.as_deref(),
            answer_text,
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test::Entity",
        from = "Column::TestId",
        to = "super::test::Column::Id"
    )]
    Test,
    #[sea_orm(has_many = "super::answer::Entity")]
    Answers,
}

impl Related<super::test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
