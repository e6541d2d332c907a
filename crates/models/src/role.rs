use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The capability tier a platform user holds
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
pub enum Role {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "student"))]
    Student,
    #[cfg_attr(feature = "database", sea_orm(string_value = "teacher"))]
    Teacher,
    #[cfg_attr(feature = "database", sea_orm(string_value = "manager"))]
    Manager,
}

impl Role {
    pub fn is_teacher(self) -> bool {
        self == Self::Teacher
    }

    pub fn is_student(self) -> bool {
        self == Self::Student
    }
}
