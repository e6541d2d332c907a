use models::role::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_teacher_approved: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::progress::Entity")]
    Progress,
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

/// Modules this user teaches, through the `module_teachers` junction table
impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        super::module_teacher::Relation::Module.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::module_teacher::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
