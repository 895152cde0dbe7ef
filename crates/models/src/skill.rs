use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, orderable::Orderable};

/// Skill grouping; each category keeps its own ordering sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "development")]
    Development,
    #[sea_orm(string_value = "tools")]
    Tools,
    #[sea_orm(string_value = "soft")]
    Soft,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skill")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub level: Option<i32>,
    pub order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Orderable for Entity {
    const NAME: &'static str = "skill";
    fn id_column() -> Column { Column::Id }
    fn order_column() -> Column { Column::Order }
}

pub fn validate_level(level: i32) -> Result<i32, errors::ModelError> {
    if !(0..=100).contains(&level) {
        return Err(errors::ModelError::invalid("level must be within 0..=100"));
    }
    Ok(level)
}
