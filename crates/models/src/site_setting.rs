use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_setting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_key(key: &str) -> Result<String, errors::ModelError> {
    let k = key.trim();
    if k.is_empty() || k.len() > 64 {
        return Err(errors::ModelError::invalid("setting key must be 1..=64 characters"));
    }
    Ok(k.to_string())
}
