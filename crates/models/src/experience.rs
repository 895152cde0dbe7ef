use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experience")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Date,
    /// `None` while the position is current.
    pub end_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_period(start: Date, end: Option<Date>) -> Result<(), errors::ModelError> {
    if let Some(end) = end {
        if end < start {
            return Err(errors::ModelError::invalid("end_date precedes start_date"));
        }
    }
    Ok(())
}
