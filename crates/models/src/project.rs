use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{category, client, orderable::Orderable};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub year: Option<i32>,
    pub is_featured: bool,
    pub is_published: bool,
    pub order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, Client }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::Client => Entity::belongs_to(client::Entity).from(Column::ClientId).to(client::Column::Id).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Orderable for Entity {
    const NAME: &'static str = "project";
    fn id_column() -> Column { Column::Id }
    fn order_column() -> Column { Column::Order }
}

pub fn validate_year(year: i32) -> Result<i32, crate::errors::ModelError> {
    if !(1900..=2200).contains(&year) {
        return Err(crate::errors::ModelError::invalid("year out of range"));
    }
    Ok(year)
}
