use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::orderable::Orderable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub is_visible: bool,
    pub order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Project }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Project => Entity::has_many(crate::project::Entity).into() }
    }
}

impl Related<crate::project::Entity> for Entity {
    fn to() -> RelationDef { Relation::Project.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Orderable for Entity {
    const NAME: &'static str = "client";
    fn id_column() -> Column { Column::Id }
    fn order_column() -> Column { Column::Order }
}
