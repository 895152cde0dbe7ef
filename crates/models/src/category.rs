use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::orderable::Orderable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
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
    const NAME: &'static str = "category";
    fn id_column() -> Column { Column::Id }
    fn order_column() -> Column { Column::Order }
}
