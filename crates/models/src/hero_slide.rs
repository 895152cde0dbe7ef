use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::orderable::Orderable;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_slide")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: bool,
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
    const NAME: &'static str = "hero_slide";
    fn id_column() -> Column { Column::Id }
    fn order_column() -> Column { Column::Order }
}
