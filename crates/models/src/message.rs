use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

/// Contact form submission.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: &str,
    subject: Option<&str>,
    body: &str,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(validate::required_text("name", name, 128)?),
        email: Set(validate::email(email)?),
        subject: Set(validate::optional_text("subject", subject, 256)?),
        body: Set(validate::required_text("body", body, 5000)?),
        is_read: Set(false),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
