use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_admin(&self) -> bool { self.role == ROLE_ADMIN }
}

pub fn validate_role(role: &str) -> Result<String, errors::ModelError> {
    match role {
        ROLE_ADMIN | ROLE_EDITOR => Ok(role.to_string()),
        _ => Err(errors::ModelError::invalid("role must be admin or editor")),
    }
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    email: &str,
    name: &str,
    password_hash: String,
    role: &str,
) -> Result<Model, errors::ModelError> {
    let email = validate::email(email)?;
    let name = validate::required_text("name", name, 128)?;
    let role = validate_role(role)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(name),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    let email = email.trim().to_ascii_lowercase();
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
