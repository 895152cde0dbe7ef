//! Free-form key/value site settings (contact email, social links, footer text).

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};

use models::site_setting::{self, Entity as SettingEntity};

use crate::errors::ServiceError;

const MAX_VALUE_LEN: usize = 10_000;

pub async fn get_settings(db: &DatabaseConnection) -> Result<BTreeMap<String, String>, ServiceError> {
    let rows = SettingEntity::find().order_by_asc(site_setting::Column::Key).all(db).await?;
    Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
}

/// Upsert every given key in one transaction; keys not mentioned are kept.
#[instrument(skip(db, values), fields(keys = values.len()))]
pub async fn put_settings(db: &DatabaseConnection, values: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, ServiceError> {
    let mut rows = Vec::with_capacity(values.len());
    for (key, value) in &values {
        let key = site_setting::validate_key(key)?;
        if value.chars().count() > MAX_VALUE_LEN {
            return Err(ServiceError::Validation(format!("setting '{key}' longer than {MAX_VALUE_LEN} characters")));
        }
        rows.push((key, value.clone()));
    }

    let txn = db.begin().await?;
    let now = Utc::now();
    for (key, value) in rows {
        let am = site_setting::ActiveModel { key: Set(key), value: Set(value), updated_at: Set(now.into()) };
        SettingEntity::insert(am)
            .on_conflict(
                OnConflict::column(site_setting::Column::Key)
                    .update_columns([site_setting::Column::Value, site_setting::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;
    info!(keys = values.len(), "settings_updated");
    get_settings(db).await
}
