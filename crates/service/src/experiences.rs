//! Work history. Listed newest first by start date; no manual ordering.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::experience::{self, Entity as ExperienceEntity};
use models::validate;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewExperience {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    /// Omit while the position is current.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
}

pub async fn list_experiences(db: &DatabaseConnection) -> Result<Vec<experience::Model>, ServiceError> {
    let rows = ExperienceEntity::find()
        .order_by_desc(experience::Column::StartDate)
        .order_by_asc(experience::Column::Company)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_experience(db: &DatabaseConnection, id: Uuid) -> Result<Option<experience::Model>, ServiceError> {
    Ok(ExperienceEntity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db, input), fields(company = %input.company))]
pub async fn create_experience(db: &DatabaseConnection, input: NewExperience) -> Result<experience::Model, ServiceError> {
    let company = validate::required_text("company", &input.company, 128)?;
    let role = validate::required_text("role", &input.role, 128)?;
    let location = validate::optional_text("location", input.location.as_deref(), 128)?;
    let description = validate::optional_text("description", input.description.as_deref(), 5000)?;
    experience::validate_period(input.start_date, input.end_date)?;

    let now = Utc::now();
    let am = experience::ActiveModel {
        id: Set(Uuid::new_v4()),
        company: Set(company),
        role: Set(role),
        location: Set(location),
        description: Set(description),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let created = am.insert(db).await?;
    info!(id = %created.id, "experience_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_experience(db: &DatabaseConnection, id: Uuid, patch: ExperiencePatch) -> Result<experience::Model, ServiceError> {
    let Some(existing) = ExperienceEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("experience"));
    };
    let start = patch.start_date.unwrap_or(existing.start_date);
    let end = patch.end_date.unwrap_or(existing.end_date);
    experience::validate_period(start, end)?;

    let mut am: experience::ActiveModel = existing.into();
    if let Some(c) = patch.company.as_deref() { am.company = Set(validate::required_text("company", c, 128)?); }
    if let Some(r) = patch.role.as_deref() { am.role = Set(validate::required_text("role", r, 128)?); }
    if let Some(l) = patch.location.as_deref() { am.location = Set(validate::optional_text("location", Some(l), 128)?); }
    if let Some(d) = patch.description.as_deref() { am.description = Set(validate::optional_text("description", Some(d), 5000)?); }
    am.start_date = Set(start);
    am.end_date = Set(end);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "experience_updated");
    Ok(updated)
}

pub async fn delete_experience(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = ExperienceEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "experience_deleted"); }
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn new(company: &str, start: NaiveDate, end: Option<NaiveDate>) -> NewExperience {
        NewExperience { company: company.into(), role: "Designer".into(), location: None, description: None, start_date: start, end_date: end }
    }

    #[tokio::test]
    async fn newest_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_experience(&db, new("Early", date(2015, 1), Some(date(2018, 6)))).await?;
        create_experience(&db, new("Current", date(2021, 3), None)).await?;
        create_experience(&db, new("Middle", date(2018, 7), Some(date(2021, 2)))).await?;
        let companies: Vec<String> = list_experiences(&db).await?.into_iter().map(|e| e.company).collect();
        assert_eq!(companies, ["Current", "Middle", "Early"]);
        Ok(())
    }

    #[tokio::test]
    async fn period_must_not_run_backwards() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let bad = create_experience(&db, new("Oops", date(2020, 1), Some(date(2019, 1)))).await;
        assert!(matches!(bad, Err(ServiceError::Model(_))));

        let e = create_experience(&db, new("Ok", date(2020, 1), None)).await?;
        let res = update_experience(&db, e.id, ExperiencePatch { end_date: Some(Some(date(2010, 1))), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));

        let ended = update_experience(&db, e.id, ExperiencePatch { end_date: Some(Some(date(2022, 5))), ..Default::default() }).await?;
        assert_eq!(ended.end_date, Some(date(2022, 5)));
        let reopened: ExperiencePatch = serde_json::from_str(r#"{"end_date": null}"#)?;
        assert_eq!(update_experience(&db, e.id, reopened).await?.end_date, None);
        Ok(())
    }
}
