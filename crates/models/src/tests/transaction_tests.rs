use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::setup_test_db;
use crate::service;

fn service_am(title: &str, order: i32) -> service::ActiveModel {
    let now = Utc::now().into();
    service::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.into()),
        description: Set(None),
        icon: Set(None),
        order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = service_am("Branding", 1).insert(&txn).await?;
    txn.commit().await?;

    let found = service::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|s| s.title), Some("Branding".to_string()));
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = service_am("Web design", 1).insert(&txn).await?;
    txn.rollback().await?;

    assert!(service::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Dropping an uncommitted transaction discards its writes
#[tokio::test]
async fn test_transaction_drop_rolls_back() -> Result<()> {
    let db = setup_test_db().await?;
    {
        let txn = db.begin().await?;
        service_am("Illustration", 1).insert(&txn).await?;
        service_am("Motion", 2).insert(&txn).await?;
    }
    assert_eq!(service::Entity::find().count(&db).await?, 0);
    Ok(())
}
