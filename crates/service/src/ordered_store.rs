//! SeaORM driver for orderable collections.
//!
//! Every read-plan-write cycle runs inside one transaction, so readers never
//! observe a half-applied reorder and a failed call leaves positions as they
//! were. Partitions are expressed as a [`Condition`]; `Condition::all()` is the
//! whole table.

use sea_orm::{
    sea_query::Expr, ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::orderable::Orderable;

use crate::errors::ServiceError;
use crate::ordering::{self, Assignment};

/// Highest stored position in the partition, `None` when it is empty.
pub async fn max_order<E, C>(conn: &C, scope: Condition) -> Result<Option<i32>, DbErr>
where
    E: Orderable,
    C: ConnectionTrait,
{
    let max = E::find()
        .select_only()
        .column_as(E::order_column().max(), "max_order")
        .filter(scope)
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?;
    Ok(max.flatten())
}

/// `(id, order)` for every row of the partition, lowest position first.
pub async fn load_positions<E, C>(conn: &C, scope: Condition) -> Result<Vec<(Uuid, i32)>, DbErr>
where
    E: Orderable,
    C: ConnectionTrait,
{
    E::find()
        .select_only()
        .column(E::id_column())
        .column(E::order_column())
        .filter(scope)
        .order_by_asc(E::order_column())
        .order_by_asc(E::id_column())
        .into_tuple::<(Uuid, i32)>()
        .all(conn)
        .await
}

/// One UPDATE per assignment; callers pass a transaction.
pub async fn write_positions<E, C>(conn: &C, assignments: &[Assignment]) -> Result<(), DbErr>
where
    E: Orderable,
    C: ConnectionTrait,
{
    for a in assignments {
        E::update_many()
            .col_expr(E::order_column(), Expr::value(a.order))
            .filter(E::id_column().eq(a.id))
            .exec(conn)
            .await?;
    }
    Ok(())
}

/// Rewrite positions of `scope` so that `ids` come first, in that order.
///
/// Returns the number of rows whose position actually changed.
#[instrument(skip(db, scope, ids), fields(collection = E::NAME, items = ids.len()))]
pub async fn reorder<E>(db: &DatabaseConnection, scope: Condition, ids: &[Uuid]) -> Result<usize, ServiceError>
where
    E: Orderable,
{
    let txn = db.begin().await?;
    let rewritten = reorder_within::<E, _>(&txn, scope, ids).await?;
    txn.commit().await?;
    Ok(rewritten)
}

/// Read-plan-write on an open transaction; the caller commits.
pub async fn reorder_within<E, C>(conn: &C, scope: Condition, ids: &[Uuid]) -> Result<usize, ServiceError>
where
    E: Orderable,
    C: ConnectionTrait,
{
    let current = load_positions::<E, _>(conn, scope).await?;
    let plan = ordering::plan_reorder(&current, ids)?;
    let diff = ordering::changed(&current, &plan);
    write_positions::<E, _>(conn, &diff).await?;
    info!(collection = E::NAME, partition_size = current.len(), rewritten = diff.len(), "collection_reordered");
    Ok(diff.len())
}

/// Insert a row built for the next free position of `scope`.
///
/// The max read and the insert share a transaction; concurrent creates under
/// READ COMMITTED may still tie, which the next reorder flattens.
pub async fn append<E, A, F>(db: &DatabaseConnection, scope: Condition, build: F) -> Result<E::Model, ServiceError>
where
    E: Orderable,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    E::Model: IntoActiveModel<A>,
    F: FnOnce(i32) -> A,
{
    let txn = db.begin().await?;
    let order = ordering::next_position(max_order::<E, _>(&txn, scope).await?);
    let model = build(order).insert(&txn).await?;
    txn.commit().await?;
    debug!(collection = E::NAME, order, "appended");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, Set};

    use crate::test_support::get_db;
    use models::client;

    async fn add_client(db: &DatabaseConnection, name: &str) -> client::Model {
        let now = Utc::now();
        append::<client::Entity, _, _>(db, Condition::all(), |order| client::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            logo_url: Set(None),
            website_url: Set(None),
            is_visible: Set(true),
            order: Set(order),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .await
        .expect("append client")
    }

    async fn positions(db: &DatabaseConnection) -> Vec<(Uuid, i32)> {
        load_positions::<client::Entity, _>(db, Condition::all()).await.expect("load positions")
    }

    #[tokio::test]
    async fn append_starts_at_one_and_increments() {
        let db = get_db().await.unwrap();
        assert_eq!(max_order::<client::Entity, _>(&db, Condition::all()).await.unwrap(), None);
        let a = add_client(&db, "A").await;
        let b = add_client(&db, "B").await;
        assert_eq!(a.order, 1);
        assert_eq!(b.order, 2);
        assert_eq!(max_order::<client::Entity, _>(&db, Condition::all()).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn failed_batch_leaves_positions_untouched() {
        let db = get_db().await.unwrap();
        let a = add_client(&db, "A").await;
        let b = add_client(&db, "B").await;
        let c = add_client(&db, "C").await;
        let before = positions(&db).await;

        let plan = ordering::plan_reorder(&before, &[c.id, b.id, a.id]).unwrap();
        let outcome: Result<(), DbErr> = async {
            let txn = db.begin().await?;
            // first of three writes lands, then the store fails
            write_positions::<client::Entity, _>(&txn, &plan[..1]).await?;
            txn.execute_unprepared("UPDATE no_such_table SET x = 1").await?;
            write_positions::<client::Entity, _>(&txn, &plan[1..]).await?;
            txn.commit().await
        }
        .await;

        assert!(outcome.is_err());
        assert_eq!(positions(&db).await, before);
    }
}
