//! Position planning for orderable collections.
//!
//! Pure functions only: the storage driver in [`crate::ordered_store`] loads a
//! partition, asks [`plan_reorder`] for the new positions and writes them in
//! one transaction.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("reorder list is empty")]
    Empty,
    #[error("id {0} listed more than once")]
    DuplicateId(Uuid),
    #[error("id {0} is not part of this collection")]
    UnknownId(Uuid),
}

/// New position for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub id: Uuid,
    pub order: i32,
}

/// Request body of every `POST /api/{collection}/reorder` endpoint.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReorderInput {
    pub items: Vec<ReorderItem>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReorderItem {
    pub id: Uuid,
}

impl ReorderInput {
    pub fn ids(&self) -> Vec<Uuid> { self.items.iter().map(|i| i.id).collect() }
}

/// Position a new record takes when appended to a partition.
pub fn next_position(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/// Compute the full assignment for a partition.
///
/// `current` is every `(id, order)` in the partition; `desired` the caller's
/// ordering. Listed ids get `1..=n` in list order. Records the caller left out
/// keep their relative order (by current position, ties by input order) and
/// follow as `n+1..`, so the result is always dense.
pub fn plan_reorder(current: &[(Uuid, i32)], desired: &[Uuid]) -> Result<Vec<Assignment>, OrderingError> {
    if desired.is_empty() {
        return Err(OrderingError::Empty);
    }

    let known: HashSet<Uuid> = current.iter().map(|(id, _)| *id).collect();
    let mut listed = HashSet::with_capacity(desired.len());
    for id in desired {
        if !known.contains(id) {
            return Err(OrderingError::UnknownId(*id));
        }
        if !listed.insert(*id) {
            return Err(OrderingError::DuplicateId(*id));
        }
    }

    let mut rest: Vec<(Uuid, i32)> = current.iter().copied().filter(|(id, _)| !listed.contains(id)).collect();
    // stable: equal positions keep load order
    rest.sort_by_key(|(_, order)| *order);

    let plan = desired
        .iter()
        .copied()
        .chain(rest.into_iter().map(|(id, _)| id))
        .enumerate()
        .map(|(idx, id)| Assignment { id, order: idx as i32 + 1 })
        .collect();
    Ok(plan)
}

/// Assignments that differ from the stored position; the only rows worth writing.
pub fn changed(current: &[(Uuid, i32)], plan: &[Assignment]) -> Vec<Assignment> {
    let stored: HashMap<Uuid, i32> = current.iter().copied().collect();
    plan.iter().copied().filter(|a| stored.get(&a.id) != Some(&a.order)).collect()
}
