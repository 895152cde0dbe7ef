use thiserror::Error;

use crate::ordering::OrderingError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Transaction could not run or commit; nothing was applied.
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn conflict(what: impl Into<String>) -> Self { Self::Conflict(what.into()) }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Storage(e.to_string()),
        }
    }
}

impl From<OrderingError> for ServiceError {
    fn from(e: OrderingError) -> Self {
        match e {
            OrderingError::UnknownId(_) => Self::NotFound(e.to_string()),
            OrderingError::Empty | OrderingError::DuplicateId(_) => Self::Validation(e.to_string()),
        }
    }
}
