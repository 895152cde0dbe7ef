use sea_orm::EntityTrait;

/// Entities whose rows carry a 1-based display position.
///
/// Implemented by every table with an `order` column so the ordering engine
/// can address id and position generically.
pub trait Orderable: EntityTrait {
    /// Table label used in logs and not-found messages.
    const NAME: &'static str;

    fn id_column() -> Self::Column;

    fn order_column() -> Self::Column;
}
