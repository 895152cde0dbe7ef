//! Service layer providing business operations on top of models.
//! - Every ordered collection appends and reorders through [`ordered_store`].
//! - Reuses validation and entity definitions in the `models` crate.
//! - Handlers in the server crate map [`errors::ServiceError`] to HTTP statuses.

pub mod errors;
pub mod pagination;
pub mod ordering;
pub mod ordered_store;
pub mod serde_ext;
pub mod categories;
pub mod clients;
pub mod hero_slides;
pub mod projects;
pub mod services;
pub mod skills;
pub mod experiences;
pub mod messages;
pub mod settings;
pub mod auth;
pub mod keepalive;
#[cfg(test)]
pub mod test_support;
