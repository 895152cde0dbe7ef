//! Admin authentication in three layers: domain, repository, service.
//!
//! The service is independent of the web framework; the server crate turns
//! bearer tokens into [`domain::AuthUser`] through [`AuthService::authenticate`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
