//! Academic records API: catalog-driven CRUD over users, subjects, students and grades.

pub mod config;
pub mod credential;
pub mod error;
pub mod extractors;
pub mod response;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{Catalog, ResourceConfig, Settings};
pub use credential::{redact, Argon2Guard, CredentialGuard};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::app;
pub use service::CrudService;
pub use state::{AppState, ResourceState};
pub use store::{connect, PgStore, Store};
