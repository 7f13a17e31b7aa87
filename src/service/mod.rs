//! CrudService: generic CRUD and login over the store capability.

mod crud;
pub mod validation;
pub use crud::{CrudService, LOGIN_MISSING_FIELDS};
pub use validation::RequestValidator;
