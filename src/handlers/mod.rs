//! HTTP handlers for resource CRUD and login.

pub mod auth;
pub mod resource;
