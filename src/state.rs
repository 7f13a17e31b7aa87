//! Shared application state. Constructed once at startup; no mutable state lives here.

use crate::config::{Catalog, ResourceConfig};
use crate::credential::CredentialGuard;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub guard: Arc<dyn CredentialGuard>,
    pub catalog: Arc<Catalog>,
}

/// State of one resource's routes: the shared state plus the resource they serve.
#[derive(Clone)]
pub struct ResourceState {
    pub app: AppState,
    pub resource: Arc<ResourceConfig>,
}
