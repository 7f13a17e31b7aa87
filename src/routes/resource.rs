//! Resource routes built from the catalog: `/{segment}` and `/{segment}/:id` per resource.
//! Each resource gets its own sub-router whose state carries the resource it serves.

use crate::handlers::resource::{create, delete as delete_handler, list, read, update};
use crate::routes::common::unmatched;
use crate::state::{AppState, ResourceState};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn resource_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for resource in &state.catalog.resources {
        let segment = resource.path_segment.clone();
        let resource_state = ResourceState {
            app: state.clone(),
            resource: Arc::new(resource.clone()),
        };
        router = router.merge(
            Router::new()
                .route(&format!("/{}", segment), get(list).post(create).fallback(unmatched))
                .route(
                    &format!("/{}/:id", segment),
                    get(read).put(update).delete(delete_handler).fallback(unmatched),
                )
                .with_state(resource_state),
        );
    }
    router
}
