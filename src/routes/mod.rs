//! Router assembly: common, login and resource routes behind request tracing, CORS and a body limit.

pub mod auth;
pub mod common;
pub mod resource;

pub use auth::auth_routes;
pub use common::{common_routes, unmatched};
pub use resource::resource_routes;

use crate::config::{AllowedOrigins, HttpSettings};
use crate::state::AppState;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), path = %req.uri().path(), "request");
    next.run(req).await
}

pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}

/// The whole API.
pub fn app(state: AppState, http: &HttpSettings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(resource_routes(state))
        .fallback(unmatched)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(&http.allowed_origins))
        .layer(middleware::from_fn(log_request))
}
