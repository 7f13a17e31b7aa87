//! Common routes: root banner, health, readiness, and the unmatched-route fallback.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct RootBody {
    msg: &'static str,
    timestamp: String,
    endpoints: Vec<String>,
}

async fn root(State(state): State<AppState>) -> Json<RootBody> {
    let mut endpoints = vec!["/login".to_string()];
    endpoints.extend(state.catalog.path_segments());
    Json(RootBody {
        msg: "API funcionando correctamente",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        endpoints,
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    if let Err(e) = state.store.query("SELECT 1", &[]).await {
        tracing::warn!(error = %e, "readiness check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        );
    }
    (
        StatusCode::OK,
        Json(ReadyBody {
            status: "ok",
            database: "ok",
        }),
    )
}

/// 404 for any method and path no handler serves, echoing both.
pub async fn unmatched(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Ruta no encontrada",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}

/// GET /, GET /health, GET /ready.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root).fallback(unmatched))
        .route("/health", get(health).fallback(unmatched))
        .route("/ready", get(ready).fallback(unmatched))
        .with_state(state)
}
