//! Root banner, health, readiness and unmatched routes.

mod common;

use axum::http::StatusCode;
use common::{router, send, ScriptedStore};
use serde_json::json;

#[tokio::test]
async fn unknown_path_echoes_path_and_method() {
    let app = router(ScriptedStore::new());

    let (status, body) = send(&app, "GET", "/calificaciones", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ruta no encontrada", "path": "/calificaciones", "method": "GET"}));
}

#[tokio::test]
async fn unsupported_method_on_known_path_is_unmatched() {
    let store = ScriptedStore::new();
    let app = router(store.clone());

    let (status, body) = send(&app, "PATCH", "/usuarios/1", Some(json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["path"], "/usuarios/1");
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = router(ScriptedStore::new());

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "API funcionando correctamente");
    assert_eq!(
        body["endpoints"],
        json!(["/login", "/usuarios", "/materias", "/estudiantes", "/notas"])
    );
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn readiness_follows_the_store() {
    let store = ScriptedStore::new();
    store.respond(vec![json!({"?column?": 1})]);
    store.fail("connection refused");
    let app = router(store);

    let (ok, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(ok, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (down, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(down, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn health_needs_no_store() {
    let store = ScriptedStore::new();
    let app = router(store.clone());

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(store.call_count(), 0);
}
