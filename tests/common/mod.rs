//! Shared fixtures: a scripted store that records every statement, and a transparent credential guard.

#![allow(dead_code)]

use academic_records::config::{AllowedOrigins, HttpSettings};
use academic_records::{app, AppError, AppState, Catalog, CredentialGuard, Store, StoreError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For oneshot()

/// Returns queued results in order; an empty queue yields no rows.
#[derive(Default)]
pub struct ScriptedStore {
    responses: Mutex<VecDeque<Result<Vec<Value>, String>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl ScriptedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, rows: Vec<Value>) {
        self.responses.lock().unwrap().push_back(Ok(rows));
    }

    pub fn fail(&self, message: &str) {
        self.responses.lock().unwrap().push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> (String, Vec<Value>) {
        self.calls.lock().unwrap().last().cloned().expect("no store call recorded")
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, StoreError> {
        self.calls.lock().unwrap().push((sql.to_string(), params.to_vec()));
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(StoreError::Unavailable(message)),
            None => Ok(Vec::new()),
        }
    }
}

/// "Hashes" by prefixing, so tests can see exactly what reached the store.
pub struct PrefixGuard;

impl CredentialGuard for PrefixGuard {
    fn issue(&self, raw: &str) -> Result<String, AppError> {
        Ok(format!("hash:{}", raw))
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        stored == format!("hash:{}", raw)
    }
}

pub fn router_with(store: Arc<ScriptedStore>, guard: Arc<dyn CredentialGuard>) -> Router {
    build(store, guard, AllowedOrigins::Any)
}

/// Router whose CORS layer only admits the given origins.
pub fn router_with_origins(store: Arc<ScriptedStore>, origins: &[&str]) -> Router {
    let list = origins.iter().map(|o| o.to_string()).collect();
    build(store, Arc::new(PrefixGuard), AllowedOrigins::List(list))
}

fn build(store: Arc<ScriptedStore>, guard: Arc<dyn CredentialGuard>, allowed_origins: AllowedOrigins) -> Router {
    let state = AppState {
        store,
        guard,
        catalog: Arc::new(Catalog::academic().unwrap()),
    };
    let http = HttpSettings {
        host: "127.0.0.1".into(),
        port: 0,
        allowed_origins,
    };
    app(state, &http)
}

pub fn router(store: Arc<ScriptedStore>) -> Router {
    router_with(store, Arc::new(PrefixGuard))
}

/// Send one request and return status plus parsed JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a prepared request and return the raw response, headers included.
pub async fn send_request(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Send a raw body with an optional content type and return status plus parsed JSON body.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let response = send_request(app, builder.body(body.into()).unwrap()).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
