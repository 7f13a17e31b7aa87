//! Login handler.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::message_with;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

pub const WELCOME: &str = "Bienvenido";

pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody) -> Result<Json<Value>, AppError> {
    let resource = state
        .catalog
        .credential_resource()
        .ok_or_else(|| AppError::NotFound("login not available".into()))?;
    let user = CrudService::login(state.store.as_ref(), state.guard.as_ref(), resource, &body).await?;
    Ok(message_with(WELCOME, &resource.singular, user))
}
