//! Resource handlers: list, read, create, update, delete for whichever resource the route serves.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{message, message_with};
use crate::service::CrudService;
use crate::state::ResourceState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

pub async fn list(State(state): State<ResourceState>) -> Result<Json<Vec<Value>>, AppError> {
    let rows = CrudService::list(state.app.store.as_ref(), &state.resource).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<ResourceState>,
    Path(id_str): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read(state.app.store.as_ref(), &state.resource, id)
        .await?
        .ok_or_else(|| AppError::NotFound(state.resource.messages.not_found.clone()))?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<ResourceState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, AppError> {
    let resource = &state.resource;
    let row = CrudService::create(state.app.store.as_ref(), state.app.guard.as_ref(), resource, body).await?;
    Ok(message_with(&resource.messages.created, "data", row))
}

pub async fn update(
    State(state): State<ResourceState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id_str)?;
    let resource = &state.resource;
    let row = CrudService::update(state.app.store.as_ref(), state.app.guard.as_ref(), resource, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(resource.messages.not_found.clone()))?;
    Ok(message_with(&resource.messages.updated, &resource.singular, row))
}

pub async fn delete(
    State(state): State<ResourceState>,
    Path(id_str): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id_str)?;
    let resource = &state.resource;
    if !CrudService::delete(state.app.store.as_ref(), resource, id).await? {
        return Err(AppError::NotFound(resource.messages.delete_not_found().to_string()));
    }
    Ok(message(&resource.messages.deleted))
}
