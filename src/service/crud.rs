//! Generic CRUD execution: one statement per operation, every outgoing row redacted.

use crate::config::{CredentialBinding, ResourceConfig};
use crate::credential::{redact, CredentialGuard};
use crate::error::{AppError, StoreError};
use crate::service::validation::is_truthy;
use crate::service::RequestValidator;
use crate::sql::{self, QueryBuf};
use crate::store::Store;
use serde_json::{Map, Value};

pub const LOGIN_MISSING_FIELDS: &str = "Cédula y contraseña son requeridas";

pub struct CrudService;

impl CrudService {
    /// All rows in the resource's fixed order.
    pub async fn list(store: &dyn Store, resource: &ResourceConfig) -> Result<Vec<Value>, AppError> {
        let rows = Self::run(store, &sql::select_list(resource)).await?;
        Ok(rows.into_iter().map(|r| redact(resource, r)).collect())
    }

    /// Fetch one row by primary key. Returns None when no row matches.
    pub async fn read(store: &dyn Store, resource: &ResourceConfig, id: i64) -> Result<Option<Value>, AppError> {
        let row = Self::run_one(store, &sql::select_by_id(resource, id)).await?;
        Ok(row.map(|r| redact(resource, r)))
    }

    /// Validate, seal the credential if the resource holds one, insert. Returns the created row.
    pub async fn create(
        store: &dyn Store,
        guard: &dyn CredentialGuard,
        resource: &ResourceConfig,
        mut body: Map<String, Value>,
    ) -> Result<Value, AppError> {
        RequestValidator::validate_create(&body, resource)?;
        if let Some(binding) = &resource.credential {
            seal_credential(guard, resource, binding, &mut body)?;
        }
        let row = Self::run_one(store, &sql::insert(resource, &body))
            .await?
            .ok_or_else(|| AppError::Store(StoreError::Database(sqlx::Error::RowNotFound)))?;
        Ok(redact(resource, row))
    }

    /// Full replace of every mutable column. Returns None when no row matches.
    pub async fn update(
        store: &dyn Store,
        guard: &dyn CredentialGuard,
        resource: &ResourceConfig,
        id: i64,
        mut body: Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        if let Some(binding) = &resource.credential {
            seal_credential(guard, resource, binding, &mut body)?;
        }
        let row = Self::run_one(store, &sql::update(resource, id, &body)).await?;
        Ok(row.map(|r| redact(resource, r)))
    }

    /// Delete one row by id. Returns false when nothing was removed.
    pub async fn delete(store: &dyn Store, resource: &ResourceConfig, id: i64) -> Result<bool, AppError> {
        let rows = Self::run(store, &sql::delete(resource, id)).await?;
        Ok(!rows.is_empty())
    }

    /// Look up by natural key and verify the credential. Unknown key and wrong credential fail identically.
    pub async fn login(
        store: &dyn Store,
        guard: &dyn CredentialGuard,
        resource: &ResourceConfig,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let binding = resource
            .credential
            .as_ref()
            .ok_or_else(|| AppError::BadRequest(format!("{} has no credentials", resource.path_segment)))?;
        RequestValidator::require_truthy(
            body,
            &[binding.natural_key.as_str(), binding.credential.as_str()],
            LOGIN_MISSING_FIELDS,
        )?;
        let (Some(key), Some(raw)) = (body.get(&binding.natural_key), body.get(&binding.credential)) else {
            return Err(AppError::Validation(LOGIN_MISSING_FIELDS.into()));
        };
        tracing::info!(key = %key, "login attempt");

        let raw = credential_text(raw).ok_or(AppError::Unauthorized)?;
        let row = Self::run_one(store, &sql::select_by_natural_key(resource, binding, key))
            .await?
            .ok_or(AppError::Unauthorized)?;
        let stored = row
            .get(&binding.credential)
            .and_then(Value::as_str)
            .ok_or(AppError::Unauthorized)?;
        if !guard.verify(&raw, stored) {
            return Err(AppError::Unauthorized);
        }
        tracing::info!(key = %key, "login successful");
        Ok(redact(resource, row))
    }

    async fn run(store: &dyn Store, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        Ok(store.query(&q.sql, &q.params).await?)
    }

    async fn run_one(store: &dyn Store, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        Ok(Self::run(store, q).await?.into_iter().next())
    }
}

/// Replace the raw credential in the body with its hash.
fn seal_credential(
    guard: &dyn CredentialGuard,
    resource: &ResourceConfig,
    binding: &CredentialBinding,
    body: &mut Map<String, Value>,
) -> Result<(), AppError> {
    let raw = body
        .get(&binding.credential)
        .filter(|v| is_truthy(Some(*v)))
        .and_then(credential_text)
        .ok_or_else(|| AppError::Validation(resource.messages.missing_fields.clone()))?;
    let hash = guard.issue(&raw)?;
    body.insert(binding.credential.clone(), Value::String(hash));
    Ok(())
}

/// Credentials arrive as strings; numeric ones are taken by their decimal text.
fn credential_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
