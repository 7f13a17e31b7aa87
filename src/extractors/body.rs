//! Write-body extractor: a JSON object, or an empty map when the request carries no JSON.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Body of a write command. A missing body or a non-JSON content type yields an empty map, so the
/// request still reaches presence validation; malformed JSON and non-object JSON are rejected with 400.
/// Failures reading the body (e.g. over the size limit) keep their own status.
#[derive(Clone, Debug, Default)]
pub struct JsonBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);
        let bytes = Bytes::from_request(req, state).await.map_err(IntoResponse::into_response)?;
        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Map::new()));
        }
        parse_object(&bytes).map(JsonBody).map_err(IntoResponse::into_response)
    }
}

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// `application/json`, parameters ignored, plus any `+json` suffix type.
fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_matching() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/x-www-form-urlencoded"));
    }

    #[test]
    fn only_objects_are_accepted() {
        assert_eq!(parse_object(br#"{"a": 1}"#).unwrap().len(), 1);
        assert!(matches!(parse_object(b"[1]"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_object(b"{"), Err(AppError::BadRequest(_))));
    }
}
