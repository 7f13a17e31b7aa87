//! Response envelope helpers: `{ msg }` and `{ msg, <key>: row }`.

use axum::Json;
use serde_json::{Map, Value};

pub fn message(msg: &str) -> Json<Value> {
    Json(serde_json::json!({ "msg": msg }))
}

pub fn message_with(msg: &str, key: &str, data: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("msg".into(), Value::String(msg.to_string()));
    body.insert(key.to_string(), data);
    Json(Value::Object(body))
}
