//! Convert serde_json::Value to types that sqlx can bind.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value that can be bound to a PostgreSQL query. Converts from serde_json::Value.
/// Statements cast every placeholder to the column type, so the declared type only has to carry the value.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Json(Value),
}

impl PgBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => PgBindValue::Null,
            Value::Bool(b) => PgBindValue::Bool(*b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => PgBindValue::I64(i),
                (None, Some(f)) => PgBindValue::F64(f),
                (None, None) => PgBindValue::String(n.to_string()),
            },
            Value::String(s) => PgBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => PgBindValue::Json(v.clone()),
        }
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null => IsNull::Yes,
            PgBindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::String(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            PgBindValue::Json(v) => <serde_json::Value as Encode<Postgres>>::encode_by_ref(v, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            PgBindValue::Null | PgBindValue::String(_) => PgTypeInfo::with_name("TEXT"),
            PgBindValue::Bool(_) => PgTypeInfo::with_name("BOOL"),
            PgBindValue::I64(_) => PgTypeInfo::with_name("INT8"),
            PgBindValue::F64(_) => PgTypeInfo::with_name("FLOAT8"),
            PgBindValue::Json(_) => PgTypeInfo::with_name("JSONB"),
        })
    }
}

impl sqlx::Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(PgBindValue::from_json(&json!(90)), PgBindValue::I64(90));
        assert_eq!(PgBindValue::from_json(&json!(9.5)), PgBindValue::F64(9.5));
        assert_eq!(PgBindValue::from_json(&json!("90")), PgBindValue::String("90".into()));
        assert_eq!(PgBindValue::from_json(&Value::Null), PgBindValue::Null);
    }

    #[test]
    fn declared_type_follows_the_value() {
        use sqlx::TypeInfo;
        let declared = |v: Value| {
            let bind = PgBindValue::from_json(&v);
            <PgBindValue as Encode<Postgres>>::produces(&bind).unwrap().name().to_string()
        };
        assert_eq!(declared(json!(7)), "INT8");
        assert_eq!(declared(json!(9.5)), "FLOAT8");
        assert_eq!(declared(json!(true)), "BOOL");
        assert_eq!(declared(json!("V-1")), "TEXT");
        assert_eq!(declared(Value::Null), "TEXT");
        assert_eq!(declared(json!({"a": [1]})), "JSONB");
    }
}
