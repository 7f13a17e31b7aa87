//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a resource description.

use crate::config::{CredentialBinding, JoinView, Projection, ResourceConfig};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL (safe: only from the catalog).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its cast placeholder (`$n::type`).
    fn push_param(&mut self, v: Value, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

/// Column as read back: numeric as float8 so it decodes to a JSON number.
fn column_expr(name: &str, numeric: bool) -> String {
    let q = quoted(name);
    if numeric {
        format!("{}::float8 AS {}", q, q)
    } else {
        q
    }
}

/// Primary key plus every mutable column; sensitive ones only when asked for.
fn select_column_list(resource: &ResourceConfig, include_sensitive: bool) -> String {
    std::iter::once(quoted(&resource.pk_column))
        .chain(
            resource
                .columns
                .iter()
                .filter(|c| include_sensitive || !c.sensitive)
                .map(|c| column_expr(&c.name, c.is_numeric())),
        )
        .collect::<Vec<_>>()
        .join(", ")
}

fn projection_expr(p: &Projection) -> String {
    let src = format!("{}.{}", quoted(&p.table_alias), quoted(&p.column));
    if p.numeric {
        format!("{}::float8 AS {}", src, quoted(&p.output))
    } else {
        format!("{} AS {}", src, quoted(&p.output))
    }
}

/// `FROM base alias JOIN ...` for a join view.
fn view_from(resource: &ResourceConfig, view: &JoinView) -> String {
    let mut from = format!("{} {}", quoted(&resource.table_name), quoted(&view.alias));
    for j in &view.joins {
        from.push_str(&format!(
            " JOIN {} {} ON {}.{} = {}.{}",
            quoted(&j.table),
            quoted(&j.alias),
            quoted(&view.alias),
            quoted(&j.local_column),
            quoted(&j.alias),
            quoted(&j.foreign_column)
        ));
    }
    from
}

/// SELECT all rows in the resource's fixed order.
pub fn select_list(resource: &ResourceConfig) -> QueryBuf {
    let mut q = QueryBuf::new();
    let order = &resource.order_by;
    q.sql = match &resource.view {
        Some(view) => format!(
            "SELECT {} FROM {} ORDER BY {}.{} {}",
            view.list.iter().map(projection_expr).collect::<Vec<_>>().join(", "),
            view_from(resource, view),
            quoted(&view.alias),
            quoted(&order.column),
            order.direction.as_sql()
        ),
        None => format!(
            "SELECT {} FROM {} ORDER BY {} {}",
            select_column_list(resource, false),
            quoted(&resource.table_name),
            quoted(&order.column),
            order.direction.as_sql()
        ),
    };
    q
}

/// SELECT one row by primary key. A join view adds its raw reference columns.
pub fn select_by_id(resource: &ResourceConfig, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), &resource.pk_type);
    q.sql = match &resource.view {
        Some(view) => format!(
            "SELECT {} FROM {} WHERE {}.{} = {}",
            view.list
                .iter()
                .chain(&view.detail_extra)
                .map(projection_expr)
                .collect::<Vec<_>>()
                .join(", "),
            view_from(resource, view),
            quoted(&view.alias),
            quoted(&resource.pk_column),
            ph
        ),
        None => format!(
            "SELECT {} FROM {} WHERE {} = {}",
            select_column_list(resource, false),
            quoted(&resource.table_name),
            quoted(&resource.pk_column),
            ph
        ),
    };
    q
}

/// SELECT the full row (credential hash included) by natural key. Login only.
pub fn select_by_natural_key(resource: &ResourceConfig, binding: &CredentialBinding, key: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pg_type = resource
        .column(&binding.natural_key)
        .map(|c| c.pg_type.as_str())
        .unwrap_or("text");
    let ph = q.push_param(key.clone(), pg_type);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(resource, true),
        quoted(&resource.table_name),
        quoted(&binding.natural_key),
        ph
    );
    q
}

/// INSERT every mutable column; values missing from the body are bound as NULL.
pub fn insert(resource: &ResourceConfig, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(resource.columns.len());
    let mut placeholders = Vec::with_capacity(resource.columns.len());
    for c in &resource.columns {
        let val = body.get(&c.name).cloned().unwrap_or(Value::Null);
        placeholders.push(q.push_param(val, &c.pg_type));
        cols.push(quoted(&c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(&resource.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(resource, true)
    );
    q
}

/// UPDATE by id, replacing every mutable column. Omitted values become NULL.
pub fn update(resource: &ResourceConfig, id: i64, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(resource.columns.len());
    for c in &resource.columns {
        let val = body.get(&c.name).cloned().unwrap_or(Value::Null);
        let ph = q.push_param(val, &c.pg_type);
        sets.push(format!("{} = {}", quoted(&c.name), ph));
    }
    let id_ph = q.push_param(Value::from(id), &resource.pk_type);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(&resource.table_name),
        sets.join(", "),
        quoted(&resource.pk_column),
        id_ph,
        select_column_list(resource, true)
    );
    q
}

/// DELETE by id, returning the key so an empty result means nothing was removed.
pub fn delete(resource: &ResourceConfig, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), &resource.pk_type);
    let pk = quoted(&resource.pk_column);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(&resource.table_name),
        pk,
        ph,
        pk
    );
    q
}
