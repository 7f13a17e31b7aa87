//! Resource description types: one `ResourceConfig` per table exposed over HTTP.

/// How a write body must carry a column on create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Never checked.
    Optional,
    /// Missing, null, false, 0 and "" all count as absent.
    Truthy,
    /// Only a missing key counts as absent; null and 0 are accepted.
    Defined,
}

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    /// PostgreSQL type name used for parameter casts (e.g. "integer", "text").
    pub pg_type: String,
    pub presence: Presence,
    /// Stripped from every response.
    pub sensitive: bool,
}

impl ColumnInfo {
    pub fn new(name: &str, pg_type: &str) -> Self {
        ColumnInfo {
            name: name.to_string(),
            pg_type: pg_type.to_string(),
            presence: Presence::Optional,
            sensitive: false,
        }
    }

    pub fn required(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Numeric columns are read back as float8 so rows decode to JSON numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self.pg_type.as_str(), "numeric" | "decimal")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Inner join from the view's base table to a referenced table.
#[derive(Clone, Debug)]
pub struct Join {
    pub table: String,
    pub alias: String,
    /// Column on the base table holding the reference.
    pub local_column: String,
    /// Column on the joined table being referenced.
    pub foreign_column: String,
}

/// One output column of a join view.
#[derive(Clone, Debug)]
pub struct Projection {
    pub table_alias: String,
    pub column: String,
    pub output: String,
    pub numeric: bool,
}

impl Projection {
    pub fn new(table_alias: &str, column: &str) -> Self {
        Projection {
            table_alias: table_alias.to_string(),
            column: column.to_string(),
            output: column.to_string(),
            numeric: false,
        }
    }

    pub fn rename(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// Read-side shape for resources whose list/read present referenced names instead of raw rows.
#[derive(Clone, Debug)]
pub struct JoinView {
    /// Alias of the resource's own table.
    pub alias: String,
    pub joins: Vec<Join>,
    /// Columns returned by list and read.
    pub list: Vec<Projection>,
    /// Extra columns returned by read only (raw references needed for a later update).
    pub detail_extra: Vec<Projection>,
}

/// Marks a resource as holding login credentials.
#[derive(Clone, Debug)]
pub struct CredentialBinding {
    /// Column looked up on login.
    pub natural_key: String,
    /// Column holding the hash; the body carries the raw value under the same name.
    pub credential: String,
}

#[derive(Clone, Debug)]
pub struct Messages {
    pub created: String,
    pub updated: String,
    pub deleted: String,
    pub not_found: String,
    /// Delete of an unknown id, when it differs from `not_found`.
    pub delete_not_found: Option<String>,
    pub missing_fields: String,
}

impl Messages {
    pub fn delete_not_found(&self) -> &str {
        self.delete_not_found.as_deref().unwrap_or(&self.not_found)
    }
}

#[derive(Clone, Debug)]
pub struct ResourceConfig {
    pub path_segment: String,
    pub table_name: String,
    pub pk_column: String,
    pub pk_type: String,
    /// Mutable columns, in statement order. Excludes the primary key.
    pub columns: Vec<ColumnInfo>,
    pub order_by: OrderBy,
    pub view: Option<JoinView>,
    pub credential: Option<CredentialBinding>,
    /// Response key for the updated row (`{ msg, <singular>: row }`).
    pub singular: String,
    pub messages: Messages,
}

impl ResourceConfig {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        name == self.pk_column || self.column(name).is_some()
    }

    pub fn sensitive_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| c.sensitive)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| c.presence != Presence::Optional)
    }
}
