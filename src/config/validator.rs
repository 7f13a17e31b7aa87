//! Catalog validation: every name a resource refers to must exist and be a safe identifier.

use crate::config::ResourceConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("static identifier pattern"))
}

fn check_identifier(name: &str) -> Result<(), ConfigError> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(name.to_string()))
    }
}

fn missing(resource: &ResourceConfig, column: &str) -> ConfigError {
    ConfigError::MissingColumn {
        resource: resource.path_segment.clone(),
        column: column.to_string(),
    }
}

pub fn validate(resources: &[ResourceConfig]) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    for r in resources {
        if !path_segments.insert(r.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment.clone()));
        }
        validate_resource(r)?;
    }
    Ok(())
}

fn validate_resource(r: &ResourceConfig) -> Result<(), ConfigError> {
    check_identifier(&r.path_segment)?;
    check_identifier(&r.table_name)?;
    check_identifier(&r.pk_column)?;
    for c in &r.columns {
        check_identifier(&c.name)?;
        if c.name == r.pk_column {
            return Err(ConfigError::Validation(format!(
                "{}: primary key '{}' must not be listed as a mutable column",
                r.path_segment, c.name
            )));
        }
    }
    if r.columns.is_empty() {
        return Err(ConfigError::Validation(format!("{}: no mutable columns", r.path_segment)));
    }
    if !r.has_column(&r.order_by.column) {
        return Err(missing(r, &r.order_by.column));
    }

    if let Some(binding) = &r.credential {
        r.column(&binding.natural_key).ok_or_else(|| missing(r, &binding.natural_key))?;
        let credential = r.column(&binding.credential).ok_or_else(|| missing(r, &binding.credential))?;
        if !credential.sensitive {
            return Err(ConfigError::Validation(format!(
                "{}: credential column '{}' must be sensitive",
                r.path_segment, credential.name
            )));
        }
    }

    if let Some(view) = &r.view {
        check_identifier(&view.alias)?;
        let mut aliases = HashSet::from([view.alias.as_str()]);
        for j in &view.joins {
            check_identifier(&j.table)?;
            check_identifier(&j.alias)?;
            check_identifier(&j.foreign_column)?;
            if !r.has_column(&j.local_column) {
                return Err(missing(r, &j.local_column));
            }
            if !aliases.insert(j.alias.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{}: duplicate join alias '{}'",
                    r.path_segment, j.alias
                )));
            }
        }
        for p in view.list.iter().chain(&view.detail_extra) {
            check_identifier(&p.column)?;
            check_identifier(&p.output)?;
            if !aliases.contains(p.table_alias.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{}: projection '{}' uses unknown alias '{}'",
                    r.path_segment, p.output, p.table_alias
                )));
            }
            if p.table_alias == view.alias && !r.has_column(&p.column) {
                return Err(missing(r, &p.column));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnInfo, Messages, OrderBy, SortDirection};

    fn resource(path: &str) -> ResourceConfig {
        ResourceConfig {
            path_segment: path.into(),
            table_name: "things".into(),
            pk_column: "id".into(),
            pk_type: "integer".into(),
            columns: vec![ColumnInfo::new("name", "text")],
            order_by: OrderBy { column: "id".into(), direction: SortDirection::Asc },
            view: None,
            credential: None,
            singular: "thing".into(),
            messages: Messages {
                created: String::new(),
                updated: String::new(),
                deleted: String::new(),
                not_found: String::new(),
                delete_not_found: None,
                missing_fields: String::new(),
            },
        }
    }

    #[test]
    fn rejects_duplicate_paths() {
        let err = validate(&[resource("things"), resource("things")]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePathSegment(p) if p == "things"));
    }

    #[test]
    fn rejects_unknown_order_column() {
        let mut r = resource("things");
        r.order_by.column = "created_at".into();
        assert!(matches!(validate(&[r]), Err(ConfigError::MissingColumn { .. })));
    }

    #[test]
    fn rejects_unquotable_identifiers() {
        let mut r = resource("things");
        r.table_name = "things; DROP TABLE x".into();
        assert!(matches!(validate(&[r]), Err(ConfigError::InvalidIdentifier(_))));
    }

    #[test]
    fn credential_column_must_be_sensitive() {
        let mut r = resource("things");
        r.credential = Some(crate::config::CredentialBinding {
            natural_key: "name".into(),
            credential: "name".into(),
        });
        assert!(matches!(validate(&[r]), Err(ConfigError::Validation(_))));
    }
}
