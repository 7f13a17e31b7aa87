//! The set of resources served by the API, keyed by path segment.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Catalog {
    pub resources: Vec<ResourceConfig>,
    by_path: HashMap<String, usize>,
}

impl Catalog {
    /// Validates every resource and indexes them by path segment.
    pub fn new(resources: Vec<ResourceConfig>) -> Result<Self, ConfigError> {
        validate(&resources)?;
        let by_path = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.path_segment.clone(), i))
            .collect();
        Ok(Catalog { resources, by_path })
    }

    pub fn by_path(&self, path: &str) -> Option<&ResourceConfig> {
        self.by_path.get(path).map(|&i| &self.resources[i])
    }

    /// The resource holding login credentials, if any.
    pub fn credential_resource(&self) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.credential.is_some())
    }

    pub fn path_segments(&self) -> Vec<String> {
        self.resources.iter().map(|r| format!("/{}", r.path_segment)).collect()
    }

    /// Users, subjects, students and grades.
    pub fn academic() -> Result<Self, ConfigError> {
        Self::new(vec![usuarios(), materias(), estudiantes(), notas()])
    }
}

fn messages(created: &str, updated: &str, deleted: &str, not_found: &str, missing: &str) -> Messages {
    Messages {
        created: created.into(),
        updated: updated.into(),
        deleted: deleted.into(),
        not_found: not_found.into(),
        delete_not_found: None,
        missing_fields: missing.into(),
    }
}

fn usuarios() -> ResourceConfig {
    ResourceConfig {
        path_segment: "usuarios".into(),
        table_name: "usuarios".into(),
        pk_column: "id".into(),
        pk_type: "integer".into(),
        columns: vec![
            ColumnInfo::new("cedula", "text").required(Presence::Truthy),
            ColumnInfo::new("nombre", "text").required(Presence::Truthy),
            ColumnInfo::new("clave", "text").required(Presence::Truthy).sensitive(),
        ],
        order_by: OrderBy { column: "id".into(), direction: SortDirection::Asc },
        view: None,
        credential: Some(CredentialBinding {
            natural_key: "cedula".into(),
            credential: "clave".into(),
        }),
        singular: "usuario".into(),
        messages: Messages {
            delete_not_found: Some("No encontrado".into()),
            ..messages(
                "Usuario registrado",
                "Usuario actualizado",
                "Usuario eliminado",
                "Usuario no encontrado",
                "Todos los campos son obligatorios",
            )
        },
    }
}

fn materias() -> ResourceConfig {
    ResourceConfig {
        path_segment: "materias".into(),
        table_name: "materia".into(),
        pk_column: "id_materia".into(),
        pk_type: "integer".into(),
        columns: vec![ColumnInfo::new("nombre_materia", "text").required(Presence::Truthy)],
        order_by: OrderBy { column: "id_materia".into(), direction: SortDirection::Asc },
        view: None,
        credential: None,
        singular: "materia".into(),
        messages: messages(
            "Materia registrada",
            "Materia actualizada",
            "Materia eliminada",
            "Materia no encontrada",
            "El nombre de la materia es obligatorio",
        ),
    }
}

fn estudiantes() -> ResourceConfig {
    ResourceConfig {
        path_segment: "estudiantes".into(),
        table_name: "estudiantes".into(),
        pk_column: "id".into(),
        pk_type: "integer".into(),
        columns: vec![
            ColumnInfo::new("cedula", "text").required(Presence::Truthy),
            ColumnInfo::new("nombre", "text").required(Presence::Truthy),
            ColumnInfo::new("correo", "text"),
        ],
        order_by: OrderBy { column: "nombre".into(), direction: SortDirection::Asc },
        view: None,
        credential: None,
        singular: "estudiante".into(),
        messages: messages(
            "Estudiante registrado",
            "Estudiante actualizado",
            "Estudiante eliminado",
            "Estudiante no encontrado",
            "Cédula y nombre son obligatorios",
        ),
    }
}

fn notas() -> ResourceConfig {
    ResourceConfig {
        path_segment: "notas".into(),
        table_name: "notas".into(),
        pk_column: "id_nota".into(),
        pk_type: "integer".into(),
        columns: vec![
            ColumnInfo::new("id_estudiante", "integer").required(Presence::Truthy),
            ColumnInfo::new("id_materia", "integer").required(Presence::Truthy),
            ColumnInfo::new("calificacion", "numeric").required(Presence::Defined),
        ],
        order_by: OrderBy { column: "id_nota".into(), direction: SortDirection::Desc },
        view: Some(JoinView {
            alias: "n".into(),
            joins: vec![
                Join {
                    table: "estudiantes".into(),
                    alias: "e".into(),
                    local_column: "id_estudiante".into(),
                    foreign_column: "id".into(),
                },
                Join {
                    table: "materia".into(),
                    alias: "m".into(),
                    local_column: "id_materia".into(),
                    foreign_column: "id_materia".into(),
                },
            ],
            list: vec![
                Projection::new("n", "id_nota"),
                Projection::new("e", "nombre").rename("nombre_estudiante"),
                Projection::new("m", "nombre_materia"),
                Projection::new("n", "calificacion").numeric(),
            ],
            detail_extra: vec![
                Projection::new("n", "id_estudiante"),
                Projection::new("n", "id_materia"),
            ],
        }),
        credential: None,
        singular: "nota".into(),
        messages: messages(
            "Nota registrada con éxito",
            "Nota actualizada",
            "Nota eliminada",
            "Nota no encontrada",
            "Todos los campos son obligatorios",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn academic_catalog_is_valid() {
        let catalog = Catalog::academic().unwrap();
        assert_eq!(catalog.resources.len(), 4);
        assert_eq!(catalog.by_path("materias").unwrap().table_name, "materia");
        assert!(catalog.by_path("materia").is_none());
        assert_eq!(catalog.credential_resource().unwrap().path_segment, "usuarios");
    }

    #[test]
    fn grades_list_newest_first() {
        let catalog = Catalog::academic().unwrap();
        let notas = catalog.by_path("notas").unwrap();
        assert_eq!(notas.order_by.direction, SortDirection::Desc);
        assert_eq!(notas.column("calificacion").unwrap().presence, Presence::Defined);
    }

    #[test]
    fn only_users_override_the_delete_miss_message() {
        let catalog = Catalog::academic().unwrap();
        let usuarios = catalog.by_path("usuarios").unwrap();
        assert_eq!(usuarios.messages.delete_not_found(), "No encontrado");
        assert_eq!(usuarios.messages.not_found, "Usuario no encontrado");
        let materias = catalog.by_path("materias").unwrap();
        assert_eq!(materias.messages.delete_not_found(), materias.messages.not_found);
    }
}
