//! Projection of binding specifiers into a destructuring shape
//!
//! A statement's specifier list normalizes to ordered `(key, value)`
//! destructuring properties plus an optional namespace binding. Encounter
//! order is preserved so the generated pattern binds names in the same order
//! the source declared them.

use crate::ast::Specifier;

/// Normalized shape of a statement's specifier list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedSpecifiers {
    /// `(key, value)` pairs: `key` is the property looked up on the loaded
    /// module object, `value` the name bound locally.
    pub properties: Vec<(String, String)>,
    /// Local name capturing the entire module namespace, if any. The
    /// statement grammar allows at most one.
    pub namespace: Option<String>,
}

/// Project a specifier list. Infallible: every specifier kind the statement
/// grammar admits has a defined projection.
pub fn project(specifiers: &[Specifier]) -> ProjectedSpecifiers {
    let mut projected = ProjectedSpecifiers::default();
    for spec in specifiers {
        match spec {
            Specifier::ImportDefault { local } => {
                projected
                    .properties
                    .push(("default".to_string(), local.clone()));
            }
            Specifier::ExportDefault { exported } => {
                projected
                    .properties
                    .push(("default".to_string(), exported.clone()));
            }
            Specifier::ExportNamed { local, exported } => {
                projected.properties.push((local.clone(), exported.clone()));
            }
            Specifier::ImportNamespace { local } => {
                projected.namespace = Some(local.clone());
            }
            Specifier::ImportNamed { imported, local } => {
                projected.properties.push((imported.clone(), local.clone()));
            }
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_preserves_order() {
        let projected = project(&[
            Specifier::ImportDefault {
                local: "Foo".to_string(),
            },
            Specifier::ImportNamed {
                imported: "a".to_string(),
                local: "a".to_string(),
            },
            Specifier::ImportNamed {
                imported: "b".to_string(),
                local: "renamed".to_string(),
            },
        ]);
        assert_eq!(
            projected.properties,
            vec![
                ("default".to_string(), "Foo".to_string()),
                ("a".to_string(), "a".to_string()),
                ("b".to_string(), "renamed".to_string()),
            ]
        );
        assert_eq!(projected.namespace, None);
    }

    #[test]
    fn test_project_namespace() {
        let projected = project(&[
            Specifier::ImportDefault {
                local: "Foo".to_string(),
            },
            Specifier::ImportNamespace {
                local: "ns".to_string(),
            },
        ]);
        assert_eq!(
            projected.properties,
            vec![("default".to_string(), "Foo".to_string())]
        );
        assert_eq!(projected.namespace, Some("ns".to_string()));
    }

    #[test]
    fn test_project_export_forwards() {
        let projected = project(&[
            Specifier::ExportDefault {
                exported: "Main".to_string(),
            },
            Specifier::ExportNamed {
                local: "a".to_string(),
                exported: "b".to_string(),
            },
        ]);
        assert_eq!(
            projected.properties,
            vec![
                ("default".to_string(), "Main".to_string()),
                ("a".to_string(), "b".to_string()),
            ]
        );
    }
}
