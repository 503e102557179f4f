//! Remote/local classification of module references
//!
//! Single source of truth for deciding whether a module reference is served
//! from the remote bundle, and for the ordered alias-prefix substitution used
//! both when classifying and when building remote specifiers.

use std::path::{Component, Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::config::{LibEntry, ModulePolicy};

/// Packages belonging to the host framework itself; never remote under
/// wildcard matching.
const HOST_PACKAGES: [&str; 2] = ["umi", "dumi"];

/// Path segments marking a module as resolved from a dependency store or a
/// monorepo-local package. Fixed structural markers, not configurable.
const DEPENDENCY_MARKERS: [&str; 2] = ["node_modules", "packages"];

/// Alias targets with one of these extensions are concrete source files, so
/// their alias key only matches exactly, never as a directory prefix.
const SOURCE_FILE_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".ts", ".tsx"];

/// Compiled form of a [`ModulePolicy`]'s matching rules.
///
/// Construction compiles every `libs` pattern eagerly; an invalid pattern
/// fails the whole pass before any statement is rewritten.
#[derive(Debug)]
pub struct PathMatcher<'a> {
    policy: &'a ModulePolicy,
    /// Literal `libs` entries plus `alias` keys, matched exactly.
    literals: FxHashSet<&'a str>,
    patterns: Vec<Regex>,
}

impl<'a> PathMatcher<'a> {
    pub fn new(policy: &'a ModulePolicy) -> Result<Self> {
        let mut literals = FxHashSet::default();
        let mut patterns = Vec::new();
        for entry in &policy.libs {
            match entry {
                LibEntry::Literal(name) => {
                    literals.insert(name.as_str());
                }
                LibEntry::Pattern { pattern } => {
                    let compiled = Regex::new(pattern)
                        .with_context(|| format!("invalid libs pattern: {pattern}"))?;
                    patterns.push(compiled);
                }
            }
        }
        // Alias keys are implicit exact-match candidates.
        literals.extend(policy.alias.keys().map(String::as_str));

        Ok(Self {
            policy,
            literals,
            patterns,
        })
    }

    /// Decide whether `path` is served from the remote bundle.
    pub fn matches(&self, path: &str) -> bool {
        let matched = if self.policy.match_all {
            self.matches_wildcard(path)
        } else {
            self.matches_explicit(path)
        };
        debug!("classify {path}: {}", if matched { "remote" } else { "local" });
        matched
    }

    fn matches_explicit(&self, path: &str) -> bool {
        self.literals.contains(path) || self.patterns.iter().any(|re| re.is_match(path))
    }

    /// Wildcard mode: everything resolvable from a dependency store is
    /// remote; the host framework, relative references, and paths outside
    /// a dependency store are not.
    fn matches_wildcard(&self, path: &str) -> bool {
        if HOST_PACKAGES.contains(&path) {
            return false;
        }
        if Path::new(path).is_absolute() {
            return has_dependency_marker(path);
        }
        if path.starts_with('.') {
            return false;
        }
        // Bare specifier: let bundler aliases participate in the judgment.
        match resolve_alias(path, &self.policy.webpack_alias) {
            Some(resolved) => has_dependency_marker(&resolved),
            None => true,
        }
    }

    /// Build the remote specifier for a matched reference.
    pub fn remote_path(&self, path: &str) -> String {
        let resolved =
            resolve_alias(path, &self.policy.alias).unwrap_or_else(|| path.to_string());
        format!("{}/{}", self.policy.remote_name, resolved)
    }
}

/// Substitute the first matching alias prefix, in entry order.
///
/// A key whose replacement ends in a source-file extension matches exactly.
/// Any other key matches exactly, or as a directory prefix (a trailing `/`
/// is appended if absent) with the prefix replaced.
pub fn resolve_alias(path: &str, alias: &IndexMap<String, String>) -> Option<String> {
    for (key, replacement) in alias {
        if path == key {
            return Some(replacement.clone());
        }
        if is_source_file(replacement) {
            continue;
        }
        let prefix = if key.ends_with('/') {
            key.clone()
        } else {
            format!("{key}/")
        };
        if let Some(rest) = path.strip_prefix(&prefix) {
            return Some(format!("{}/{rest}", replacement.trim_end_matches('/')));
        }
    }
    None
}

fn is_source_file(path: &str) -> bool {
    SOURCE_FILE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn has_dependency_marker(path: &str) -> bool {
    Path::new(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .any(|segment| DEPENDENCY_MARKERS.contains(&segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit_policy() -> ModulePolicy {
        ModulePolicy {
            remote_name: "mf".to_string(),
            libs: vec![
                LibEntry::Literal("react".to_string()),
                LibEntry::Pattern {
                    pattern: "^antd".to_string(),
                },
            ],
            alias: IndexMap::from([("@/lib".to_string(), "/src/lib".to_string())]),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_mode() {
        let policy = explicit_policy();
        let matcher = PathMatcher::new(&policy).unwrap();

        assert!(matcher.matches("react"));
        assert!(matcher.matches("antd"));
        assert!(matcher.matches("antd/es/button"));
        // Alias keys are exact-match candidates
        assert!(matcher.matches("@/lib"));

        assert!(!matcher.matches("react-dom"));
        assert!(!matcher.matches("./local"));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let policy = ModulePolicy {
            remote_name: "mf".to_string(),
            libs: vec![LibEntry::Pattern {
                pattern: "(unclosed".to_string(),
            }],
            ..Default::default()
        };
        assert!(PathMatcher::new(&policy).is_err());
    }

    #[test]
    fn test_wildcard_mode() {
        let policy = ModulePolicy {
            remote_name: "mf".to_string(),
            match_all: true,
            webpack_alias: IndexMap::from([
                ("local-pkg".to_string(), "/repo/src/local-pkg".to_string()),
                ("shared".to_string(), "/repo/packages/shared/src".to_string()),
            ]),
            ..Default::default()
        };
        let matcher = PathMatcher::new(&policy).unwrap();

        // Host framework is never remote
        assert!(!matcher.matches("umi"));
        assert!(!matcher.matches("dumi"));
        // Relative references are never remote
        assert!(!matcher.matches("./local"));
        assert!(!matcher.matches("../sibling"));
        // Absolute paths need a dependency marker segment
        assert!(matcher.matches("/abs/path/node_modules/x"));
        assert!(matcher.matches("/repo/packages/shared/src/index"));
        assert!(!matcher.matches("/abs/path/src/x"));
        // A marker must be a whole segment
        assert!(!matcher.matches("/abs/my_node_modules_backup/x"));
        // Bare specifiers: aliased paths are re-tested, unaliased default to remote
        assert!(!matcher.matches("local-pkg"));
        assert!(matcher.matches("shared"));
        assert!(matcher.matches("lodash"));
    }

    #[test]
    fn test_resolve_alias_order_and_shapes() {
        let alias = IndexMap::from([
            ("@/lib".to_string(), "/src/lib".to_string()),
            ("@".to_string(), "/src".to_string()),
            ("entry".to_string(), "/src/entry.tsx".to_string()),
        ]);

        // First entry wins even though "@" would also match
        assert_eq!(
            resolve_alias("@/lib/util", &alias),
            Some("/src/lib/util".to_string())
        );
        assert_eq!(resolve_alias("@/pages/home", &alias), Some("/src/pages/home".to_string()));
        // Exact key match returns the replacement itself
        assert_eq!(resolve_alias("@", &alias), Some("/src".to_string()));
        // Source-file targets match exactly, never by prefix
        assert_eq!(resolve_alias("entry", &alias), Some("/src/entry.tsx".to_string()));
        assert_eq!(resolve_alias("entry/sub", &alias), None);
        // Prefix matching requires the separator boundary
        assert_eq!(resolve_alias("@abc", &alias), None);
        assert_eq!(resolve_alias("lodash", &alias), None);
    }

    #[test]
    fn test_remote_path_construction() {
        let policy = ModulePolicy {
            remote_name: "mf".to_string(),
            alias: IndexMap::from([("@".to_string(), "src".to_string())]),
            ..Default::default()
        };
        let matcher = PathMatcher::new(&policy).unwrap();

        assert_eq!(matcher.remote_path("lodash"), "mf/lodash");
        assert_eq!(matcher.remote_path("@/util"), "mf/src/util");
    }
}
