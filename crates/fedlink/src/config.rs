//! Rewrite policy configuration
//!
//! A [`ModulePolicy`] is constructed once per pass and read-only afterwards.
//! Alias maps and the export-members map are `IndexMap`s so their entry order
//! survives deserialization; alias matching is first-entry-wins and that
//! order is part of the contract.

use indexmap::IndexMap;
use serde::Deserialize;

/// Policy deciding which module references are rewritten to remote loads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePolicy {
    /// Prefix of every generated remote specifier (`<remoteName>/<path>`).
    pub remote_name: String,

    /// Exact names or patterns to treat as remote under explicit-list mode.
    #[serde(default)]
    pub libs: Vec<LibEntry>,

    /// Wildcard mode: treat everything remote except relative paths, the
    /// host framework itself, and paths outside a dependency store.
    #[serde(default)]
    pub match_all: bool,

    /// Path-prefix substitutions applied when building remote specifiers.
    /// Keys are also implicit exact-match candidates under explicit-list
    /// mode.
    #[serde(default)]
    pub alias: IndexMap<String, String>,

    /// Bundler alias map consulted only when classifying bare specifiers
    /// under wildcard mode.
    #[serde(default)]
    pub webpack_alias: IndexMap<String, String>,

    /// Known export names per module, required to rewrite a blanket
    /// re-export of that module.
    #[serde(default)]
    pub export_all_members: IndexMap<String, Vec<String>>,
}

/// One entry of [`ModulePolicy::libs`]: an exact module name or a pattern.
///
/// Deserialization accepts a plain string or a `{ pattern = ".." }` table;
/// any other value (a number, a boolean) is rejected outright, failing the
/// configuration load before a pass can start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LibEntry {
    Literal(String),
    Pattern { pattern: String },
}
