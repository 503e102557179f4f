//! Statement model for top-level module linkage
//!
//! A deliberately small mirror of the host AST: only the statement kinds the
//! rewrite pass cares about are modeled structurally. Everything else travels
//! through the pass untouched as [`Statement::Other`]. Each statement renders
//! to JavaScript text via `Display`, which is the shape downstream tooling
//! (and the test suite) observes.

use std::fmt;

/// One top-level program entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `import ... from "source";`
    Import(ImportDecl),
    /// `export * from "source";`
    ExportAll(ExportAllDecl),
    /// `export { ... } from "source";` (or sourceless `export { ... };`)
    ExportNamed(ExportNamedDecl),
    /// A dynamic `import("source")` call with a single literal argument.
    DynamicImport(DynamicImportCall),
    /// A (possibly exported) `const` declaration produced by the rewrite.
    Var(VarDecl),
    /// Any statement the pass does not interpret, carried as raw text.
    Other(String),
}

/// Static import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub source: String,
    pub specifiers: Vec<Specifier>,
}

/// Blanket re-export of every binding of another module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAllDecl {
    pub source: String,
}

/// Named re-export. `source` is cleared when the rewrite satisfies the
/// exported names from a generated declaration instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNamedDecl {
    pub source: Option<String>,
    pub specifiers: Vec<Specifier>,
}

/// Dynamic import call. The argument is rewritten in place on match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicImportCall {
    pub argument: String,
}

/// One bound name within an import or re-export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// `import Foo from ...`
    ImportDefault { local: String },
    /// `import * as ns from ...`
    ImportNamespace { local: String },
    /// `import { imported as local } from ...`
    ImportNamed { imported: String, local: String },
    /// `export { local as exported } [from ...]`
    ExportNamed { local: String, exported: String },
    /// `export exported from ...` (default forward)
    ExportDefault { exported: String },
}

/// A synthesized `const <pattern> = <init>;` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub exported: bool,
    pub pattern: Pattern,
    pub init: Expr,
}

/// Binding pattern of a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Ident(String),
    /// Ordered `(key, value)` destructuring properties.
    Object(Vec<(String, String)>),
}

/// Initializer of a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `await import("<specifier>")`
    AwaitImport(String),
    Ident(String),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Import(decl) => decl.fmt(f),
            Statement::ExportAll(decl) => write!(f, "export * from \"{}\";", decl.source),
            Statement::ExportNamed(decl) => decl.fmt(f),
            Statement::DynamicImport(call) => write!(f, "import(\"{}\");", call.argument),
            Statement::Var(decl) => decl.fmt(f),
            Statement::Other(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.specifiers.is_empty() {
            return write!(f, "import \"{}\";", self.source);
        }

        // Default and namespace bindings keep their encounter order; named
        // bindings collapse into a single trailing brace group.
        let mut segments = Vec::new();
        let mut named = Vec::new();
        for spec in &self.specifiers {
            match spec {
                Specifier::ImportDefault { local } => segments.push(local.clone()),
                Specifier::ImportNamespace { local } => segments.push(format!("* as {local}")),
                Specifier::ImportNamed { imported, local } => {
                    named.push(render_pair(imported, local, " as "));
                }
                Specifier::ExportNamed { .. } | Specifier::ExportDefault { .. } => {}
            }
        }
        if !named.is_empty() {
            segments.push(format!("{{ {} }}", named.join(", ")));
        }
        write!(f, "import {} from \"{}\";", segments.join(", "), self.source)
    }
}

impl fmt::Display for ExportNamedDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = Vec::new();
        let mut named = Vec::new();
        for spec in &self.specifiers {
            match spec {
                Specifier::ExportDefault { exported } => segments.push(exported.clone()),
                Specifier::ExportNamed { local, exported } => {
                    named.push(render_pair(local, exported, " as "));
                }
                _ => {}
            }
        }
        if !named.is_empty() {
            segments.push(format!("{{ {} }}", named.join(", ")));
        }
        match &self.source {
            Some(source) => write!(f, "export {} from \"{}\";", segments.join(", "), source),
            None => write!(f, "export {};", segments.join(", ")),
        }
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exported {
            f.write_str("export ")?;
        }
        write!(f, "const {} = {};", self.pattern, self.init)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Ident(name) => f.write_str(name),
            Pattern::Object(properties) if properties.is_empty() => f.write_str("{}"),
            Pattern::Object(properties) => {
                let rendered: Vec<String> = properties
                    .iter()
                    .map(|(key, value)| render_pair(key, value, ": "))
                    .collect();
                write!(f, "{{ {} }}", rendered.join(", "))
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::AwaitImport(specifier) => write!(f, "await import(\"{specifier}\")"),
            Expr::Ident(name) => f.write_str(name),
        }
    }
}

/// Shorthand collapse: `a: a` renders as `a`, `a as a` as `a`.
fn render_pair(left: &str, right: &str, separator: &str) -> String {
    if left == right {
        left.to_string()
    } else {
        format!("{left}{separator}{right}")
    }
}

/// Render a whole program body, one statement per line.
pub fn render_program(body: &[Statement]) -> String {
    body.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
