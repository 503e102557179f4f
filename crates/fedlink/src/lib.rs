//! Rewrites a program's top-level module-linkage statements so that selected
//! external references are loaded at runtime from a named remote bundle
//! instead of being resolved at build time, while preserving the binding
//! semantics (names, default/namespace bindings, re-export shapes) of the
//! original statements.
//!
//! Which references go remote is decided by a [`ModulePolicy`]: an explicit
//! library list with pattern entries, or a wildcard mode that treats most
//! non-relative, non-self references as remote. Matched static imports and
//! named re-exports become hoisted `const ... = await import("...")`
//! declarations; matched dynamic import calls have their argument rewritten
//! in place.
//!
//! ```
//! use fedlink::{
//!     LibEntry, ModulePolicy, NoopObserver, render_program, rewrite_program,
//!     ast::{ImportDecl, Specifier, Statement},
//! };
//!
//! let policy = ModulePolicy {
//!     remote_name: "mf".to_string(),
//!     libs: vec![LibEntry::Literal("react".to_string())],
//!     ..Default::default()
//! };
//! let body = vec![Statement::Import(ImportDecl {
//!     source: "react".to_string(),
//!     specifiers: vec![Specifier::ImportDefault {
//!         local: "React".to_string(),
//!     }],
//! })];
//!
//! let rewritten = rewrite_program(body, &policy, "src/app.tsx", &mut NoopObserver).unwrap();
//! assert_eq!(
//!     render_program(&rewritten),
//!     "const { default: React } = await import(\"mf/react\");"
//! );
//! ```
//!
//! The generated initializers are top-level `await` expressions, so the
//! emitted unit must evaluate in a context that supports top-level await;
//! the pass assumes this rather than enforcing it.

pub mod ast;
pub mod config;
pub mod matcher;
pub mod observer;
mod rewriter;
pub mod specifiers;
pub mod transformer;

pub use crate::{
    ast::{Statement, render_program},
    config::{LibEntry, ModulePolicy},
    observer::{DepRecord, FnObserver, NoopObserver, TransformObserver},
    transformer::rewrite_program,
};
