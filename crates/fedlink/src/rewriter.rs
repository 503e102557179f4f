//! Per-statement rewrite logic
//!
//! Each branch classifies the statement's module reference, notifies the
//! observer (matched or not), and only then rewrites. Returns the generated
//! declarations separately from the retained statement so the driver can
//! hoist them while preserving source order.

use log::debug;

use crate::{
    ast::{DynamicImportCall, ExportAllDecl, ExportNamedDecl, Expr, ImportDecl, Pattern,
          Statement, VarDecl},
    config::ModulePolicy,
    matcher::PathMatcher,
    observer::{DepRecord, TransformObserver},
    specifiers::project,
};

/// Fixed intermediate binding for a rewritten blanket re-export.
const ALL_EXPORTS_BINDING: &str = "__all_exports";

pub(crate) struct RewriteContext<'a, 'p> {
    pub(crate) matcher: &'a PathMatcher<'p>,
    pub(crate) policy: &'p ModulePolicy,
    pub(crate) containing_unit: &'a str,
    pub(crate) observer: &'a mut dyn TransformObserver,
}

impl RewriteContext<'_, '_> {
    fn notify(&mut self, source: &str, is_match: bool, is_export_all: bool) {
        self.observer.on_transform_dep(DepRecord {
            source: source.to_string(),
            containing_unit: self.containing_unit.to_string(),
            is_match,
            is_export_all,
        });
    }
}

pub(crate) struct RewriteOutcome {
    /// Generated declarations, in the order they must appear once hoisted.
    pub(crate) hoisted: Vec<Statement>,
    /// The statement kept in place, if any (possibly replaced or mutated).
    pub(crate) retained: Option<Statement>,
}

impl RewriteOutcome {
    fn keep(stmt: Statement) -> Self {
        Self {
            hoisted: Vec::new(),
            retained: Some(stmt),
        }
    }
}

pub(crate) fn rewrite_statement(
    stmt: Statement,
    ctx: &mut RewriteContext<'_, '_>,
) -> RewriteOutcome {
    match stmt {
        Statement::Import(import) => rewrite_import(import, ctx),
        Statement::ExportAll(decl) => rewrite_export_all(decl, ctx),
        Statement::ExportNamed(decl) => rewrite_export_named(decl, ctx),
        Statement::DynamicImport(call) => rewrite_dynamic_import(call, ctx),
        stmt @ (Statement::Var(_) | Statement::Other(_)) => RewriteOutcome::keep(stmt),
    }
}

fn rewrite_import(import: ImportDecl, ctx: &mut RewriteContext<'_, '_>) -> RewriteOutcome {
    let is_match = ctx.matcher.matches(&import.source);
    ctx.notify(&import.source, is_match, false);
    if !is_match {
        return RewriteOutcome::keep(Statement::Import(import));
    }

    let init = Expr::AwaitImport(ctx.matcher.remote_path(&import.source));
    let projected = project(&import.specifiers);

    // Namespace binding takes the loaded module directly; any additional
    // properties destructure from the namespace, never from a second load.
    let hoisted = match projected.namespace {
        Some(namespace) if !projected.properties.is_empty() => vec![
            const_decl(Pattern::Ident(namespace.clone()), init),
            const_decl(Pattern::Object(projected.properties), Expr::Ident(namespace)),
        ],
        Some(namespace) => vec![const_decl(Pattern::Ident(namespace), init)],
        None => vec![const_decl(Pattern::Object(projected.properties), init)],
    };
    RewriteOutcome {
        hoisted,
        retained: None,
    }
}

fn rewrite_export_all(decl: ExportAllDecl, ctx: &mut RewriteContext<'_, '_>) -> RewriteOutcome {
    let is_match = ctx.matcher.matches(&decl.source);
    ctx.notify(&decl.source, is_match, true);
    if is_match {
        if let Some(members) = ctx.policy.export_all_members.get(&decl.source) {
            let hoisted = vec![const_decl(
                Pattern::Ident(ALL_EXPORTS_BINDING.to_string()),
                Expr::AwaitImport(ctx.matcher.remote_path(&decl.source)),
            )];
            let properties = members.iter().map(|m| (m.clone(), m.clone())).collect();
            let replacement = Statement::Var(VarDecl {
                exported: true,
                pattern: Pattern::Object(properties),
                init: Expr::Ident(ALL_EXPORTS_BINDING.to_string()),
            });
            return RewriteOutcome {
                hoisted,
                retained: Some(replacement),
            };
        }
        // Without the export names a blanket re-export cannot be rewritten
        // safely; leaving it untouched is the intended conservative outcome.
        debug!("export * from \"{}\" matched but has no member list", decl.source);
    }
    RewriteOutcome::keep(Statement::ExportAll(decl))
}

fn rewrite_export_named(
    mut decl: ExportNamedDecl,
    ctx: &mut RewriteContext<'_, '_>,
) -> RewriteOutcome {
    let Some(source) = decl.source.clone() else {
        // Plain local export, no module reference to classify.
        return RewriteOutcome::keep(Statement::ExportNamed(decl));
    };
    let is_match = ctx.matcher.matches(&source);
    ctx.notify(&source, is_match, false);
    if !is_match {
        return RewriteOutcome::keep(Statement::ExportNamed(decl));
    }

    // Satisfy the exported names from a generated declaration and clear the
    // source clause, leaving a plain local re-export of the same names.
    let projected = project(&decl.specifiers);
    let hoisted = vec![const_decl(
        Pattern::Object(projected.properties),
        Expr::AwaitImport(ctx.matcher.remote_path(&source)),
    )];
    decl.source = None;
    RewriteOutcome {
        hoisted,
        retained: Some(Statement::ExportNamed(decl)),
    }
}

fn rewrite_dynamic_import(
    mut call: DynamicImportCall,
    ctx: &mut RewriteContext<'_, '_>,
) -> RewriteOutcome {
    let is_match = ctx.matcher.matches(&call.argument);
    ctx.notify(&call.argument, is_match, false);
    if is_match {
        // The call is already an asynchronous load; rewriting the literal in
        // place preserves order without hoisting anything.
        call.argument = ctx.matcher.remote_path(&call.argument);
    }
    RewriteOutcome::keep(Statement::DynamicImport(call))
}

fn const_decl(pattern: Pattern, init: Expr) -> Statement {
    Statement::Var(VarDecl {
        exported: false,
        pattern,
        init,
    })
}
