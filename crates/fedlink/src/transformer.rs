//! Single-pass program rewrite
//!
//! The driver walks the statement list once, from the last entry to the
//! first, and reassembles the program as `generated declarations ++ retained
//! statements`, both sublists in original top-to-bottom order.

use anyhow::Result;

use crate::{
    ast::Statement,
    config::ModulePolicy,
    matcher::PathMatcher,
    observer::TransformObserver,
    rewriter::{RewriteContext, rewrite_statement},
};

/// Rewrite one program body under `policy`.
///
/// Fails before touching any statement if the policy is invalid (a `libs`
/// pattern that does not compile); there is no partial rewrite.
pub fn rewrite_program(
    body: Vec<Statement>,
    policy: &ModulePolicy,
    containing_unit: &str,
    observer: &mut dyn TransformObserver,
) -> Result<Vec<Statement>> {
    let matcher = PathMatcher::new(policy)?;
    let mut ctx = RewriteContext {
        matcher: &matcher,
        policy,
        containing_unit,
        observer,
    };

    // Backward scan with reversed accumulators: one reversal at the end
    // restores source order for the hoisted declarations and the retained
    // statements alike.
    let mut hoisted_rev: Vec<Statement> = Vec::new();
    let mut retained_rev: Vec<Statement> = Vec::new();
    for stmt in body.into_iter().rev() {
        let outcome = rewrite_statement(stmt, &mut ctx);
        hoisted_rev.extend(outcome.hoisted.into_iter().rev());
        if let Some(retained) = outcome.retained {
            retained_rev.push(retained);
        }
    }

    hoisted_rev.reverse();
    hoisted_rev.extend(retained_rev.into_iter().rev());
    Ok(hoisted_rev)
}
