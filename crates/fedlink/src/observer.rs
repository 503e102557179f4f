//! Dependency notification sink
//!
//! The pass reports every module reference it encounters, matched or not,
//! through a [`TransformObserver`]. The observer is purely observational:
//! nothing in the rewrite depends on it, and its absence is a no-op
//! implementation rather than an `Option` checked throughout the logic.

/// One observed module reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepRecord {
    /// The module reference as written in the source.
    pub source: String,
    /// Identifier of the compilation unit being rewritten.
    pub containing_unit: String,
    /// Whether the reference matched the policy.
    pub is_match: bool,
    /// Set for blanket re-exports (`export * from ...`), which are retained
    /// unchanged when no member list is configured.
    pub is_export_all: bool,
}

/// Receives one notification per encountered import/re-export/dynamic-load
/// reference.
pub trait TransformObserver {
    fn on_transform_dep(&mut self, record: DepRecord);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransformObserver for NoopObserver {
    fn on_transform_dep(&mut self, _record: DepRecord) {}
}

/// Adapter turning a closure into an observer.
#[derive(Debug)]
pub struct FnObserver<F>(pub F);

impl<F: FnMut(DepRecord)> TransformObserver for FnObserver<F> {
    fn on_transform_dep(&mut self, record: DepRecord) {
        (self.0)(record);
    }
}
