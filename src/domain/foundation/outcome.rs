//! Per-resource reconciliation outcome.

use std::fmt;

/// What reconciliation did for a single desired resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A matching resource already existed and was left untouched.
    Existing,
    /// No match existed; the resource was created.
    Created,
}

impl ReconcileOutcome {
    /// True when a create/upsert call was issued.
    pub fn is_created(&self) -> bool {
        matches!(self, ReconcileOutcome::Created)
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReconcileOutcome::Existing => "existing",
            ReconcileOutcome::Created => "created",
        };
        write!(f, "{}", s)
    }
}
