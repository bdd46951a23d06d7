//! Harness error taxonomy.
//!
//! Only engine-invocation failures are expected at run time, and those are
//! captured per engine as `crashed` outcomes rather than surfaced as errors.
//! Everything here indicates collaborator misconfiguration and should be
//! propagated immediately so a run never reports misleading totals.

use thiserror::Error;

/// Misconfiguration errors surfaced by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// A fixture set has no raw input; grading is undefined without one.
    #[error("fixture `{0}` has no raw input to minify")]
    MissingRawInput(String),

    /// An engine name was referenced that is not in the registry.
    #[error("engine `{0}` is not registered")]
    UnknownEngine(String),
}
