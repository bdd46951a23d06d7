//! Shared data model for the CSS-minifier benchmark harness.
//!
//! This crate defines the verdict taxonomy, the fixture-set shape consumed by
//! the grader, the per-engine outcome record, and the harness error taxonomy.
//! It deliberately contains no I/O and no async code so that reporters and
//! loaders can depend on it without pulling in the runtime.

pub mod error;
pub mod fixture;
pub mod verdict;

pub use error::HarnessError;
pub use fixture::FixtureSet;
pub use verdict::{EngineOutcome, Verdict};
