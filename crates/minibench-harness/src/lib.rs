//! Benchmark harness for CSS-minification engines
//!
//! This crate runs a set of pluggable minification engines against a corpus of
//! fixtures, grades each engine's output against the fixture's expected-output
//! variants, and aggregates the verdicts into a deterministic ranking.
//!
//! # Features
//!
//! - **Containment grading**: outputs are classified as outstanding, optimal,
//!   sub-optimal, broken, or crashed by substring containment against the
//!   fixture's candidate lists
//! - **Crash isolation**: a failing or panicking engine is recorded as
//!   `crashed` and never aborts the suite
//! - **Concurrent fan-out**: engines run as independent tasks per suite, and
//!   suites run with bounded parallelism; the final ranking is identical
//!   regardless of completion order
//! - **Event stream**: suite and run progress is published to an [`EventSink`]
//!   so reporters stay decoupled from the core
//!
//! # Example
//!
//! ```no_run
//! use minibench_harness::{BenchmarkRunner, MemorySink, MinifierRegistry, RunConfig};
//! use minibench_types::FixtureSet;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut registry = MinifierRegistry::new();
//! registry.register_fn("identity", "1.0.0", |raw: &str| Ok(raw.to_string()));
//!
//! let fixtures = vec![FixtureSet::new(
//!     "Colors",
//!     "a { color: red; }",
//!     vec![],
//!     vec!["a{color:red}".to_string()],
//!     vec![],
//! )];
//!
//! let runner = BenchmarkRunner::with_config(registry, RunConfig::default());
//! let mut sink = MemorySink::new();
//! let report = runner.run(&fixtures, &mut sink).await;
//!
//! for entry in &report.ranking.entries {
//!     println!("{}. {}@{}", entry.rank, entry.engine, entry.version);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod events;
pub mod grade;
pub mod registry;
pub mod runner;

// Re-export main types for convenience
pub use aggregate::{aggregate, compare_totals, RankedEngine, RankedTotals, VerdictTotals};
pub use config::RunConfig;
pub use events::{EventSink, MemorySink, NullSink, RunEvent, TraceSink};
pub use grade::grade;
pub use registry::{FnMinifier, Minifier, MinifierRegistry};
pub use runner::{run_suite, BenchmarkRunner, RunReport, SuiteReport};
