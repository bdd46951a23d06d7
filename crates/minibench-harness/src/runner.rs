//! Suite and run orchestration.
//!
//! A run fans out into independent suites (one per fixture), and each suite
//! fans out into independent per-engine invocations. Per-engine work runs as
//! spawned tasks so one engine's latency or failure never blocks or corrupts
//! another's result; joining every task is the suite's completion barrier. A
//! suite is never reported complete with a partial result map.
//!
//! ```text
//! fixtures ──► suite 1 ──► engine A ─┐
//!          ──► suite 2    engine B ─┼─► result map ──► aggregate ──► ranking
//!          ──► ...        engine C ─┘      (join)
//! ```
//!
//! Known limitation: engine invocations have no timeout. A transform that
//! never resolves will hang its suite.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::{aggregate, RankedTotals};
use crate::config::RunConfig;
use crate::events::{EventSink, RunEvent};
use crate::grade::grade;
use crate::registry::MinifierRegistry;
use minibench_types::{EngineOutcome, FixtureSet};

/// The outcome of grading every registered engine against one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// The fixture's title.
    pub title: String,
    /// One outcome per registered engine, keyed by engine name.
    pub results: BTreeMap<String, EngineOutcome>,
    /// The suite's ordered event sequence: start, one graded event per
    /// engine, end.
    pub events: Vec<RunEvent>,
}

/// Results from a complete benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Name of the run, from the config.
    pub name: String,
    /// Per-suite reports in fixture order.
    pub suites: Vec<SuiteReport>,
    /// Final deterministic ranking across all suites.
    pub ranking: RankedTotals,
    /// Total wall-clock duration of the run.
    pub total_duration_ms: u64,
    /// RFC3339 timestamp of when the run started.
    pub started_at: String,
}

/// Run every registered engine against one fixture.
///
/// Each engine's transform is invoked as an independent task with the
/// fixture's raw input. Transform errors and panics are captured as `crashed`
/// outcomes; they never propagate past the invocation boundary. The suite
/// completes only once every engine has an outcome.
#[instrument(skip(fixture, registry), fields(suite = %fixture.title))]
pub async fn run_suite(fixture: &FixtureSet, registry: &MinifierRegistry) -> SuiteReport {
    debug!(engines = registry.len(), "starting suite");

    let mut handles = Vec::with_capacity(registry.len());
    for (name, engine) in registry.iter() {
        let raw = fixture.raw_input.clone();
        let transform = engine.transform();
        let handle = tokio::spawn(async move { transform.minify(&raw).await });
        handles.push((name.to_string(), handle));
    }

    // Fan-in barrier: every engine is accounted for before the suite ends.
    let mut results = BTreeMap::new();
    for (name, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(output)) => EngineOutcome::graded(grade(&output, fixture), output),
            Ok(Err(err)) => {
                warn!(engine = %name, error = %err, "engine crashed");
                EngineOutcome::crashed(format!("{err:#}"))
            }
            Err(join_err) => {
                warn!(engine = %name, "engine task panicked");
                EngineOutcome::crashed(describe_panic(join_err))
            }
        };
        results.insert(name, outcome);
    }

    let mut events = Vec::with_capacity(results.len() + 2);
    events.push(RunEvent::SuiteStart {
        title: fixture.title.clone(),
    });
    for (engine, outcome) in &results {
        events.push(RunEvent::EngineGraded {
            engine: engine.clone(),
            outcome: outcome.clone(),
        });
    }
    events.push(RunEvent::SuiteEnd {
        title: fixture.title.clone(),
        optimal: fixture.optimal.clone(),
    });

    SuiteReport {
        title: fixture.title.clone(),
        results,
        events,
    }
}

fn describe_panic(err: JoinError) -> String {
    if err.is_panic() {
        match err.into_panic().downcast::<String>() {
            Ok(message) => format!("engine panicked: {message}"),
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => format!("engine panicked: {message}"),
                Err(_) => "engine panicked".to_string(),
            },
        }
    } else {
        format!("engine task failed: {err}")
    }
}

/// The benchmark runner: drives every suite and aggregates the final ranking.
pub struct BenchmarkRunner {
    registry: MinifierRegistry,
    config: RunConfig,
}

impl BenchmarkRunner {
    /// Create a runner over a registry with the default configuration.
    pub fn new(registry: MinifierRegistry) -> Self {
        Self::with_config(registry, RunConfig::default())
    }

    /// Create a runner with an explicit configuration.
    ///
    /// When the config carries an engine allowlist, the runner works from a
    /// filtered copy of the registry; the caller's registry is never mutated.
    pub fn with_config(registry: MinifierRegistry, config: RunConfig) -> Self {
        let registry = match &config.engines {
            Some(allow) => registry.filtered(allow),
            None => registry,
        };
        Self { registry, config }
    }

    /// The registry this runner grades with (post-filtering).
    pub fn registry(&self) -> &MinifierRegistry {
        &self.registry
    }

    /// Run every fixture and aggregate the final ranking.
    ///
    /// Suites execute with bounded parallelism (`parallel_suites`) and their
    /// reports are yielded in fixture order regardless of completion order.
    /// Each suite's event batch is forwarded to `sink` intact as soon as the
    /// suite's report is yielded, so observers see progress while later
    /// suites are still running. A single `run-finished` event carrying the
    /// ranking follows the last suite. The ranking depends only on suite
    /// contents, so concurrent completion cannot change it.
    #[instrument(skip(self, fixtures, sink), fields(run = %self.config.name))]
    pub async fn run(&self, fixtures: &[FixtureSet], sink: &mut dyn EventSink) -> RunReport {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();
        let parallelism = self.config.parallel_suites.max(1);

        info!(
            suites = fixtures.len(),
            engines = self.registry.len(),
            parallelism,
            "starting benchmark run"
        );

        let suite_stream = stream::iter(
            fixtures
                .iter()
                .map(|fixture| run_suite(fixture, &self.registry)),
        )
        .buffered(parallelism);
        futures::pin_mut!(suite_stream);

        let mut suites: Vec<SuiteReport> = Vec::with_capacity(fixtures.len());
        while let Some(suite) = suite_stream.next().await {
            for event in &suite.events {
                sink.emit(event);
            }
            suites.push(suite);
        }

        let ranking = aggregate(&self.registry, suites.iter().map(|s| &s.results));
        sink.emit(&RunEvent::RunFinished {
            ranking: ranking.clone(),
        });

        let total_duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            suites = suites.len(),
            duration_ms = total_duration_ms,
            "benchmark run finished"
        );

        RunReport {
            name: self.config.name.clone(),
            suites,
            ranking,
            total_duration_ms,
            started_at,
        }
    }
}
