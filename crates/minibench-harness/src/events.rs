//! The run event stream consumed by reporters.
//!
//! The core never renders anything; it publishes a tagged event sequence and
//! reporters (console, HTML, CI collectors) subscribe through [`EventSink`].
//! Per suite the sequence is: one `suite-start`, one `engine-graded` per
//! registered engine, one `suite-end`. A single `run-finished` event carrying
//! the ranked totals closes the run.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::RankedTotals;
use minibench_types::EngineOutcome;

/// A single event in the run's observable sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RunEvent {
    /// A suite is about to grade every registered engine.
    SuiteStart { title: String },
    /// One engine has been graded (or recorded as crashed) in the current
    /// suite.
    EngineGraded {
        engine: String,
        outcome: EngineOutcome,
    },
    /// Every engine in the suite is accounted for. Carries the fixture's
    /// optimal candidates so reporters can show the expected output.
    SuiteEnd { title: String, optimal: Vec<String> },
    /// The run is complete; carries the final deterministic ranking.
    RunFinished { ranking: RankedTotals },
}

/// Observer of the run event stream.
pub trait EventSink: Send {
    fn emit(&mut self, event: &RunEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &RunEvent) {}
}

/// Sink that collects events in order, for tests and embedders that want to
/// render after the run instead of streaming.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub events: Vec<RunEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &RunEvent) {
        self.events.push(event.clone());
    }
}

/// Sink that logs each event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSink;

impl EventSink for TraceSink {
    fn emit(&mut self, event: &RunEvent) {
        match event {
            RunEvent::SuiteStart { title } => info!(suite = %title, "suite started"),
            RunEvent::EngineGraded { engine, outcome } => {
                debug!(engine = %engine, verdict = %outcome.verdict, "engine graded")
            }
            RunEvent::SuiteEnd { title, .. } => info!(suite = %title, "suite finished"),
            RunEvent::RunFinished { ranking } => {
                info!(engines = ranking.entries.len(), "run finished")
            }
        }
    }
}
