//! Run-level aggregation: per-engine verdict totals and the final ranking.
//!
//! Aggregation folds every suite's result map exactly once into per-engine
//! counters, then sorts with a self-contained comparator. The ranking depends
//! only on the folded content, never on suite completion order or map
//! iteration quirks, so identical inputs always produce identical output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::registry::MinifierRegistry;
use minibench_types::{EngineOutcome, Verdict};

/// Per-engine verdict counters, accumulated across every suite in a run.
///
/// Counters only ever increment; a crashed engine is counted fully under
/// `crashed` and is never dropped from the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictTotals {
    pub outstanding: u64,
    pub optimal: u64,
    #[serde(rename = "sub-optimal")]
    pub sub_optimal: u64,
    pub broken: u64,
    pub crashed: u64,
}

impl VerdictTotals {
    /// Count one verdict.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Outstanding => self.outstanding += 1,
            Verdict::Optimal => self.optimal += 1,
            Verdict::SubOptimal => self.sub_optimal += 1,
            Verdict::Broken => self.broken += 1,
            Verdict::Crashed => self.crashed += 1,
        }
    }

    /// Primary ranking key: outstanding + optimal.
    pub fn favourable(&self) -> u64 {
        self.outstanding + self.optimal
    }

    /// Secondary ranking key: broken + crashed.
    pub fn unfavourable(&self) -> u64 {
        self.broken + self.crashed
    }

    /// Total number of suites this engine was graded in.
    pub fn total(&self) -> u64 {
        self.favourable() + self.sub_optimal + self.unfavourable()
    }
}

/// Compare two totals records for ranking.
///
/// Orders by descending favourable count, then ascending unfavourable count.
/// Engines equal on both keys compare `Equal`; a stable sort over a lexically
/// ordered input resolves the remaining tie deterministically.
pub fn compare_totals(a: &VerdictTotals, b: &VerdictTotals) -> Ordering {
    b.favourable()
        .cmp(&a.favourable())
        .then(a.unfavourable().cmp(&b.unfavourable()))
}

/// One engine's position in the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEngine {
    /// 1-based rank.
    pub rank: usize,
    pub engine: String,
    pub version: String,
    pub totals: VerdictTotals,
}

/// The final, rank-ordered summary of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTotals {
    /// Engines in final rank order.
    pub entries: Vec<RankedEngine>,
    /// Raw per-engine totals, keyed by engine name, for display.
    pub totals: BTreeMap<String, VerdictTotals>,
}

/// Fold per-suite result maps into ranked per-engine totals.
///
/// Every engine in `registry` gets a zero-initialized counter record up
/// front, so an engine that crashed in every suite (or was graded in none)
/// still appears in the ranking. Each suite map is consumed exactly once;
/// totals across N suites equal the sum of the per-suite verdict counts.
/// Result entries for engines the registry does not know are logged and
/// ignored: they contribute nothing to the totals and never appear in the
/// ranking.
pub fn aggregate<'a, I>(registry: &MinifierRegistry, suites: I) -> RankedTotals
where
    I: IntoIterator<Item = &'a BTreeMap<String, EngineOutcome>>,
{
    let mut totals: BTreeMap<String, VerdictTotals> = registry
        .names()
        .map(|name| (name.to_string(), VerdictTotals::default()))
        .collect();

    for results in suites {
        for (engine, outcome) in results {
            match totals.get_mut(engine) {
                Some(engine_totals) => engine_totals.record(outcome.verdict),
                None => warn!(%engine, "dropping verdict for unregistered engine"),
            }
        }
    }

    // BTreeMap iteration gives lexical name order; the stable sort preserves
    // it for engines tied on both ranking keys.
    let mut ordered: Vec<(String, VerdictTotals)> = totals
        .iter()
        .map(|(name, t)| (name.clone(), *t))
        .collect();
    ordered.sort_by(|a, b| compare_totals(&a.1, &b.1));

    let entries = ordered
        .into_iter()
        .enumerate()
        .map(|(index, (engine, engine_totals))| RankedEngine {
            rank: index + 1,
            // Every key in `totals` comes from the registry, so the version
            // lookup cannot miss.
            version: registry.version(&engine).unwrap_or_default().to_string(),
            engine,
            totals: engine_totals,
        })
        .collect();

    RankedTotals { entries, totals }
}
