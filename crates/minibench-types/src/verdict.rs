//! Verdict taxonomy and per-engine outcomes.
//!
//! Every `(engine, fixture)` pair produces exactly one [`EngineOutcome`],
//! created once and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one engine's output against one fixture.
///
/// The string forms (`outstanding`, `optimal`, `sub-optimal`, `broken`,
/// `crashed`) are stable and show up both in serialized reports and in
/// [`fmt::Display`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Output matched a best-possible candidate (rare, engine-specific optimum).
    Outstanding,
    /// Output matched the correct/ideal minified output.
    Optimal,
    /// Output matched nothing; correct but larger than necessary.
    SubOptimal,
    /// Output matched a known-incorrect result (minifier bug).
    Broken,
    /// The engine invocation itself failed; no output was produced.
    Crashed,
}

impl Verdict {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Outstanding => "outstanding",
            Verdict::Optimal => "optimal",
            Verdict::SubOptimal => "sub-optimal",
            Verdict::Broken => "broken",
            Verdict::Crashed => "crashed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome recorded for one engine in one suite.
///
/// For a graded run, `output` holds the produced text and `error` is `None`.
/// For a crashed run, `output` is `None` and `error` holds the captured
/// failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOutcome {
    /// The assigned verdict.
    pub verdict: Verdict,
    /// The minified text the engine produced. Absent iff the engine crashed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// The captured failure. Present iff the engine crashed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EngineOutcome {
    /// Outcome for an engine whose invocation succeeded and was graded.
    pub fn graded(verdict: Verdict, output: impl Into<String>) -> Self {
        Self {
            verdict,
            output: Some(output.into()),
            error: None,
        }
    }

    /// Outcome for an engine whose invocation failed before grading.
    pub fn crashed(error: impl fmt::Display) -> Self {
        Self {
            verdict: Verdict::Crashed,
            output: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether this outcome represents an invocation failure.
    pub fn is_crashed(&self) -> bool {
        self.verdict == Verdict::Crashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verdict_display_strings() {
        assert_eq!(Verdict::Outstanding.to_string(), "outstanding");
        assert_eq!(Verdict::Optimal.to_string(), "optimal");
        assert_eq!(Verdict::SubOptimal.to_string(), "sub-optimal");
        assert_eq!(Verdict::Broken.to_string(), "broken");
        assert_eq!(Verdict::Crashed.to_string(), "crashed");
    }

    #[test]
    fn test_verdict_serializes_kebab_case() {
        let json = serde_json::to_string(&Verdict::SubOptimal).unwrap();
        assert_eq!(json, "\"sub-optimal\"");

        let parsed: Verdict = serde_json::from_str("\"crashed\"").unwrap();
        assert_eq!(parsed, Verdict::Crashed);
    }

    #[test]
    fn test_verdict_usable_as_sorted_map_key() {
        let mut counts: std::collections::BTreeMap<Verdict, u64> = std::collections::BTreeMap::new();
        *counts.entry(Verdict::Crashed).or_default() += 1;
        *counts.entry(Verdict::Optimal).or_default() += 2;
        *counts.entry(Verdict::Outstanding).or_default() += 1;

        let order: Vec<Verdict> = counts.keys().copied().collect();
        assert_eq!(
            order,
            vec![Verdict::Outstanding, Verdict::Optimal, Verdict::Crashed]
        );
    }

    #[test]
    fn test_graded_outcome_carries_output() {
        let outcome = EngineOutcome::graded(Verdict::Optimal, "a{color:red}");
        assert_eq!(outcome.verdict, Verdict::Optimal);
        assert_eq!(outcome.output.as_deref(), Some("a{color:red}"));
        assert_eq!(outcome.error, None);
        assert!(!outcome.is_crashed());
    }

    #[test]
    fn test_crashed_outcome_has_no_output() {
        let outcome = EngineOutcome::crashed("unexpected token `}`");
        assert_eq!(outcome.verdict, Verdict::Crashed);
        assert_eq!(outcome.output, None);
        assert_eq!(outcome.error.as_deref(), Some("unexpected token `}`"));
        assert!(outcome.is_crashed());
    }

    #[test]
    fn test_outcome_json_omits_absent_fields() {
        let graded = serde_json::to_string(&EngineOutcome::graded(Verdict::Broken, "x{}")).unwrap();
        assert!(!graded.contains("error"));

        let crashed = serde_json::to_string(&EngineOutcome::crashed("boom")).unwrap();
        assert!(!crashed.contains("output"));
        assert!(crashed.contains("\"crashed\""));
    }
}
