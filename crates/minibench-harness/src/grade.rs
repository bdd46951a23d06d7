//! Output classification against a fixture's expected-output candidates.
//!
//! Grading is a pure function: no I/O, no hidden state, identical verdicts
//! for identical `(output, fixture)` pairs. Crash handling never reaches this
//! module; a failed invocation is converted to a `crashed` outcome by the
//! suite runner before grading would occur.

use minibench_types::{FixtureSet, Verdict};

/// Classify one engine's output against one fixture.
///
/// An output matches a category when at least one candidate in that category
/// contains the output as a substring (candidate ⊇ output). This is the
/// historical lenient comparison: it accepts outputs that differ from a
/// candidate only by surrounding text the candidate also carries. Categories
/// are evaluated in strict priority order (outstanding, then optimal, then
/// broken) and the first match wins. An output matching no category is
/// [`Verdict::SubOptimal`].
///
/// Empty-string candidates never match, so a category whose expected output
/// was removed upstream behaves as if it had no candidates at all.
pub fn grade(output: &str, fixture: &FixtureSet) -> Verdict {
    if contained_in(output, &fixture.outstanding) {
        Verdict::Outstanding
    } else if contained_in(output, &fixture.optimal) {
        Verdict::Optimal
    } else if contained_in(output, &fixture.broken) {
        Verdict::Broken
    } else {
        Verdict::SubOptimal
    }
}

/// Whether any non-empty candidate contains `output` as a substring.
fn contained_in(output: &str, candidates: &[String]) -> bool {
    candidates
        .iter()
        .any(|candidate| !candidate.is_empty() && candidate.contains(output))
}
