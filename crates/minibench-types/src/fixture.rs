//! Fixture sets: one raw CSS input plus categorized expected-output variants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Variant name that holds the raw, unminified input.
const RAW_VARIANT: &str = "fixture";

/// One benchmark test case: the raw input fed to every engine, plus the
/// expected-output candidates partitioned by category.
///
/// The three candidate lists are intended to be mutually exclusive, but the
/// harness does not enforce that: classification is a containment check in a
/// fixed priority order (outstanding > optimal > broken), and the first
/// category with a containing candidate wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Human-readable label for this test case.
    pub title: String,
    /// The unminified CSS fed to every engine.
    pub raw_input: String,
    /// Best-possible outputs (rare, engine-specific optimum).
    #[serde(default)]
    pub outstanding: Vec<String>,
    /// Correct/ideal minified outputs.
    #[serde(default)]
    pub optimal: Vec<String>,
    /// Known-incorrect outputs that minifiers repeatedly produce.
    #[serde(default)]
    pub broken: Vec<String>,
}

impl FixtureSet {
    /// Create a fixture set from its parts.
    pub fn new(
        title: impl Into<String>,
        raw_input: impl Into<String>,
        outstanding: Vec<String>,
        optimal: Vec<String>,
        broken: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            raw_input: raw_input.into(),
            outstanding,
            optimal,
            broken,
        }
    }

    /// Build a fixture set from a map of named variants, as produced by an
    /// external fixture loader.
    ///
    /// The variant named `fixture` is the raw input; every other variant is
    /// routed into each category whose name it contains (`optimal.1` lands in
    /// optimal, `broken-whitespace` in broken, and so on). Variants matching
    /// none of the three category names are ignored. Candidate order within a
    /// category follows the sorted variant names.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MissingRawInput`] when the map has no `fixture`
    /// entry; grading is undefined without a raw input, so this surfaces
    /// immediately instead of producing misleading results downstream.
    pub fn from_variants(
        title: impl Into<String>,
        variants: &BTreeMap<String, String>,
    ) -> Result<Self, HarnessError> {
        let title = title.into();
        let raw_input = variants
            .get(RAW_VARIANT)
            .cloned()
            .ok_or_else(|| HarnessError::MissingRawInput(title.clone()))?;

        Ok(Self {
            title,
            raw_input,
            outstanding: variants_matching(variants, "outstanding"),
            optimal: variants_matching(variants, "optimal"),
            broken: variants_matching(variants, "broken"),
        })
    }
}

/// Collect the values of every variant whose name contains `category`,
/// preserving sorted-name order.
fn variants_matching(variants: &BTreeMap<String, String>, category: &str) -> Vec<String> {
    variants
        .iter()
        .filter(|(name, _)| name.contains(category))
        .map(|(_, value)| value.clone())
        .collect()
}
