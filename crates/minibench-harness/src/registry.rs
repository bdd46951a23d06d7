//! The minifier registry: engine name → versioned transform.
//!
//! The registry is read-only shared state for the duration of a run. Engine
//! subsetting never mutates a registry in place: [`MinifierRegistry::filtered`]
//! builds an independent copy instead, so concurrent suites can hold shared
//! references without observing changes mid-run.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use minibench_types::HarnessError;

/// A pluggable CSS-minification transform under test.
///
/// Implementations may be genuinely asynchronous (shelling out, IPC) or plain
/// synchronous functions wrapped via [`FnMinifier`]; the harness treats both
/// identically. Returning an `Err` is recorded as a `crashed` outcome for the
/// suite in which it happened, never as a run-level failure.
#[async_trait]
pub trait Minifier: Send + Sync {
    /// Minify the raw CSS input.
    async fn minify(&self, raw: &str) -> Result<String>;
}

/// Adapter that lets a plain closure act as a [`Minifier`].
pub struct FnMinifier<F>(F);

impl<F> FnMinifier<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    pub fn new(transform: F) -> Self {
        Self(transform)
    }
}

#[async_trait]
impl<F> Minifier for FnMinifier<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    async fn minify(&self, raw: &str) -> Result<String> {
        (self.0)(raw)
    }
}

/// A registered engine: its version label plus the transform itself.
#[derive(Clone)]
pub struct Engine {
    version: String,
    transform: Arc<dyn Minifier>,
}

impl Engine {
    /// The engine's version label, shown next to its name in rankings.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Shared handle to the transform, cloneable into per-engine tasks.
    pub fn transform(&self) -> Arc<dyn Minifier> {
        Arc::clone(&self.transform)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Mapping of engine name to versioned transform.
///
/// Iteration order is the lexical name order of the underlying `BTreeMap`,
/// which keeps every downstream sequence (results, events, tie-breaks)
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct MinifierRegistry {
    engines: BTreeMap<String, Engine>,
}

impl MinifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an engine under `name`. Re-registering a name replaces the
    /// previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        minifier: impl Minifier + 'static,
    ) {
        self.engines.insert(
            name.into(),
            Engine {
                version: version.into(),
                transform: Arc::new(minifier),
            },
        );
    }

    /// Register a synchronous closure as an engine.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, version: impl Into<String>, f: F)
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        self.register(name, version, FnMinifier::new(f));
    }

    /// Look up an engine by name.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnknownEngine`] when the name is not
    /// registered, a caller error that is surfaced rather than swallowed.
    pub fn get(&self, name: &str) -> Result<&Engine, HarnessError> {
        self.engines
            .get(name)
            .ok_or_else(|| HarnessError::UnknownEngine(name.to_string()))
    }

    /// The version label of a registered engine, if present.
    pub fn version(&self, name: &str) -> Option<&str> {
        self.engines.get(name).map(|e| e.version.as_str())
    }

    /// Iterate engines in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Engine)> {
        self.engines.iter().map(|(name, e)| (name.as_str(), e))
    }

    /// Engine names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the registry has no engines.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Build a new registry containing only the named engines.
    ///
    /// Names not present in this registry are ignored. The source registry is
    /// untouched; transforms are shared via `Arc`, not re-created.
    pub fn filtered<S: AsRef<str>>(&self, allow: &[S]) -> Self {
        let engines = self
            .engines
            .iter()
            .filter(|(name, _)| allow.iter().any(|a| a.as_ref() == name.as_str()))
            .map(|(name, engine)| (name.clone(), engine.clone()))
            .collect();
        Self { engines }
    }
}
