//! End-to-end run: fixtures + registry in, events and ranked totals out.

use std::collections::BTreeMap;

use minibench_harness::{
    BenchmarkRunner, MemorySink, MinifierRegistry, RunConfig, RunEvent,
};
use minibench_types::{FixtureSet, Verdict};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Four engines with distinct habits: one always hits the optimal candidate,
/// one emits a trailing semicolon, one reproduces a known-broken output, one
/// crashes on every input.
fn registry() -> MinifierRegistry {
    let mut registry = MinifierRegistry::new();
    registry.register_fn("tidy", "4.2.0", |raw: &str| {
        Ok(raw.replace(' ', "").replace(";}", "}"))
    });
    registry.register_fn("sloppy", "1.1.3", |raw: &str| Ok(raw.replace(' ', "")));
    registry.register_fn("buggy", "0.9.0", |_raw: &str| Ok("a{color:#fff}".to_string()));
    registry.register_fn("fragile", "3.0.0", |_raw: &str| {
        Err(anyhow::anyhow!("unexpected end of input"))
    });
    registry
}

fn fixtures() -> Vec<FixtureSet> {
    let mut sets = Vec::new();
    for (title, selector) in [("Red links", "a"), ("Red divs", "div"), ("Red spans", "span")] {
        sets.push(FixtureSet::new(
            title,
            format!("{selector} {{ color: red; }}"),
            vec![],
            vec![format!("{selector}{{color:red}}")],
            vec![format!("{selector}{{color:#fff}}")],
        ));
    }
    sets
}

#[tokio::test]
async fn test_full_run_produces_expected_ranking() {
    init_tracing();
    let runner = BenchmarkRunner::new(registry());
    let mut sink = MemorySink::new();
    let report = runner.run(&fixtures(), &mut sink).await;

    assert_eq!(report.suites.len(), 3);

    let order: Vec<&str> = report
        .ranking
        .entries
        .iter()
        .map(|e| e.engine.as_str())
        .collect();
    // tidy wins every suite; sloppy is sub-optimal throughout; buggy's output
    // is only a known-broken candidate for "Red links"; fragile crashes
    // everywhere and ranks last.
    assert_eq!(order, vec!["tidy", "sloppy", "buggy", "fragile"]);

    assert_eq!(report.ranking.totals["tidy"].optimal, 3);
    assert_eq!(report.ranking.totals["sloppy"].sub_optimal, 3);
    assert_eq!(report.ranking.totals["buggy"].broken, 1);
    assert_eq!(report.ranking.totals["buggy"].sub_optimal, 2);
    assert_eq!(report.ranking.totals["fragile"].crashed, 3);
}

#[tokio::test]
async fn test_totals_match_per_suite_verdicts() {
    let runner = BenchmarkRunner::new(registry());
    let mut sink = MemorySink::new();
    let report = runner.run(&fixtures(), &mut sink).await;

    let mut counted: BTreeMap<(&str, Verdict), u64> = BTreeMap::new();
    for suite in &report.suites {
        for (engine, outcome) in &suite.results {
            *counted.entry((engine.as_str(), outcome.verdict)).or_default() += 1;
        }
    }

    for (engine, totals) in &report.ranking.totals {
        let count = |v: Verdict| counted.get(&(engine.as_str(), v)).copied().unwrap_or(0);
        assert_eq!(totals.outstanding, count(Verdict::Outstanding));
        assert_eq!(totals.optimal, count(Verdict::Optimal));
        assert_eq!(totals.sub_optimal, count(Verdict::SubOptimal));
        assert_eq!(totals.broken, count(Verdict::Broken));
        assert_eq!(totals.crashed, count(Verdict::Crashed));
        assert_eq!(totals.total(), 3);
    }
}

#[tokio::test]
async fn test_event_stream_shape() {
    let runner = BenchmarkRunner::new(registry());
    let mut sink = MemorySink::new();
    runner.run(&fixtures(), &mut sink).await;

    // 3 suites x (start + 4 graded + end) + run-finished
    assert_eq!(sink.events.len(), 3 * 6 + 1);

    let mut graded_per_suite = Vec::new();
    let mut current = 0usize;
    for event in &sink.events {
        match event {
            RunEvent::SuiteStart { .. } => current = 0,
            RunEvent::EngineGraded { .. } => current += 1,
            RunEvent::SuiteEnd { .. } => graded_per_suite.push(current),
            RunEvent::RunFinished { .. } => {}
        }
    }
    assert_eq!(graded_per_suite, vec![4, 4, 4]);
    assert!(matches!(
        sink.events.last(),
        Some(RunEvent::RunFinished { .. })
    ));
}

#[tokio::test]
async fn test_ranking_stable_across_runs_and_parallelism() {
    let sequential = BenchmarkRunner::with_config(
        registry(),
        RunConfig {
            parallel_suites: 1,
            ..RunConfig::default()
        },
    );
    let parallel = BenchmarkRunner::with_config(
        registry(),
        RunConfig {
            parallel_suites: 8,
            ..RunConfig::default()
        },
    );

    let mut sink_a = MemorySink::new();
    let mut sink_b = MemorySink::new();
    let report_a = sequential.run(&fixtures(), &mut sink_a).await;
    let report_b = parallel.run(&fixtures(), &mut sink_b).await;

    assert_eq!(report_a.ranking, report_b.ranking);
    assert_eq!(report_a.suites, report_b.suites);
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let runner = BenchmarkRunner::new(registry());
    let mut sink = MemorySink::new();
    let report = runner.run(&fixtures(), &mut sink).await;

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"tidy\""));
    assert!(json.contains("\"sub-optimal\""));
    assert!(json.contains("\"crashed\""));

    let parsed: minibench_harness::RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.ranking, report.ranking);
}

#[tokio::test]
async fn test_fixture_built_from_variant_map() {
    let variants: BTreeMap<String, String> = [
        ("fixture", "a { color: red; }"),
        ("optimal", "a{color:red}"),
        ("broken", "a{color:#fff}"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let fixture = FixtureSet::from_variants("From variants", &variants).unwrap();

    let runner = BenchmarkRunner::new(registry());
    let mut sink = MemorySink::new();
    let report = runner.run(&[fixture], &mut sink).await;

    assert_eq!(
        report.suites[0].results["tidy"].verdict,
        Verdict::Optimal
    );
    assert_eq!(report.suites[0].results["buggy"].verdict, Verdict::Broken);
}
