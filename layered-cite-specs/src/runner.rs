//! Runs fixtures through the resolution engine and compares the clusters.

use std::fmt;
use std::path::Path;

use layered_cite::{resolve_citations_infallible, Citation, ResolverConfig, Resolutions, ResourceIdentity};

use crate::config::{Identity, PipelineConfig};
use crate::failures::{ExpectedFailures, HarnessResult};
use crate::fixture::CitationFixture;
use crate::loader::load_all_fixtures;
use crate::SpecResult;

/// Result of running a fixture through the engine, expressed in labels.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    /// Labels grouped by resource, in order of each resource's first mention.
    pub clusters: Vec<Vec<String>>,
    /// Labels of mentions that resolved to nothing, in input order.
    pub unresolved: Vec<String>,
}

impl PipelineResult {
    pub fn new() -> Self {
        Self::default()
    }
}

fn collect_labels<R: ResourceIdentity>(
    resolutions: &Resolutions<'_, R>,
    labels: &[&str],
) -> PipelineResult {
    let clusters: Vec<Vec<String>> = resolutions
        .iter()
        .map(|cluster| {
            cluster
                .positions
                .iter()
                .map(|position| labels[*position].to_string())
                .collect()
        })
        .collect();
    let unresolved = labels
        .iter()
        .enumerate()
        .filter(|(position, _)| resolutions.resource_at(*position).is_none())
        .map(|(_, label)| label.to_string())
        .collect();
    PipelineResult {
        clusters,
        unresolved,
    }
}

/// Resolve the fixture's mentions with the configured resource identity.
pub fn run_fixture(fixture: &CitationFixture, config: &PipelineConfig) -> PipelineResult {
    let citations: Vec<Citation> = fixture.citations();
    let labels = fixture.labels();

    match config.identity {
        Identity::Reference => {
            let resolver = ResolverConfig::default();
            let resolutions = resolve_citations_infallible(&citations, &resolver);
            collect_labels(&resolutions, &labels)
        }
        Identity::Comparison => {
            let resolver = ResolverConfig::comparison();
            let resolutions = resolve_citations_infallible(&citations, &resolver);
            collect_labels(&resolutions, &labels)
        }
    }
}

/// A difference between a fixture's expectations and the engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureMismatch {
    Clusters {
        expected: Vec<Vec<String>>,
        actual: Vec<Vec<String>>,
    },
    Unresolved {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

impl FixtureMismatch {
    /// Name of the failed check, as used in expected-failures entries.
    pub fn assertion(&self) -> &'static str {
        match self {
            FixtureMismatch::Clusters { .. } => "clusters",
            FixtureMismatch::Unresolved { .. } => "unresolved",
        }
    }
}

impl fmt::Display for FixtureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureMismatch::Clusters { expected, actual } => {
                write!(f, "clusters: expected {:?}, got {:?}", expected, actual)
            }
            FixtureMismatch::Unresolved { expected, actual } => {
                write!(f, "unresolved: expected {:?}, got {:?}", expected, actual)
            }
        }
    }
}

/// Compare a pipeline result against the fixture's expectations.
pub fn check_fixture_assertions(
    fixture: &CitationFixture,
    result: &PipelineResult,
) -> Vec<FixtureMismatch> {
    let mut mismatches = Vec::new();
    if result.clusters != fixture.expect.clusters {
        mismatches.push(FixtureMismatch::Clusters {
            expected: fixture.expect.clusters.clone(),
            actual: result.clusters.clone(),
        });
    }
    if let Some(expected) = &fixture.expect.unresolved {
        if &result.unresolved != expected {
            mismatches.push(FixtureMismatch::Unresolved {
                expected: expected.clone(),
                actual: result.unresolved.clone(),
            });
        }
    }
    mismatches
}

/// Run one fixture with its own options and fail on the first mismatch.
pub fn check_fixture(fixture: &CitationFixture) -> SpecResult<()> {
    let result = run_fixture(fixture, &fixture.options);
    match check_fixture_assertions(fixture, &result).into_iter().next() {
        None => Ok(()),
        Some(mismatch) => Err(crate::SpecError::Assertion {
            message: format!(
                "{}: {}",
                fixture.title.as_deref().unwrap_or("untitled fixture"),
                mismatch
            ),
        }),
    }
}

/// Run every fixture under `dir`, classifying failures against `failures`.
pub fn run_harness(dir: &Path, failures: &ExpectedFailures) -> SpecResult<HarnessResult> {
    let mut harness = HarnessResult::new();
    let fixtures = load_all_fixtures(dir)?;
    tracing::debug!(
        fixtures = fixtures.len(),
        expected_failures = failures.count(),
        "running fixture harness"
    );

    for stale in failures
        .all_fixtures()
        .into_iter()
        .filter(|listed| !fixtures.iter().any(|(name, _)| name == listed))
    {
        tracing::warn!(fixture = stale, "expected failure names a missing fixture");
    }

    for (name, fixture) in &fixtures {
        let result = run_fixture(fixture, &fixture.options);
        let mismatches = check_fixture_assertions(fixture, &result);

        // one check for clusters, one more when unresolved labels are listed
        let checks = if fixture.expect.unresolved.is_some() { 2 } else { 1 };
        for _ in mismatches.len()..checks {
            harness.record_pass();
        }

        for mismatch in &mismatches {
            let state = failures.is_expected(name, mismatch.assertion());
            match failures.get_entry(name, mismatch.assertion()) {
                None => tracing::warn!(fixture = %name, %mismatch, "fixture regression"),
                Some(entry) => tracing::info!(
                    fixture = %name,
                    %mismatch,
                    ?state,
                    reason = entry.reason.as_deref().unwrap_or("-"),
                    "expected fixture failure"
                ),
            }
            harness.record_failure(state);
        }
    }

    tracing::info!(
        total = harness.total,
        passed = harness.passed,
        expected_failures = harness.expected_failures,
        regressions = harness.regressions,
        "fixture harness complete"
    );
    Ok(harness)
}
