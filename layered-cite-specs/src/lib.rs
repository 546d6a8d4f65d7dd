#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven testing infrastructure for layered-cite.
//!
//! Test cases are written as `.toml` fixtures: a list of labelled
//! mentions in document order plus the clusters the resolution pass
//! should produce.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture types and TOML parsing
//! - [`loader`] - Fixture file loading
//! - [`config`] - Per-fixture pipeline options
//! - [`runner`] - Runs fixtures and compares clusters
//! - [`errors`] - Error types for the fixture harness
//! - [`failures`] - Expected failures tracking via TOML

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod loader;
pub mod runner;

pub use config::{Identity, PipelineConfig};
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, CitationFixture, Expectations, FixtureCitation, FixtureKind};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{
    check_fixture, check_fixture_assertions, run_fixture, run_harness, FixtureMismatch,
    PipelineResult,
};
