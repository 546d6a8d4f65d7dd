//! Core types for `.toml` resolution fixtures.
//!
//! A fixture lists mentions in document order and the clusters the
//! resolution pass is expected to produce:
//!
//! ```toml
//! title = "Id after a full citation"
//!
//! [[citations]]
//! label = "lissner"
//! kind = "full_case"
//! groups = { volume = "1", reporter = "U.S.", page = "1" }
//! plaintiff = "Lissner"
//! defendant = "Test"
//!
//! [[citations]]
//! label = "id"
//! kind = "id"
//!
//! [expect]
//! clusters = [["lissner", "id"]]
//! ```

use std::collections::{BTreeMap, HashSet};

use layered_cite::{
    Citation, CitationBase, FullCitation, FullKind, IdCitation, Metadata, NonopinionCitation,
    ShortFormCitation, Span, SupraCitation,
};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::errors::{SpecError, SpecResult};

/// A parsed resolution fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub options: PipelineConfig,
    pub citations: Vec<FixtureCitation>,
    #[serde(default)]
    pub expect: Expectations,
}

/// Mention variant as written in a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    FullCase,
    FullLaw,
    FullJournal,
    ShortForm,
    Supra,
    Id,
    Other,
}

/// One mention in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCitation {
    /// Name used by expectations to refer to this mention
    pub label: String,
    pub kind: FixtureKind,
    /// Matched text; derived from the groups when omitted
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
    #[serde(default)]
    pub groups: BTreeMap<String, String>,
    #[serde(default)]
    pub edition_guess: Option<String>,
    /// Parsed year for full citations
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Expected output of the resolution pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expectations {
    /// Clusters of labels, in order of each cluster's first mention
    #[serde(default)]
    pub clusters: Vec<Vec<String>>,
    /// Labels that must stay unresolved; checked only when present
    #[serde(default)]
    pub unresolved: Option<Vec<String>>,
}

impl FixtureCitation {
    fn default_text(&self) -> String {
        match self.kind {
            FixtureKind::Id => "id.".to_string(),
            FixtureKind::Supra => "supra".to_string(),
            _ => ["volume", "reporter", "section", "page"]
                .iter()
                .filter_map(|key| self.groups.get(*key))
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Build the mention this fixture entry describes.
    pub fn to_citation(&self) -> Citation {
        let text = self.text.clone().unwrap_or_else(|| self.default_text());
        let span = self.span.unwrap_or_else(|| Span::new(0, text.len()));
        let mut base = CitationBase::new(text, span);
        base.groups = self.groups.clone();
        base.metadata = self.metadata.clone();

        let full = |kind: FullKind, base: CitationBase| {
            let mut full = FullCitation::new(kind, base);
            full.edition_guess = self.edition_guess.clone();
            if let Some(year) = self.year {
                full = full.with_year(year);
            }
            Citation::Full(full)
        };

        match self.kind {
            FixtureKind::FullCase => full(FullKind::Case, base),
            FixtureKind::FullLaw => full(FullKind::Law, base),
            FixtureKind::FullJournal => full(FullKind::Journal, base),
            FixtureKind::ShortForm => {
                let mut short = ShortFormCitation::new(base);
                short.edition_guess = self.edition_guess.clone();
                short.year = self.year;
                Citation::ShortForm(short)
            }
            FixtureKind::Supra => Citation::Supra(SupraCitation::new(base)),
            FixtureKind::Id => Citation::Id(IdCitation::new(base)),
            FixtureKind::Other => Citation::Other(NonopinionCitation::new(base)),
        }
    }
}

impl CitationFixture {
    /// Mentions in document order.
    pub fn citations(&self) -> Vec<Citation> {
        self.citations.iter().map(FixtureCitation::to_citation).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.citations.iter().map(|c| c.label.as_str()).collect()
    }

    /// Labels must be unique and every expectation must name a known label.
    pub fn validate(&self) -> SpecResult<()> {
        let mut labels = HashSet::new();
        for citation in &self.citations {
            if !labels.insert(citation.label.as_str()) {
                return Err(SpecError::Parse {
                    line: 0,
                    message: format!("duplicate label '{}'", citation.label),
                });
            }
        }

        let expected = self
            .expect
            .clusters
            .iter()
            .flatten()
            .chain(self.expect.unresolved.iter().flatten());
        for label in expected {
            if !labels.contains(label.as_str()) {
                return Err(SpecError::Parse {
                    line: 0,
                    message: format!("expectation names unknown label '{}'", label),
                });
            }
        }
        Ok(())
    }
}

/// Parse and validate a fixture from TOML source.
pub fn parse_fixture(content: &str) -> SpecResult<CitationFixture> {
    let fixture: CitationFixture = toml::from_str(content).map_err(|e| {
        let line = e
            .span()
            .map(|span| content[..span.start].lines().count().max(1))
            .unwrap_or(0);
        SpecError::Parse {
            line,
            message: e.message().to_string(),
        }
    })?;
    fixture.validate()?;
    Ok(fixture)
}
