//! Citation mentions consumed by the resolution engine.
//!
//! Mentions are produced upstream by a tokenizer/extractor and arrive here
//! fully populated. Nothing in this crate mutates them: the engine only reads
//! their token groups and metadata to decide which authority they point to.
//!
//! ```text
//! Lissner v. Test, 1 U.S. 1, 4 (1982) ... Id., at 5 ... Lissner, supra ... 1 U.S., at 7
//! ╰──────────── Full ────────────╯          ╰─ Id ─╯     ╰── Supra ──╯      ╰ ShortForm ╯
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Raw token groups matched by the extractor, e.g. `volume`, `reporter`,
/// `page`, `section`. Values are never interpreted numerically.
pub type Groups = BTreeMap<String, String>;

/// Character offsets of a mention in its source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Metadata extracted around a mention. Which fields are meaningful depends
/// on the mention variant; unset fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plaintiff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defendant: Option<String>,
    /// Text preceding a short form or supra mention, presumed to name its target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antecedent_guess: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_cite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parenthetical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    /// Year as matched in the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Volume number preceding "supra" (e.g. `Adarand, 515 supra`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

/// Fields shared by every mention variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBase {
    /// Text that identified this mention, such as `1 U.S. 1` or `Id.`
    pub matched_text: String,
    pub span: Span,
    #[serde(default)]
    pub groups: Groups,
    #[serde(default)]
    pub metadata: Metadata,
}

impl CitationBase {
    pub fn new(matched_text: impl Into<String>, span: Span) -> Self {
        Self {
            matched_text: matched_text.into(),
            span,
            groups: Groups::new(),
            metadata: Metadata::default(),
        }
    }

    /// Look up a raw token group.
    pub fn group(&self, key: &str) -> Option<&str> {
        self.groups.get(key).map(String::as_str)
    }

    /// Metadata as a JSON object, omitting unset fields.
    fn dump(&self) -> Value {
        json!({
            "groups": self.groups,
            "metadata": self.metadata,
        })
    }
}

/// The kind of authority a full citation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullKind {
    /// A reported case (`Adarand Constructors, Inc. v. Peña, 515 U.S. 200`)
    Case,
    /// A statute or regulation (`Mass. Gen. Laws ch. 1, § 2`)
    Law,
    /// A law review or journal article (`1 Minn. L. Rev. 1`)
    Journal,
}

/// A citation that fully identifies its authority without any antecedent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCitation {
    pub kind: FullKind,
    pub base: CitationBase,
    /// Official reporter abbreviation, when the upstream edition lookup was unambiguous
    #[serde(default)]
    pub edition_guess: Option<String>,
    /// Year parsed from metadata, when within a plausible range
    #[serde(default)]
    pub year: Option<i32>,
}

/// An abbreviated case citation that depends on an earlier full citation,
/// e.g. `Adarand, 515 U.S., at 241`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortFormCitation {
    pub base: CitationBase,
    #[serde(default)]
    pub edition_guess: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// A `supra` citation, e.g. `Adarand, supra, at 240`. Carries an antecedent
/// guess but no reporter or volume of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupraCitation {
    pub base: CitationBase,
}

/// An `id.` or `ibid.` citation to the immediately preceding authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCitation {
    pub base: CitationBase,
}

/// A citation to something known not to be an opinion, such as
/// `18 U.S.C. §922(g)(1)` or `U. S. Const., Art. I, §8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonopinionCitation {
    pub base: CitationBase,
}

/// One extracted citation mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Citation {
    Full(FullCitation),
    ShortForm(ShortFormCitation),
    Supra(SupraCitation),
    Id(IdCitation),
    /// Non-opinion or otherwise unresolvable mention
    Other(NonopinionCitation),
}

macro_rules! citation_builders {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn metadata(&self) -> &Metadata {
                    &self.base.metadata
                }

                pub fn matched_text(&self) -> &str {
                    &self.base.matched_text
                }

                pub fn span(&self) -> Span {
                    self.base.span
                }

                pub fn with_span(mut self, start: usize, end: usize) -> Self {
                    self.base.span = Span::new(start, end);
                    self
                }

                pub fn with_group(mut self, key: &str, value: &str) -> Self {
                    self.base.groups.insert(key.to_string(), value.to_string());
                    self
                }

                pub fn with_metadata(mut self, metadata: Metadata) -> Self {
                    self.base.metadata = metadata;
                    self
                }

                pub fn with_plaintiff(mut self, plaintiff: &str) -> Self {
                    self.base.metadata.plaintiff = Some(plaintiff.to_string());
                    self
                }

                pub fn with_defendant(mut self, defendant: &str) -> Self {
                    self.base.metadata.defendant = Some(defendant.to_string());
                    self
                }

                pub fn with_antecedent_guess(mut self, guess: &str) -> Self {
                    self.base.metadata.antecedent_guess = Some(guess.to_string());
                    self
                }

                pub fn with_pin_cite(mut self, pin_cite: &str) -> Self {
                    self.base.metadata.pin_cite = Some(pin_cite.to_string());
                    self
                }

                pub fn with_parenthetical(mut self, parenthetical: &str) -> Self {
                    self.base.metadata.parenthetical = Some(parenthetical.to_string());
                    self
                }

                pub fn with_court(mut self, court: &str) -> Self {
                    self.base.metadata.court = Some(court.to_string());
                    self
                }

                pub fn with_publisher(mut self, publisher: &str) -> Self {
                    self.base.metadata.publisher = Some(publisher.to_string());
                    self
                }
            }

            impl From<$ty> for Citation {
                fn from(citation: $ty) -> Self {
                    citation.into_citation()
                }
            }
        )*
    };
}

citation_builders!(
    FullCitation,
    ShortFormCitation,
    SupraCitation,
    IdCitation,
    NonopinionCitation,
);

/// Official reporter if an edition was guessed, else the raw `reporter` group.
fn corrected_reporter<'c>(base: &'c CitationBase, edition_guess: &'c Option<String>) -> Option<&'c str> {
    edition_guess.as_deref().or_else(|| base.group("reporter"))
}

/// Matched text with the raw reporter swapped for the guessed edition.
fn corrected_citation(base: &CitationBase, edition_guess: &Option<String>) -> String {
    match (edition_guess, base.group("reporter")) {
        (Some(edition), Some(raw)) if !raw.is_empty() => base.matched_text.replace(raw, edition),
        _ => base.matched_text.clone(),
    }
}

/// A metadata field that is set and non-empty.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn push_paren(parts: &mut Vec<String>, inner: &str) {
    if !inner.is_empty() {
        parts.push(format!(" ({})", inner));
    }
}

fn join_present(fields: &[&Option<String>]) -> String {
    fields
        .iter()
        .filter_map(|f| present(f))
        .collect::<Vec<_>>()
        .join(" ")
}

impl FullCitation {
    pub fn new(kind: FullKind, base: CitationBase) -> Self {
        Self {
            kind,
            base,
            edition_guess: None,
            year: None,
        }
    }

    pub fn is_case(&self) -> bool {
        self.kind == FullKind::Case
    }

    pub fn with_edition_guess(mut self, edition: &str) -> Self {
        self.edition_guess = Some(edition.to_string());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.base.metadata.year = Some(year.to_string());
        self
    }

    pub fn corrected_reporter(&self) -> Option<&str> {
        corrected_reporter(&self.base, &self.edition_guess)
    }

    pub fn corrected_citation(&self) -> String {
        corrected_citation(&self.base, &self.edition_guess)
    }

    /// Formatted citation including the extracted metadata.
    pub fn corrected_citation_full(&self) -> String {
        let m = &self.base.metadata;
        let mut parts = Vec::new();
        match self.kind {
            FullKind::Case => {
                if let Some(plaintiff) = present(&m.plaintiff) {
                    parts.push(format!("{} v. ", plaintiff));
                }
                if let Some(defendant) = present(&m.defendant) {
                    parts.push(format!("{}, ", defendant));
                }
                parts.push(self.corrected_citation());
                if let Some(pin_cite) = present(&m.pin_cite) {
                    parts.push(format!(", {}", pin_cite));
                }
                if let Some(extra) = present(&m.extra) {
                    parts.push(extra.to_string());
                }
                push_paren(&mut parts, &join_present(&[&m.court, &m.year]));
            }
            FullKind::Law => {
                parts.push(self.corrected_citation());
                if let Some(pin_cite) = present(&m.pin_cite) {
                    parts.push(pin_cite.to_string());
                }
                push_paren(
                    &mut parts,
                    &join_present(&[&m.publisher, &m.month, &m.day, &m.year]),
                );
            }
            FullKind::Journal => {
                parts.push(self.corrected_citation());
                if let Some(pin_cite) = present(&m.pin_cite) {
                    parts.push(format!(", {}", pin_cite));
                }
                push_paren(&mut parts, &join_present(&[&m.year]));
            }
        }
        if let Some(parenthetical) = present(&m.parenthetical) {
            push_paren(&mut parts, parenthetical);
        }
        parts.concat()
    }

    pub fn into_citation(self) -> Citation {
        Citation::Full(self)
    }
}

impl ShortFormCitation {
    pub fn new(base: CitationBase) -> Self {
        Self {
            base,
            edition_guess: None,
            year: None,
        }
    }

    pub fn with_edition_guess(mut self, edition: &str) -> Self {
        self.edition_guess = Some(edition.to_string());
        self
    }

    pub fn corrected_reporter(&self) -> Option<&str> {
        corrected_reporter(&self.base, &self.edition_guess)
    }

    pub fn corrected_citation(&self) -> String {
        corrected_citation(&self.base, &self.edition_guess)
    }

    pub fn corrected_citation_full(&self) -> String {
        match present(&self.base.metadata.antecedent_guess) {
            Some(guess) => format!("{}, {}", guess, self.corrected_citation()),
            None => self.corrected_citation(),
        }
    }

    pub fn into_citation(self) -> Citation {
        Citation::ShortForm(self)
    }
}

impl SupraCitation {
    pub fn new(base: CitationBase) -> Self {
        Self { base }
    }

    pub fn formatted(&self) -> String {
        let m = &self.base.metadata;
        let mut out = String::new();
        if let Some(guess) = present(&m.antecedent_guess) {
            out.push_str(guess);
            out.push_str(", ");
        }
        if let Some(volume) = present(&m.volume) {
            out.push_str(volume);
            out.push(' ');
        }
        out.push_str("supra");
        if let Some(pin_cite) = present(&m.pin_cite) {
            out.push_str(", ");
            out.push_str(pin_cite);
        }
        out
    }

    pub fn into_citation(self) -> Citation {
        Citation::Supra(self)
    }
}

impl IdCitation {
    pub fn new(base: CitationBase) -> Self {
        Self { base }
    }

    pub fn formatted(&self) -> String {
        match present(&self.base.metadata.pin_cite) {
            Some(pin_cite) => format!("id., {}", pin_cite),
            None => "id.".to_string(),
        }
    }

    pub fn into_citation(self) -> Citation {
        Citation::Id(self)
    }
}

impl NonopinionCitation {
    pub fn new(base: CitationBase) -> Self {
        Self { base }
    }

    pub fn into_citation(self) -> Citation {
        Citation::Other(self)
    }
}

impl Citation {
    pub fn base(&self) -> &CitationBase {
        match self {
            Citation::Full(c) => &c.base,
            Citation::ShortForm(c) => &c.base,
            Citation::Supra(c) => &c.base,
            Citation::Id(c) => &c.base,
            Citation::Other(c) => &c.base,
        }
    }

    pub fn matched_text(&self) -> &str {
        &self.base().matched_text
    }

    pub fn span(&self) -> Span {
        self.base().span
    }

    pub fn groups(&self) -> &Groups {
        &self.base().groups
    }

    pub fn metadata(&self) -> &Metadata {
        &self.base().metadata
    }

    /// Short variant label used in dumps and log events.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Citation::Full(c) => match c.kind {
                FullKind::Case => "full_case",
                FullKind::Law => "full_law",
                FullKind::Journal => "full_journal",
            },
            Citation::ShortForm(_) => "short_form",
            Citation::Supra(_) => "supra",
            Citation::Id(_) => "id",
            Citation::Other(_) => "other",
        }
    }

    pub fn as_full(&self) -> Option<&FullCitation> {
        match self {
            Citation::Full(full) => Some(full),
            _ => None,
        }
    }

    /// Formatted citation with normalized reporter and extracted metadata.
    pub fn corrected_citation_full(&self) -> String {
        match self {
            Citation::Full(c) => c.corrected_citation_full(),
            Citation::ShortForm(c) => c.corrected_citation_full(),
            Citation::Supra(c) => c.formatted(),
            Citation::Id(c) => c.formatted(),
            Citation::Other(c) => c.base.matched_text.clone(),
        }
    }

    /// Groups and set metadata fields as JSON. Full and short form mentions
    /// also report their parsed year (possibly `null`).
    pub fn dump(&self) -> Value {
        let mut value = self.base().dump();
        let year = match self {
            Citation::Full(c) => Some(c.year),
            Citation::ShortForm(c) => Some(c.year),
            _ => None,
        };
        if let (Some(year), Value::Object(map)) = (year, &mut value) {
            map.insert("year".to_string(), json!(year));
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::factories::{
        case_citation, id_citation, journal_citation, law_citation, nonopinion_citation,
        short_case_citation, supra_citation,
    };

    #[test]
    fn corrected_reporter_prefers_edition_guess() {
        let raw = case_citation("1", "U. S.", "1");
        assert_eq!(raw.corrected_reporter(), Some("U. S."));

        let guessed = raw.with_edition_guess("U.S.");
        assert_eq!(guessed.corrected_reporter(), Some("U.S."));
        assert_eq!(guessed.corrected_citation(), "1 U.S. 1");
    }

    #[test]
    fn corrected_citation_without_reporter_group() {
        let law = nonopinion_citation("§99");
        assert_eq!(law.into_citation().corrected_citation_full(), "§99");
    }

    #[test]
    fn case_formatting() {
        let cite = case_citation("515", "U.S.", "200")
            .with_plaintiff("Adarand Constructors, Inc.")
            .with_defendant("Peña")
            .with_pin_cite("240")
            .with_court("scotus")
            .with_year(1995);
        insta::assert_snapshot!(cite.corrected_citation_full(), @"Adarand Constructors, Inc. v. Peña, 515 U.S. 200, 240 (scotus 1995)");
    }

    #[test]
    fn law_and_journal_formatting() {
        let law = law_citation("Mass. Gen. Laws", "2")
            .with_publisher("West")
            .with_parenthetical("repealed");
        assert_eq!(
            law.corrected_citation_full(),
            "Mass. Gen. Laws § 2 (West) (repealed)"
        );

        let journal = journal_citation("1", "Minn. L. Rev.", "1")
            .with_pin_cite("5")
            .with_year(2000);
        assert_eq!(journal.corrected_citation_full(), "1 Minn. L. Rev. 1, 5 (2000)");
    }

    #[test]
    fn dependent_forms_formatting() {
        let short = short_case_citation("515", "U.S.", "241").with_antecedent_guess("Adarand");
        assert_eq!(short.corrected_citation_full(), "Adarand, 515 U.S., at 241");

        let supra = supra_citation().with_antecedent_guess("Adarand").with_pin_cite("at 240");
        assert_eq!(supra.formatted(), "Adarand, supra, at 240");

        assert_eq!(id_citation().formatted(), "id.");
        assert_eq!(id_citation().with_pin_cite("at 5").formatted(), "id., at 5");
    }

    #[test]
    fn empty_metadata_is_not_rendered() {
        let cite = case_citation("1", "U.S.", "1")
            .with_plaintiff("")
            .with_defendant("Test")
            .with_pin_cite("");
        assert_eq!(cite.corrected_citation_full(), "Test, 1 U.S. 1");

        let short = short_case_citation("1", "U.S.", "2").with_antecedent_guess("");
        assert_eq!(short.corrected_citation_full(), "1 U.S., at 2");

        let supra = supra_citation().with_antecedent_guess("").with_pin_cite("");
        assert_eq!(supra.formatted(), "supra");
        assert_eq!(id_citation().with_pin_cite("").formatted(), "id.");
    }

    #[test]
    fn dump_omits_unset_metadata() {
        let cite = case_citation("1", "U.S.", "1").with_defendant("Test").into_citation();
        insta::assert_snapshot!(cite.dump().to_string(), @r#"{"groups":{"page":"1","reporter":"U.S.","volume":"1"},"metadata":{"defendant":"Test"},"year":null}"#);

        let id = id_citation().into_citation();
        assert_eq!(id.dump().to_string(), r#"{"groups":{},"metadata":{}}"#);
    }

    #[test]
    fn variant_names() {
        assert_eq!(case_citation("1", "U.S.", "1").into_citation().variant_name(), "full_case");
        assert_eq!(supra_citation().into_citation().variant_name(), "supra");
        assert_eq!(nonopinion_citation("§99").into_citation().variant_name(), "other");
    }
}
