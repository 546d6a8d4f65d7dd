//! Constructors for building mention streams without running an extractor.
//!
//! Spans default to `0..matched_text.len()`; use `with_span` to place a
//! mention in a longer document.

use crate::citation::{
    CitationBase, FullCitation, FullKind, IdCitation, NonopinionCitation, ShortFormCitation,
    Span, SupraCitation,
};

fn base(matched_text: String) -> CitationBase {
    let span = Span::new(0, matched_text.len());
    CitationBase::new(matched_text, span)
}

fn reporter_base(volume: &str, reporter: &str, page: &str, matched_text: String) -> CitationBase {
    let mut base = base(matched_text);
    base.groups.insert("volume".to_string(), volume.to_string());
    base.groups.insert("reporter".to_string(), reporter.to_string());
    base.groups.insert("page".to_string(), page.to_string());
    base
}

/// A full case citation such as `1 U.S. 1`.
pub fn case_citation(volume: &str, reporter: &str, page: &str) -> FullCitation {
    let text = format!("{} {} {}", volume, reporter, page);
    FullCitation::new(FullKind::Case, reporter_base(volume, reporter, page, text))
}

/// A full law citation such as `Mass. Gen. Laws § 2`.
pub fn law_citation(reporter: &str, section: &str) -> FullCitation {
    let mut base = base(format!("{} § {}", reporter, section));
    base.groups.insert("reporter".to_string(), reporter.to_string());
    base.groups.insert("section".to_string(), section.to_string());
    FullCitation::new(FullKind::Law, base)
}

/// A full journal citation such as `1 Minn. L. Rev. 1`.
pub fn journal_citation(volume: &str, reporter: &str, page: &str) -> FullCitation {
    let text = format!("{} {} {}", volume, reporter, page);
    FullCitation::new(FullKind::Journal, reporter_base(volume, reporter, page, text))
}

/// A short form case citation such as `1 U.S., at 5`.
pub fn short_case_citation(volume: &str, reporter: &str, page: &str) -> ShortFormCitation {
    let text = format!("{} {}, at {}", volume, reporter, page);
    ShortFormCitation::new(reporter_base(volume, reporter, page, text))
}

pub fn supra_citation() -> SupraCitation {
    SupraCitation::new(base("supra".to_string()))
}

pub fn id_citation() -> IdCitation {
    IdCitation::new(base("id.".to_string()))
}

pub fn nonopinion_citation(matched_text: &str) -> NonopinionCitation {
    NonopinionCitation::new(base(matched_text.to_string()))
}
