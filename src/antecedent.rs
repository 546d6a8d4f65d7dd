//! Antecedent matching shared by the short form and supra resolvers.
//!
//! An antecedent guess is the text an extractor found just before a short
//! form or supra mention ("Adarand," in `Adarand, supra, at 240`). It is
//! matched against the party names of earlier full case citations. A guess
//! resolves only when every matching candidate points at the same resource.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::citation::FullCitation;
use crate::resource::ResourceIdentity;

/// Punctuation rules applied in order, each as (pattern, replacement).
static PUNCT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // starting quotes
        (r#"^["']"#, ""),
        (r"``", ""),
        (r#"[ (\[{<]""#, ""),
        // punctuation
        (r"\.\.\.", ""),
        (r"[,;:@#$%&]", ""),
        (r#"([^.])\.[\])}>"']*\s*$"#, "$1"),
        (r"[?!]", ""),
        (r"[^']' ", ""),
        // parens, brackets, etc.
        (r"[\]\[(){}<>]", ""),
        (r"--", ""),
        // ending quotes
        (r#"""#, ""),
        (r"(\S)''?$", "$1"),
    ]
    .iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("Invalid punctuation regex"),
            *replacement,
        )
    })
    .collect()
});

/// Strip punctuation noise from an antecedent guess.
///
/// ```
/// use layered_cite::strip_punct;
///
/// assert_eq!(strip_punct("Adarand,"), "Adarand");
/// assert_eq!(strip_punct("\"Lissner.\""), "Lissner");
/// ```
pub fn strip_punct(text: &str) -> String {
    let mut out = text.to_string();
    for (regex, replacement) in PUNCT_RULES.iter() {
        out = regex.replace_all(&out, *replacement).into_owned();
    }
    out.trim().to_string()
}

/// Whether the normalized guess names a party of this full citation.
/// Only case citations carry party names.
fn names_party(citation: &FullCitation, guess: &str) -> bool {
    if !citation.is_case() {
        return false;
    }
    let metadata = citation.metadata();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map_or(false, |name| !name.is_empty() && name.contains(guess))
    };
    contains(&metadata.defendant) || contains(&metadata.plaintiff)
}

/// Resolve a guess against candidate (full citation, resource) pairs.
///
/// Returns the resource only if the matching candidates collapse to exactly
/// one distinct resource; zero or several distinct resources yield `None`.
pub fn filter_by_matching_antecedent<'a, 'r, R, I>(candidates: I, antecedent_guess: &str) -> Option<R>
where
    R: ResourceIdentity + 'r,
    I: IntoIterator<Item = (&'a FullCitation, &'r R)>,
{
    let guess = strip_punct(antecedent_guess);
    let matches: HashSet<&R> = candidates
        .into_iter()
        .filter(|(citation, _)| names_party(citation, &guess))
        .map(|(_, resource)| resource)
        .collect();

    if matches.len() == 1 {
        matches.into_iter().next().cloned()
    } else {
        if matches.len() > 1 {
            tracing::trace!(
                guess = %guess,
                candidates = matches.len(),
                "antecedent guess matches several resources"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::{case_citation, law_citation};

    #[test]
    fn strips_trailing_and_quoting_punctuation() {
        assert_eq!(strip_punct("Foo,"), "Foo");
        assert_eq!(strip_punct("Foo."), "Foo");
        assert_eq!(strip_punct("\"Foo\""), "Foo");
        assert_eq!(strip_punct("Foo;"), "Foo");
        assert_eq!(strip_punct("(Foo)"), "Foo");
        assert_eq!(strip_punct("Foo?!"), "Foo");
        assert_eq!(strip_punct("  Foo Bar,  "), "Foo Bar");
    }

    #[test]
    fn keeps_inner_periods() {
        assert_eq!(strip_punct("U.S. Steel,"), "U.S. Steel");
        assert_eq!(strip_punct("Smith v. Jones"), "Smith v. Jones");
    }

    #[test]
    fn keeps_inner_apostrophes() {
        assert_eq!(strip_punct("O'Brien,"), "O'Brien");
        assert_eq!(strip_punct("D'Amato"), "D'Amato");
        assert_eq!(strip_punct("People's Bank,"), "People's Bank");
        assert_eq!(strip_punct("Jones'"), "Jones");
        assert_eq!(strip_punct("Jones''"), "Jones");
    }

    #[test]
    fn matches_defendant_then_plaintiff() {
        let a = case_citation("1", "U.S.", "1").with_plaintiff("Foo").with_defendant("Bar");
        let b = case_citation("2", "U.S.", "1").with_plaintiff("Baz").with_defendant("Qux");
        let candidates = vec![(&a, &1u32), (&b, &2u32)];

        assert_eq!(filter_by_matching_antecedent(candidates.clone(), "Bar,"), Some(1));
        assert_eq!(filter_by_matching_antecedent(candidates.clone(), "Baz"), Some(2));
        assert_eq!(filter_by_matching_antecedent(candidates.clone(), "Nobody"), None);
        // case-sensitive
        assert_eq!(filter_by_matching_antecedent(candidates, "bar"), None);
    }

    #[test]
    fn rejects_ambiguous_guess() {
        let a = case_citation("1", "U.S.", "1").with_defendant("United States");
        let b = case_citation("2", "U.S.", "1").with_defendant("United States");
        let candidates = vec![(&a, &1u32), (&b, &2u32)];
        assert_eq!(filter_by_matching_antecedent(candidates, "United States"), None);
    }

    #[test]
    fn shared_resource_counts_once() {
        let a = case_citation("1", "U.S.", "1").with_defendant("Test");
        let b = case_citation("1", "U.S.", "1").with_defendant("Test");
        let candidates = vec![(&a, &7u32), (&b, &7u32)];
        assert_eq!(filter_by_matching_antecedent(candidates, "Test"), Some(7));
    }

    #[test]
    fn ignores_non_case_and_empty_names() {
        let law = law_citation("Foo Code", "1").with_defendant("Foo");
        let blank = case_citation("1", "U.S.", "1").with_defendant("");
        let candidates = vec![(&law, &1u32), (&blank, &2u32)];
        assert_eq!(filter_by_matching_antecedent(candidates, "Foo"), None);
    }
}
