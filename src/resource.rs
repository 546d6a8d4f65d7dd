//! Resource identities: what a full citation "refers to".
//!
//! The engine never inspects a resource. It only stores, clones, hashes and
//! compares them, so any `Clone + Eq + Hash` type can serve as an identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::citation::{FullCitation, FullKind};

/// Bound satisfied by every type usable as a resource identity.
pub trait ResourceIdentity: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> ResourceIdentity for T {}

/// Default resource: wraps exactly one full citation and is equal only to
/// itself. Two textually identical full citations at different positions
/// are distinct resources.
#[derive(Clone, Copy)]
pub struct Resource<'a> {
    citation: &'a FullCitation,
}

impl<'a> Resource<'a> {
    pub fn new(citation: &'a FullCitation) -> Self {
        Self { citation }
    }

    pub fn citation(&self) -> &'a FullCitation {
        self.citation
    }
}

impl PartialEq for Resource<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.citation, other.citation)
    }
}

impl Eq for Resource<'_> {}

impl Hash for Resource<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.citation, state)
    }
}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resource")
            .field(&self.citation.base.matched_text)
            .finish()
    }
}

/// Resource that treats semantically equivalent full citations as one
/// authority: same subtype, same token groups and same corrected reporter.
///
/// `Roe v. Wade, 410 U.S. 113` cited twice in a document yields one
/// `ComparisonResource`, so short forms after the second mention are not
/// considered ambiguous.
#[derive(Clone)]
pub struct ComparisonResource<'a> {
    key: ComparisonKey,
    first: &'a FullCitation,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ComparisonKey {
    kind: FullKind,
    groups: Vec<(String, String)>,
    reporter: Option<String>,
}

impl<'a> ComparisonResource<'a> {
    pub fn new(citation: &'a FullCitation) -> Self {
        let key = ComparisonKey {
            kind: citation.kind,
            groups: citation
                .base
                .groups
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            reporter: citation.corrected_reporter().map(str::to_string),
        };
        Self { key, first: citation }
    }

    /// The full citation this resource was first created from.
    pub fn citation(&self) -> &'a FullCitation {
        self.first
    }
}

impl PartialEq for ComparisonResource<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ComparisonResource<'_> {}

impl Hash for ComparisonResource<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state)
    }
}

impl fmt::Debug for ComparisonResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComparisonResource")
            .field(&self.first.corrected_citation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::{case_citation, journal_citation};
    use std::collections::HashSet;

    #[test]
    fn reference_identity() {
        let a = case_citation("1", "U.S.", "1");
        let b = case_citation("1", "U.S.", "1");
        assert_eq!(a, b);

        let resources: HashSet<_> =
            vec![Resource::new(&a), Resource::new(&b), Resource::new(&a)].into_iter().collect();
        assert_eq!(resources.len(), 2);
    }

    #[test]
    fn comparison_identity_collapses_equivalent_citations() {
        let a = case_citation("1", "U.S.", "1").with_defendant("Test");
        let b = case_citation("1", "U.S.", "1").with_span(40, 48);
        let c = case_citation("1", "U.S.", "2");
        assert_eq!(ComparisonResource::new(&a), ComparisonResource::new(&b));
        assert_ne!(ComparisonResource::new(&a), ComparisonResource::new(&c));
        assert_eq!(ComparisonResource::new(&b).citation().span().start, 40);
    }

    #[test]
    fn comparison_identity_uses_corrected_reporter_and_kind() {
        let raw = case_citation("1", "U. S.", "1").with_edition_guess("U.S.");
        let other = case_citation("1", "U. S.", "1");
        assert_ne!(ComparisonResource::new(&raw), ComparisonResource::new(&other));

        let journal = journal_citation("1", "U.S.", "1");
        let case = case_citation("1", "U.S.", "1");
        assert_ne!(ComparisonResource::new(&journal), ComparisonResource::new(&case));
    }
}
