//! Per-variant resolution strategies and the configuration that holds them.
//!
//! Each default resolver is a plain function over the slice of running state
//! it needs, so it can be tested on its own or wrapped by a custom resolver.
//!
//! | variant    | reads           | default                                   |
//! |------------|-----------------|-------------------------------------------|
//! | full       | nothing         | [`resolve_full_citation`]                 |
//! | short form | [`FullTable`]   | [`resolve_short_form_citation`]           |
//! | supra      | [`FullTable`]   | [`resolve_supra_citation`]                |
//! | id         | last resolution | [`resolve_id_citation`]                   |

use std::collections::HashSet;
use std::convert::Infallible;

use crate::antecedent::filter_by_matching_antecedent;
use crate::citation::{FullCitation, IdCitation, ShortFormCitation, SupraCitation};
use crate::resource::{ComparisonResource, Resource, ResourceIdentity};

/// Every full citation seen so far in a pass, with the resource it resolved to,
/// in document order.
#[derive(Debug, Clone)]
pub struct FullTable<'a, R> {
    entries: Vec<(&'a FullCitation, R)>,
}

impl<'a, R> FullTable<'a, R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, citation: &'a FullCitation, resource: R) {
        self.entries.push((citation, resource));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a FullCitation, &R)> + '_ {
        self.entries.iter().map(|(citation, resource)| (*citation, resource))
    }

    /// Resource recorded for this exact citation (by reference), if any.
    pub fn resource_of(&self, citation: &FullCitation) -> Option<&R> {
        self.entries
            .iter()
            .find(|(c, _)| std::ptr::eq(*c, citation))
            .map(|(_, resource)| resource)
    }
}

impl<'a, R> Default for FullTable<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a full citation to a fresh resource wrapping it.
pub fn resolve_full_citation(citation: &FullCitation) -> Resource<'_> {
    Resource::new(citation)
}

/// Resolve a full citation to a resource shared by every semantically
/// equivalent full citation.
pub fn resolve_full_by_comparison(citation: &FullCitation) -> ComparisonResource<'_> {
    ComparisonResource::new(citation)
}

/// Match a short form citation by reporter and volume against earlier full
/// case citations. If several distinct resources share the reporter and
/// volume, fall back to the antecedent guess.
pub fn resolve_short_form_citation<'a, R: ResourceIdentity>(
    citation: &ShortFormCitation,
    full_table: &FullTable<'a, R>,
) -> Option<R> {
    let reporter = citation.corrected_reporter();
    let volume = citation.base.group("volume");

    let candidates: Vec<(&'a FullCitation, &R)> = full_table
        .iter()
        .filter(|(full, _)| {
            full.is_case()
                && full.corrected_reporter() == reporter
                && full.base.group("volume") == volume
        })
        .collect();

    let distinct: HashSet<&R> = candidates.iter().map(|(_, resource)| *resource).collect();
    if distinct.len() == 1 {
        return Some(candidates[0].1.clone());
    }

    match citation.metadata().antecedent_guess.as_deref() {
        Some(guess) if !guess.is_empty() => filter_by_matching_antecedent(candidates, guess),
        _ => None,
    }
}

/// Match a supra citation's antecedent guess against every earlier full
/// citation. Without a guess there is nothing to match on.
pub fn resolve_supra_citation<'a, R: ResourceIdentity>(
    citation: &SupraCitation,
    full_table: &FullTable<'a, R>,
) -> Option<R> {
    match citation.metadata().antecedent_guess.as_deref() {
        Some(guess) if !guess.is_empty() => filter_by_matching_antecedent(full_table.iter(), guess),
        _ => None,
    }
}

/// An id citation refers to whatever the previous mention resolved to.
pub fn resolve_id_citation<R: ResourceIdentity>(
    _citation: &IdCitation,
    last_resolution: Option<&R>,
) -> Option<R> {
    last_resolution.cloned()
}

pub type FullResolverFn<'a, R, E> = Box<dyn Fn(&'a FullCitation) -> Result<R, E> + 'a>;
pub type ShortFormResolverFn<'a, R, E> =
    Box<dyn Fn(&'a ShortFormCitation, &FullTable<'a, R>) -> Result<Option<R>, E> + 'a>;
pub type SupraResolverFn<'a, R, E> =
    Box<dyn Fn(&'a SupraCitation, &FullTable<'a, R>) -> Result<Option<R>, E> + 'a>;
pub type IdResolverFn<'a, R, E> =
    Box<dyn Fn(&'a IdCitation, Option<&R>) -> Result<Option<R>, E> + 'a>;

/// The four resolver slots used by the engine.
///
/// Every slot starts with its default heuristic; replacing one leaves the
/// others untouched. `E` is the error type custom resolvers may return; the
/// defaults never fail.
///
/// ```
/// use layered_cite::{resolve_full_by_comparison, ComparisonResource, ResolverConfig};
///
/// let config: ResolverConfig<'_, ComparisonResource<'_>> =
///     ResolverConfig::new(|citation| Ok(resolve_full_by_comparison(citation)));
/// ```
pub struct ResolverConfig<'a, R, E = Infallible> {
    pub full: FullResolverFn<'a, R, E>,
    pub short_form: ShortFormResolverFn<'a, R, E>,
    pub supra: SupraResolverFn<'a, R, E>,
    pub id: IdResolverFn<'a, R, E>,
}

fn default_short_form<'a, R: ResourceIdentity, E>(
    citation: &'a ShortFormCitation,
    full_table: &FullTable<'a, R>,
) -> Result<Option<R>, E> {
    Ok(resolve_short_form_citation(citation, full_table))
}

fn default_supra<'a, R: ResourceIdentity, E>(
    citation: &'a SupraCitation,
    full_table: &FullTable<'a, R>,
) -> Result<Option<R>, E> {
    Ok(resolve_supra_citation(citation, full_table))
}

fn default_id<'a, R: ResourceIdentity, E>(
    citation: &'a IdCitation,
    last_resolution: Option<&R>,
) -> Result<Option<R>, E> {
    Ok(resolve_id_citation(citation, last_resolution))
}

impl<'a, R: ResourceIdentity + 'a, E: 'a> ResolverConfig<'a, R, E> {
    /// Configuration with a custom full resolver and default heuristics for
    /// the dependent forms.
    pub fn new<F>(full: F) -> Self
    where
        F: Fn(&'a FullCitation) -> Result<R, E> + 'a,
    {
        Self {
            full: Box::new(full),
            short_form: Box::new(default_short_form::<R, E>),
            supra: Box::new(default_supra::<R, E>),
            id: Box::new(default_id::<R, E>),
        }
    }

    pub fn with_full_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&'a FullCitation) -> Result<R, E> + 'a,
    {
        self.full = Box::new(resolver);
        self
    }

    pub fn with_short_form_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&'a ShortFormCitation, &FullTable<'a, R>) -> Result<Option<R>, E> + 'a,
    {
        self.short_form = Box::new(resolver);
        self
    }

    pub fn with_supra_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&'a SupraCitation, &FullTable<'a, R>) -> Result<Option<R>, E> + 'a,
    {
        self.supra = Box::new(resolver);
        self
    }

    pub fn with_id_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&'a IdCitation, Option<&R>) -> Result<Option<R>, E> + 'a,
    {
        self.id = Box::new(resolver);
        self
    }
}

impl<'a> Default for ResolverConfig<'a, Resource<'a>> {
    fn default() -> Self {
        Self::new(|citation| Ok(resolve_full_citation(citation)))
    }
}

impl<'a> ResolverConfig<'a, ComparisonResource<'a>> {
    /// Default heuristics with semantically equivalent full citations
    /// collapsed into one resource.
    pub fn comparison() -> Self {
        Self::new(|citation| Ok(resolve_full_by_comparison(citation)))
    }
}
