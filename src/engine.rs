//! The single left-to-right resolution pass.
//!
//! The pass threads two pieces of state forward:
//!
//! - the [`FullTable`] of every full citation seen so far, read by the short
//!   form and supra resolvers;
//! - the last resolution, read by the id resolver. It is overwritten after
//!   every mention, including failures, so an `id.` following an unresolved
//!   mention (a statute, say) does not resolve either.
//!
//! Mentions must arrive in document order. Nothing is checked: a dependent
//! form placed before its antecedent simply finds nothing to match.

use std::convert::Infallible;

use crate::citation::Citation;
use crate::resolution::Resolutions;
use crate::resolvers::{FullTable, ResolverConfig};
use crate::resource::{Resource, ResourceIdentity};

/// Resolve mentions with the default heuristics and reference identity.
///
/// ```
/// use layered_cite::factories::{case_citation, id_citation};
/// use layered_cite::{resolve_citations, Citation};
///
/// let citations: Vec<Citation> = vec![
///     case_citation("1", "U.S.", "1")
///         .with_plaintiff("Lissner")
///         .with_defendant("Test")
///         .into(),
///     id_citation().into(),
/// ];
/// let resolutions = resolve_citations(&citations);
/// assert_eq!(resolutions.len(), 1);
/// assert_eq!(resolutions.resolved_count(), 2);
/// ```
pub fn resolve_citations(citations: &[Citation]) -> Resolutions<'_, Resource<'_>> {
    resolve_citations_infallible(citations, &ResolverConfig::default())
}

/// Resolve mentions with a caller-supplied configuration.
///
/// The first error returned by a resolver aborts the pass and is returned
/// as is; no partial result is kept.
pub fn resolve_citations_with<'a, R, E>(
    citations: &'a [Citation],
    config: &ResolverConfig<'a, R, E>,
) -> Result<Resolutions<'a, R>, E>
where
    R: ResourceIdentity,
{
    let mut resolutions = Resolutions::new();
    let mut full_table = FullTable::new();
    let mut last_resolution: Option<R> = None;

    for (position, citation) in citations.iter().enumerate() {
        let resolution = match citation {
            Citation::Full(full) => {
                let resource = (config.full)(full)?;
                full_table.insert(full, resource.clone());
                Some(resource)
            }
            Citation::ShortForm(short) => (config.short_form)(short, &full_table)?,
            Citation::Supra(supra) => (config.supra)(supra, &full_table)?,
            Citation::Id(id) => (config.id)(id, last_resolution.as_ref())?,
            Citation::Other(_) => None,
        };

        tracing::trace!(
            position,
            variant = citation.variant_name(),
            text = citation.matched_text(),
            resolved = resolution.is_some(),
            "resolve citation"
        );

        if let Some(resource) = &resolution {
            resolutions.push(resource.clone(), position, citation);
        }
        last_resolution = resolution;
    }

    tracing::debug!(
        citations = citations.len(),
        resolved = resolutions.resolved_count(),
        resources = resolutions.len(),
        full_citations = full_table.len(),
        "citation resolution pass complete"
    );

    Ok(resolutions)
}

/// Infallible configurations only; see [`resolve_citations_with`].
pub fn resolve_citations_infallible<'a, R: ResourceIdentity>(
    citations: &'a [Citation],
    config: &ResolverConfig<'a, R, Infallible>,
) -> Resolutions<'a, R> {
    match resolve_citations_with(citations, config) {
        Ok(resolutions) => resolutions,
        Err(never) => match never {},
    }
}
