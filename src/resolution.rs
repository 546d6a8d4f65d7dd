//! The output of a resolution pass: resources and the mentions citing them.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::citation::{Citation, Span};
use crate::resource::ResourceIdentity;

/// One resource with every mention that resolved to it, in document order.
#[derive(Debug, Clone)]
pub struct Cluster<'a, R> {
    pub resource: R,
    pub citations: Vec<&'a Citation>,
    /// Index of each mention in the input sequence
    pub positions: Vec<usize>,
}

impl<'a, R> Cluster<'a, R> {
    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    /// Input position and mention pairs.
    pub fn members(&self) -> impl Iterator<Item = (usize, &'a Citation)> + '_ {
        self.positions.iter().copied().zip(self.citations.iter().copied())
    }
}

/// Resource → mentions grouping, ordered by each resource's first mention.
///
/// Mentions that did not resolve appear in no cluster.
#[derive(Debug, Clone)]
pub struct Resolutions<'a, R> {
    clusters: Vec<Cluster<'a, R>>,
    index: HashMap<R, usize>,
    /// Cluster of each input position; `None` for unresolved mentions
    by_position: Vec<Option<usize>>,
}

impl<'a, R: ResourceIdentity> Resolutions<'a, R> {
    pub fn new() -> Self {
        Self {
            clusters: Vec::new(),
            index: HashMap::new(),
            by_position: Vec::new(),
        }
    }

    /// Record that the mention at `position` resolved to `resource`.
    pub(crate) fn push(&mut self, resource: R, position: usize, citation: &'a Citation) {
        let idx = match self.index.get(&resource) {
            Some(idx) => *idx,
            None => {
                self.clusters.push(Cluster {
                    resource: resource.clone(),
                    citations: Vec::new(),
                    positions: Vec::new(),
                });
                let idx = self.clusters.len() - 1;
                self.index.insert(resource, idx);
                idx
            }
        };
        let cluster = &mut self.clusters[idx];
        cluster.citations.push(citation);
        cluster.positions.push(position);

        if self.by_position.len() <= position {
            self.by_position.resize(position + 1, None);
        }
        self.by_position[position] = Some(idx);
    }

    /// Number of distinct resources.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Mentions resolved to this resource.
    pub fn get(&self, resource: &R) -> Option<&[&'a Citation]> {
        self.index
            .get(resource)
            .map(|idx| self.clusters[*idx].citations.as_slice())
    }

    pub fn contains(&self, resource: &R) -> bool {
        self.index.contains_key(resource)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<'a, R>> {
        self.clusters.iter()
    }

    pub fn resources(&self) -> impl Iterator<Item = &R> + '_ {
        self.clusters.iter().map(|c| &c.resource)
    }

    /// The resource the mention at `position` resolved to, if any.
    pub fn resource_at(&self, position: usize) -> Option<&R> {
        self.by_position
            .get(position)
            .copied()
            .flatten()
            .map(|idx| &self.clusters[idx].resource)
    }

    /// Total number of mentions that resolved.
    pub fn resolved_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    pub fn into_clusters(self) -> Vec<Cluster<'a, R>> {
        self.clusters
    }

    /// Serializable view of the clusters for downstream consumers.
    pub fn dump(&self) -> Vec<ClusterDump> {
        self.clusters
            .iter()
            .map(|cluster| ClusterDump {
                resource: cluster
                    .citations
                    .first()
                    .map(|c| c.corrected_citation_full())
                    .unwrap_or_default(),
                citations: cluster
                    .members()
                    .map(|(position, citation)| CitationDump {
                        position,
                        variant: citation.variant_name(),
                        matched_text: citation.matched_text().to_string(),
                        span: citation.span(),
                        data: citation.dump(),
                    })
                    .collect(),
            })
            .collect()
    }
}

impl<'a, R: ResourceIdentity> Default for Resolutions<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, 'a, R: ResourceIdentity> IntoIterator for &'r Resolutions<'a, R> {
    type Item = &'r Cluster<'a, R>;
    type IntoIter = std::slice::Iter<'r, Cluster<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One cluster in a [`Resolutions::dump`].
#[derive(Debug, Clone, Serialize)]
pub struct ClusterDump {
    /// Formatted text of the cluster's first mention
    pub resource: String,
    pub citations: Vec<CitationDump>,
}

/// One member mention in a [`ClusterDump`].
#[derive(Debug, Clone, Serialize)]
pub struct CitationDump {
    pub position: usize,
    pub variant: &'static str,
    pub matched_text: String,
    pub span: Span,
    pub data: Value,
}
