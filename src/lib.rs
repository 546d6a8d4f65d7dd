#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Legal citation resolution for layered-nlp.
//!
//! Given the citation mentions an extractor found in a document, in document
//! order, this crate groups them by the authority ("resource") each one
//! refers to:
//!
//! ```text
//! Foo v. Bar, 1 U.S. 1 (1982). Id., at 3. See 2 F.3d 9. Foo, supra, at 4.
//! ╰────── #1 ─────────╯        ╰─ #1 ─╯      ╰ #2 ─╯    ╰──── #1 ────╯
//! ```
//!
//! ## Mentions
//!
//! - [`Citation::Full`] - self-contained case, law or journal citation
//! - [`Citation::ShortForm`] - `1 U.S., at 5`, resolved by reporter and volume
//! - [`Citation::Supra`] - `Foo, supra`, resolved by antecedent guess
//! - [`Citation::Id`] - `Id.`, resolved to the previous mention's resource
//! - [`Citation::Other`] - statutes and other non-opinion text; never resolves
//!
//! ## Resolution
//!
//! - [`resolve_citations`] - default heuristics, one resource per full citation
//! - [`resolve_citations_with`] - custom [`ResolverConfig`], fallible resolvers
//! - [`ComparisonResource`] - collapses equivalent full citations into one resource
//!
//! Ambiguous matches are never guessed: a short form or supra citation whose
//! candidates point at more than one resource is left unresolved.

mod antecedent;
mod citation;
mod engine;
mod resolution;
mod resolvers;
mod resource;

pub mod factories;

pub use antecedent::{filter_by_matching_antecedent, strip_punct};
pub use citation::{
    Citation, CitationBase, FullCitation, FullKind, Groups, IdCitation, Metadata,
    NonopinionCitation, ShortFormCitation, Span, SupraCitation,
};
pub use engine::{resolve_citations, resolve_citations_infallible, resolve_citations_with};
pub use resolution::{CitationDump, Cluster, ClusterDump, Resolutions};
pub use resolvers::{
    resolve_full_by_comparison, resolve_full_citation, resolve_id_citation,
    resolve_short_form_citation, resolve_supra_citation, FullResolverFn, FullTable,
    IdResolverFn, ResolverConfig, ShortFormResolverFn, SupraResolverFn,
};
pub use resource::{ComparisonResource, Resource, ResourceIdentity};
