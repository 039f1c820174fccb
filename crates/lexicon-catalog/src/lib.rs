//! # lexicon-catalog
//!
//! Gettext-style message catalogs keyed by numeric ids (`msgctxt "#32001"`),
//! as shipped in `resources/language/resource.language.<tag>/strings.po`.
//!
//! Catalogs are parsed once and are immutable afterwards, so a loaded
//! [`Catalog`] or [`Registry`] can be shared between threads freely.

pub mod catalog;
pub mod coverage;
pub mod fold;
pub mod plural;
pub mod po;
pub mod registry;
pub mod render;
pub mod writer;

pub use catalog::{normalize_locale, Catalog, CatalogEntry, Header, MessageId, PluralForms};
pub use coverage::LocaleCoverage;
pub use fold::ascii_fold;
pub use plural::PluralRule;
pub use registry::{LoadFailure, Registry};
pub use render::{placeholder_count, render};
