//! # tapback-parser
//!
//! Turns reaction-shaped message bodies such as `Liked "Dinner at 8?"` into
//! [`ParsedReaction`](tapback_core::ParsedReaction) values.
//!
//! ## Overview
//!
//! - [`strings`]: localized pattern templates, keyed by [`StringKey`]
//! - [`catalog`]: builds the ordered, locale-merged [`PatternCatalog`]
//! - [`parser`]: scans a body against the catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tapback_parser::{PatternCatalog, ReactionParser};
//!
//! let catalog = PatternCatalog::from_bundled()?;
//! let parser = ReactionParser::new(catalog.into());
//! let reaction = parser.parse("Liked \"Dinner at 8?\"");
//! ```

pub mod catalog;
pub mod parser;
pub mod strings;

pub use catalog::{
    build_catalog, build_catalog_for, global, install_global, CatalogError, Extraction,
    PatternCatalog, PatternRule,
};
pub use parser::{ReactionMatch, ReactionParser};
pub use strings::{
    BundledStrings, JsonStringsProvider, LocaleDiscovery, StringKey, StringsError, StringsProvider,
};
