//! locml-core: OpenOffice locale to LDML conversion library
//!
//! This library provides:
//! - An ordered tree model and parser for locale documents
//! - Position-based structural queries with fixed tie-breaking
//! - Cross-document reference resolution with cycle detection
//! - Calendar-type lookup with default-type fallback
//! - Locale record assembly, LDML generation and record comparison

pub mod compare;
pub mod diag;
pub mod mapping;
pub mod names;
pub mod query;
pub mod record;
pub mod resolve;
pub mod tree;
pub mod writer;

pub use compare::{compare_records, render_text, FieldDiff};
pub use diag::Diagnostics;
pub use query::{attr_value, AncestorPattern, AttrList, TreeQuery};
pub use record::{read_locale, CalendarNames, Currency, LocaleRecord, ReadOptions};
pub use resolve::{
    resolve_category, resolve_category_document, resolve_typed, DocumentLoader, FsLoader, RefSpec,
    Resolution, ResolveError, ResolveOptions, TypedResolution, DEFAULT_CALENDAR,
};
pub use tree::{load_document, parse_document, Element, LocaleDoc, ParseError};
pub use writer::{write_ldml, WriteError};
