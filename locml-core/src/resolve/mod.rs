//! Cross-document reference resolution
//!
//! A category of a locale document may, instead of carrying concrete data,
//! point at the equivalent category of another locale's document via a
//! `ref` attribute. The referenced document may itself reference a third
//! one, so resolution follows a chain until a document with concrete data
//! is found. The source schema never guarded against reference cycles; this
//! engine tracks the visited targets and aborts the offending category with
//! an error instead of looping.
//!
//! Resolution is a pure recursion over the trees involved. There is no
//! shared "current document" pointer being swapped and restored, so
//! categories can be resolved concurrently; every loaded document is
//! dropped when the resolution call returns.

pub mod typed;

use std::collections::{BTreeMap, HashSet};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::diag::Diagnostics;
use crate::names::oo;
use crate::tree::{load_document, Element, LocaleDoc, ParseError};

pub use typed::{resolve_entry_document, resolve_typed, TypedResolution, DEFAULT_CALENDAR};

/// `language[_TERRITORY]` as used in locale identifiers and references.
static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(_[A-Z]{2})?$").expect("locale regex"));

/// Sub-type tokens that may appear bare in a reference, meaning "same
/// locale, this calendar type". Source documents spell the Republic of
/// China calendar in upper case (`unoid="ROC"`), so both spellings are
/// accepted here.
pub const CALENDAR_TYPES: &[&str] = &[
    "gregorian", "hijri", "islamic", "jewish", "hebrew", "buddhist", "gengou", "japanese",
    "hanja", "korean", "roc", "ROC", "chinese",
];

/// Errors aborting the resolution of one category. None of these abort a
/// batch run; the caller skips the category and continues.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("reference cycle for {category}: {}", .chain.join(" -> "))]
    Cycle { category: String, chain: Vec<String> },
    #[error("failed to load referenced document {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("reference chain for {category} exceeded {limit} hops")]
    TooManyHops { category: String, limit: usize },
    #[error("resolution of {category} cancelled: deadline exceeded")]
    DeadlineExceeded { category: String },
}

/// A parsed reference string: target locale plus optional sub-type.
///
/// Grammar: `LOCALE["_"SUBTYPE]`. A bare sub-type (a known calendar-type
/// token with no locale component) means "same locale, different type" and
/// is disambiguated with the referencing document's own locale identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    pub locale: String,
    pub subtype: Option<String>,
}

impl RefSpec {
    /// Parse a raw `ref` attribute value. Returns `None` for strings that
    /// do not fit the grammar; the caller treats that as "no reference".
    pub fn parse(current_locale: &str, raw: &str) -> Option<RefSpec> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if CALENDAR_TYPES.contains(&raw) {
            return Some(RefSpec {
                locale: current_locale.to_string(),
                subtype: Some(raw.to_string()),
            });
        }
        if LOCALE_RE.is_match(raw) {
            return Some(RefSpec {
                locale: raw.to_string(),
                subtype: None,
            });
        }
        let mut underscores = raw.match_indices('_');
        let (first, _) = underscores.next()?;
        match underscores.next() {
            // locale_TERRITORY_subtype: split at the second underscore,
            // the remainder is an opaque sub-type token.
            Some((second, _)) => {
                let locale = &raw[..second];
                let subtype = &raw[second + 1..];
                if LOCALE_RE.is_match(locale) && !subtype.is_empty() {
                    Some(RefSpec {
                        locale: locale.to_string(),
                        subtype: Some(subtype.to_string()),
                    })
                } else {
                    None
                }
            }
            // language_subtype: only well-formed when the second component
            // is a known calendar type (otherwise it would have matched the
            // locale pattern above).
            None => {
                let lang = &raw[..first];
                let subtype = &raw[first + 1..];
                if LOCALE_RE.is_match(lang) && CALENDAR_TYPES.contains(&subtype) {
                    Some(RefSpec {
                        locale: lang.to_string(),
                        subtype: Some(subtype.to_string()),
                    })
                } else {
                    None
                }
            }
        }
    }
}

/// Turns a locale identifier from a reference into a loadable document,
/// assuming sibling placement next to the referencing file. Implemented by
/// [`FsLoader`] for production and by in-memory fakes in tests.
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<LocaleDoc, ParseError>;
}

/// Loads referenced documents from the filesystem.
#[derive(Debug, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<LocaleDoc, ParseError> {
        load_document(path)
    }
}

/// Knobs for one resolution call. Reference chains are bounded by the
/// cycle guard but otherwise unbounded by the current document set, so a
/// hop limit and an optional deadline cap runaway inputs.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub max_hops: usize,
    pub deadline: Option<Instant>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            max_hops: 16,
            deadline: None,
        }
    }
}

/// The document a category resolution ended on: either the starting
/// document itself or one loaded while following references.
pub enum ResolvedDoc<'a> {
    Local(&'a LocaleDoc),
    Loaded(LocaleDoc),
}

impl Deref for ResolvedDoc<'_> {
    type Target = LocaleDoc;

    fn deref(&self) -> &LocaleDoc {
        match self {
            ResolvedDoc::Local(doc) => doc,
            ResolvedDoc::Loaded(doc) => doc,
        }
    }
}

impl ResolvedDoc<'_> {
    pub fn is_local(&self) -> bool {
        matches!(self, ResolvedDoc::Local(_))
    }
}

/// Outcome of following a category's reference chain to its end.
pub struct ResolvedCategory<'a> {
    pub doc: ResolvedDoc<'a>,
    /// Locale identifiers visited, starting document first.
    pub chain: Vec<String>,
    /// Sub-type scope picked up from reference strings along the chain.
    pub subtype: Option<String>,
}

impl ResolvedCategory<'_> {
    /// Locale identifier of the document that ultimately supplied the data.
    pub fn resolved_from(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or_default()
    }
}

/// Resolved values of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub values: BTreeMap<String, String>,
    pub resolved_from: String,
    pub chain: Vec<String>,
}

// The starting document's lifetime flows into the returned category; the
// query inputs (category name, options) only need to live for the walk.
struct ChainWalker<'a, 'b> {
    category: &'b str,
    start: &'a LocaleDoc,
    current: Option<LocaleDoc>,
    chain: Vec<String>,
    visited: HashSet<(String, Option<String>)>,
    subtype: Option<String>,
    hops: usize,
    opts: &'b ResolveOptions,
}

impl<'a, 'b> ChainWalker<'a, 'b> {
    fn new(start: &'a LocaleDoc, category: &'b str, opts: &'b ResolveOptions) -> Self {
        let mut visited = HashSet::new();
        visited.insert((start.locale.clone(), None));
        ChainWalker {
            category,
            start,
            current: None,
            chain: vec![start.locale.clone()],
            visited,
            subtype: None,
            hops: 0,
            opts,
        }
    }

    fn doc(&self) -> &LocaleDoc {
        self.current.as_ref().unwrap_or(self.start)
    }

    /// Follow one parsed reference. A reference naming the document we are
    /// already in is pure sub-type scoping: no load, and the chain ends
    /// there (re-reading the same attribute would never terminate).
    ///
    /// Returns `false` when the walk is complete.
    fn step(&mut self, spec: RefSpec, loader: &dyn DocumentLoader) -> Result<bool, ResolveError> {
        if let Some(deadline) = self.opts.deadline {
            if Instant::now() >= deadline {
                return Err(ResolveError::DeadlineExceeded {
                    category: self.category.to_string(),
                });
            }
        }
        if spec.locale == self.doc().locale {
            if spec.subtype.is_some() {
                self.subtype = spec.subtype;
            }
            return Ok(false);
        }
        self.hops += 1;
        if self.hops > self.opts.max_hops {
            return Err(ResolveError::TooManyHops {
                category: self.category.to_string(),
                limit: self.opts.max_hops,
            });
        }
        if !self
            .visited
            .insert((spec.locale.clone(), spec.subtype.clone()))
        {
            let mut chain = self.chain.clone();
            chain.push(spec.locale.clone());
            return Err(ResolveError::Cycle {
                category: self.category.to_string(),
                chain,
            });
        }
        let dir = self.doc().path.parent().unwrap_or_else(|| Path::new("."));
        let path = dir.join(format!("{}.xml", spec.locale));
        let next = loader
            .load(&path)
            .map_err(|source| ResolveError::Load { path, source })?;
        self.chain.push(next.locale.clone());
        if spec.subtype.is_some() {
            self.subtype = spec.subtype;
        }
        self.current = Some(next);
        Ok(true)
    }

    /// Follow a chain of references, reading the next raw reference string
    /// with `next_ref` (which sees the current document and the sub-type
    /// scope accumulated so far). Unparseable references end the walk.
    fn follow_refs_with<F>(&mut self, loader: &dyn DocumentLoader, next_ref: F) -> Result<(), ResolveError>
    where
        F: Fn(&LocaleDoc, Option<&str>) -> Option<String>,
    {
        loop {
            let Some(raw) = next_ref(self.doc(), self.subtype.as_deref()) else {
                return Ok(());
            };
            let Some(spec) = RefSpec::parse(&self.doc().locale, &raw) else {
                debug!(
                    category = self.category,
                    reference = raw.as_str(),
                    "unparseable reference, using local data"
                );
                return Ok(());
            };
            debug!(
                category = self.category,
                from = self.doc().locale.as_str(),
                to = spec.locale.as_str(),
                subtype = spec.subtype.as_deref(),
                "following reference"
            );
            if !self.step(spec, loader)? {
                return Ok(());
            }
        }
    }

    /// Follow the chain of `ref` attributes on the category element itself.
    fn follow_category_refs(&mut self, loader: &dyn DocumentLoader) -> Result<(), ResolveError> {
        let category = self.category;
        self.follow_refs_with(loader, |doc, _| {
            doc.category(category)
                .and_then(|el| el.attr(oo::REF))
                .map(str::to_string)
        })
    }

    fn finish(self) -> ResolvedCategory<'a> {
        ResolvedCategory {
            doc: match self.current {
                Some(doc) => ResolvedDoc::Loaded(doc),
                None => ResolvedDoc::Local(self.start),
            },
            chain: self.chain,
            subtype: self.subtype,
        }
    }
}

/// Follow a category's reference chain and hand back the document that
/// carries the concrete data, without extracting values. The mapping layer
/// uses this to run its own structural queries against the resolved tree.
pub fn resolve_category_document<'a>(
    doc: &'a LocaleDoc,
    category: &str,
    loader: &dyn DocumentLoader,
    opts: &ResolveOptions,
) -> Result<ResolvedCategory<'a>, ResolveError> {
    let mut walker = ChainWalker::new(doc, category, opts);
    walker.follow_category_refs(loader)?;
    Ok(walker.finish())
}

/// Resolve one category to concrete key/value data.
///
/// Local concrete values always take precedence over values obtained by
/// following the reference; only missing keys are filled from the
/// referenced document (partial override).
pub fn resolve_category(
    doc: &LocaleDoc,
    category: &str,
    loader: &dyn DocumentLoader,
    opts: &ResolveOptions,
    _diag: &Diagnostics,
) -> Result<Resolution, ResolveError> {
    let resolved = resolve_category_document(doc, category, loader, opts)?;
    let mut values = resolved
        .doc
        .category(category)
        .map(flat_values)
        .unwrap_or_default();
    if !resolved.doc.is_local() {
        let local = doc.category(category).map(flat_values).unwrap_or_default();
        for (key, value) in local {
            values.insert(key, value);
        }
    }
    Ok(Resolution {
        resolved_from: resolved.resolved_from().to_string(),
        chain: resolved.chain,
        values,
    })
}

/// Flatten a category subtree to tag -> text pairs. Repeated tags keep the
/// first occurrence, matching the positional convention of the schema.
pub fn flat_values(category: &Element) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    collect_flat(category, &mut out);
    out
}

fn collect_flat(el: &Element, out: &mut BTreeMap<String, String>) {
    for child in &el.children {
        if let Some(text) = child.text() {
            out.entry(child.tag.clone()).or_insert_with(|| text.to_string());
        }
        collect_flat(child, out);
    }
}
