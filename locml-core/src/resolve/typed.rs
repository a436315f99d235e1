//! Type-scoped categories and default-type fallback
//!
//! Calendar data is keyed twice: by locale (possibly through references)
//! and by calendar type. References may be scoped to a type
//! (`en_US_gregorian`), and a type with no data of its own falls back to
//! the fixed default calendar. The fallback is a content substitution, not
//! a reference: the category is not marked as aliased, and the output
//! shape does not reveal whether data was exact or substituted.

use std::collections::BTreeMap;

use crate::diag::Diagnostics;
use crate::names::oo;
use crate::tree::{Element, LocaleDoc};

use super::{
    flat_values, ChainWalker, DocumentLoader, ResolveError, ResolveOptions, ResolvedCategory,
};

/// The sub-type substituted when a requested type has no data.
pub const DEFAULT_CALENDAR: &str = "gregorian";

/// Resolved values of one sub-type of a typed category.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedResolution {
    pub values: BTreeMap<String, String>,
    pub resolved_from: String,
    pub chain: Vec<String>,
    /// `Some(default)` when the requested type had no entry and the default
    /// type's data was substituted. Diagnostic only; consumers see the same
    /// value shape either way.
    pub fallback_to: Option<String>,
}

/// First entry element under `category` named `entry_tag` whose `key_attr`
/// equals `key`, in document order.
fn find_entry<'e>(
    category: &'e Element,
    entry_tag: &str,
    key_attr: &str,
    key: &str,
) -> Option<&'e Element> {
    if category.tag == entry_tag && category.attr(key_attr) == Some(key) {
        return Some(category);
    }
    for child in &category.children {
        if let Some(found) = find_entry(child, entry_tag, key_attr, key) {
            return Some(found);
        }
    }
    None
}

/// Follow a typed category's references to the document carrying the
/// concrete data for one sub-type, without extracting values.
///
/// Category-level references come first, then references carried by the
/// typed entry for the current sub-type scope. When `ref_holder` is given,
/// the entry-level reference is read from the entry's child of that name
/// instead of the entry element itself (`Calendar > DaysOfWeek[ref]`).
/// Returns the resolved document and the effective sub-type after any
/// type-scoped redirections along the chain.
#[allow(clippy::too_many_arguments)]
pub fn resolve_entry_document<'a>(
    doc: &'a LocaleDoc,
    category: &str,
    entry_tag: &str,
    key_attr: &str,
    requested: &str,
    ref_holder: Option<&str>,
    loader: &dyn DocumentLoader,
    opts: &ResolveOptions,
) -> Result<(ResolvedCategory<'a>, String), ResolveError> {
    let mut walker = ChainWalker::new(doc, category, opts);
    walker.follow_category_refs(loader)?;
    if walker.subtype.is_none() {
        walker.subtype = Some(requested.to_string());
    }

    let category = category.to_string();
    let entry_tag = entry_tag.to_string();
    let key_attr = key_attr.to_string();
    let ref_holder = ref_holder.map(str::to_string);
    walker.follow_refs_with(loader, |d, subtype| {
        let subtype = subtype?;
        let entry = d
            .category(&category)
            .and_then(|cat| find_entry(cat, &entry_tag, &key_attr, subtype))?;
        let holder = match &ref_holder {
            Some(tag) => entry.child(tag)?,
            None => entry,
        };
        holder.attr(oo::REF).map(str::to_string)
    })?;

    let effective = walker
        .subtype
        .clone()
        .unwrap_or_else(|| requested.to_string());
    Ok((walker.finish(), effective))
}

/// Resolve one sub-type of a typed category.
///
/// Follows category-level references first, then references carried by the
/// typed entry itself (`<Calendar unoid="hebrew" ref="en_US_gregorian">`).
/// A reference's explicit sub-type redirects the lookup; a bare locale
/// reference keeps the current sub-type scope. When the effective type has
/// no entry in the final document, the default type's entry is substituted
/// and the result is tagged as a fallback.
///
/// Each sub-category of a document is resolved independently: no state is
/// carried from one call to the next.
#[allow(clippy::too_many_arguments)]
pub fn resolve_typed(
    doc: &LocaleDoc,
    category: &str,
    entry_tag: &str,
    key_attr: &str,
    requested: &str,
    loader: &dyn DocumentLoader,
    opts: &ResolveOptions,
    diag: &Diagnostics,
) -> Result<TypedResolution, ResolveError> {
    let (resolved, effective) = resolve_entry_document(
        doc, category, entry_tag, key_attr, requested, None, loader, opts,
    )?;

    let category_el = resolved.doc.category(category);
    let exact = category_el.and_then(|cat| find_entry(cat, entry_tag, key_attr, &effective));
    let (entry, fallback_to) = match exact {
        Some(entry) => (Some(entry), None),
        None => {
            let default =
                category_el.and_then(|cat| find_entry(cat, entry_tag, key_attr, DEFAULT_CALENDAR));
            if default.is_some() && effective != DEFAULT_CALENDAR {
                diag.type_fallback(category, &effective, DEFAULT_CALENDAR);
                (default, Some(DEFAULT_CALENDAR.to_string()))
            } else {
                (default, None)
            }
        }
    };
    let mut values = entry.map(flat_values).unwrap_or_default();

    // Partial override: entries present in the starting document win.
    if !resolved.doc.is_local() {
        let local = doc
            .category(category)
            .and_then(|cat| find_entry(cat, entry_tag, key_attr, &effective))
            .map(flat_values)
            .unwrap_or_default();
        for (key, value) in local {
            values.insert(key, value);
        }
    }

    Ok(TypedResolution {
        values,
        resolved_from: resolved.resolved_from().to_string(),
        chain: resolved.chain,
        fallback_to,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MapLoader;
    use super::*;

    fn opts() -> ResolveOptions {
        ResolveOptions::default()
    }

    const TH_TH: &str = r#"<Locale>
        <LC_CALENDAR>
          <Calendar unoid="gregorian">
            <MinimalDaysInFirstWeek>1</MinimalDaysInFirstWeek>
          </Calendar>
          <Calendar unoid="buddhist">
            <MinimalDaysInFirstWeek>4</MinimalDaysInFirstWeek>
          </Calendar>
        </LC_CALENDAR>
      </Locale>"#;

    #[test]
    fn exact_type_is_returned_without_fallback() {
        let loader = MapLoader::new(&[("th_TH", TH_TH)]);
        let doc = loader.doc("th_TH");
        let diag = Diagnostics::new();
        let res = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "buddhist", &loader, &opts(), &diag,
        )
        .unwrap();
        assert_eq!(res.values["MinimalDaysInFirstWeek"], "4");
        assert!(res.fallback_to.is_none());
        assert_eq!(diag.type_fallback_count(), 0);
    }

    #[test]
    fn missing_type_falls_back_to_default_calendar() {
        let loader = MapLoader::new(&[("th_TH", TH_TH)]);
        let doc = loader.doc("th_TH");
        let diag = Diagnostics::new();
        let res = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "hebrew", &loader, &opts(), &diag,
        )
        .unwrap();
        assert_eq!(res.values["MinimalDaysInFirstWeek"], "1");
        assert_eq!(res.fallback_to.as_deref(), Some(DEFAULT_CALENDAR));
        assert_eq!(diag.type_fallback_count(), 1);
    }

    #[test]
    fn fallback_decisions_are_independent_per_call() {
        let loader = MapLoader::new(&[("th_TH", TH_TH)]);
        let doc = loader.doc("th_TH");
        let diag = Diagnostics::new();
        let fell_back = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "hebrew", &loader, &opts(), &diag,
        )
        .unwrap();
        let exact = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "buddhist", &loader, &opts(), &diag,
        )
        .unwrap();
        assert!(fell_back.fallback_to.is_some());
        assert!(exact.fallback_to.is_none());
        assert_eq!(exact.values["MinimalDaysInFirstWeek"], "4");
    }

    #[test]
    fn entry_reference_with_subtype_redirects_lookup() {
        let loader = MapLoader::new(&[
            (
                "de_DE",
                r#"<Locale><LC_CALENDAR>
                     <Calendar unoid="hebrew" ref="en_US_gregorian"/>
                   </LC_CALENDAR></Locale>"#,
            ),
            (
                "en_US",
                r#"<Locale><LC_CALENDAR>
                     <Calendar unoid="gregorian">
                       <MinimalDaysInFirstWeek>1</MinimalDaysInFirstWeek>
                     </Calendar>
                   </LC_CALENDAR></Locale>"#,
            ),
        ]);
        let doc = loader.doc("de_DE");
        let diag = Diagnostics::new();
        let res = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "hebrew", &loader, &opts(), &diag,
        )
        .unwrap();
        assert_eq!(res.values["MinimalDaysInFirstWeek"], "1");
        assert_eq!(res.chain, vec!["de_DE", "en_US"]);
        assert_eq!(res.resolved_from, "en_US");
    }

    #[test]
    fn category_reference_then_typed_extraction() {
        let loader = MapLoader::new(&[
            ("de_AT", r#"<Locale><LC_CALENDAR ref="de_DE"/></Locale>"#),
            (
                "de_DE",
                r#"<Locale><LC_CALENDAR>
                     <Calendar unoid="gregorian">
                       <MinimalDaysInFirstWeek>4</MinimalDaysInFirstWeek>
                     </Calendar>
                   </LC_CALENDAR></Locale>"#,
            ),
        ]);
        let doc = loader.doc("de_AT");
        let diag = Diagnostics::new();
        let res = resolve_typed(
            &doc, "LC_CALENDAR", "Calendar", "unoid", "gregorian", &loader, &opts(), &diag,
        )
        .unwrap();
        assert_eq!(res.values["MinimalDaysInFirstWeek"], "4");
        assert_eq!(res.chain, vec!["de_AT", "de_DE"]);
    }
}
