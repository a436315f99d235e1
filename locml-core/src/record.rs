//! Assembly of a full locale record from one source document
//!
//! [`read_locale`] walks every category of an OpenOffice locale document
//! and collects its data into a flat [`LocaleRecord`], following
//! cross-document references on the way when asked to. A failing category
//! never aborts the read: it is logged, recorded on the result, and the
//! remaining categories are still collected.
//!
//! Partial override applies throughout: when a category both references
//! another document and carries concrete values of its own, the local
//! values win and only missing entries are filled from the reference.

use std::collections::BTreeMap;

use tracing::error;

use crate::diag::Diagnostics;
use crate::names::oo;
use crate::query::{attr_value, AncestorPattern, AttrList, TreeQuery};
use crate::resolve::{
    flat_values, resolve_category_document, resolve_entry_document, DocumentLoader, RefSpec,
    ResolveOptions, ResolvedCategory,
};
use crate::tree::{Element, LocaleDoc};

static DAY_PATTERN: AncestorPattern<'static> = AncestorPattern {
    tags: &[Some(oo::DAY), Some(oo::DAYS_OF_WEEK), Some(oo::CALENDAR)],
    key_attr: oo::UNOID,
};
static MONTH_PATTERN: AncestorPattern<'static> = AncestorPattern {
    tags: &[Some(oo::MONTH), Some(oo::MONTHS_OF_YEAR), Some(oo::CALENDAR)],
    key_attr: oo::UNOID,
};
static ERA_PATTERN: AncestorPattern<'static> = AncestorPattern {
    tags: &[Some(oo::ERA), Some(oo::ERAS), Some(oo::CALENDAR)],
    key_attr: oo::UNOID,
};
static START_DAY_PATTERN: AncestorPattern<'static> = AncestorPattern {
    tags: &[Some(oo::START_DAY_OF_WEEK), Some(oo::CALENDAR)],
    key_attr: oo::UNOID,
};

/// Controls for one [`read_locale`] call.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// When false, references are recorded as aliases instead of being
    /// followed, and the record only carries the document's own data.
    pub resolve_refs: bool,
    pub resolve: ResolveOptions,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            resolve_refs: true,
            resolve: ResolveOptions::default(),
        }
    }
}

/// One currency entry of `LC_CURRENCY`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Currency {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub bank_symbol: Option<String>,
    pub name: Option<String>,
    pub decimal_places: Option<String>,
    pub default: bool,
    pub used_in_compatible_format_codes: bool,
    pub legacy_only: bool,
}

/// Name data of one calendar type, keyed by day/month/era identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarNames {
    pub days_abbr: BTreeMap<String, String>,
    pub days_wide: BTreeMap<String, String>,
    pub months_abbr: BTreeMap<String, String>,
    pub months_wide: BTreeMap<String, String>,
    pub eras_abbr: BTreeMap<String, String>,
    pub eras_wide: BTreeMap<String, String>,
    pub start_day_of_week: Option<String>,
    pub min_days_in_first_week: Option<String>,
    pub default: bool,
}

/// A category that could not be resolved, with the error rendered for
/// reporting. The rest of the record is still populated.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedCategory {
    pub category: String,
    pub error: String,
}

/// Everything read from one locale document.
#[derive(Debug, Clone, Default)]
pub struct LocaleRecord {
    pub locale: String,
    pub version: Option<String>,
    pub version_dtd: Option<String>,
    pub allow_update_from_cldr: Option<String>,

    pub lang_id: Option<String>,
    pub lang_name: Option<String>,
    pub country_id: Option<String>,
    pub country_name: Option<String>,
    pub platform_id: Option<String>,

    pub separators: BTreeMap<String, String>,
    pub markers: BTreeMap<String, String>,
    pub time_am: Option<String>,
    pub time_pm: Option<String>,
    pub measurement_system: Option<String>,

    pub replace_from: Option<String>,
    pub replace_to: Option<String>,
    /// `FormatElement` attribute lists keyed by `msgid`, first wins.
    pub format_elements: BTreeMap<String, AttrList>,
    pub format_codes: BTreeMap<String, String>,
    pub format_default_names: BTreeMap<String, String>,

    pub collators: Vec<AttrList>,
    pub collation_options: Vec<String>,
    pub search_options: Vec<String>,

    pub index_keys: Vec<AttrList>,
    pub index_data: BTreeMap<String, String>,
    pub unicode_scripts: Vec<String>,
    pub follow_page_words: Vec<String>,

    pub calendars: BTreeMap<String, CalendarNames>,
    pub default_calendar: Option<String>,

    pub currencies: Vec<Currency>,

    pub transliterations: Vec<String>,

    pub reserved_words: BTreeMap<String, String>,
    pub forbidden_line_begin: Option<String>,
    pub forbidden_line_end: Option<String>,

    pub numbering_levels: Vec<AttrList>,
    /// Outline numbering: one attribute list per level, per style.
    pub outline_styles: Vec<Vec<AttrList>>,

    /// Unfollowed references, keyed by category (only populated when
    /// `resolve_refs` is off).
    pub aliases: BTreeMap<String, RefSpec>,
    /// Locale chains of categories that were resolved through references.
    pub resolution_chains: BTreeMap<String, Vec<String>>,
    pub failed_categories: Vec<FailedCategory>,
}

/// One category's local element plus, when a reference was followed, the
/// resolved document carrying the referenced data. All extraction methods
/// apply partial override: local data first, referenced data fills gaps.
struct CategorySource<'a> {
    category: &'static str,
    local: Option<&'a Element>,
    resolved: Option<ResolvedCategory<'a>>,
    diag: &'a Diagnostics,
}

impl<'a> CategorySource<'a> {
    fn open(
        doc: &'a LocaleDoc,
        category: &'static str,
        loader: &dyn DocumentLoader,
        opts: &ReadOptions,
        diag: &'a Diagnostics,
        record: &mut LocaleRecord,
    ) -> Self {
        let local = doc.category(category);
        let mut resolved = None;
        if let Some(raw) = local.and_then(|el| el.attr(oo::REF)) {
            if !opts.resolve_refs {
                if let Some(spec) = RefSpec::parse(&doc.locale, raw) {
                    record.aliases.insert(category.to_string(), spec);
                }
            } else {
                match resolve_category_document(doc, category, loader, &opts.resolve) {
                    Ok(r) => {
                        if r.chain.len() > 1 {
                            record
                                .resolution_chains
                                .insert(category.to_string(), r.chain.clone());
                        }
                        if !r.doc.is_local() {
                            resolved = Some(r);
                        }
                    }
                    Err(err) => {
                        error!(category, %err, "reference resolution failed, using local data only");
                        record.failed_categories.push(FailedCategory {
                            category: category.to_string(),
                            error: err.to_string(),
                        });
                    }
                }
            }
        }
        CategorySource {
            category,
            local,
            resolved,
            diag,
        }
    }

    fn referenced(&self) -> Option<&Element> {
        self.resolved
            .as_ref()
            .and_then(|r| r.doc.category(self.category))
    }

    fn query<T>(&self, el: Option<&Element>, f: &impl Fn(&TreeQuery) -> T) -> Option<T> {
        el.map(|el| f(&TreeQuery::new(el, self.diag)))
    }

    /// Scalar lookup, local value wins.
    fn first<T>(&self, f: impl Fn(&TreeQuery) -> Option<T>) -> Option<T> {
        if let Some(value) = self.query(self.local, &f).flatten() {
            return Some(value);
        }
        self.query(self.referenced(), &f).flatten()
    }

    /// List lookup: the local list when it is non-empty, otherwise the
    /// referenced one. Positional lists do not merge element-wise.
    fn list<T>(&self, f: impl Fn(&TreeQuery) -> Vec<T>) -> Vec<T> {
        let local = self.query(self.local, &f).unwrap_or_default();
        if !local.is_empty() {
            return local;
        }
        self.query(self.referenced(), &f).unwrap_or_default()
    }

    /// Keyed lookup: referenced entries filled in first, local entries
    /// override key by key.
    fn overlay<V>(&self, f: impl Fn(&TreeQuery) -> BTreeMap<String, V>) -> BTreeMap<String, V> {
        let mut out = self.query(self.referenced(), &f).unwrap_or_default();
        out.extend(self.query(self.local, &f).unwrap_or_default());
        out
    }

    /// Two-level keyed lookup; the override applies per inner key, so a
    /// locally respelled day name does not discard the rest of the set.
    fn overlay_nested(
        &self,
        f: impl Fn(&TreeQuery) -> BTreeMap<String, BTreeMap<String, String>>,
    ) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut out = self.query(self.referenced(), &f).unwrap_or_default();
        for (key, inner) in self.query(self.local, &f).unwrap_or_default() {
            out.entry(key).or_default().extend(inner);
        }
        out
    }

    /// Attribute on the category element itself, local wins.
    fn attr(&self, name: &str) -> Option<String> {
        self.local
            .and_then(|el| el.attr(name))
            .or_else(|| self.referenced().and_then(|el| el.attr(name)))
            .map(str::to_string)
    }

    /// Flattened tag/text map of the category's first child named `tag`.
    fn child_map(&self, tag: &str) -> BTreeMap<String, String> {
        let mut out = self
            .referenced()
            .and_then(|el| el.child(tag))
            .map(flat_values)
            .unwrap_or_default();
        out.extend(
            self.local
                .and_then(|el| el.child(tag))
                .map(flat_values)
                .unwrap_or_default(),
        );
        out
    }

    /// Element-level list extraction for shapes the query layer does not
    /// cover (nested per-entry children).
    fn from_element<T>(&self, f: impl Fn(&Element) -> Vec<T>) -> Vec<T> {
        let local = self.local.map(&f).unwrap_or_default();
        if !local.is_empty() {
            return local;
        }
        self.referenced().map(&f).unwrap_or_default()
    }
}

/// Read one locale document into a [`LocaleRecord`].
pub fn read_locale(
    doc: &LocaleDoc,
    loader: &dyn DocumentLoader,
    opts: &ReadOptions,
    diag: &Diagnostics,
) -> LocaleRecord {
    let mut record = LocaleRecord {
        locale: doc.locale.clone(),
        version: doc.root.attr(oo::VERSION).map(str::to_string),
        version_dtd: doc.root.attr(oo::VERSION_DTD).map(str::to_string),
        allow_update_from_cldr: doc
            .root
            .attr(oo::ALLOW_UPDATE_FROM_CLDR)
            .map(str::to_string),
        ..LocaleRecord::default()
    };

    // LC_INFO never carries a reference.
    let info = TreeQuery::new(&doc.root, diag);
    record.lang_id = info.text_of_in(oo::LANGUAGE, oo::LANG_ID).map(str::to_string);
    record.lang_name = info
        .text_of_in(oo::LANGUAGE, oo::DEFAULT_NAME)
        .map(str::to_string);
    record.country_id = info
        .text_of_in(oo::COUNTRY, oo::COUNTRY_ID)
        .map(str::to_string);
    record.country_name = info
        .text_of_in(oo::COUNTRY, oo::DEFAULT_NAME)
        .map(str::to_string);
    record.platform_id = info
        .text_of_in(oo::PLATFORM, oo::PLATFORM_ID)
        .map(str::to_string);

    {
        let src = CategorySource::open(doc, oo::LC_CTYPE, loader, opts, diag, &mut record);
        record.separators = src.child_map(oo::SEPARATORS);
        record.markers = src.child_map(oo::MARKERS);
        record.time_am = src.first(|q| q.text_of(oo::TIME_AM).map(str::to_string));
        record.time_pm = src.first(|q| q.text_of(oo::TIME_PM).map(str::to_string));
        record.measurement_system =
            src.first(|q| q.text_of(oo::MEASUREMENT_SYSTEM).map(str::to_string));
    }

    {
        let src = CategorySource::open(doc, oo::LC_FORMAT, loader, opts, diag, &mut record);
        record.replace_from = src.attr(oo::REPLACE_FROM);
        record.replace_to = src.attr(oo::REPLACE_TO);
        record.format_elements =
            src.overlay(|q| q.attributes_grouped_by(oo::LC_FORMAT, oo::FORMAT_ELEMENT, oo::MSGID));
        record.format_codes =
            src.overlay(|q| q.text_by_parent_attr(oo::FORMAT_ELEMENT, oo::FORMAT_CODE, oo::MSGID));
        record.format_default_names =
            src.overlay(|q| q.text_by_parent_attr(oo::FORMAT_ELEMENT, oo::DEFAULT_NAME, oo::MSGID));
    }

    {
        let src = CategorySource::open(doc, oo::LC_COLLATION, loader, opts, diag, &mut record);
        record.collators = src.list(|q| q.attributes_of_in(oo::LC_COLLATION, oo::COLLATOR));
        record.collation_options =
            src.list(|q| q.all_text_of(oo::COLLATION_OPTIONS, oo::TRANSLITERATION_MODULES));
    }

    {
        let src = CategorySource::open(doc, oo::LC_SEARCH, loader, opts, diag, &mut record);
        record.search_options =
            src.list(|q| q.all_text_of(oo::SEARCH_OPTIONS, oo::TRANSLITERATION_MODULES));
    }

    {
        let src = CategorySource::open(doc, oo::LC_INDEX, loader, opts, diag, &mut record);
        record.index_keys = src.list(|q| q.attributes_of_in(oo::LC_INDEX, oo::INDEX_KEY));
        record.index_data = src.overlay(|q| q.text_by_own_attr(oo::LC_INDEX, oo::INDEX_KEY, oo::UNOID));
        record.unicode_scripts = src.list(|q| q.all_text_of(oo::LC_INDEX, oo::UNICODE_SCRIPT));
        record.follow_page_words =
            src.list(|q| q.all_text_of(oo::LC_INDEX, oo::FOLLOW_PAGE_WORD));
    }

    read_calendars(doc, loader, opts, diag, &mut record);

    {
        let src = CategorySource::open(doc, oo::LC_CURRENCY, loader, opts, diag, &mut record);
        record.currencies = src.from_element(currencies_from);
    }

    {
        let src =
            CategorySource::open(doc, oo::LC_TRANSLITERATION, loader, opts, diag, &mut record);
        record.transliterations = src.list(|q| q.attrs_of(oo::TRANSLITERATION, oo::UNOID));
    }

    {
        let src = CategorySource::open(doc, oo::LC_MISC, loader, opts, diag, &mut record);
        record.reserved_words = src.child_map(oo::RESERVED_WORDS);
        record.forbidden_line_begin = src.first(|q| {
            q.text_of(oo::FORBIDDEN_LINE_BEGIN_CHARACTERS).map(str::to_string)
        });
        record.forbidden_line_end = src.first(|q| {
            q.text_of(oo::FORBIDDEN_LINE_END_CHARACTERS).map(str::to_string)
        });
    }

    {
        let src =
            CategorySource::open(doc, oo::LC_NUMBERING_LEVEL, loader, opts, diag, &mut record);
        record.numbering_levels =
            src.list(|q| q.attributes_of_in(oo::LC_NUMBERING_LEVEL, oo::NUMBERING_LEVEL));
    }

    {
        let src = CategorySource::open(
            doc,
            oo::LC_OUTLINE_NUMBERING_LEVEL,
            loader,
            opts,
            diag,
            &mut record,
        );
        record.outline_styles = src.from_element(|el| {
            el.children_named(oo::OUTLINE_STYLE)
                .map(|style| {
                    style
                        .children_named(oo::OUTLINE_NUMBERING_LEVEL)
                        .map(|level| level.attributes.clone())
                        .collect()
                })
                .collect()
        });
    }

    record
}

fn currencies_from(el: &Element) -> Vec<Currency> {
    let text = |c: &Element, tag: &str| c.child(tag).and_then(Element::text).map(str::to_string);
    let flag = |c: &Element, attr: &str| c.attr(attr) == Some("true");
    el.children_named(oo::CURRENCY)
        .map(|c| Currency {
            id: text(c, oo::CURRENCY_ID),
            symbol: text(c, oo::CURRENCY_SYMBOL),
            bank_symbol: text(c, oo::BANK_SYMBOL),
            name: text(c, oo::CURRENCY_NAME),
            decimal_places: text(c, oo::DECIMAL_PLACES),
            default: flag(c, oo::DEFAULT),
            used_in_compatible_format_codes: flag(c, oo::USED_IN_COMPATIBLE_FORMAT_CODES),
            legacy_only: flag(c, oo::LEGACY_ONLY),
        })
        .collect()
}

fn read_calendars(
    doc: &LocaleDoc,
    loader: &dyn DocumentLoader,
    opts: &ReadOptions,
    diag: &Diagnostics,
    record: &mut LocaleRecord,
) {
    let cal_attrs;
    let days_abbr;
    let days_wide;
    let months_abbr;
    let months_wide;
    let eras_abbr;
    let eras_wide;
    let start_days;
    let min_days;
    let day_refs;
    let month_refs;
    let era_refs;
    {
        let src = CategorySource::open(doc, oo::LC_CALENDAR, loader, opts, diag, record);
        cal_attrs = src.list(|q| q.attributes_of_in(oo::LC_CALENDAR, oo::CALENDAR));
        days_abbr = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::DAY_ID, oo::DEFAULT_ABBRV_NAME, DAY_PATTERN)
        });
        days_wide = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::DAY_ID, oo::DEFAULT_FULL_NAME, DAY_PATTERN)
        });
        months_abbr = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::MONTH_ID, oo::DEFAULT_ABBRV_NAME, MONTH_PATTERN)
        });
        months_wide = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::MONTH_ID, oo::DEFAULT_FULL_NAME, MONTH_PATTERN)
        });
        eras_abbr = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::ERA_ID, oo::DEFAULT_ABBRV_NAME, ERA_PATTERN)
        });
        eras_wide = src.overlay_nested(|q| {
            q.text_pairs_grouped_by_ancestor(oo::ERA_ID, oo::DEFAULT_FULL_NAME, ERA_PATTERN)
        });
        start_days =
            src.overlay(|q| q.text_grouped_by_ancestor(oo::DAY_ID, START_DAY_PATTERN));
        min_days = src.overlay(|q| {
            q.text_by_parent_attr(oo::CALENDAR, oo::MINIMAL_DAYS_IN_FIRST_WEEK, oo::UNOID)
        });
        // Holder references may sit in the referenced document as well,
        // behind a category-level reference.
        day_refs = src.overlay(|q| {
            q.attr_by_parent_key(oo::CALENDAR, oo::DAYS_OF_WEEK, oo::REF, oo::UNOID)
        });
        month_refs = src.overlay(|q| {
            q.attr_by_parent_key(oo::CALENDAR, oo::MONTHS_OF_YEAR, oo::REF, oo::UNOID)
        });
        era_refs =
            src.overlay(|q| q.attr_by_parent_key(oo::CALENDAR, oo::ERAS, oo::REF, oo::UNOID));
    }

    for attrs in cal_attrs {
        let Some(unoid) = attr_value(&attrs, oo::UNOID) else {
            continue;
        };
        if record.calendars.contains_key(unoid) {
            diag.duplicate_key(oo::LC_CALENDAR, unoid, oo::CALENDAR);
            continue;
        }
        let is_default = attr_value(&attrs, oo::DEFAULT) == Some("true");
        if is_default && record.default_calendar.is_none() {
            record.default_calendar = Some(unoid.to_string());
        }
        let take = |m: &BTreeMap<String, BTreeMap<String, String>>| {
            m.get(unoid).cloned().unwrap_or_default()
        };
        record.calendars.insert(
            unoid.to_string(),
            CalendarNames {
                days_abbr: take(&days_abbr),
                days_wide: take(&days_wide),
                months_abbr: take(&months_abbr),
                months_wide: take(&months_wide),
                eras_abbr: take(&eras_abbr),
                eras_wide: take(&eras_wide),
                start_day_of_week: start_days.get(unoid).cloned(),
                min_days_in_first_week: min_days.get(unoid).cloned(),
                default: is_default,
            },
        );
    }

    if opts.resolve_refs {
        resolve_calendar_part_refs(
            doc,
            loader,
            opts,
            diag,
            record,
            [
                (oo::DAYS_OF_WEEK, oo::DAY, oo::DAY_ID, day_refs),
                (oo::MONTHS_OF_YEAR, oo::MONTH, oo::MONTH_ID, month_refs),
                (oo::ERAS, oo::ERA, oo::ERA_ID, era_refs),
            ],
        );
    }
}

/// Day, month and era sets may carry their own references on the holder
/// element (`<Calendar unoid="x"><DaysOfWeek ref="en_US_gregorian"/>`),
/// independent of any category-level reference. The holders to resolve are
/// discovered from both the starting and the referenced document, so the
/// walk below starts from the original document and re-follows any
/// category-level reference on its way to the part.
fn resolve_calendar_part_refs(
    doc: &LocaleDoc,
    loader: &dyn DocumentLoader,
    opts: &ReadOptions,
    diag: &Diagnostics,
    record: &mut LocaleRecord,
    parts: [(&'static str, &'static str, &'static str, BTreeMap<String, String>); 3],
) {
    for (holder, entry, key_tag, part_refs) in parts {
        for (unoid, _raw) in part_refs {
            let resolved = resolve_entry_document(
                doc,
                oo::LC_CALENDAR,
                oo::CALENDAR,
                oo::UNOID,
                &unoid,
                Some(holder),
                loader,
                &opts.resolve,
            );
            let (resolved, effective) = match resolved {
                Ok(ok) => ok,
                Err(err) => {
                    error!(
                        category = oo::LC_CALENDAR,
                        part = holder,
                        calendar = unoid.as_str(),
                        %err,
                        "part reference resolution failed"
                    );
                    record.failed_categories.push(FailedCategory {
                        category: format!("{}/{holder}", oo::LC_CALENDAR),
                        error: err.to_string(),
                    });
                    continue;
                }
            };
            let chain = [Some(entry), Some(holder), Some(oo::CALENDAR)];
            let pattern = AncestorPattern {
                tags: &chain,
                key_attr: oo::UNOID,
            };
            let rq = TreeQuery::new(&resolved.doc.root, diag);
            let abbr = rq.text_pairs_grouped_by_ancestor(key_tag, oo::DEFAULT_ABBRV_NAME, pattern);
            let wide = rq.text_pairs_grouped_by_ancestor(key_tag, oo::DEFAULT_FULL_NAME, pattern);
            let Some(cal) = record.calendars.get_mut(&unoid) else {
                continue;
            };
            let (abbr_slot, wide_slot) = if holder == oo::DAYS_OF_WEEK {
                (&mut cal.days_abbr, &mut cal.days_wide)
            } else if holder == oo::MONTHS_OF_YEAR {
                (&mut cal.months_abbr, &mut cal.months_wide)
            } else {
                (&mut cal.eras_abbr, &mut cal.eras_wide)
            };
            if let Some(names) = abbr.get(&effective) {
                *abbr_slot = names.clone();
            }
            if let Some(names) = wide.get(&effective) {
                *wide_slot = names.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::MapLoader;

    fn read(loader: &MapLoader, name: &str, opts: &ReadOptions) -> LocaleRecord {
        let doc = loader.doc(name);
        let diag = Diagnostics::new();
        read_locale(&doc, loader, opts, &diag)
    }

    const EN_US: &str = r#"<Locale version="1.2" versionDTD="2.0.3">
        <LC_INFO>
          <Language><LangID>en</LangID><DefaultName>English</DefaultName></Language>
          <Country><CountryID>US</CountryID><DefaultName>United States</DefaultName></Country>
          <Platform><PlatformID>generic</PlatformID></Platform>
        </LC_INFO>
        <LC_CTYPE>
          <Separators>
            <DecimalSeparator>.</DecimalSeparator>
            <ThousandSeparator>,</ThousandSeparator>
          </Separators>
          <Markers>
            <QuotationStart>'</QuotationStart>
            <QuotationEnd>'</QuotationEnd>
          </Markers>
          <TimeAM>AM</TimeAM>
          <TimePM>PM</TimePM>
          <MeasurementSystem>US</MeasurementSystem>
        </LC_CTYPE>
        <LC_FORMAT replaceFrom="[CURRENCY]" replaceTo="[$$-409]">
          <FormatElement msgid="d1" default="true" usage="DATE">
            <FormatCode>M/D/YY</FormatCode>
          </FormatElement>
          <FormatElement msgid="n1" usage="FIXED_NUMBER">
            <FormatCode>0.00</FormatCode>
          </FormatElement>
        </LC_FORMAT>
        <LC_CALENDAR>
          <Calendar unoid="gregorian" default="true">
            <DaysOfWeek>
              <Day><DayID>sun</DayID><DefaultAbbrvName>Sun</DefaultAbbrvName>
                   <DefaultFullName>Sunday</DefaultFullName></Day>
              <Day><DayID>mon</DayID><DefaultAbbrvName>Mon</DefaultAbbrvName>
                   <DefaultFullName>Monday</DefaultFullName></Day>
            </DaysOfWeek>
            <MonthsOfYear>
              <Month><MonthID>jan</MonthID><DefaultAbbrvName>Jan</DefaultAbbrvName>
                     <DefaultFullName>January</DefaultFullName></Month>
            </MonthsOfYear>
            <Eras>
              <Era><EraID>bc</EraID><DefaultAbbrvName>BC</DefaultAbbrvName>
                   <DefaultFullName>Before Christ</DefaultFullName></Era>
            </Eras>
            <StartDayOfWeek><DayID>sun</DayID></StartDayOfWeek>
            <MinimalDaysInFirstWeek>1</MinimalDaysInFirstWeek>
          </Calendar>
        </LC_CALENDAR>
        <LC_CURRENCY>
          <Currency default="true" usedInCompatibleFormatCodes="true">
            <CurrencyID>USD</CurrencyID>
            <CurrencySymbol>$</CurrencySymbol>
            <BankSymbol>USD</BankSymbol>
            <CurrencyName>US Dollar</CurrencyName>
            <DecimalPlaces>2</DecimalPlaces>
          </Currency>
        </LC_CURRENCY>
        <LC_MISC>
          <ReservedWords>
            <trueWord>true</trueWord>
            <falseWord>false</falseWord>
          </ReservedWords>
        </LC_MISC>
      </Locale>"#;

    #[test]
    fn reads_info_ctype_and_format() {
        let loader = MapLoader::new(&[("en_US", EN_US)]);
        let record = read(&loader, "en_US", &ReadOptions::default());

        assert_eq!(record.locale, "en_US");
        assert_eq!(record.version.as_deref(), Some("1.2"));
        assert_eq!(record.lang_id.as_deref(), Some("en"));
        assert_eq!(record.country_name.as_deref(), Some("United States"));
        assert_eq!(record.separators["DecimalSeparator"], ".");
        assert_eq!(record.markers["QuotationStart"], "'");
        assert_eq!(record.time_am.as_deref(), Some("AM"));
        assert_eq!(record.replace_from.as_deref(), Some("[CURRENCY]"));
        assert_eq!(record.format_codes["d1"], "M/D/YY");
        assert_eq!(
            attr_value(&record.format_elements["d1"], "usage"),
            Some("DATE")
        );
        assert_eq!(record.reserved_words["trueWord"], "true");
    }

    #[test]
    fn reads_calendar_names_and_currency() {
        let loader = MapLoader::new(&[("en_US", EN_US)]);
        let record = read(&loader, "en_US", &ReadOptions::default());

        let cal = &record.calendars["gregorian"];
        assert_eq!(cal.days_abbr["sun"], "Sun");
        assert_eq!(cal.days_wide["mon"], "Monday");
        assert_eq!(cal.months_wide["jan"], "January");
        assert_eq!(cal.eras_abbr["bc"], "BC");
        assert_eq!(cal.start_day_of_week.as_deref(), Some("sun"));
        assert_eq!(cal.min_days_in_first_week.as_deref(), Some("1"));
        assert!(cal.default);
        assert_eq!(record.default_calendar.as_deref(), Some("gregorian"));

        assert_eq!(record.currencies.len(), 1);
        let usd = &record.currencies[0];
        assert_eq!(usd.id.as_deref(), Some("USD"));
        assert_eq!(usd.symbol.as_deref(), Some("$"));
        assert!(usd.default);
        assert!(usd.used_in_compatible_format_codes);
        assert!(!usd.legacy_only);
    }

    #[test]
    fn reference_is_followed_with_partial_override() {
        let loader = MapLoader::new(&[
            (
                "en_GB",
                r#"<Locale>
                     <LC_CTYPE ref="en_US">
                       <MeasurementSystem>metric</MeasurementSystem>
                     </LC_CTYPE>
                   </Locale>"#,
            ),
            ("en_US", EN_US),
        ]);
        let record = read(&loader, "en_GB", &ReadOptions::default());

        // Local value wins, the rest comes from the referenced document.
        assert_eq!(record.measurement_system.as_deref(), Some("metric"));
        assert_eq!(record.separators["DecimalSeparator"], ".");
        assert_eq!(record.time_pm.as_deref(), Some("PM"));
        assert_eq!(record.resolution_chains["LC_CTYPE"], vec!["en_GB", "en_US"]);
    }

    #[test]
    fn unresolved_reference_is_recorded_as_alias() {
        let loader = MapLoader::new(&[
            ("en_GB", r#"<Locale><LC_CTYPE ref="en_US"/></Locale>"#),
            ("en_US", EN_US),
        ]);
        let opts = ReadOptions {
            resolve_refs: false,
            ..ReadOptions::default()
        };
        let record = read(&loader, "en_GB", &opts);

        assert!(record.separators.is_empty());
        let alias = &record.aliases["LC_CTYPE"];
        assert_eq!(alias.locale, "en_US");
        assert_eq!(alias.subtype, None);
    }

    #[test]
    fn failed_category_does_not_abort_the_read() {
        let loader = MapLoader::new(&[(
            "xx",
            r#"<Locale>
                 <LC_CTYPE ref="zz"/>
                 <LC_MISC>
                   <ReservedWords><trueWord>yes</trueWord></ReservedWords>
                 </LC_MISC>
               </Locale>"#,
        )]);
        let record = read(&loader, "xx", &ReadOptions::default());

        assert_eq!(record.failed_categories.len(), 1);
        assert_eq!(record.failed_categories[0].category, "LC_CTYPE");
        assert_eq!(record.reserved_words["trueWord"], "yes");
    }

    #[test]
    fn calendar_part_reference_pulls_names_from_target() {
        let loader = MapLoader::new(&[
            (
                "de_DE",
                r#"<Locale>
                     <LC_CALENDAR>
                       <Calendar unoid="gregorian" default="true">
                         <DaysOfWeek ref="en_US_gregorian"/>
                         <MinimalDaysInFirstWeek>4</MinimalDaysInFirstWeek>
                       </Calendar>
                     </LC_CALENDAR>
                   </Locale>"#,
            ),
            ("en_US", EN_US),
        ]);
        let record = read(&loader, "de_DE", &ReadOptions::default());

        let cal = &record.calendars["gregorian"];
        assert_eq!(cal.days_abbr["sun"], "Sun");
        assert_eq!(cal.days_wide["mon"], "Monday");
        // Local week rule is untouched by the part reference.
        assert_eq!(cal.min_days_in_first_week.as_deref(), Some("4"));
    }

    #[test]
    fn calendar_part_reference_behind_category_reference_is_followed() {
        let loader = MapLoader::new(&[
            ("de_AT", r#"<Locale><LC_CALENDAR ref="de_DE"/></Locale>"#),
            (
                "de_DE",
                r#"<Locale>
                     <LC_CALENDAR>
                       <Calendar unoid="gregorian" default="true">
                         <DaysOfWeek ref="en_US_gregorian"/>
                         <MinimalDaysInFirstWeek>4</MinimalDaysInFirstWeek>
                       </Calendar>
                     </LC_CALENDAR>
                   </Locale>"#,
            ),
            ("en_US", EN_US),
        ]);
        let record = read(&loader, "de_AT", &ReadOptions::default());

        // The day-set reference lives in de_DE, reached through the
        // category reference on de_AT; the names still come from en_US.
        let cal = &record.calendars["gregorian"];
        assert_eq!(cal.days_abbr["sun"], "Sun");
        assert_eq!(cal.days_wide["mon"], "Monday");
        assert_eq!(cal.min_days_in_first_week.as_deref(), Some("4"));
        assert_eq!(
            record.resolution_chains["LC_CALENDAR"],
            vec!["de_AT", "de_DE"]
        );
    }
}
