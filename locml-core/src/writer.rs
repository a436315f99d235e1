//! LDML document generation
//!
//! Emits the LDML subset covered by the locale record: identity,
//! delimiters, number symbols, measurement and calendar data. Categories
//! whose reference was left unresolved come out as `alias` elements so a
//! downstream CLDR toolchain can finish the resolution itself.

use std::collections::BTreeMap;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::mapping;
use crate::names::{ldml, oo};
use crate::record::{CalendarNames, LocaleRecord};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write XML: {0}")]
    Xml(#[from] std::io::Error),
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        XmlOut {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), WriteError> {
        let mut el = BytesStart::new(tag);
        for (key, value) in attrs {
            el.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Start(el))?;
        Ok(())
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), WriteError> {
        let mut el = BytesStart::new(tag);
        for (key, value) in attrs {
            el.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Empty(el))?;
        Ok(())
    }

    fn end(&mut self, tag: &str) -> Result<(), WriteError> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), WriteError> {
        let mut el = BytesStart::new(tag);
        for (key, value) in attrs {
            el.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Start(el))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn finish(self) -> Result<String, WriteError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

/// Render a locale record as an LDML document.
pub fn write_ldml(record: &LocaleRecord) -> Result<String, WriteError> {
    let mut out = XmlOut::new();
    out.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    out.start(ldml::LDML, &[])?;
    write_identity(&mut out, record)?;
    write_delimiters(&mut out, record)?;
    write_measurement(&mut out, record)?;
    write_number_symbols(&mut out, record)?;
    write_dates(&mut out, record)?;
    out.end(ldml::LDML)?;

    out.finish()
}

fn write_identity(out: &mut XmlOut, record: &LocaleRecord) -> Result<(), WriteError> {
    out.start(ldml::IDENTITY, &[])?;
    if let Some(version) = &record.version {
        out.empty(ldml::VERSION, &[(ldml::NUMBER, version.as_str())])?;
    }
    let language = record
        .lang_id
        .clone()
        .unwrap_or_else(|| language_of(&record.locale));
    out.empty(ldml::LANGUAGE, &[(ldml::TYPE, language.as_str())])?;
    if let Some(territory) = &record.country_id {
        out.empty(ldml::TERRITORY, &[(ldml::TYPE, territory.as_str())])?;
    }
    out.end(ldml::IDENTITY)?;
    Ok(())
}

fn language_of(locale: &str) -> String {
    locale.split('_').next().unwrap_or(locale).to_string()
}

/// Alias element pointing at the same category of another locale. Emitted
/// in place of concrete data when a reference was left unresolved.
fn write_alias_for(
    out: &mut XmlOut,
    record: &LocaleRecord,
    category: &str,
) -> Result<bool, WriteError> {
    let Some(alias) = record.aliases.get(category) else {
        return Ok(false);
    };
    let mut source = alias.locale.clone();
    if let Some(subtype) = &alias.subtype {
        source.push('_');
        source.push_str(subtype);
    }
    out.empty(ldml::ALIAS, &[(ldml::SOURCE, source.as_str())])?;
    Ok(true)
}

fn write_delimiters(out: &mut XmlOut, record: &LocaleRecord) -> Result<(), WriteError> {
    let mapped: Vec<(&str, &String)> = record
        .markers
        .iter()
        .filter_map(|(name, value)| mapping::marker_to_delimiter(name).map(|tag| (tag, value)))
        .collect();
    if mapped.is_empty() && !record.aliases.contains_key(oo::LC_CTYPE) {
        return Ok(());
    }
    out.start(ldml::DELIMITERS, &[])?;
    if !write_alias_for(out, record, oo::LC_CTYPE)? {
        for (tag, value) in mapped {
            out.leaf(tag, &[], value)?;
        }
    }
    out.end(ldml::DELIMITERS)?;
    Ok(())
}

fn write_measurement(out: &mut XmlOut, record: &LocaleRecord) -> Result<(), WriteError> {
    let Some(system) = &record.measurement_system else {
        return Ok(());
    };
    out.start(ldml::MEASUREMENT, &[])?;
    out.empty(ldml::MEASUREMENT_SYSTEM, &[(ldml::TYPE, system.as_str())])?;
    out.end(ldml::MEASUREMENT)?;
    Ok(())
}

fn write_number_symbols(out: &mut XmlOut, record: &LocaleRecord) -> Result<(), WriteError> {
    let mapped: Vec<(&str, &String)> = record
        .separators
        .iter()
        .filter_map(|(name, value)| mapping::separator_to_symbol(name).map(|tag| (tag, value)))
        .collect();
    if mapped.is_empty() {
        return Ok(());
    }
    out.start(ldml::NUMBERS, &[])?;
    out.start(ldml::SYMBOLS, &[])?;
    for (tag, value) in mapped {
        out.leaf(tag, &[], value)?;
    }
    out.end(ldml::SYMBOLS)?;
    out.end(ldml::NUMBERS)?;
    Ok(())
}

fn write_dates(out: &mut XmlOut, record: &LocaleRecord) -> Result<(), WriteError> {
    let aliased = record.aliases.contains_key(oo::LC_CALENDAR);
    if record.calendars.is_empty() && !aliased {
        return Ok(());
    }
    out.start(ldml::DATES, &[])?;
    out.start(ldml::CALENDARS, &[])?;
    if !write_alias_for(out, record, oo::LC_CALENDAR)? {
        for (unoid, names) in &record.calendars {
            write_calendar(out, record, unoid, names)?;
        }
    }
    out.end(ldml::CALENDARS)?;
    out.end(ldml::DATES)?;
    Ok(())
}

fn write_calendar(
    out: &mut XmlOut,
    record: &LocaleRecord,
    unoid: &str,
    names: &CalendarNames,
) -> Result<(), WriteError> {
    // Calendar types without an LDML equivalent keep their own name.
    let cal_type = mapping::calendar_to_ldml(unoid).unwrap_or(unoid);
    out.start(ldml::CALENDAR, &[(ldml::TYPE, cal_type)])?;

    write_name_widths(
        out,
        ldml::MONTHS,
        ldml::MONTH_CONTEXT,
        ldml::MONTH_WIDTH,
        ldml::MONTH,
        &names.months_wide,
        &names.months_abbr,
    )?;
    write_name_widths(
        out,
        ldml::DAYS,
        ldml::DAY_CONTEXT,
        ldml::DAY_WIDTH,
        ldml::DAY,
        &names.days_wide,
        &names.days_abbr,
    )?;
    write_week(out, names)?;
    if !names.eras_abbr.is_empty() || !names.eras_wide.is_empty() {
        write_eras(out, unoid, names)?;
    }
    if names.default {
        if let Some(am) = &record.time_am {
            out.leaf(ldml::AM, &[], am)?;
        }
        if let Some(pm) = &record.time_pm {
            out.leaf(ldml::PM, &[], pm)?;
        }
    }

    out.end(ldml::CALENDAR)?;
    Ok(())
}

/// `months`/`days` share the same three-level LDML nesting, differing only
/// in element names. The day and month identifiers are common to both
/// vocabularies and pass through as the `type` attribute.
#[allow(clippy::too_many_arguments)]
fn write_name_widths(
    out: &mut XmlOut,
    group: &str,
    context: &str,
    width: &str,
    item: &str,
    wide: &BTreeMap<String, String>,
    abbr: &BTreeMap<String, String>,
) -> Result<(), WriteError> {
    if wide.is_empty() && abbr.is_empty() {
        return Ok(());
    }
    out.start(group, &[])?;
    out.start(context, &[(ldml::TYPE, ldml::FORMAT)])?;
    for (width_type, set) in [(ldml::ABBREVIATED, abbr), (ldml::WIDE, wide)] {
        if set.is_empty() {
            continue;
        }
        out.start(width, &[(ldml::TYPE, width_type)])?;
        for (id, name) in set {
            out.leaf(item, &[(ldml::TYPE, id.as_str())], name)?;
        }
        out.end(width)?;
    }
    out.end(context)?;
    out.end(group)?;
    Ok(())
}

fn write_week(out: &mut XmlOut, names: &CalendarNames) -> Result<(), WriteError> {
    if names.start_day_of_week.is_none() && names.min_days_in_first_week.is_none() {
        return Ok(());
    }
    out.start(ldml::WEEK, &[])?;
    if let Some(min) = &names.min_days_in_first_week {
        out.empty(ldml::MIN_DAYS, &[(ldml::COUNT, min.as_str())])?;
    }
    if let Some(day) = &names.start_day_of_week {
        out.empty(ldml::FIRST_DAY, &[(ldml::DAY_ATTR, day.as_str())])?;
    }
    out.end(ldml::WEEK)?;
    Ok(())
}

/// Era identifiers become LDML's numeric era types where the calendar's
/// era order is known; unknown identifiers are emitted verbatim.
fn era_type(unoid: &str, id: &str) -> String {
    mapping::eras_for_calendar(unoid)
        .and_then(|eras| eras.iter().position(|e| *e == id))
        .map(|idx| idx.to_string())
        .unwrap_or_else(|| id.to_string())
}

fn write_eras(out: &mut XmlOut, unoid: &str, names: &CalendarNames) -> Result<(), WriteError> {
    out.start(ldml::ERAS, &[])?;
    for (width, set) in [
        (ldml::ERA_ABBR, &names.eras_abbr),
        (ldml::ERA_NAMES, &names.eras_wide),
    ] {
        if set.is_empty() {
            continue;
        }
        out.start(width, &[])?;
        for (id, name) in set {
            let ty = era_type(unoid, id);
            out.leaf(ldml::ERA, &[(ldml::TYPE, ty.as_str())], name)?;
        }
        out.end(width)?;
    }
    out.end(ldml::ERAS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_document;
    use std::collections::BTreeMap;

    fn base_record() -> LocaleRecord {
        LocaleRecord {
            locale: "de_DE".to_string(),
            version: Some("1.2".to_string()),
            lang_id: Some("de".to_string()),
            country_id: Some("DE".to_string()),
            ..LocaleRecord::default()
        }
    }

    fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn output_is_well_formed_with_identity() {
        let xml = write_ldml(&base_record()).unwrap();
        let root = parse_document(&xml).unwrap();
        assert_eq!(root.tag, "ldml");
        let identity = root.child("identity").unwrap();
        assert_eq!(
            identity.child("version").unwrap().attr("number"),
            Some("1.2")
        );
        assert_eq!(identity.child("language").unwrap().attr("type"), Some("de"));
        assert_eq!(
            identity.child("territory").unwrap().attr("type"),
            Some("DE")
        );
    }

    #[test]
    fn symbols_and_delimiters_are_renamed() {
        let mut record = base_record();
        record.separators = pairs(&[
            ("DecimalSeparator", ","),
            ("ThousandSeparator", "."),
            ("DateSeparator", "."),
        ]);
        record.markers = pairs(&[("DoubleQuotationStart", "\u{201e}")]);

        let xml = write_ldml(&record).unwrap();
        let root = parse_document(&xml).unwrap();
        let symbols = root.descendant("symbols").unwrap();
        assert_eq!(symbols.child("decimal").unwrap().text(), Some(","));
        assert_eq!(symbols.child("group").unwrap().text(), Some("."));
        // No LDML symbol exists for the date separator.
        assert!(symbols.child("DateSeparator").is_none());
        let delimiters = root.child("delimiters").unwrap();
        assert_eq!(
            delimiters.child("quotationStart").unwrap().text(),
            Some("\u{201e}")
        );
    }

    #[test]
    fn calendar_types_are_mapped_and_names_nested() {
        let mut record = base_record();
        record.time_am = Some("AM".to_string());
        record.calendars.insert(
            "hijri".to_string(),
            crate::record::CalendarNames {
                days_abbr: pairs(&[("sun", "Ahad")]),
                months_wide: pairs(&[("jan", "Muharram")]),
                start_day_of_week: Some("sat".to_string()),
                min_days_in_first_week: Some("1".to_string()),
                ..Default::default()
            },
        );

        let xml = write_ldml(&record).unwrap();
        let root = parse_document(&xml).unwrap();
        let calendar = root.descendant("calendar").unwrap();
        assert_eq!(calendar.attr("type"), Some("islamic"));
        let day = calendar.descendant("day").unwrap();
        assert_eq!(day.attr("type"), Some("sun"));
        assert_eq!(day.text(), Some("Ahad"));
        let week = calendar.descendant("week").unwrap();
        assert_eq!(week.child("firstDay").unwrap().attr("day"), Some("sat"));
        assert_eq!(week.child("minDays").unwrap().attr("count"), Some("1"));
        // am/pm only belong to the default calendar.
        assert!(calendar.child("am").is_none());
    }

    #[test]
    fn era_ids_become_numeric_types() {
        let mut record = base_record();
        record.calendars.insert(
            "gregorian".to_string(),
            crate::record::CalendarNames {
                eras_abbr: pairs(&[("bc", "BC"), ("ad", "AD")]),
                default: true,
                ..Default::default()
            },
        );

        let xml = write_ldml(&record).unwrap();
        let root = parse_document(&xml).unwrap();
        let eras: Vec<(Option<&str>, Option<&str>)> = root
            .descendant("eraAbbr")
            .unwrap()
            .children_named("era")
            .map(|e| (e.attr("type"), e.text()))
            .collect();
        // BTreeMap order is ad, bc; types come from era position, not order.
        assert!(eras.contains(&(Some("1"), Some("AD"))));
        assert!(eras.contains(&(Some("0"), Some("BC"))));
    }

    #[test]
    fn unresolved_category_becomes_alias() {
        let mut record = base_record();
        record.aliases.insert(
            "LC_CALENDAR".to_string(),
            crate::resolve::RefSpec {
                locale: "en_US".to_string(),
                subtype: None,
            },
        );

        let xml = write_ldml(&record).unwrap();
        let root = parse_document(&xml).unwrap();
        let calendars = root.descendant("calendars").unwrap();
        let alias = calendars.child("alias").unwrap();
        assert_eq!(alias.attr("source"), Some("en_US"));
        assert!(calendars.child("calendar").is_none());
    }
}
