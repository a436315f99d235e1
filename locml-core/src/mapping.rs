//! Field-name and enumeration mapping between the two vocabularies
//!
//! Purely mechanical renames: every table is known at compile time, so the
//! mapping is a set of static slices with linear lookups (the tables have
//! at most a dozen rows).

use crate::names::{ldml, oo};

/// Calendar-type names: OpenOffice `unoid` on the left, LDML calendar type
/// on the right.
pub static CALENDAR_TYPES: &[(&str, &str)] = &[
    ("gregorian", "gregorian"),
    ("hijri", "islamic"),
    ("jewish", "hebrew"),
    ("gengou", "japanese"),
    ("hanja", "korean"),
    ("buddhist", "buddhist"),
    ("ROC", "roc"),
];

pub fn calendar_to_ldml(unoid: &str) -> Option<&'static str> {
    CALENDAR_TYPES
        .iter()
        .find(|(oo_name, _)| *oo_name == unoid)
        .map(|(_, ldml_name)| *ldml_name)
}

pub fn calendar_to_oo(ldml_type: &str) -> Option<&'static str> {
    CALENDAR_TYPES
        .iter()
        .find(|(_, ldml_name)| *ldml_name == ldml_type)
        .map(|(oo_name, _)| *oo_name)
}

/// Separator elements of `LC_CTYPE` that have a direct LDML number-symbol
/// equivalent. The date/time separators have no LDML counterpart; they are
/// embedded in format patterns instead and stay OpenOffice-specific.
pub static SEPARATOR_SYMBOLS: &[(&str, &str)] = &[
    (oo::DECIMAL_SEPARATOR, ldml::DECIMAL),
    (oo::THOUSAND_SEPARATOR, ldml::GROUP),
    (oo::LIST_SEPARATOR, ldml::LIST),
];

pub fn separator_to_symbol(oo_name: &str) -> Option<&'static str> {
    SEPARATOR_SYMBOLS
        .iter()
        .find(|(name, _)| *name == oo_name)
        .map(|(_, symbol)| *symbol)
}

/// Quotation markers of `LC_CTYPE` mapped to LDML delimiters.
pub static MARKER_DELIMITERS: &[(&str, &str)] = &[
    (oo::QUOTATION_START, ldml::ALT_QUOTATION_START),
    (oo::QUOTATION_END, ldml::ALT_QUOTATION_END),
    (oo::DOUBLE_QUOTATION_START, ldml::QUOTATION_START),
    (oo::DOUBLE_QUOTATION_END, ldml::QUOTATION_END),
];

pub fn marker_to_delimiter(oo_name: &str) -> Option<&'static str> {
    MARKER_DELIMITERS
        .iter()
        .find(|(name, _)| *name == oo_name)
        .map(|(_, delimiter)| *delimiter)
}

/// `FormatElement` usage values mapped to the LDML format-group element
/// that holds the corresponding patterns.
pub static FORMAT_USAGES: &[(&str, &str)] = &[
    ("DATE", "dateFormats"),
    ("TIME", "timeFormats"),
    ("DATE_TIME", "dateTimeFormats"),
    ("FIXED_NUMBER", "decimalFormats"),
    ("SCIENTIFIC_NUMBER", "scientificFormats"),
    ("PERCENT_NUMBER", "percentFormats"),
    ("CURRENCY", "currencyFormats"),
];

pub fn usage_to_format_group(usage: &str) -> Option<&'static str> {
    FORMAT_USAGES
        .iter()
        .find(|(name, _)| *name == usage)
        .map(|(_, group)| *group)
}

/// Era identifiers per OpenOffice calendar type, in LDML numbering order
/// (era 0, era 1).
pub static CALENDAR_ERAS: &[(&str, [&str; 2])] = &[
    ("gregorian", ["bc", "ad"]),
    ("hanja", ["bc", "ad"]),
    ("hijri", ["BeforeHijra", "AfterHijra"]),
    ("jewish", ["before", "after"]),
    ("buddhist", ["before", "after"]),
    ("ROC", ["before", "minguo"]),
];

pub fn eras_for_calendar(unoid: &str) -> Option<[&'static str; 2]> {
    CALENDAR_ERAS
        .iter()
        .find(|(name, _)| *name == unoid)
        .map(|(_, eras)| *eras)
}

/// Day identifiers are shared between the vocabularies (`sun`..`sat`), in
/// week order starting at Sunday.
pub static DAY_IDS: &[&str] = &["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_mapping_round_trips() {
        for (oo_name, ldml_name) in CALENDAR_TYPES {
            assert_eq!(calendar_to_ldml(oo_name), Some(*ldml_name));
            assert_eq!(calendar_to_oo(ldml_name), Some(*oo_name));
        }
    }

    #[test]
    fn unknown_names_map_to_none() {
        assert_eq!(calendar_to_ldml("lunar"), None);
        assert_eq!(separator_to_symbol("DateSeparator"), None);
        assert_eq!(usage_to_format_group("BOGUS"), None);
    }

    #[test]
    fn separator_and_marker_tables() {
        assert_eq!(separator_to_symbol("DecimalSeparator"), Some("decimal"));
        assert_eq!(separator_to_symbol("ThousandSeparator"), Some("group"));
        assert_eq!(marker_to_delimiter("DoubleQuotationStart"), Some("quotationStart"));
    }

    #[test]
    fn eras_cover_all_mapped_calendars() {
        assert_eq!(eras_for_calendar("hijri"), Some(["BeforeHijra", "AfterHijra"]));
        assert_eq!(eras_for_calendar("gengou"), None);
    }
}
