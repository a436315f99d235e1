//! Field-level comparison of two locale records
//!
//! Used to check a converted locale against an existing one: every scalar
//! field and every keyed collection is compared by name, and each mismatch
//! is reported as one [`FieldDiff`]. The field table is static so the
//! report order is stable across runs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::LocaleRecord;

/// One mismatching field. `None` means the side has no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub left: Option<String>,
    pub right: Option<String>,
}

type ScalarGetter = fn(&LocaleRecord) -> Option<String>;

/// Scalar fields, compared one to one.
static SCALAR_FIELDS: &[(&str, ScalarGetter)] = &[
    ("version", |r| r.version.clone()),
    ("lang_id", |r| r.lang_id.clone()),
    ("lang_name", |r| r.lang_name.clone()),
    ("country_id", |r| r.country_id.clone()),
    ("country_name", |r| r.country_name.clone()),
    ("platform_id", |r| r.platform_id.clone()),
    ("time_am", |r| r.time_am.clone()),
    ("time_pm", |r| r.time_pm.clone()),
    ("measurement_system", |r| r.measurement_system.clone()),
    ("replace_from", |r| r.replace_from.clone()),
    ("replace_to", |r| r.replace_to.clone()),
    ("default_calendar", |r| r.default_calendar.clone()),
    ("forbidden_line_begin", |r| r.forbidden_line_begin.clone()),
    ("forbidden_line_end", |r| r.forbidden_line_end.clone()),
];

type MapGetter = for<'r> fn(&'r LocaleRecord) -> &'r BTreeMap<String, String>;

/// Keyed fields, compared entry by entry under `<field>.<key>`.
static MAP_FIELDS: &[(&str, MapGetter)] = &[
    ("separators", |r| &r.separators),
    ("markers", |r| &r.markers),
    ("format_codes", |r| &r.format_codes),
    ("index_data", |r| &r.index_data),
    ("reserved_words", |r| &r.reserved_words),
];

/// Compare two records field by field. An empty result means the records
/// agree on every compared field.
pub fn compare_records(left: &LocaleRecord, right: &LocaleRecord) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();

    for (name, get) in SCALAR_FIELDS {
        let l = get(left);
        let r = get(right);
        if l != r {
            diffs.push(FieldDiff {
                field: name.to_string(),
                left: l,
                right: r,
            });
        }
    }

    for (name, get) in MAP_FIELDS {
        diff_maps(&mut diffs, name, get(left), get(right));
    }

    for (unoid, l_cal) in &left.calendars {
        match right.calendars.get(unoid) {
            Some(r_cal) => {
                let prefix = format!("calendars.{unoid}");
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.days_abbr"),
                    &l_cal.days_abbr,
                    &r_cal.days_abbr,
                );
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.days_wide"),
                    &l_cal.days_wide,
                    &r_cal.days_wide,
                );
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.months_abbr"),
                    &l_cal.months_abbr,
                    &r_cal.months_abbr,
                );
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.months_wide"),
                    &l_cal.months_wide,
                    &r_cal.months_wide,
                );
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.eras_abbr"),
                    &l_cal.eras_abbr,
                    &r_cal.eras_abbr,
                );
                diff_maps(
                    &mut diffs,
                    &format!("{prefix}.eras_wide"),
                    &l_cal.eras_wide,
                    &r_cal.eras_wide,
                );
                diff_option(
                    &mut diffs,
                    &format!("{prefix}.start_day_of_week"),
                    &l_cal.start_day_of_week,
                    &r_cal.start_day_of_week,
                );
                diff_option(
                    &mut diffs,
                    &format!("{prefix}.min_days_in_first_week"),
                    &l_cal.min_days_in_first_week,
                    &r_cal.min_days_in_first_week,
                );
            }
            None => diffs.push(FieldDiff {
                field: format!("calendars.{unoid}"),
                left: Some("present".to_string()),
                right: None,
            }),
        }
    }
    for unoid in right.calendars.keys() {
        if !left.calendars.contains_key(unoid) {
            diffs.push(FieldDiff {
                field: format!("calendars.{unoid}"),
                left: None,
                right: Some("present".to_string()),
            });
        }
    }

    diffs
}

fn diff_option(
    diffs: &mut Vec<FieldDiff>,
    field: &str,
    left: &Option<String>,
    right: &Option<String>,
) {
    if left != right {
        diffs.push(FieldDiff {
            field: field.to_string(),
            left: left.clone(),
            right: right.clone(),
        });
    }
}

fn diff_maps(
    diffs: &mut Vec<FieldDiff>,
    field: &str,
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
) {
    for (key, l_value) in left {
        match right.get(key) {
            Some(r_value) if r_value == l_value => {}
            other => diffs.push(FieldDiff {
                field: format!("{field}.{key}"),
                left: Some(l_value.clone()),
                right: other.cloned(),
            }),
        }
    }
    for (key, r_value) in right {
        if !left.contains_key(key) {
            diffs.push(FieldDiff {
                field: format!("{field}.{key}"),
                left: None,
                right: Some(r_value.clone()),
            });
        }
    }
}

/// Plain-text rendering, one line per mismatch.
pub fn render_text(diffs: &[FieldDiff]) -> String {
    let mut out = String::new();
    for diff in diffs {
        let left = diff.left.as_deref().unwrap_or("<missing>");
        let right = diff.right.as_deref().unwrap_or("<missing>");
        out.push_str(&format!("{}: {} != {}\n", diff.field, left, right));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(decimal: &str) -> LocaleRecord {
        let mut r = LocaleRecord {
            locale: "de_DE".to_string(),
            lang_id: Some("de".to_string()),
            ..LocaleRecord::default()
        };
        r.separators
            .insert("DecimalSeparator".to_string(), decimal.to_string());
        r
    }

    #[test]
    fn identical_records_have_no_diffs() {
        assert!(compare_records(&record(","), &record(",")).is_empty());
    }

    #[test]
    fn changed_map_entry_is_reported_with_both_sides() {
        let diffs = compare_records(&record(","), &record("."));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, "separators.DecimalSeparator");
        assert_eq!(diffs[0].left.as_deref(), Some(","));
        assert_eq!(diffs[0].right.as_deref(), Some("."));
    }

    #[test]
    fn missing_side_is_reported_as_none() {
        let mut left = record(",");
        left.time_am = Some("AM".to_string());
        let diffs = compare_records(&left, &record(","));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, "time_am");
        assert!(diffs[0].right.is_none());
    }

    #[test]
    fn calendar_era_names_are_compared_in_both_widths() {
        let mut left = record(",");
        let mut right = record(",");
        let mut l_cal = crate::record::CalendarNames::default();
        l_cal.eras_abbr.insert("ad".to_string(), "AD".to_string());
        l_cal.eras_wide
            .insert("ad".to_string(), "Anno Domini".to_string());
        let mut r_cal = l_cal.clone();
        r_cal.eras_wide
            .insert("ad".to_string(), "anno Domini".to_string());
        left.calendars.insert("gregorian".to_string(), l_cal);
        right.calendars.insert("gregorian".to_string(), r_cal);

        let diffs = compare_records(&left, &right);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, "calendars.gregorian.eras_wide.ad");
        assert_eq!(diffs[0].left.as_deref(), Some("Anno Domini"));
        assert_eq!(diffs[0].right.as_deref(), Some("anno Domini"));
    }

    #[test]
    fn calendar_presence_is_compared() {
        let mut left = record(",");
        left.calendars
            .insert("gregorian".to_string(), Default::default());
        let diffs = compare_records(&left, &record(","));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, "calendars.gregorian");
    }

    #[test]
    fn text_rendering_is_one_line_per_diff() {
        let diffs = compare_records(&record(","), &record("."));
        let text = render_text(&diffs);
        assert_eq!(text, "separators.DecimalSeparator: , != .\n");
    }

    #[test]
    fn diffs_serialize_to_json() {
        let diffs = compare_records(&record(","), &record("."));
        let json = serde_json::to_string(&diffs).unwrap();
        assert!(json.contains("\"field\":\"separators.DecimalSeparator\""));
    }
}
