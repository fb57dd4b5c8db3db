//! Member-value transcoding for date and datetime columns.
//!
//! The form shows dates as `MM/DD/YYYY` while the document stores
//! `YYYY-MM-DD`. Both conversions are shape-based string rewrites: a value
//! is transformed only when it matches one of the two digit patterns
//! exactly, anything else passes through verbatim. No calendar validation
//! happens here — `13/40/2023` has the display shape and is rewritten.

/// Whether a column's declared datatype gets the date treatment.
pub fn is_date_datatype(datatype: &str) -> bool {
    matches!(datatype, "date" | "datetime")
}

fn digits_at(s: &str, positions: &[usize]) -> bool {
    let bytes = s.as_bytes();
    positions.iter().all(|&i| bytes[i].is_ascii_digit())
}

/// `YYYY-MM-DD`, digits and dashes only.
fn is_storage_shape(s: &str) -> bool {
    s.len() == 10
        && s.as_bytes()[4] == b'-'
        && s.as_bytes()[7] == b'-'
        && digits_at(s, &[0, 1, 2, 3, 5, 6, 8, 9])
}

/// `MM/DD/YYYY`, digits and slashes only.
fn is_display_shape(s: &str) -> bool {
    s.len() == 10
        && s.as_bytes()[2] == b'/'
        && s.as_bytes()[5] == b'/'
        && digits_at(s, &[0, 1, 3, 4, 6, 7, 8, 9])
}

/// Storage form to display form: `YYYY-MM-DD` becomes `MM/DD/YYYY`. Values
/// already in display form, and anything unrecognized, come back unchanged.
/// Empty input stays empty.
pub fn to_display_date(value: &str) -> String {
    if value.is_empty() || is_display_shape(value) {
        return value.to_string();
    }
    if is_storage_shape(value) {
        let year = &value[0..4];
        let month = &value[5..7];
        let day = &value[8..10];
        return format!("{}/{}/{}", month, day, year);
    }
    value.to_string()
}

/// Display form to storage form: `MM/DD/YYYY` becomes `YYYY-MM-DD`. The
/// exact mirror of [`to_display_date`], with the same permissive
/// passthrough.
pub fn to_storage_date(value: &str) -> String {
    if value.is_empty() || is_storage_shape(value) {
        return value.to_string();
    }
    if is_display_shape(value) {
        let month = &value[0..2];
        let day = &value[3..5];
        let year = &value[6..10];
        return format!("{}-{}-{}", year, month, day);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_datatypes() {
        assert!(is_date_datatype("date"));
        assert!(is_date_datatype("datetime"));
        assert!(!is_date_datatype("text"));
        assert!(!is_date_datatype("numeric"));
    }

    #[test]
    fn storage_to_display() {
        assert_eq!(to_display_date("2023-01-15"), "01/15/2023");
        // Already display-shaped: unchanged.
        assert_eq!(to_display_date("01/15/2023"), "01/15/2023");
    }

    #[test]
    fn display_to_storage() {
        assert_eq!(to_storage_date("01/15/2023"), "2023-01-15");
        assert_eq!(to_storage_date("2023-01-15"), "2023-01-15");
    }

    #[test]
    fn round_trips() {
        for iso in ["2023-01-15", "1999-12-31", "0000-00-00"] {
            assert_eq!(to_storage_date(&to_display_date(iso)), iso);
        }
        for display in ["01/15/2023", "12/31/1999", "00/00/0000"] {
            assert_eq!(to_display_date(&to_storage_date(display)), display);
        }
    }

    #[test]
    fn unrecognized_shapes_pass_through() {
        for odd in [
            "2023-1-15",
            "1/15/2023",
            "2023/01/15",
            "yesterday",
            "2023-01-15T00:00:00",
            "15-01-2023x",
        ] {
            assert_eq!(to_display_date(odd), odd);
            assert_eq!(to_storage_date(odd), odd);
        }
    }

    #[test]
    fn empty_is_identity() {
        assert_eq!(to_display_date(""), "");
        assert_eq!(to_storage_date(""), "");
    }

    #[test]
    fn shape_match_is_not_calendar_validation() {
        assert_eq!(to_storage_date("13/40/2023"), "2023-13-40");
        assert_eq!(to_display_date("2023-13-40"), "13/40/2023");
    }
}
