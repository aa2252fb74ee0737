use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

const DAY_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d-%b-%Y", "%d %b %Y",
];

/// Chrono's `%Y` also takes short years, so the date part must carry four digits.
static FULL_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)\d{4}(?:\D|$)").expect("Invalid year regex"));

/// Parses a calendar date, reading ambiguous numeric forms day-first.
///
/// Accepts `dd/mm/yyyy`, `dd-mm-yyyy`, `dd.mm.yyyy`, `yyyy-mm-dd`,
/// `dd-Mon-yyyy` and `dd Mon yyyy`. A trailing time component is ignored.
/// Two-digit years are rejected. Returns `None` for anything else.
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim().trim_matches('"').trim();
    if text.is_empty() {
        return None;
    }
    DAY_FIRST_FORMATS.iter().find_map(|format| {
        let (date, rest) = NaiveDate::parse_and_remainder(text, format).ok()?;
        let date_part = &text[..text.len() - rest.len()];
        (is_time_suffix(rest) && FULL_YEAR.is_match(date_part)).then_some(date)
    })
}

fn is_time_suffix(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with([' ', 'T', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn day_first_numeric_forms() {
        assert_eq!(parse_day_first_date("01/03/2024"), ymd(2024, 3, 1));
        assert_eq!(parse_day_first_date("31-03-2024"), ymd(2024, 3, 31));
        assert_eq!(parse_day_first_date("5.11.2023"), ymd(2023, 11, 5));
        assert_eq!(parse_day_first_date("1/3/2024"), ymd(2024, 3, 1));
    }

    #[test]
    fn iso_and_month_names() {
        assert_eq!(parse_day_first_date("2024-03-01"), ymd(2024, 3, 1));
        assert_eq!(parse_day_first_date("07-Jan-2024"), ymd(2024, 1, 7));
        assert_eq!(parse_day_first_date("07 jan 2024"), ymd(2024, 1, 7));
    }

    #[test]
    fn trailing_time_is_ignored() {
        assert_eq!(parse_day_first_date("01/03/2024 10:45"), ymd(2024, 3, 1));
        assert_eq!(parse_day_first_date("2024-03-01T00:00:00"), ymd(2024, 3, 1));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_day_first_date(""), None);
        assert_eq!(parse_day_first_date("N/A"), None);
        assert_eq!(parse_day_first_date("31/02/2024"), None);
        assert_eq!(parse_day_first_date("01/03/2024abc"), None);
    }

    #[test]
    fn two_digit_years_are_rejected() {
        assert_eq!(parse_day_first_date("05/03/24"), None);
        assert_eq!(parse_day_first_date("05-03-24 10:00"), None);
        assert_eq!(parse_day_first_date("07-Jan-24"), None);
        assert_eq!(parse_day_first_date("24-03-05"), None);
    }
}
