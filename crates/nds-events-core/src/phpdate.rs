//! Rendering of datetimes with PHP `date()` patterns.
//!
//! Event dates are shown on the site with the same pattern the date picker
//! is configured from, so this renderer understands every token the
//! [`datepicker`](crate::datepicker) translator does, plus the remaining
//! timezone and full-date tokens. Values typed back into the meta box are
//! read with [`parse_php_date`] and [`parse_php_time`].

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};
use thiserror::Error;

use crate::datepicker::{ESCAPE, TranslateError};
use crate::settings::SiteSettings;

/// Errors produced while reading a value written in a PHP `date()` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error(transparent)]
    Format(#[from] TranslateError),

    /// The pattern uses a token that cannot be read back, such as `S`.
    #[error("format token {token:?} at position {position} cannot be parsed")]
    UnsupportedToken { token: char, position: usize },

    /// The value does not match the pattern.
    #[error("{value:?} does not match format {format:?}: {source}")]
    Mismatch {
        value: String,
        format: String,
        source: chrono::ParseError,
    },
}

/// Renders `dt` according to a PHP `date()` pattern.
///
/// Characters that are not tokens are copied as-is; `\x` copies `x`.
///
/// # Errors
///
/// Returns [`TranslateError::TrailingEscape`] if the pattern ends with a
/// lone `\`.
pub fn format_php_date<Tz>(dt: &DateTime<Tz>, format: &str) -> Result<String, TranslateError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(format.len() * 3);
    let mut chars = format.char_indices();

    while let Some((position, c)) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some((_, literal)) => out.push(literal),
                None => return Err(TranslateError::TrailingEscape { position }),
            }
            continue;
        }
        match render_token(dt, c) {
            Some(rendered) => out.push_str(&rendered),
            None => out.push(c),
        }
    }

    Ok(out)
}

/// Renders the site's date and time formats separated by a space.
pub fn format_date_time<Tz>(
    dt: &DateTime<Tz>,
    settings: &SiteSettings,
) -> Result<String, TranslateError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(format!(
        "{} {}",
        format_php_date(dt, &settings.date_format)?,
        format_php_date(dt, &settings.time_format)?
    ))
}

/// Reads a date written with a PHP `date()` pattern.
///
/// # Errors
///
/// Fails if the pattern cannot be read back or the value does not match it.
pub fn parse_php_date(value: &str, format: &str) -> Result<NaiveDate, DateParseError> {
    let pattern = php_to_strftime(format)?;
    NaiveDate::parse_from_str(value.trim(), &pattern).map_err(|source| DateParseError::Mismatch {
        value: value.to_string(),
        format: format.to_string(),
        source,
    })
}

/// Reads a time of day written with a PHP `date()` pattern.
///
/// # Errors
///
/// Fails if the pattern cannot be read back or the value does not match it.
pub fn parse_php_time(value: &str, format: &str) -> Result<NaiveTime, DateParseError> {
    let pattern = php_to_strftime(format)?;
    NaiveTime::parse_from_str(value.trim(), &pattern).map_err(|source| DateParseError::Mismatch {
        value: value.to_string(),
        format: format.to_string(),
        source,
    })
}

/// Tokens that render fine but carry nothing chrono can read back.
const UNREADABLE_TOKENS: &str = "NSwzWtLoBuveITZcr";

/// Rewrites a PHP pattern as a chrono parsing pattern.
///
/// chrono reads one or two digits for the numeric fields, so `d`/`j` and
/// `m`/`n` share a specifier, as do `g`/`h` and `G`/`H`.
fn php_to_strftime(format: &str) -> Result<String, DateParseError> {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.char_indices();

    while let Some((position, c)) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some((_, literal)) => push_literal(&mut out, literal),
                None => return Err(TranslateError::TrailingEscape { position }.into()),
            }
            continue;
        }
        let spec = match c {
            'd' | 'j' => "%d",
            'D' => "%a",
            'l' => "%A",
            'F' => "%B",
            'M' => "%b",
            'm' | 'n' => "%m",
            'Y' => "%Y",
            'y' => "%y",
            'a' | 'A' => "%p",
            'g' | 'h' => "%I",
            'G' | 'H' => "%H",
            'i' => "%M",
            's' => "%S",
            'O' => "%z",
            'P' => "%:z",
            'U' => "%s",
            _ if UNREADABLE_TOKENS.contains(c) => {
                return Err(DateParseError::UnsupportedToken { token: c, position });
            }
            _ => {
                push_literal(&mut out, c);
                continue;
            }
        };
        out.push_str(spec);
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn render_token<Tz>(dt: &DateTime<Tz>, token: char) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rendered = match token {
        // Day
        'd' => format!("{:02}", dt.day()),
        'D' => dt.format("%a").to_string(),
        'j' => dt.day().to_string(),
        'l' => dt.format("%A").to_string(),
        'N' => dt.weekday().number_from_monday().to_string(),
        'S' => ordinal_suffix(dt.day()).to_string(),
        'w' => dt.weekday().num_days_from_sunday().to_string(),
        'z' => dt.ordinal0().to_string(),
        // Week
        'W' => format!("{:02}", dt.iso_week().week()),
        // Month
        'F' => dt.format("%B").to_string(),
        'm' => format!("{:02}", dt.month()),
        'M' => dt.format("%b").to_string(),
        'n' => dt.month().to_string(),
        't' => days_in_month(dt.year(), dt.month()).to_string(),
        // Year
        'L' => u8::from(is_leap_year(dt.year())).to_string(),
        'o' => dt.iso_week().year().to_string(),
        'Y' => format!("{:04}", dt.year()),
        'y' => format!("{:02}", dt.year().rem_euclid(100)),
        // Time
        'a' => (if dt.hour() < 12 { "am" } else { "pm" }).to_string(),
        'A' => (if dt.hour() < 12 { "AM" } else { "PM" }).to_string(),
        'B' => swatch_beat(dt),
        'g' => dt.hour12().1.to_string(),
        'G' => dt.hour().to_string(),
        'h' => format!("{:02}", dt.hour12().1),
        'H' => format!("{:02}", dt.hour()),
        'i' => format!("{:02}", dt.minute()),
        's' => format!("{:02}", dt.second()),
        'u' => format!("{:06}", dt.nanosecond() % 1_000_000_000 / 1_000),
        'v' => format!("{:03}", dt.nanosecond() % 1_000_000_000 / 1_000_000),
        // Timezone
        'e' | 'T' => dt.offset().to_string(),
        'I' => "0".to_string(),
        'O' => dt.format("%z").to_string(),
        'P' => dt.format("%:z").to_string(),
        'Z' => dt.offset().fix().local_minus_utc().to_string(),
        // Full date/time
        'c' => dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        'r' => dt.format("%a, %d %b %Y %H:%M:%S %z").to_string(),
        'U' => dt.timestamp().to_string(),
        _ => return None,
    };
    Some(rendered)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(28)
}

/// Swatch Internet Time, measured from UTC+1.
fn swatch_beat<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let seconds = (dt.timestamp() + 3600).rem_euclid(86_400);
    format!("{:03}", seconds * 10 / 864)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 2, 27, 22, 52, 7).unwrap()
    }

    #[test]
    fn default_site_formats() {
        let dt = sample();
        assert_eq!(format_php_date(&dt, "F j, Y").unwrap(), "February 27, 2014");
        assert_eq!(format_php_date(&dt, "g:i a").unwrap(), "10:52 pm");
        assert_eq!(
            format_date_time(&dt, &SiteSettings::default()).unwrap(),
            "February 27, 2014 10:52 pm"
        );
    }

    #[test]
    fn day_tokens() {
        let dt = sample();
        assert_eq!(format_php_date(&dt, "d D j l N w z").unwrap(), "27 Thu 27 Thursday 4 4 57");
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn month_and_year_tokens() {
        let dt = sample();
        assert_eq!(format_php_date(&dt, "F m M n t").unwrap(), "February 02 Feb 2 28");
        assert_eq!(format_php_date(&dt, "L o Y y W").unwrap(), "0 2014 2014 14 09");

        let leap = Utc.with_ymd_and_hms(2016, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(format_php_date(&leap, "L t").unwrap(), "1 29");
    }

    #[test]
    fn iso_year_differs_at_year_boundary() {
        let dt = Utc.with_ymd_and_hms(2014, 12, 29, 0, 0, 0).unwrap();
        assert_eq!(format_php_date(&dt, "o-W Y").unwrap(), "2015-01 2014");
    }

    #[test]
    fn time_tokens() {
        let dt = sample();
        assert_eq!(format_php_date(&dt, "a A g G h H i s").unwrap(), "pm PM 10 22 10 22 52 07");

        let morning = Utc.with_ymd_and_hms(2014, 2, 27, 0, 5, 9).unwrap();
        assert_eq!(format_php_date(&morning, "g:i A").unwrap(), "12:05 AM");
        assert_eq!(format_php_date(&morning, "G:i").unwrap(), "0:05");
    }

    #[test]
    fn swatch_time() {
        let midnight_bmt = Utc.with_ymd_and_hms(2014, 2, 26, 23, 0, 0).unwrap();
        assert_eq!(format_php_date(&midnight_bmt, "B").unwrap(), "000");
        let noon_utc = Utc.with_ymd_and_hms(2014, 2, 27, 12, 0, 0).unwrap();
        assert_eq!(format_php_date(&noon_utc, "B").unwrap(), "541");
    }

    #[test]
    fn timezone_tokens() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = sample().with_timezone(&offset);
        assert_eq!(format_php_date(&dt, "O P Z").unwrap(), "+0200 +02:00 7200");
        assert_eq!(format_php_date(&dt, "c").unwrap(), "2014-02-28T00:52:07+02:00");
        assert_eq!(format_php_date(&dt, "r").unwrap(), "Fri, 28 Feb 2014 00:52:07 +0200");
        assert_eq!(format_php_date(&dt, "U").unwrap(), "1393541527");
    }

    #[test]
    fn escapes_are_literal() {
        let dt = sample();
        assert_eq!(format_php_date(&dt, r"j \o\f F").unwrap(), "27 of February");
        assert_eq!(format_php_date(&dt, r"\\Y").unwrap(), r"\2014");
    }

    #[test]
    fn trailing_escape_is_an_error() {
        assert_eq!(
            format_php_date(&sample(), r"Y\"),
            Err(TranslateError::TrailingEscape { position: 1 })
        );
    }

    #[test]
    fn reads_default_site_formats() {
        assert_eq!(
            parse_php_date("March 3, 2014", "F j, Y").unwrap(),
            NaiveDate::from_ymd_opt(2014, 3, 3).unwrap()
        );
        assert_eq!(
            parse_php_time("6:30 pm", "g:i a").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert_eq!(
            parse_php_time("12:00 am", "g:i a").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn reads_what_it_renders() {
        let dt = sample();
        let date = format_php_date(&dt, "D, d M Y").unwrap();
        let time = format_php_date(&dt, "H:i:s").unwrap();
        assert_eq!(parse_php_date(&date, "D, d M Y").unwrap(), dt.date_naive());
        assert_eq!(parse_php_time(&time, "H:i:s").unwrap(), dt.time());
    }

    #[test]
    fn reads_numeric_and_escaped_patterns() {
        let expected = NaiveDate::from_ymd_opt(2014, 3, 3).unwrap();
        assert_eq!(parse_php_date("2014-03-03", "Y-m-d").unwrap(), expected);
        assert_eq!(parse_php_date("3/3/14", "n/j/y").unwrap(), expected);
        assert_eq!(parse_php_date("3 of March 2014", r"j \o\f F Y").unwrap(), expected);
        assert_eq!(parse_php_date("100% 2014-03-03", "100% Y-m-d").unwrap(), expected);
    }

    #[test]
    fn unreadable_tokens_are_rejected() {
        assert_eq!(
            parse_php_date("3rd March 2014", "jS F Y"),
            Err(DateParseError::UnsupportedToken { token: 'S', position: 1 })
        );
        assert_eq!(
            parse_php_date("2014", r"Y\"),
            Err(DateParseError::Format(TranslateError::TrailingEscape { position: 1 }))
        );
    }

    #[test]
    fn mismatched_value_is_an_error() {
        let err = parse_php_date("tomorrow", "F j, Y").unwrap_err();
        assert!(matches!(err, DateParseError::Mismatch { ref value, .. } if value == "tomorrow"));
    }

    #[test]
    fn non_tokens_pass_through() {
        assert_eq!(format_php_date(&sample(), "Y/m/d @ H:i").unwrap(), "2014/02/27 @ 22:52");
    }
}
