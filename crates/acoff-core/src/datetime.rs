//! Date parsing and host-style date formatting.
//!
//! The host stores dates as `Y-m-d` and date-times as `Y-m-d H:i`, and
//! describes display formats with PHP `date()` tokens (`m/d/Y G:i`).
//! [`DatePattern`] translates those tokens into chrono format items once,
//! so that rendering never meets an unknown specifier.
//!
//! Supported tokens:
//!
//! | token | meaning                         |
//! |-------|---------------------------------|
//! | `d`   | day, two digits                 |
//! | `j`   | day, no padding                 |
//! | `m`   | month, two digits               |
//! | `n`   | month, no padding               |
//! | `Y`   | four-digit year                 |
//! | `y`   | two-digit year                  |
//! | `H`   | 24-hour, two digits             |
//! | `G`   | 24-hour, no padding             |
//! | `h`   | 12-hour, two digits             |
//! | `g`   | 12-hour, no padding             |
//! | `i`   | minutes                         |
//! | `s`   | seconds                         |
//! | `A`/`a` | `AM`/`am`                     |
//! | `M`/`F` | short / full month name       |
//! | `D`/`l` | short / full weekday name     |
//! | `U`   | Unix timestamp                  |
//!
//! `\` escapes the next character; everything else is copied literally.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DateError;

/// Input layouts accepted by [`parse_datetime`], most specific first.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// A display format in host date tokens, pre-translated for chrono.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
}

impl DatePattern {
    pub fn new(source: &str) -> Self {
        let mut strftime = String::with_capacity(source.len() * 2);
        let mut chars = source.chars();
        while let Some(ch) = chars.next() {
            let translated = match ch {
                'd' => "%d",
                'j' => "%-d",
                'm' => "%m",
                'n' => "%-m",
                'Y' => "%Y",
                'y' => "%y",
                'H' => "%H",
                'G' => "%-H",
                'h' => "%I",
                'g' => "%-I",
                'i' => "%M",
                's' => "%S",
                'A' => "%p",
                'a' => "%P",
                'M' => "%b",
                'F' => "%B",
                'D' => "%a",
                'l' => "%A",
                'U' => "%s",
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        push_literal(&mut strftime, escaped);
                    }
                    continue;
                }
                other => {
                    push_literal(&mut strftime, other);
                    continue;
                }
            };
            strftime.push_str(translated);
        }
        Self {
            source: source.to_string(),
            strftime,
        }
    }

    pub fn render(&self, value: &NaiveDateTime) -> String {
        value.format(&self.strftime).to_string()
    }
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses a stored date or date-time. Dates without a time are midnight.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(parsed);
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, layout) {
            return Ok(parsed.and_time(NaiveTime::MIN));
        }
    }
    Err(DateError::Unparseable(trimmed.to_string()))
}

/// Unix timestamp of a stored date, read as UTC.
pub fn unix_timestamp(input: &str) -> Result<i64, DateError> {
    parse_datetime(input).map(|parsed| parsed.and_utc().timestamp())
}

/// Formats `input` with `pattern`.
///
/// Without a pattern the input comes back unchanged. A blank or
/// unrecognized input is an error the caller has to handle.
pub fn format_date(input: &str, pattern: Option<&DatePattern>) -> Result<String, DateError> {
    let Some(pattern) = pattern else {
        return Ok(input.to_string());
    };
    let parsed = parse_datetime(input)?;
    Ok(pattern.render(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_host_tokens() {
        assert_eq!(DatePattern::new("m/d/Y G:i").strftime, "%m/%d/%Y %-H:%M");
        assert_eq!(DatePattern::new(r"\Y\e\a\r: Y").strftime, "Year: %Y");
        assert_eq!(DatePattern::new("d%").strftime, "%d%%");
    }

    #[test]
    fn date_only_inputs_are_midnight() {
        let parsed = parse_datetime("2024-03-05").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn unpadded_hour_and_twelve_hour_clock() {
        let pattern = DatePattern::new("n/j/y g:i a");
        assert_eq!(
            format_date("2024-03-05 07:04", Some(&pattern)).unwrap(),
            "3/5/24 7:04 am"
        );
    }

    #[test]
    fn unrecognized_and_blank_inputs_are_errors() {
        let pattern = DatePattern::new("m/d/Y");
        assert_eq!(
            format_date("soon", Some(&pattern)),
            Err(DateError::Unparseable("soon".to_string()))
        );
        assert_eq!(format_date("   ", Some(&pattern)), Err(DateError::Empty));
        assert_eq!(unix_timestamp(""), Err(DateError::Empty));
    }

    #[test]
    fn pattern_displays_host_tokens() {
        assert_eq!(DatePattern::new("m/d/Y G:i").to_string(), "m/d/Y G:i");
    }

    #[test]
    fn missing_pattern_passes_input_through() {
        assert_eq!(format_date("whenever", None).unwrap(), "whenever");
    }
}
