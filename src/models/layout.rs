//! Timestamp layouts
//!
//! A layout describes how the timestamp at the start of a log line is written.
//! Three spellings are accepted and normalized to a chrono strftime pattern:
//!
//! - strftime patterns, e.g. `%Y-%m-%d %H:%M:%S`
//! - reference-date layouts, e.g. `2006-01-02 15:04:05`
//! - token layouts, e.g. `YYYY-MM-DD HH:MM:SS`

use std::fmt::{self, Write};

use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CleanerError, CleanerResult};

/// Reference-date tokens, longest first so that `.000000` wins over `.000`
const REFERENCE_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("06", "%y"),
    ("01", "%m"),
    ("02", "%d"),
    ("15", "%H"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("PM", "%p"),
];

/// A parsed timestamp layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLayout {
    /// The layout as the user wrote it
    source: String,
    /// Equivalent strftime pattern
    pattern: String,
    /// Byte width of a timestamp rendered with this layout
    width: usize,
}

impl DateLayout {
    /// Parse a layout string in any of the supported spellings
    pub fn new(layout: &str) -> CleanerResult<Self> {
        if layout.trim().is_empty() {
            return Err(CleanerError::Validation("date layout is empty".into()));
        }

        let pattern = if layout.contains('%') {
            layout.to_string()
        } else if is_token_layout(layout) {
            translate_tokens(layout)
        } else {
            translate_reference(layout)
        };

        if !pattern.contains('%') {
            return Err(CleanerError::Validation(format!(
                "date layout '{}' contains no date or time fields",
                layout
            )));
        }

        let width = rendered_width(&pattern).map_err(|_| {
            CleanerError::Validation(format!("date layout '{}' is not a valid layout", layout))
        })?;

        Ok(Self {
            source: layout.to_string(),
            pattern,
            width,
        })
    }

    /// The layout as originally written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The strftime pattern used for parsing
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of leading bytes inspected when matching a line
    pub fn width(&self) -> usize {
        self.width
    }

    /// Parse a complete timestamp string against this layout.
    ///
    /// Fields the layout leaves out are filled in individually: a missing
    /// year becomes year 0, a missing month or day becomes 1 and a missing
    /// time becomes midnight. A yearless `Jan 02 15:04:05` layout therefore
    /// still orders timestamps by month and day.
    pub fn parse_timestamp(&self, text: &str) -> Option<NaiveDateTime> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.pattern)).ok()?;

        if let Ok(datetime) = parsed.to_naive_datetime_with_offset(0) {
            return Some(datetime);
        }

        let date = complete_date(&parsed)?;
        let time = complete_time(&parsed)?;
        Some(date.and_time(time))
    }

    /// Extract the timestamp at the start of a line, if there is one
    pub fn leading_timestamp(&self, line: &str) -> Option<NaiveDateTime> {
        if line.len() < self.width {
            return None;
        }
        // A prefix that splits a multi-byte character cannot be a timestamp
        let prefix = line.get(..self.width)?;
        self.parse_timestamp(prefix)
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Build the date from the parsed fields, defaulting the ones the layout lacks.
/// Week-based fields are not completed and the weekday is not checked.
fn complete_date(parsed: &Parsed) -> Option<NaiveDate> {
    let mut filled = Parsed::new();

    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some();
    if has_year {
        if let Some(year) = parsed.year() {
            filled.set_year(year.into()).ok()?;
        }
        if let Some(century) = parsed.year_div_100() {
            filled.set_year_div_100(century.into()).ok()?;
        }
        if let Some(year) = parsed.year_mod_100() {
            filled.set_year_mod_100(year.into()).ok()?;
        }
    } else {
        filled.set_year(0).ok()?;
    }

    if let Some(ordinal) = parsed.ordinal() {
        filled.set_ordinal(ordinal.into()).ok()?;
    } else {
        filled.set_month(parsed.month().unwrap_or(1).into()).ok()?;
        filled.set_day(parsed.day().unwrap_or(1).into()).ok()?;
    }

    filled.to_naive_date().ok()
}

/// Build the time of day; a 12-hour clock without AM/PM reads as AM
fn complete_time(parsed: &Parsed) -> Option<NaiveTime> {
    let hour = parsed.hour_div_12().unwrap_or(0) * 12 + parsed.hour_mod_12().unwrap_or(0);
    NaiveTime::from_hms_nano_opt(
        hour,
        parsed.minute().unwrap_or(0),
        parsed.second().unwrap_or(0),
        parsed.nanosecond().unwrap_or(0),
    )
}

fn is_token_layout(layout: &str) -> bool {
    ["YY", "DD", "HH"].iter().any(|token| layout.contains(token))
}

/// Translate `YYYY-MM-DD HH:MM:SS` style layouts.
///
/// `MM` means month until an hour token has been seen, minutes afterwards.
fn translate_tokens(layout: &str) -> String {
    let mut pattern = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    let mut seen_hour = false;

    while !rest.is_empty() {
        let (replacement, consumed) = if rest.starts_with("YYYY") {
            ("%Y", 4)
        } else if rest.starts_with("YY") {
            ("%y", 2)
        } else if rest.starts_with("MM") {
            (if seen_hour { "%M" } else { "%m" }, 2)
        } else if rest.starts_with("DD") {
            ("%d", 2)
        } else if rest.starts_with("HH") {
            seen_hour = true;
            ("%H", 2)
        } else if rest.starts_with("mm") {
            ("%M", 2)
        } else if rest.starts_with("SS") || rest.starts_with("ss") {
            ("%S", 2)
        } else {
            push_literal(&mut pattern, &mut rest);
            continue;
        };
        pattern.push_str(replacement);
        rest = &rest[consumed..];
    }

    pattern
}

/// Translate `2006-01-02 15:04:05` style reference layouts
fn translate_reference(layout: &str) -> String {
    let mut pattern = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    'outer: while !rest.is_empty() {
        for (token, replacement) in REFERENCE_TOKENS {
            if let Some(remaining) = rest.strip_prefix(token) {
                pattern.push_str(replacement);
                rest = remaining;
                continue 'outer;
            }
        }
        push_literal(&mut pattern, &mut rest);
    }

    pattern
}

/// Copy the next character verbatim, escaping `%`
fn push_literal(pattern: &mut String, rest: &mut &str) {
    let mut chars = rest.chars();
    if let Some(c) = chars.next() {
        if c == '%' {
            pattern.push_str("%%");
        } else {
            pattern.push(c);
        }
    }
    *rest = chars.as_str();
}

fn rendered_width(pattern: &str) -> Result<usize, fmt::Error> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(fmt::Error);
    }

    let reference = NaiveDate::from_ymd_opt(2006, 1, 2)
        .and_then(|date| date.and_hms_milli_opt(15, 4, 5, 0))
        .ok_or(fmt::Error)?;

    let mut rendered = String::new();
    write!(rendered, "{}", reference.format_with_items(items.into_iter()))?;
    Ok(rendered.len())
}
