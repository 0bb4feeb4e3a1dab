//! Amharic rendering of dates and lenient parsing of typed input.
//!
//! Every formatter takes a Gregorian date, the type the rest of an application
//! stores, and is total: a date outside the supported Ethiopian range is
//! rendered in Gregorian ISO form instead.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use tracing::{debug, warn};

use crate::consts::{
    DATE_SEPARATOR, DAY_NAMES, ERA_MARKER, MONTH_NAMES, RELATIVE_WINDOW_DAYS, SHORT_DAY_NAMES,
    SHORT_MONTH_NAMES, SLASH_SEPARATOR, TODAY_LABEL, TOMORROW_LABEL, YESTERDAY_LABEL,
};
use crate::convert::{ethiopian_to_gregorian, gregorian_to_ethiopian, today};
use crate::{EthiopianDate, Month, Year};

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.index()]
}

pub fn short_month_name(month: Month) -> &'static str {
    SHORT_MONTH_NAMES[month.index()]
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

pub fn short_day_name(weekday: Weekday) -> &'static str {
    SHORT_DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Converts for display, falling back to ISO Gregorian text when out of range.
fn render(date: NaiveDate, f: impl FnOnce(&EthiopianDate) -> String) -> String {
    match gregorian_to_ethiopian(date) {
        Ok(ethiopian) => f(&ethiopian),
        Err(error) => {
            warn!(%date, %error, "date has no Ethiopian rendering");
            date.format("%Y-%m-%d").to_string()
        },
    }
}

fn day_month_year(date: &EthiopianDate) -> String {
    format!("{} {} {}", date.day(), date.month_name(), date.year())
}

/// `"<day> <MonthName> <year> ዓ.ም"`, the short form used in tables and lists.
pub fn format_for_table(date: NaiveDate) -> String {
    render(date, |e| format!("{} {ERA_MARKER}", day_month_year(e)))
}

/// `"<day> <MonthName> <year>"`, the form field rendering. [`parse_input`] reads it back.
pub fn format_for_form(date: NaiveDate) -> String {
    render(date, day_month_year)
}

/// `"<DayName>, <day> <MonthName> <year>"`.
///
/// The day name is looked up with the Gregorian weekday counted from Sunday,
/// applied to the Monday-first name table, so a Sunday renders as ሰኞ. Use
/// [`day_name`] with [`EthiopianDate::weekday`] for the true weekday.
pub fn format_for_card(date: NaiveDate) -> String {
    let weekday = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    render(date, |e| format!("{weekday}, {}", day_month_year(e)))
}

/// Renders a span with short month names, collapsing the parts both ends share.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    let (Ok(from), Ok(to)) = (gregorian_to_ethiopian(start), gregorian_to_ethiopian(end)) else {
        warn!(%start, %end, "date range has no Ethiopian rendering");
        return format!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
    };

    let from_month = short_month_name(from.month_typed());
    let to_month = short_month_name(to.month_typed());

    if from.year() == to.year() && from.month() == to.month() {
        format!("{}-{} {from_month} {}", from.day(), to.day(), from.year())
    } else if from.year() == to.year() {
        format!(
            "{} {from_month} - {} {to_month} {}",
            from.day(),
            to.day(),
            from.year()
        )
    } else {
        format!(
            "{} {from_month} {} - {} {to_month} {}",
            from.day(),
            from.year(),
            to.day(),
            to.year()
        )
    }
}

/// Relative phrase measured against the local calendar date.
pub fn format_relative(date: NaiveDate) -> String {
    format_relative_to(date, today())
}

/// Relative phrase measured against `today`. Dates more than a week away
/// render as day and month without the year.
pub fn format_relative_to(date: NaiveDate, today: NaiveDate) -> String {
    let days = date.signed_duration_since(today).num_days();
    match days {
        0 => TODAY_LABEL.to_owned(),
        1 => TOMORROW_LABEL.to_owned(),
        -1 => YESTERDAY_LABEL.to_owned(),
        2..=RELATIVE_WINDOW_DAYS => format!("በ {days} ቀናት ውስጥ"),
        _ if (-RELATIVE_WINDOW_DAYS..=-2).contains(&days) => format!("ከ {} ቀናት በፊት", -days),
        _ => render(date, |e| format!("{} {}", e.day(), e.month_name())),
    }
}

/// `"<MonthName> <year>"`, the heading of a month view.
pub fn format_month_year(year: Year, month: Month) -> String {
    format!("{} {year}", month_name(month))
}

pub fn format_year(year: Year) -> String {
    format!("{year} {ERA_MARKER}")
}

/// Ethiopian date followed by the 24-hour clock time.
pub fn format_date_time(date_time: NaiveDateTime) -> String {
    let time = date_time.format("%H:%M");
    render(date_time.date(), |e| format!("{} {time}", day_month_year(e)))
}

/// Zero-padded `YYYY-MM-DD` of the Ethiopian fields.
pub fn format_for_export(date: NaiveDate) -> String {
    render(date, EthiopianDate::to_string)
}

/// Reads an Ethiopian date typed by a user.
///
/// Accepted shapes, tried in order:
/// - `15 መስከረም 2016`, optionally followed by the era marker
/// - `15/1/2016`
/// - `15-1-2016`
///
/// The month may be a full name, a short name or a number in any shape.
/// Returns `None` for anything else, including days that do not exist.
pub fn parse_input(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_suffix(ERA_MARKER)
        .map_or(trimmed, str::trim_end);
    if trimmed.is_empty() {
        return None;
    }

    let parsed = parse_spaced(trimmed)
        .or_else(|| parse_separated(trimmed, SLASH_SEPARATOR))
        .or_else(|| parse_separated(trimmed, DATE_SEPARATOR));
    if parsed.is_none() {
        debug!(input = trimmed, "unrecognized date input");
    }
    parsed
}

fn parse_spaced(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    from_tokens(day, month, year)
}

fn parse_separated(text: &str, separator: char) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split(separator).map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    from_tokens(day, month, year)
}

fn from_tokens(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = day.parse::<u8>().ok()?;
    let month = resolve_month(month)?;
    let year = year.parse::<u16>().ok()?;
    ethiopian_to_gregorian(year, month, day)
        .inspect_err(|error| debug!(%error, "rejected date input"))
        .ok()
}

/// Month number from a numeral, a full name or a short name.
fn resolve_month(token: &str) -> Option<u8> {
    if let Ok(number) = token.parse::<u8>() {
        return Some(number);
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == token)
        .or_else(|| SHORT_MONTH_NAMES.iter().position(|name| *name == token))
        .and_then(|index| u8::try_from(index + 1).ok())
}

/// Example input built from the current Ethiopian date.
pub fn get_input_placeholder() -> String {
    input_placeholder_for(today())
}

pub fn input_placeholder_for(today: NaiveDate) -> String {
    format_for_form(today)
}
