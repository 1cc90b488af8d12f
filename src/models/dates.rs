//! Date parsing and the two display formats used in responses

use chrono::{Datelike, NaiveDate, Weekday};

use crate::validation::ISO8601;

/// Placeholder rendered when a submitted date could not be parsed
pub const INVALID_DATE: &str = "Invalid date";

/// Parse an ISO-8601 date, with or without a time part, into the calendar
/// day it names. Reduced precision maps to the first day of the period and
/// a week without a weekday maps to its Monday.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let caps = ISO8601.captures(value.trim())?;
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let number = |names: &[&str]| -> Option<u32> {
        names
            .iter()
            .find_map(|name| caps.name(name))
            .and_then(|m| m.as_str().parse().ok())
    };

    if let Some(week) = number(&["week", "bweek"]) {
        let weekday = match number(&["wday", "bwday"]).unwrap_or(1) {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        };
        return NaiveDate::from_isoywd_opt(year, week, weekday);
    }
    if let Some(ordinal) = number(&["ordinal"]) {
        return NaiveDate::from_yo_opt(year, ordinal);
    }

    let month = number(&["month", "bmonth"]).unwrap_or(1);
    let day = number(&["day", "bday"]).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YYYY-MM-DD`, or an empty string when there is no date
pub fn format_iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Long form such as `June 1st 2021`, or an empty string when there is no date
pub fn format_long(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(
            "{} {}{} {}",
            d.format("%B"),
            d.day(),
            ordinal_suffix(d.day()),
            d.year()
        ),
        None => String::new(),
    }
}

/// Render raw form input the way the unsaved entity echoes it back
pub fn echo_input(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(s) => match parse_iso8601(s) {
            Some(d) => format_iso(Some(d)),
            None => INVALID_DATE.to_string(),
        },
    }
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
