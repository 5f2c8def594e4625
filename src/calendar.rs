//! Calendar grid generation and date display helpers.
//!
//! Months passed to the grid functions are 0-based (`0=January..11=December`),
//! while [`CalendarDate`] and its string form stay 1-based.

use crate::clock::{Clock, SystemClock};
use crate::errors::DateError;
use crate::models::{CalendarDate, DayCell};
use chrono::{Datelike, NaiveDate};
use std::iter;

const NAN: &str = "NaN";

/// Today's date from the local wall clock.
pub fn today() -> CalendarDate {
    today_at(&SystemClock)
}

pub fn today_at(clock: &dyn Clock) -> CalendarDate {
    CalendarDate::new(clock.today())
}

/// Renders `YYYY-MM-DD` as `YYYY年M月D日`.
///
/// Nothing is validated. The year part is copied as is; month and day are
/// read as leading integers, and a part with no digits (or a missing part)
/// comes out as `NaN`. Empty input gives an empty string.
pub fn format_display(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    let mut parts = date.split('-');
    let year = parts.next().unwrap_or_default();
    let month = leading_integer(parts.next());
    let day = leading_integer(parts.next());
    format!("{year}年{month}月{day}日")
}

/// Like [`format_display`], but the input must be a real calendar date.
pub fn format_display_strict(date: &str) -> Result<String, DateError> {
    let date: CalendarDate = date.parse()?;
    Ok(format_date(date))
}

pub fn format_date(date: CalendarDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

fn leading_integer(part: Option<&str>) -> String {
    let Some(part) = part else {
        return NAN.to_string();
    };

    let part = part.trim_start();
    let (negative, rest) = match part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, part.strip_prefix('+').unwrap_or(part)),
    };

    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return NAN.to_string();
    }

    let digits = rest[..len].trim_start_matches('0');
    if digits.is_empty() {
        "0".to_string()
    } else if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

/// Number of days in a 0-based month, `None` when the month or year is out
/// of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if month > 11 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Grid cells for a 0-based month, marking today from the wall clock.
pub fn month_days(year: i32, month: u32) -> Vec<DayCell> {
    month_days_at(SystemClock.today(), year, month)
}

/// Grid cells for a 0-based month: one blank per weekday slot before the
/// 1st (weeks start on Sunday), then every day of the month in order.
///
/// A month past 11 rolls into the following years for placing the blanks,
/// but no day cells follow. A year chrono cannot represent yields no cells.
pub fn month_days_at(today: NaiveDate, year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };

    let blanks = first.weekday().num_days_from_sunday() as usize;
    let mut days = Vec::with_capacity(blanks + 31);
    days.extend(iter::repeat_with(DayCell::blank).take(blanks));

    if month > 11 {
        return days;
    }

    days.extend(
        first
            .iter_days()
            .take_while(|date| date.month0() == month)
            .map(|date| DayCell::day_of(CalendarDate::new(date), date == today)),
    );
    days
}

/// Like [`month_days_at`], but rejects months outside `0..=11` and
/// unrepresentable years.
pub fn try_month_days_at(
    today: NaiveDate,
    year: i32,
    month: u32,
) -> Result<Vec<DayCell>, DateError> {
    if month > 11 {
        return Err(DateError::MonthOutOfRange(month));
    }
    if first_of_month(year, month).is_none() {
        return Err(DateError::YearOutOfRange(year));
    }
    Ok(month_days_at(today, year, month))
}

pub fn try_month_days(year: i32, month: u32) -> Result<Vec<DayCell>, DateError> {
    try_month_days_at(SystemClock.today(), year, month)
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let year = year.checked_add(i32::try_from(month / 12).ok()?)?;
    NaiveDate::from_ymd_opt(year, month % 12 + 1, 1)
}
