//! The two weekday numberings in use and the conversions between them.
//!
//! The front end counts from Sunday (`0=Sunday..6=Saturday`); the backend
//! counts from Monday (`0=Monday..6=Sunday`). Keeping them as separate types
//! means a value can only cross over through [`js_day_to_backend_weekday`] or
//! [`backend_weekday_to_js_day`].

use crate::errors::DateError;
use crate::models::WeekdayOption;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const DAY_NAMES: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];
const NO_DAYS: &str = "无";

/// Sunday-based weekday number, `0=Sunday..6=Saturday`.
///
/// The wrapped value is not range checked; use [`JsWeekday::new`] to reject
/// anything outside `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsWeekday(pub i32);

/// Monday-based weekday number, `0=Monday..6=Sunday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendWeekday(pub i32);

impl JsWeekday {
    pub const SUNDAY: Self = Self(0);

    pub fn new(value: i32) -> Result<Self, DateError> {
        if (0..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DateError::WeekdayOutOfRange(value))
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn to_backend(self) -> BackendWeekday {
        js_day_to_backend_weekday(self)
    }

    /// Localized name, `None` outside `0..=6`.
    pub fn name(self) -> Option<&'static str> {
        usize::try_from(self.0)
            .ok()
            .and_then(|index| DAY_NAMES.get(index))
            .copied()
    }
}

impl BackendWeekday {
    pub const SUNDAY: Self = Self(6);

    pub fn new(value: i32) -> Result<Self, DateError> {
        if (0..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DateError::WeekdayOutOfRange(value))
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn to_js(self) -> JsWeekday {
        backend_weekday_to_js_day(self)
    }
}

impl From<Weekday> for JsWeekday {
    fn from(day: Weekday) -> Self {
        Self(day.num_days_from_sunday() as i32)
    }
}

impl From<Weekday> for BackendWeekday {
    fn from(day: Weekday) -> Self {
        Self(day.num_days_from_monday() as i32)
    }
}

/// `0 (Sun) -> 6`, otherwise `day - 1`. Out-of-range input is shifted the
/// same way.
pub fn js_day_to_backend_weekday(day: JsWeekday) -> BackendWeekday {
    if day == JsWeekday::SUNDAY {
        BackendWeekday::SUNDAY
    } else {
        BackendWeekday(day.0.wrapping_sub(1))
    }
}

/// `6 (Sun) -> 0`, otherwise `day + 1`.
pub fn backend_weekday_to_js_day(day: BackendWeekday) -> JsWeekday {
    if day == BackendWeekday::SUNDAY {
        JsWeekday::SUNDAY
    } else {
        JsWeekday(day.0.wrapping_add(1))
    }
}

/// Day-of-week picker entries, Monday first and Sunday last.
pub const WEEKDAY_OPTIONS: [WeekdayOption; 7] = [
    WeekdayOption { name: "周一", value: JsWeekday(1) },
    WeekdayOption { name: "周二", value: JsWeekday(2) },
    WeekdayOption { name: "周三", value: JsWeekday(3) },
    WeekdayOption { name: "周四", value: JsWeekday(4) },
    WeekdayOption { name: "周五", value: JsWeekday(5) },
    WeekdayOption { name: "周六", value: JsWeekday(6) },
    WeekdayOption { name: "周日", value: JsWeekday(0) },
];

/// Joins the names of `days` with `", "` in the given order. Numbers
/// outside `0..=6` are skipped; an empty or absent list reads `无`.
pub fn weekday_names(days: Option<&[JsWeekday]>) -> String {
    let days = match days {
        Some(days) if !days.is_empty() => days,
        _ => return NO_DAYS.to_string(),
    };

    days.iter()
        .filter_map(|day| day.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Like [`weekday_names`], but fails on the first out-of-range number.
pub fn weekday_names_strict(days: &[JsWeekday]) -> Result<String, DateError> {
    if days.is_empty() {
        return Ok(NO_DAYS.to_string());
    }

    let names = days
        .iter()
        .map(|day| day.name().ok_or(DateError::WeekdayOutOfRange(day.0)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.join(", "))
}
