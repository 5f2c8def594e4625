use crate::errors::DateError;
use crate::weekday::JsWeekday;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A valid Gregorian date, written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// `month` is 1-based here, as in the canonical string.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidDate(s.to_string());
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
        // chrono also takes unpadded fields, signs and padding spaces.
        let date = Self(date);
        if date.to_string() != s {
            return Err(invalid());
        }
        Ok(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Leading blank before day 1.
    Empty,
    /// No per-day data applied yet.
    Pending,
    Completed,
    Partial,
    Missed,
    /// Nothing was scheduled that day.
    Rest,
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: Option<u32>,
    pub date: Option<CalendarDate>,
    pub is_current_month: bool,
    pub is_today: bool,
    pub status: DayStatus,
}

impl DayCell {
    pub fn blank() -> Self {
        Self {
            day: None,
            date: None,
            is_current_month: false,
            is_today: false,
            status: DayStatus::Empty,
        }
    }

    pub fn day_of(date: CalendarDate, is_today: bool) -> Self {
        Self {
            day: Some(date.day()),
            date: Some(date),
            is_current_month: true,
            is_today,
            status: DayStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayOption {
    pub name: &'static str,
    pub value: JsWeekday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_id: i64,
    pub task_name: String,
    pub is_completed: bool,
}

/// One day of task history as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: CalendarDate,
    pub total_active_tasks: u32,
    pub completed_count: u32,
    #[serde(default)]
    pub tasks_status: Vec<TaskStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: CalendarDate,
    pub display: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct CalendarStatusRequest {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Deserialize)]
pub struct NamesQuery {
    pub days: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NamesResponse {
    pub names: String,
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub js: Option<i32>,
    pub backend: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub js: i32,
    pub backend: i32,
}

#[derive(Debug, Deserialize)]
pub struct DisplayQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub display: String,
}
