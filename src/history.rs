use crate::models::{CalendarDate, DayCell, DayStatus, HistoryEntry};
use std::collections::BTreeMap;

impl DayStatus {
    pub fn from_counts(total: u32, completed: u32) -> Self {
        if total == 0 {
            DayStatus::Rest
        } else if completed >= total {
            DayStatus::Completed
        } else if completed == 0 {
            DayStatus::Missed
        } else {
            DayStatus::Partial
        }
    }
}

impl HistoryEntry {
    pub fn status(&self) -> DayStatus {
        DayStatus::from_counts(self.total_active_tasks, self.completed_count)
    }

    /// Completed share in percent with one decimal, `"0.0"` when nothing was
    /// scheduled.
    pub fn completion_rate(&self) -> String {
        if self.total_active_tasks == 0 {
            return "0.0".to_string();
        }
        let rate = f64::from(self.completed_count) / f64::from(self.total_active_tasks) * 100.0;
        format!("{rate:.1}")
    }
}

/// Replaces the placeholder status of every day that has a history entry.
/// Blank cells are left alone; when a date appears twice the later entry
/// wins.
pub fn apply_history(cells: &mut [DayCell], history: &[HistoryEntry]) {
    let by_date: BTreeMap<CalendarDate, &HistoryEntry> =
        history.iter().map(|entry| (entry.date, entry)).collect();

    for cell in cells.iter_mut().filter(|cell| cell.is_current_month) {
        if let Some(entry) = cell.date.and_then(|date| by_date.get(&date)) {
            cell.status = entry.status();
        }
    }
}
