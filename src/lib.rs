pub mod api;
pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod state;
pub mod weekday;

pub use api::{ApiClient, ApiError};
pub use app::router;
pub use calendar::{format_display, month_days, today};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::DateError;
pub use models::{CalendarDate, DayCell, DayStatus, HistoryEntry, WeekdayOption};
pub use state::AppState;
pub use weekday::{
    backend_weekday_to_js_day, js_day_to_backend_weekday, weekday_names, BackendWeekday,
    JsWeekday, WEEKDAY_OPTIONS,
};
