use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/status", post(handlers::calendar_status))
        .route("/api/weekdays", get(handlers::get_weekdays))
        .route("/api/weekdays/names", get(handlers::get_weekday_names))
        .route("/api/weekdays/convert", get(handlers::convert_weekday))
        .route("/api/display-date", get(handlers::get_display_date))
        .with_state(state)
}
