use crate::calendar::{format_date, format_display, today_at, try_month_days_at};
use crate::errors::AppError;
use crate::history::apply_history;
use crate::models::{
    CalendarQuery, CalendarResponse, CalendarStatusRequest, ConvertQuery, ConvertResponse,
    DisplayQuery, DisplayResponse, NamesQuery, NamesResponse, TodayResponse, WeekdayOption,
};
use crate::state::AppState;
use crate::weekday::{weekday_names, BackendWeekday, JsWeekday, WEEKDAY_OPTIONS};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::debug;

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let date = today_at(state.clock.as_ref());
    Json(TodayResponse {
        display: format_date(date),
        date,
    })
}

pub async fn get_calendar(
    State(state): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>, AppError> {
    let Query(query) = query?;
    let days = try_month_days_at(state.clock.today(), query.year, query.month)?;
    debug!(year = query.year, month = query.month, cells = days.len(), "built month grid");

    Ok(Json(CalendarResponse {
        year: query.year,
        month: query.month,
        days,
    }))
}

pub async fn calendar_status(
    State(state): State<AppState>,
    payload: Result<Json<CalendarStatusRequest>, JsonRejection>,
) -> Result<Json<CalendarResponse>, AppError> {
    let Json(payload) = payload?;
    let mut days = try_month_days_at(state.clock.today(), payload.year, payload.month)?;
    apply_history(&mut days, &payload.history);

    Ok(Json(CalendarResponse {
        year: payload.year,
        month: payload.month,
        days,
    }))
}

pub async fn get_weekdays() -> Json<[WeekdayOption; 7]> {
    Json(WEEKDAY_OPTIONS)
}

pub async fn get_weekday_names(
    query: Result<Query<NamesQuery>, QueryRejection>,
) -> Result<Json<NamesResponse>, AppError> {
    let Query(query) = query?;
    let days = query.days.as_deref().map(parse_day_list).transpose()?;
    Ok(Json(NamesResponse {
        names: weekday_names(days.as_deref()),
    }))
}

pub async fn convert_weekday(
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<ConvertResponse>, AppError> {
    let Query(query) = query?;
    let (js, backend) = match (query.js, query.backend) {
        (Some(js), None) => (JsWeekday(js), JsWeekday(js).to_backend()),
        (None, Some(backend)) => (BackendWeekday(backend).to_js(), BackendWeekday(backend)),
        _ => return Err(AppError::bad_request("provide exactly one of 'js' or 'backend'")),
    };

    Ok(Json(ConvertResponse {
        js: js.get(),
        backend: backend.get(),
    }))
}

pub async fn get_display_date(
    query: Result<Query<DisplayQuery>, QueryRejection>,
) -> Result<Json<DisplayResponse>, AppError> {
    let Query(query) = query?;
    Ok(Json(DisplayResponse {
        display: format_display(query.date.as_deref().unwrap_or_default()),
    }))
}

fn parse_day_list(raw: &str) -> Result<Vec<JsWeekday>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i32>()
                .map(JsWeekday)
                .map_err(|_| AppError::bad_request(format!("invalid weekday number {token:?}")))
        })
        .collect()
}
