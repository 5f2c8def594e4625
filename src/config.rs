use crate::clock::{Clock, FixedClock, SystemClock};
use crate::errors::DateError;
use crate::models::CalendarDate;
use std::env;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5001/api";

pub fn resolve_port() -> u16 {
    parse_port(env::var("PORT").ok().as_deref())
}

/// The system clock, unless `APP_TODAY` pins the date.
pub fn resolve_clock() -> Result<Arc<dyn Clock>, DateError> {
    match env::var("APP_TODAY") {
        Ok(value) => {
            let clock = fixed_clock(&value)?;
            info!("clock pinned to {}", clock.0);
            Ok(Arc::new(clock))
        }
        Err(_) => Ok(Arc::new(SystemClock)),
    }
}

pub fn resolve_api_base_url() -> String {
    api_base_url(env::var("API_BASE_URL").ok().as_deref())
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn api_base_url(value: Option<&str>) -> String {
    value
        .map(|value| value.trim().trim_end_matches('/'))
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

fn fixed_clock(value: &str) -> Result<FixedClock, DateError> {
    let date: CalendarDate = value.trim().parse()?;
    Ok(FixedClock(date.naive()))
}
