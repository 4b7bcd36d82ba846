use crate::errors::AppError;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

const WEEKDAY_LABELS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_string() -> String {
    date_key(today())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

const MAX_YEAR: i32 = 9999;

/// Only four-digit years are accepted; chrono's `%Y` alone also takes
/// signed six-digit years, which overflow once shifted by a day.
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    let invalid = || AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD"));
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    if !(0..=MAX_YEAR).contains(&date.year()) {
        return Err(invalid());
    }
    Ok(date)
}

/// Monday of the Monday-to-Sunday week holding `date`. Sunday belongs to
/// the week that started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = match date.weekday() {
        Weekday::Sun => -6,
        other => 1 - i64::from(other.num_days_from_sunday()),
    };
    date + Duration::days(offset)
}

pub fn monday_of_str(value: &str) -> Result<String, AppError> {
    Ok(date_key(monday_of(parse_date(value)?)))
}

pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize]
}

pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
