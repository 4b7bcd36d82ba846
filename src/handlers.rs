use crate::dates::{date_key, monday_of, parse_date, today, week_dates, week_label};
use crate::errors::AppError;
use crate::models::{
    CompletionRequest, Member, MemberId, RenameRequest, Report, ReportRequest, ReportSet,
    SaveAllRequest, SaveAllResponse, TodayResponse, WeekResponse,
};
use crate::repository::{self, load_members, load_report_set, load_week};
use crate::state::AppState;
use crate::summary::build_week_summary;
use crate::ui::render_view;
use crate::view::{build_view, Mode, ViewState};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    fn resolve(&self) -> Result<NaiveDate, AppError> {
        match self.date.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_date(value),
            _ => Ok(today()),
        }
    }
}

pub async fn index() -> Redirect {
    Redirect::to(Mode::Daily.path())
}

pub async fn daily_page(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Html<String>, AppError> {
    render_page(&state, Mode::Daily, query.resolve()?).await
}

pub async fn weekly_page(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Html<String>, AppError> {
    render_page(&state, Mode::Weekly, query.resolve()?).await
}

async fn render_page(state: &AppState, mode: Mode, date: NaiveDate) -> Result<Html<String>, AppError> {
    let today = today();
    let view = state
        .read(|store| {
            let members = load_members(store);
            build_view(&members, &ViewState::load(store, mode, date), today)
        })
        .await;
    Ok(Html(render_view(&view)))
}

pub async fn get_today() -> Json<TodayResponse> {
    let date = today();
    Json(TodayResponse {
        date: date_key(date),
        monday: date_key(monday_of(date)),
    })
}

pub async fn get_members(State(state): State<AppState>) -> Json<Vec<Member>> {
    Json(state.read(load_members).await)
}

pub async fn rename_member(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<Member>, AppError> {
    let member = state
        .update(|store| repository::rename_member(store, MemberId::new(id), &payload.name))
        .await?;
    Ok(Json(member))
}

pub async fn get_reports(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ReportSet>, AppError> {
    let date = parse_date(&date)?;
    Ok(Json(state.read(|store| load_report_set(store, date)).await))
}

pub async fn save_report(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, usize)>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<Report>, AppError> {
    let date = parse_date(&date)?;
    let report = Report::new(payload.content, payload.done);
    let saved = state
        .update(|store| repository::save_report(store, date, MemberId::new(id), report))
        .await?;
    Ok(Json(saved))
}

pub async fn set_completion(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, usize)>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<Report>, AppError> {
    let date = parse_date(&date)?;
    let saved = state
        .update(|store| {
            repository::set_completion(store, date, MemberId::new(id), payload.done, &payload.content)
        })
        .await?;
    Ok(Json(saved))
}

pub async fn save_all(
    State(state): State<AppState>,
    Json(payload): Json<SaveAllRequest>,
) -> Result<Json<SaveAllResponse>, AppError> {
    let mut entries = BTreeMap::new();
    for (raw, set) in payload.reports {
        let date = parse_date(&raw)?;
        if entries.insert(date, set).is_some() {
            return Err(AppError::bad_request(format!(
                "date {} is listed more than once",
                date_key(date)
            )));
        }
    }

    let saved = state.update(|store| repository::save_all(store, &entries)).await?;
    Ok(Json(SaveAllResponse {
        dates: saved.into_iter().map(date_key).collect(),
    }))
}

pub async fn get_week(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<WeekResponse>, AppError> {
    let monday = monday_of(parse_date(&date)?);
    let dates = week_dates(monday);
    let (members, week) = state
        .read(|store| (load_members(store), load_week(store, &dates)))
        .await;

    let summary = build_week_summary(&members, &dates, &week);
    Ok(Json(WeekResponse {
        monday: date_key(monday),
        week: week_label(monday),
        dates: dates.iter().copied().map(date_key).collect(),
        reports: week
            .into_iter()
            .map(|(date, set)| (date_key(date), set))
            .collect(),
        summary,
    }))
}
