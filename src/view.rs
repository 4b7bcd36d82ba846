use crate::dates::{date_key, is_weekend, monday_of, shift_days, week_dates, week_label, weekday_label};
use crate::models::{DaySummary, Member, MemberId, ReportSet};
use crate::repository::{load_report_set, load_week};
use crate::storage::KvStore;
use crate::summary::summarize_day;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const MEMBER_COLORS: [&str; 6] = ["#4a90e2", "#27ae60", "#e67e22", "#9b59b6", "#e74c3c", "#1abc9c"];

pub fn member_color(id: MemberId) -> &'static str {
    MEMBER_COLORS[id.slot() % MEMBER_COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Daily,
    Weekly,
}

impl Mode {
    pub fn step_days(self) -> i64 {
        match self {
            Mode::Daily => 1,
            Mode::Weekly => 7,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Mode::Daily => "/daily",
            Mode::Weekly => "/weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Daily {
        date: NaiveDate,
        reports: ReportSet,
    },
    Weekly {
        monday: NaiveDate,
        dates: [NaiveDate; 7],
        reports: BTreeMap<NaiveDate, ReportSet>,
    },
}

impl ViewState {
    pub fn load(store: &KvStore, mode: Mode, date: NaiveDate) -> Self {
        match mode {
            Mode::Daily => Self::Daily {
                date,
                reports: load_report_set(store, date),
            },
            Mode::Weekly => {
                let monday = monday_of(date);
                let dates = week_dates(monday);
                Self::Weekly {
                    monday,
                    dates,
                    reports: load_week(store, &dates),
                }
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Daily { .. } => Mode::Daily,
            Self::Weekly { .. } => Mode::Weekly,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        match self {
            Self::Daily { date, .. } => *date,
            Self::Weekly { monday, .. } => *monday,
        }
    }

    /// Moves `steps` days (daily) or weeks (weekly) and reloads.
    pub fn navigate(&self, store: &KvStore, steps: i64) -> Self {
        let mode = self.mode();
        Self::load(store, mode, shift_days(self.anchor(), steps * mode.step_days()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub id: MemberId,
    pub badge: usize,
    pub name: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub date: String,
    pub member: MemberId,
    pub content: String,
    pub done: bool,
    pub status_label: &'static str,
    pub is_today: bool,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    pub member: MemberView,
    pub cell: CellView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyView {
    pub date: String,
    pub prev_date: String,
    pub next_date: String,
    pub weekday: &'static str,
    pub is_today: bool,
    pub is_weekend: bool,
    pub rows: Vec<DailyRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: String,
    pub label: String,
    pub weekday: &'static str,
    pub is_today: bool,
    pub is_weekend: bool,
    pub summary: DaySummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRow {
    pub member: MemberView,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyView {
    pub monday: String,
    pub sunday: String,
    pub week_label: String,
    pub prev_monday: String,
    pub next_monday: String,
    pub columns: Vec<DayColumn>,
    pub rows: Vec<WeeklyRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Daily(DailyView),
    Weekly(WeeklyView),
}

pub fn build_view(members: &[Member], state: &ViewState, today: NaiveDate) -> View {
    match state {
        ViewState::Daily { date, reports } => View::Daily(build_daily(members, *date, reports, today)),
        ViewState::Weekly {
            monday,
            dates,
            reports,
        } => View::Weekly(build_weekly(members, *monday, dates, reports, today)),
    }
}

fn build_daily(members: &[Member], date: NaiveDate, reports: &ReportSet, today: NaiveDate) -> DailyView {
    let rows = members
        .iter()
        .map(|member| DailyRow {
            member: member_view(member),
            cell: cell_view(member.id, date, reports, today),
        })
        .collect();

    DailyView {
        date: date_key(date),
        prev_date: date_key(shift_days(date, -1)),
        next_date: date_key(shift_days(date, 1)),
        weekday: weekday_label(date),
        is_today: date == today,
        is_weekend: is_weekend(date),
        rows,
    }
}

fn build_weekly(
    members: &[Member],
    monday: NaiveDate,
    dates: &[NaiveDate; 7],
    reports: &BTreeMap<NaiveDate, ReportSet>,
    today: NaiveDate,
) -> WeeklyView {
    let empty = ReportSet::default();
    let set_for = |date: &NaiveDate| reports.get(date).unwrap_or(&empty);

    let columns = dates
        .iter()
        .map(|date| DayColumn {
            date: date_key(*date),
            label: date.format("%m/%d").to_string(),
            weekday: weekday_label(*date),
            is_today: *date == today,
            is_weekend: is_weekend(*date),
            summary: summarize_day(*date, members, set_for(date)),
        })
        .collect();

    let rows = members
        .iter()
        .map(|member| WeeklyRow {
            member: member_view(member),
            cells: dates
                .iter()
                .map(|date| cell_view(member.id, *date, set_for(date), today))
                .collect(),
        })
        .collect();

    WeeklyView {
        monday: date_key(monday),
        sunday: date_key(dates[6]),
        week_label: week_label(monday),
        prev_monday: date_key(shift_days(monday, -7)),
        next_monday: date_key(shift_days(monday, 7)),
        columns,
        rows,
    }
}

fn member_view(member: &Member) -> MemberView {
    MemberView {
        id: member.id,
        badge: member.id.badge(),
        name: member.name.clone(),
        color: member_color(member.id),
    }
}

fn cell_view(id: MemberId, date: NaiveDate, reports: &ReportSet, today: NaiveDate) -> CellView {
    let report = reports.report_for(id);
    CellView {
        date: date_key(date),
        member: id,
        status_label: report.status_label(),
        content: report.content,
        done: report.done,
        is_today: date == today,
        is_weekend: is_weekend(date),
    }
}
