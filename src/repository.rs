use crate::dates::date_key;
use crate::errors::AppError;
use crate::models::{Member, MemberId, Report, ReportSet};
use crate::storage::KvStore;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

pub const MEMBERS_KEY: &str = "memberNames";
const REPORTS_PREFIX: &str = "reports_";

pub const DEFAULT_MEMBERS: [&str; 6] = ["홍길동", "김철수", "이영희", "박민준", "최수진", "정대한"];

pub fn reports_key(date: NaiveDate) -> String {
    format!("{REPORTS_PREFIX}{}", date_key(date))
}

pub fn default_name(id: MemberId) -> Option<&'static str> {
    DEFAULT_MEMBERS.get(id.slot()).copied()
}

// Defaults are never written back on read.
pub fn load_members(store: &KvStore) -> Vec<Member> {
    let names: Vec<String> = store
        .get_json(MEMBERS_KEY)
        .unwrap_or_else(|| DEFAULT_MEMBERS.iter().map(|name| name.to_string()).collect());
    names
        .into_iter()
        .enumerate()
        .map(|(slot, name)| Member {
            id: MemberId::new(slot),
            name,
        })
        .collect()
}

pub fn save_members(store: &mut KvStore, members: &[Member]) -> Result<(), AppError> {
    let names: Vec<&str> = members.iter().map(|member| member.name.as_str()).collect();
    store.set_json(MEMBERS_KEY, &names)
}

/// A blank name falls back to the slot's default name; slots beyond the
/// defaults keep their current name.
pub fn rename_member(store: &mut KvStore, id: MemberId, raw: &str) -> Result<Member, AppError> {
    let mut members = load_members(store);
    let member = members
        .get_mut(id.slot())
        .ok_or_else(|| AppError::not_found(format!("unknown member {id}")))?;

    let trimmed = raw.trim();
    member.name = if !trimmed.is_empty() {
        trimmed.to_string()
    } else if let Some(fallback) = default_name(id) {
        fallback.to_string()
    } else {
        member.name.clone()
    };
    let renamed = member.clone();

    save_members(store, &members)?;
    info!(member = %id, name = %renamed.name, "renamed member");
    Ok(renamed)
}

pub fn ensure_member(store: &KvStore, id: MemberId) -> Result<(), AppError> {
    if id.slot() < load_members(store).len() {
        Ok(())
    } else {
        Err(AppError::not_found(format!("unknown member {id}")))
    }
}

pub fn load_report_set(store: &KvStore, date: NaiveDate) -> ReportSet {
    store.get_json(&reports_key(date)).unwrap_or_default()
}

pub fn save_report_set(store: &mut KvStore, date: NaiveDate, set: &ReportSet) -> Result<(), AppError> {
    store.set_json(&reports_key(date), set)
}

pub fn load_week(store: &KvStore, dates: &[NaiveDate]) -> BTreeMap<NaiveDate, ReportSet> {
    dates
        .iter()
        .map(|date| (*date, load_report_set(store, *date)))
        .collect()
}

pub fn save_report(
    store: &mut KvStore,
    date: NaiveDate,
    id: MemberId,
    report: Report,
) -> Result<Report, AppError> {
    ensure_member(store, id)?;
    let mut set = load_report_set(store, date);
    set.insert(id, report.clone());
    save_report_set(store, date, &set)?;
    info!(date = %date, member = %id, done = report.done, "saved report");
    Ok(report)
}

/// Sets the completion flag and stores `current_content` with it, so text
/// that was typed but not yet saved is written together with the flag.
pub fn set_completion(
    store: &mut KvStore,
    date: NaiveDate,
    id: MemberId,
    done: bool,
    current_content: &str,
) -> Result<Report, AppError> {
    save_report(store, date, id, Report::new(current_content, done))
}

/// For each listed date the stored set is the base: listed members'
/// entries replace stored ones and the whole set is written back.
/// Dates not listed are not touched.
pub fn save_all(
    store: &mut KvStore,
    entries: &BTreeMap<NaiveDate, ReportSet>,
) -> Result<Vec<NaiveDate>, AppError> {
    let member_count = load_members(store).len();
    for (date, visible) in entries {
        if let Some((id, _)) = visible.iter().find(|(id, _)| id.slot() >= member_count) {
            return Err(AppError::not_found(format!("unknown member {id} on {date}")));
        }
    }

    for (date, visible) in entries {
        let mut set = load_report_set(store, *date);
        for (id, report) in visible.iter() {
            set.insert(id, report.clone());
        }
        save_report_set(store, *date, &set)?;
    }
    info!(dates = entries.len(), "saved all visible reports");
    Ok(entries.keys().copied().collect())
}
