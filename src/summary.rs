use crate::dates::date_key;
use crate::models::{DaySummary, Member, ReportSet};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn build_week_summary(
    members: &[Member],
    dates: &[NaiveDate],
    week: &BTreeMap<NaiveDate, ReportSet>,
) -> Vec<DaySummary> {
    dates
        .iter()
        .map(|date| {
            let set = week.get(date).cloned().unwrap_or_default();
            summarize_day(*date, members, &set)
        })
        .collect()
}

pub fn summarize_day(date: NaiveDate, members: &[Member], set: &ReportSet) -> DaySummary {
    let mut done_count = 0usize;
    let mut written_count = 0usize;
    for member in members {
        let report = set.report_for(member.id);
        if report.done {
            done_count += 1;
        }
        if report.is_written() {
            written_count += 1;
        }
    }

    DaySummary {
        date: date_key(date),
        done_count,
        written_count,
        total: members.len(),
    }
}
