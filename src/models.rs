use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

pub const DONE_LABEL: &str = "완료";
pub const PENDING_LABEL: &str = "미작성";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(usize);

impl MemberId {
    pub const fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub const fn slot(self) -> usize {
        self.0
    }

    pub const fn badge(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub done: bool,
}

impl Report {
    pub fn new(content: impl Into<String>, done: bool) -> Self {
        Self {
            content: content.into(),
            done,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.done {
            DONE_LABEL
        } else {
            PENDING_LABEL
        }
    }

    pub fn is_written(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportSet(BTreeMap<MemberId, Report>);

impl ReportSet {
    pub fn report_for(&self, id: MemberId) -> Report {
        self.0.get(&id).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, id: MemberId, report: Report) {
        self.0.insert(id, report);
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &Report)> {
        self.0.iter().map(|(id, report)| (*id, report))
    }
}

impl FromIterator<(MemberId, Report)> for ReportSet {
    fn from_iter<I: IntoIterator<Item = (MemberId, Report)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub done: bool,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveAllRequest {
    pub reports: BTreeMap<String, ReportSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveAllResponse {
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub monday: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: String,
    pub done_count: usize,
    pub written_count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub monday: String,
    pub week: String,
    pub dates: Vec<String>,
    pub reports: BTreeMap<String, ReportSet>,
    pub summary: Vec<DaySummary>,
}
