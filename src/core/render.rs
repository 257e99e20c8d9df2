//! Display models for the results table and the leaderboard.
//!
//! Everything here is plain text so a view can draw it however it likes.
//! Missing values fall back to [`NOT_AVAILABLE`] instead of failing.

use crate::domain::model::{EmployeeCount, LeaderboardEntry, Region, SearchResult, SecondarySource};
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_OTHER_SOURCES: &str = "None";

/// Formats an integer with comma thousands separators: `12345` becomes `"12,345"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_employee_count(count: Option<&EmployeeCount>) -> String {
    match count {
        Some(EmployeeCount::Exact(n)) => format_count(*n),
        Some(EmployeeCount::Text(text)) => text.clone(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBadge {
    pub label: String,
    /// Link target for the primary source, hover text for secondary ones.
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub company: String,
    pub employees: String,
    pub region: String,
    pub source: SourceBadge,
    pub other_sources: Vec<SourceBadge>,
}

impl ResultRow {
    /// Text for the secondary-sources cell.
    pub fn other_sources_text(&self) -> String {
        if self.other_sources.is_empty() {
            return NO_OTHER_SOURCES.to_string();
        }
        self.other_sources
            .iter()
            .map(|badge| format!("{}: {}", badge.label, badge.detail))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn region_label(region: Option<&Region>) -> String {
    match region {
        Some(Region::Singapore) => "Singapore".to_string(),
        Some(Region::Global) => "Global".to_string(),
        Some(Region::Location(location)) => location.clone(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn secondary_badge(source: &SecondarySource) -> SourceBadge {
    let scope = match source.is_singapore {
        Some(true) => "(SG)",
        _ => "(Global)",
    };
    SourceBadge {
        label: source.source.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        detail: format!("{} {}", format_employee_count(source.count.as_ref()), scope),
    }
}

impl From<&SearchResult> for ResultRow {
    fn from(result: &SearchResult) -> Self {
        Self {
            company: result.company.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            employees: format_employee_count(result.employee_count.as_ref()),
            region: region_label(result.region.as_ref()),
            source: SourceBadge {
                label: result.source.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                detail: result.url.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            },
            other_sources: result.other_sources.iter().map(secondary_badge).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub time: String,
    pub moves: u32,
}

/// Ranks entries in the order the server returned them.
pub fn leaderboard_rows(entries: &[LeaderboardEntry]) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| LeaderboardRow {
            rank: index + 1,
            name: entry.name.clone(),
            time: format!("{}s", entry.time),
            moves: entry.moves,
        })
        .collect()
}
