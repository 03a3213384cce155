use crate::api::HistoryEntry;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fmt::{self, Write};

pub const NO_HISTORY: &str = "No history yet.";
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Empty,
    Rows(Vec<HistoryRow>),
    /// Inline error text shown in place of the list.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub date: String,
    pub detection_count: usize,
}

impl HistoryRow {
    pub fn summary(&self) -> String {
        format!("{} Detections", self.detection_count)
    }
}

impl HistoryView {
    pub fn rows(&self) -> &[HistoryRow] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn error(reason: impl fmt::Display) -> Self {
        Self::Error(format!("Error: {reason}"))
    }
}

pub fn history_view(entries: &[HistoryEntry], date_format: &str) -> HistoryView {
    if entries.is_empty() {
        return HistoryView::Empty;
    }

    let rows = entries
        .iter()
        .map(|entry| HistoryRow {
            date: format_date(&entry.timestamp, date_format),
            detection_count: entry.detections.len(),
        })
        .collect();

    HistoryView::Rows(rows)
}

/// Date-only rendering of an ISO-8601 timestamp.
pub fn format_date(timestamp: &str, date_format: &str) -> String {
    let Some(date) = parse_date(timestamp) else {
        return INVALID_DATE.to_string();
    };

    // An invalid pattern surfaces as fmt::Error instead of a panic.
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => writeln!(f, "{NO_HISTORY}"),
            Self::Error(message) => writeln!(f, "{message}"),
            Self::Rows(rows) => {
                for row in rows {
                    writeln!(f, "{:<12} {}", row.date, row.summary())?;
                }
                Ok(())
            }
        }
    }
}
