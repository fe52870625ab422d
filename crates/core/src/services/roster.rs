//! Voter roster, voter tracking and CSV export.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use forum_warga_common::{AppError, AppResult};
use forum_warga_db::entities::{CategoryFilter, poll, vote_record};
use forum_warga_db::repositories::{PollRepository, VoteRepository};
use serde::Serialize;

/// Poll title shown for records whose poll no longer resolves.
pub const UNKNOWN_POLL: &str = "Unknown";

const CSV_HEADER: [&str; 5] = ["No", "Nama", "Rumah", "Voting", "Waktu"];
const TIMESTAMP_FORMAT: &str = "%-d/%-m/%Y, %H.%M.%S";

/// Ordering of tracked voters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterSort {
    /// Newest first.
    #[default]
    Time,
    /// By display name.
    Name,
    /// By house number.
    House,
}

impl FromStr for VoterSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "name" => Ok(Self::Name),
            "house" => Ok(Self::House),
            other => Err(AppError::field(
                "sort",
                &format!("Urutan tidak dikenal: {other}"),
            )),
        }
    }
}

/// Filters of the voter tracking view.
#[derive(Debug, Clone, Default)]
pub struct VoterQuery {
    /// Case-insensitive match on display name or house number.
    pub search: String,
    /// Restrict to one poll; `None` means every poll.
    pub poll_id: Option<String>,
    pub sort: VoterSort,
}

impl VoterQuery {
    fn matches(&self, record: &vote_record::Model) -> bool {
        if let Some(poll_id) = &self.poll_id {
            if &record.poll_id != poll_id {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || record.user_name.to_lowercase().contains(&needle)
            || record.house_number.to_lowercase().contains(&needle)
    }
}

/// One vote record, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRow {
    pub record_id: String,
    pub poll_id: String,
    pub poll_title: String,
    pub user_id: String,
    pub user_name: String,
    pub house_number: String,
    /// Selected option texts, joined by `", "`.
    pub choices: String,
    pub timestamp: DateTime<Utc>,
}

impl VoterRow {
    fn resolve(record: vote_record::Model, polls: &HashMap<String, poll::Model>) -> Self {
        let poll = polls.get(&record.poll_id);
        let poll_title = poll.map_or_else(|| UNKNOWN_POLL.to_string(), |p| p.title.clone());
        let choices = poll
            .map(|p| {
                record
                    .option_ids
                    .iter()
                    .filter_map(|id| p.option(id))
                    .map(|o| o.text.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        Self {
            record_id: record.id,
            poll_id: record.poll_id,
            poll_title,
            user_id: record.user_id,
            user_name: record.user_name,
            house_number: record.house_number,
            choices,
            timestamp: record.timestamp,
        }
    }
}

/// Result of a voter tracking query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterReport {
    pub rows: Vec<VoterRow>,
    /// Records across every poll, before filtering.
    pub total: usize,
    /// Distinct users across every poll, before filtering.
    pub unique_voters: usize,
}

/// A generated CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

/// Filter and sort records for the tracking view.
pub fn track(
    records: Vec<vote_record::Model>,
    polls: &HashMap<String, poll::Model>,
    query: &VoterQuery,
) -> VoterReport {
    let total = records.len();
    let unique_voters = records
        .iter()
        .map(|r| r.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut rows: Vec<VoterRow> = records
        .into_iter()
        .filter(|r| query.matches(r))
        .map(|r| VoterRow::resolve(r, polls))
        .collect();

    match query.sort {
        VoterSort::Time => rows.sort_by_key(|r| Reverse(r.timestamp)),
        VoterSort::Name => rows.sort_by_cached_key(|r| r.user_name.to_lowercase()),
        VoterSort::House => rows.sort_by_cached_key(|r| r.house_number.to_lowercase()),
    }

    VoterReport {
        rows,
        total,
        unique_voters,
    }
}

/// Render a timestamp as `d/m/yyyy, HH.MM.SS` in `tz`.
pub fn format_timestamp(timestamp: DateTime<Utc>, tz: &Tz) -> String {
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(quote).collect::<Vec<_>>().join(",")
}

/// Build the CSV download for `rows`.
///
/// Every cell, the header included, is quoted. Timestamps are rendered in
/// `tz`; the file name carries the UTC date of `now`.
pub fn export_csv(rows: &[VoterRow], now: DateTime<Utc>, tz: &Tz, prefix: &str) -> CsvExport {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(CSV_HEADER));
    for (index, row) in rows.iter().enumerate() {
        let fields = [
            (index + 1).to_string(),
            row.user_name.clone(),
            row.house_number.clone(),
            row.poll_title.clone(),
            format_timestamp(row.timestamp, tz),
        ];
        lines.push(csv_line(fields.iter().map(String::as_str)));
    }

    CsvExport {
        filename: format!("{prefix}-{}.csv", now.date_naive()),
        content: lines.join("\n"),
        row_count: rows.len(),
    }
}

/// Read access to the vote ledger for privileged views.
///
/// No role check happens here; callers gate access.
#[derive(Clone)]
pub struct RosterService {
    poll_repo: PollRepository,
    vote_repo: VoteRepository,
    timezone: Tz,
    filename_prefix: String,
}

impl RosterService {
    /// Create a new roster service.
    #[must_use]
    pub fn new(
        poll_repo: PollRepository,
        vote_repo: VoteRepository,
        timezone: Tz,
        filename_prefix: String,
    ) -> Self {
        Self {
            poll_repo,
            vote_repo,
            timezone,
            filename_prefix,
        }
    }

    /// Records of one poll, newest first.
    pub async fn roster(&self, poll_id: &str) -> AppResult<Vec<VoterRow>> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        let polls = HashMap::from([(poll.id.clone(), poll)]);

        Ok(self
            .vote_repo
            .records_by_poll(poll_id)
            .await
            .into_iter()
            .map(|r| VoterRow::resolve(r, &polls))
            .collect())
    }

    /// Voter tracking across every poll.
    pub async fn track(&self, query: &VoterQuery) -> VoterReport {
        let polls = self
            .poll_repo
            .list(CategoryFilter::All)
            .await
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        let records = self.vote_repo.all_records().await;

        track(records, &polls, query)
    }

    /// Export the rows matching `query` as CSV.
    pub async fn export(&self, query: &VoterQuery) -> CsvExport {
        let report = self.track(query).await;
        let export = export_csv(
            &report.rows,
            Utc::now(),
            &self.timezone,
            &self.filename_prefix,
        );
        tracing::info!(
            filename = %export.filename,
            rows = export.row_count,
            "Voter data exported"
        );
        export
    }
}
