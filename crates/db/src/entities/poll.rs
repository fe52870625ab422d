//! Poll entity.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Topic a poll belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollCategory {
    Security,
    Facility,
    Event,
    Maintenance,
    General,
}

impl PollCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Security,
        Self::Facility,
        Self::Event,
        Self::Maintenance,
    ];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Facility => "facility",
            Self::Event => "event",
            Self::Maintenance => "maintenance",
            Self::General => "general",
        }
    }

    /// Indonesian label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Security => "Keamanan",
            Self::Facility => "Fasilitas",
            Self::Event => "Acara",
            Self::Maintenance => "Pemeliharaan",
            Self::General => "Umum",
        }
    }
}

impl fmt::Display for PollCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown poll category: {s}"))
    }
}

/// Category filter used when listing polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every poll.
    #[default]
    All,
    /// Polls of one category.
    Only(PollCategory),
}

impl CategoryFilter {
    /// Whether a poll passes this filter.
    #[must_use]
    pub fn matches(self, poll: &Model) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => poll.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl From<PollCategory> for CategoryFilter {
    fn from(category: PollCategory) -> Self {
        Self::Only(category)
    }
}

/// Lifecycle label of a poll.
///
/// Labels are set when the poll is seeded or created and are not advanced
/// automatically; [`Model::status_on`] derives the label a date would imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Upcoming,
    Active,
    Ended,
}

impl PollStatus {
    /// Indonesian label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Akan Dimulai",
            Self::Active => "Sedang Berlangsung",
            Self::Ended => "Telah Berakhir",
        }
    }
}

/// One selectable answer of a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOption {
    /// Unique within the owning poll.
    pub id: String,
    pub text: String,
    /// Never decreases.
    pub votes: u32,
}

/// A poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,

    pub title: String,

    pub description: String,

    pub category: PollCategory,

    /// Options in display order. Fixed after creation.
    pub options: Vec<VoteOption>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Number of vote events cast on this poll.
    pub total_votes: u32,

    pub status: PollStatus,

    /// Display name of the creator.
    pub created_by: String,

    /// Whether one vote event may select several options.
    pub allow_multiple: bool,
}

impl Model {
    /// Find an option by ID.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&VoteOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Sum of the per-option counts.
    ///
    /// Equal to `total_votes` for single-choice polls; a multiple-choice vote
    /// event adds one to every option it selects but only one to the total.
    #[must_use]
    pub fn option_vote_sum(&self) -> u64 {
        self.options.iter().map(|o| u64::from(o.votes)).sum()
    }

    /// Share of vote events that selected `option`, in percent.
    ///
    /// Returns `0.0` while no votes have been cast.
    #[must_use]
    pub fn percentage(&self, option: &VoteOption) -> f64 {
        if self.total_votes == 0 {
            return 0.0;
        }
        f64::from(option.votes) / f64::from(self.total_votes) * 100.0
    }

    /// The option with the highest vote count.
    ///
    /// On equal counts the option that comes first wins.
    #[must_use]
    pub fn winning_option(&self) -> Option<&VoteOption> {
        self.options
            .iter()
            .fold(None, |best: Option<&VoteOption>, option| match best {
                Some(b) if b.votes >= option.votes => Some(b),
                _ => Some(option),
            })
    }

    /// Whether the presentation layer should offer the vote action.
    #[must_use]
    pub fn accepts_votes(&self) -> bool {
        self.status == PollStatus::Active
    }

    /// Status implied by the poll's dates on `date`.
    #[must_use]
    pub fn status_on(&self, date: NaiveDate) -> PollStatus {
        if date < self.start_date {
            PollStatus::Upcoming
        } else if date > self.end_date {
            PollStatus::Ended
        } else {
            PollStatus::Active
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn option(id: &str, votes: u32) -> VoteOption {
        VoteOption {
            id: id.to_string(),
            text: format!("Option {id}"),
            votes,
        }
    }

    fn poll(options: Vec<VoteOption>) -> Model {
        let total_votes = options.iter().map(|o| o.votes).sum();
        Model {
            id: "p".to_string(),
            title: "Test".to_string(),
            description: "Test poll".to_string(),
            category: PollCategory::General,
            options,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            total_votes,
            status: PollStatus::Active,
            created_by: "Tester".to_string(),
            allow_multiple: false,
        }
    }

    #[test]
    fn test_winning_option_highest() {
        let p = poll(vec![option("a", 3), option("b", 7), option("c", 5)]);
        assert_eq!(p.winning_option().unwrap().id, "b");
    }

    #[test]
    fn test_winning_option_tie_prefers_first() {
        let p = poll(vec![option("a", 1), option("b", 4), option("c", 4)]);
        assert_eq!(p.winning_option().unwrap().id, "b");

        let empty = poll(vec![option("a", 0), option("b", 0)]);
        assert_eq!(empty.winning_option().unwrap().id, "a");
    }

    #[test]
    fn test_percentage() {
        let p = poll(vec![option("a", 1), option("b", 3)]);
        assert_eq!(p.percentage(&p.options[0]), 25.0);
        assert_eq!(p.percentage(&p.options[1]), 75.0);

        let empty = poll(vec![option("a", 0), option("b", 0)]);
        assert_eq!(empty.percentage(&empty.options[0]), 0.0);
    }

    #[test]
    fn test_status_on() {
        let p = poll(vec![option("a", 0), option("b", 0)]);
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        assert_eq!(p.status_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), PollStatus::Upcoming);
        assert_eq!(p.status_on(day(1)), PollStatus::Active);
        assert_eq!(p.status_on(day(15)), PollStatus::Active);
        assert_eq!(p.status_on(day(16)), PollStatus::Ended);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Security".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(PollCategory::Security)
        );
        assert!("sports".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let p = poll(vec![option("a", 2), option("b", 0)]);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["totalVotes"], 2);
        assert_eq!(json["allowMultiple"], false);
        assert_eq!(json["startDate"], "2025-01-01");
        assert_eq!(json["category"], "general");
        assert_eq!(json["status"], "active");
    }
}
