//! Vote ledger repository.

use crate::entities::{poll, user_vote, vote_record};
use crate::repositories::SharedTables;
use forum_warga_common::{AppError, AppResult};

/// A poll total and the ledger events behind it, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// `totalVotes` of the poll.
    pub total_votes: u32,
    /// User votes recorded for the poll.
    pub events: usize,
}

/// Append-only ledger of user votes and their audit records.
///
/// The ledger shares its lock with the poll collection, so casting a vote
/// is one mutation: the pair is checked, both entries are appended and the
/// tally is bumped before the guard is released.
#[derive(Clone)]
pub struct VoteRepository {
    tables: SharedTables,
}

impl VoteRepository {
    pub(crate) const fn new(tables: SharedTables) -> Self {
        Self { tables }
    }

    /// Check if a user has voted on a poll.
    pub async fn has_voted(&self, poll_id: &str, user_id: &str) -> bool {
        self.tables
            .read()
            .await
            .votes
            .iter()
            .any(|v| v.poll_id == poll_id && v.user_id == user_id)
    }

    /// Count one vote event.
    ///
    /// Every option in `vote.option_ids` gains one vote and the poll total
    /// gains exactly one. Fails with [`AppError::AlreadyVoted`] if the user
    /// already has a vote on the poll and with [`AppError::NotFound`] if the
    /// poll is gone; nothing changes in either case.
    pub async fn cast(
        &self,
        vote: user_vote::Model,
        record: vote_record::Model,
    ) -> AppResult<poll::Model> {
        if vote.poll_id != record.poll_id || vote.user_id != record.user_id {
            return Err(AppError::Internal(
                "Vote and vote record refer to different events".to_string(),
            ));
        }

        let mut guard = self.tables.write().await;
        let tables = &mut *guard;

        if tables
            .votes
            .iter()
            .any(|v| v.poll_id == vote.poll_id && v.user_id == vote.user_id)
        {
            return Err(AppError::AlreadyVoted {
                poll_id: vote.poll_id,
            });
        }

        let poll = tables
            .polls
            .iter_mut()
            .find(|p| p.id == vote.poll_id)
            .ok_or_else(|| AppError::NotFound(format!("Poll not found: {}", vote.poll_id)))?;

        for option in &mut poll.options {
            if vote.option_ids.contains(&option.id) {
                option.votes += 1;
            }
        }
        poll.total_votes += 1;
        let updated = poll.clone();

        tables.votes.push(vote);
        tables.records.push(record);

        Ok(updated)
    }

    /// Number of vote events on a poll.
    pub async fn count_by_poll(&self, poll_id: &str) -> usize {
        self.tables
            .read()
            .await
            .votes
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .count()
    }

    /// The poll total next to its ledger events, from one snapshot.
    pub async fn tally(&self, poll_id: &str) -> Option<Tally> {
        let tables = self.tables.read().await;
        let poll = tables.polls.iter().find(|p| p.id == poll_id)?;

        Some(Tally {
            total_votes: poll.total_votes,
            events: tables.votes.iter().filter(|v| v.poll_id == poll_id).count(),
        })
    }

    /// Records for a poll, newest first.
    ///
    /// Records with equal timestamps are returned latest-appended first.
    pub async fn records_by_poll(&self, poll_id: &str) -> Vec<vote_record::Model> {
        let mut records: Vec<_> = self
            .tables
            .read()
            .await
            .records
            .iter()
            .rev()
            .filter(|r| r.poll_id == poll_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Every record, in append order.
    pub async fn all_records(&self) -> Vec<vote_record::Model> {
        self.tables.read().await.records.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::repositories::shared_tables;
    use crate::seed;
    use chrono::{DateTime, Duration, Utc};

    fn repo() -> VoteRepository {
        VoteRepository::new(shared_tables(seed::polls().unwrap()))
    }

    fn vote_at(
        poll_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> (user_vote::Model, vote_record::Model) {
        let vote = user_vote::Model {
            poll_id: poll_id.to_string(),
            user_id: user_id.to_string(),
            user_name: format!("User {user_id}"),
            option_ids: vec![format!("{poll_id}a")],
            timestamp: at,
        };
        let record = vote_record::Model {
            id: format!("{poll_id}-{user_id}"),
            poll_id: poll_id.to_string(),
            user_id: user_id.to_string(),
            user_name: vote.user_name.clone(),
            house_number: format!("A-{user_id}"),
            option_ids: vote.option_ids.clone(),
            timestamp: at,
        };
        (vote, record)
    }

    #[tokio::test]
    async fn test_cast_rejects_duplicate_pair() {
        let repo = repo();
        let now = Utc::now();

        let (v, r) = vote_at("1", "u1", now);
        repo.cast(v, r).await.unwrap();
        assert!(repo.has_voted("1", "u1").await);
        assert!(!repo.has_voted("2", "u1").await);

        let (v, r) = vote_at("1", "u1", now);
        let err = repo.cast(v, r).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyVoted { ref poll_id } if poll_id == "1"));
        assert_eq!(repo.count_by_poll("1").await, 1);
        assert_eq!(repo.all_records().await.len(), 1);
        assert_eq!(
            repo.tally("1").await,
            Some(Tally {
                total_votes: 77,
                events: 1
            })
        );
    }

    #[tokio::test]
    async fn test_cast_bumps_tally_in_same_step() {
        let repo = repo();
        let (v, r) = vote_at("4", "u1", Utc::now());

        let poll = repo.cast(v, r).await.unwrap();
        assert_eq!(poll.total_votes, 1);
        assert_eq!(poll.option("4a").unwrap().votes, 1);
        assert_eq!(
            repo.tally("4").await,
            Some(Tally {
                total_votes: 1,
                events: 1
            })
        );
    }

    #[tokio::test]
    async fn test_cast_on_unknown_poll_appends_nothing() {
        let repo = repo();
        let (v, r) = vote_at("99", "u1", Utc::now());

        let err = repo.cast(v, r).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!repo.has_voted("99", "u1").await);
        assert!(repo.all_records().await.is_empty());
        assert!(repo.tally("99").await.is_none());
    }

    #[tokio::test]
    async fn test_records_newest_first() {
        let repo = repo();
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(5);
        let t3 = t1 + Duration::seconds(10);

        for (user, at) in [("u2", t2), ("u1", t1), ("u3", t3)] {
            let (v, r) = vote_at("1", user, at);
            repo.cast(v, r).await.unwrap();
        }
        let (v, r) = vote_at("2", "u1", t3);
        repo.cast(v, r).await.unwrap();

        let times: Vec<_> = repo
            .records_by_poll("1")
            .await
            .into_iter()
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(times, vec![t3, t2, t1]);
        assert_eq!(repo.records_by_poll("2").await.len(), 1);
    }

    #[tokio::test]
    async fn test_equal_timestamps_latest_appended_first() {
        let repo = repo();
        let at = Utc::now();
        for user in ["u1", "u2"] {
            let (v, r) = vote_at("1", user, at);
            repo.cast(v, r).await.unwrap();
        }

        let users: Vec<_> = repo
            .records_by_poll("1")
            .await
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(users, vec!["u2", "u1"]);
    }
}
