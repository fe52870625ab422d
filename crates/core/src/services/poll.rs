//! Poll service.

use std::collections::HashSet;

use chrono::Utc;
use chrono_tz::Tz;
use forum_warga_common::{AppError, AppResult, IdGenerator, SimulatedLatency};
use forum_warga_db::entities::{
    CategoryFilter, PollCategory, PollStatus, VoteOption, poll, user_vote, vote_record,
};
use forum_warga_db::repositories::{PollRepository, VoteRepository};
use validator::Validate;

use crate::services::session::Session;
use crate::validation;

/// Input for creating a poll.
#[derive(Debug, Clone, Validate)]
pub struct CreatePollInput {
    #[validate(custom(function = "validation::title"))]
    pub title: String,
    #[validate(custom(function = "validation::description"))]
    pub description: String,
    pub category: PollCategory,
    /// `YYYY-MM-DD`. Not checked against the start date.
    #[validate(custom(function = "validation::end_date"))]
    pub end_date: String,
    pub allow_multiple: bool,
    /// Option texts; blank entries are dropped.
    #[validate(custom(function = "validation::poll_options"))]
    pub options: Vec<String>,
}

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    vote_repo: VoteRepository,
    session: Session,
    id_gen: IdGenerator,
    vote_latency: SimulatedLatency,
    timezone: Tz,
    default_creator: String,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub fn new(
        poll_repo: PollRepository,
        vote_repo: VoteRepository,
        session: Session,
        vote_latency: SimulatedLatency,
        timezone: Tz,
        default_creator: String,
    ) -> Self {
        Self {
            poll_repo,
            vote_repo,
            session,
            id_gen: IdGenerator::new(),
            vote_latency,
            timezone,
            default_creator,
        }
    }

    /// Polls passing `filter`, newest first.
    pub async fn list_polls(&self, filter: CategoryFilter) -> Vec<poll::Model> {
        self.poll_repo.list(filter).await
    }

    /// Get a poll by ID.
    pub async fn get_poll(&self, poll_id: &str) -> AppResult<poll::Model> {
        self.poll_repo.get_by_id(poll_id).await
    }

    /// Check if a user has voted on a poll.
    pub async fn has_voted(&self, poll_id: &str, user_id: &str) -> bool {
        self.vote_repo.has_voted(poll_id, user_id).await
    }

    /// Cast one vote event.
    ///
    /// Every selected option gains one vote and the poll total gains one.
    /// A second vote by the same user on the same poll fails with
    /// [`AppError::AlreadyVoted`] and changes nothing.
    pub async fn submit_vote(
        &self,
        poll_id: &str,
        user_id: &str,
        user_name: &str,
        house_number: &str,
        option_ids: Vec<String>,
    ) -> AppResult<poll::Model> {
        if !self.session.is_authenticated().await {
            return Err(AppError::Unauthenticated);
        }

        let poll = self.poll_repo.get_by_id(poll_id).await?;

        if self.vote_repo.has_voted(poll_id, user_id).await {
            tracing::debug!(poll_id, user_id, "Duplicate vote rejected");
            return Err(AppError::AlreadyVoted {
                poll_id: poll_id.to_string(),
            });
        }

        Self::check_selection(&poll, &option_ids)?;

        self.vote_latency.wait().await;

        let timestamp = Utc::now();
        let vote = user_vote::Model {
            poll_id: poll_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            option_ids: option_ids.clone(),
            timestamp,
        };
        let option_count = option_ids.len();
        let record = vote_record::Model {
            id: self.id_gen.generate(),
            poll_id: poll_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            house_number: house_number.to_string(),
            option_ids,
            timestamp,
        };

        // The ledger re-checks the (poll, user) pair under its lock.
        let updated = self.vote_repo.cast(vote, record).await?;

        tracing::info!(
            poll_id,
            user_id,
            option_count,
            total_votes = updated.total_votes,
            "Vote recorded"
        );

        Ok(updated)
    }

    fn check_selection(poll: &poll::Model, option_ids: &[String]) -> AppResult<()> {
        if option_ids.is_empty() {
            return Err(AppError::field("option_ids", "Pilih minimal satu opsi"));
        }
        if !poll.allow_multiple && option_ids.len() != 1 {
            return Err(AppError::field(
                "option_ids",
                "Voting ini hanya menerima satu pilihan",
            ));
        }

        let mut seen = HashSet::new();
        for id in option_ids {
            if poll.option(id).is_none() {
                return Err(AppError::field(
                    "option_ids",
                    "Pilihan tidak tersedia pada voting ini",
                ));
            }
            if !seen.insert(id.as_str()) {
                return Err(AppError::field("option_ids", "Pilihan ganda terdeteksi"));
            }
        }

        Ok(())
    }

    /// Create a poll and place it in front of the existing ones.
    ///
    /// The poll starts today and is active immediately, whatever dates the
    /// form carried.
    pub async fn create_poll(
        &self,
        input: CreatePollInput,
        creator_name: &str,
    ) -> AppResult<poll::Model> {
        if !self.session.is_authenticated().await {
            return Err(AppError::Unauthenticated);
        }

        if let Err(errors) = input.validate() {
            tracing::debug!(error = %errors, "Poll creation rejected");
            return Err(errors.into());
        }

        let end_date = input
            .end_date
            .trim()
            .parse()
            .map_err(|_| AppError::field("end_date", "Format tanggal tidak valid"))?;

        let id = self.id_gen.generate();
        let options = validation::non_blank(&input.options)
            .enumerate()
            .map(|(index, text)| VoteOption {
                id: self.id_gen.option_id(&id, index),
                text: text.to_string(),
                votes: 0,
            })
            .collect();

        let creator = creator_name.trim();
        let created_by = if creator.is_empty() {
            self.default_creator.clone()
        } else {
            creator.to_string()
        };

        let model = poll::Model {
            id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            category: input.category,
            options,
            start_date: Utc::now().with_timezone(&self.timezone).date_naive(),
            end_date,
            total_votes: 0,
            status: PollStatus::Active,
            created_by,
            allow_multiple: input.allow_multiple,
        };

        let poll = self.poll_repo.create(model).await?;
        tracing::info!(
            poll_id = %poll.id,
            category = %poll.category,
            option_count = poll.options.len(),
            "Poll created"
        );

        Ok(poll)
    }

    /// Vote records of a poll, newest first.
    pub async fn voters_for(&self, poll_id: &str) -> Vec<vote_record::Model> {
        self.vote_repo.records_by_poll(poll_id).await
    }

    /// The leading option of a poll; the first one wins a tie.
    #[must_use]
    pub fn winning_option(poll: &poll::Model) -> Option<&VoteOption> {
        poll.winning_option()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forum_warga_db::Store;
    use maplit::btreemap;

    async fn service(logged_in: bool) -> (PollService, Store) {
        let store = Store::seeded().unwrap();
        let session = Session::new();
        if logged_in {
            let user = store.users.get_by_id("1").await.unwrap();
            session.establish(user).await;
        }
        let service = PollService::new(
            store.polls.clone(),
            store.votes.clone(),
            session,
            SimulatedLatency::NONE,
            chrono_tz::Asia::Jakarta,
            "Warga Cluster".to_string(),
        );
        (service, store)
    }

    fn create_input(options: &[&str]) -> CreatePollInput {
        CreatePollInput {
            title: "Lomba 17 Agustus".to_string(),
            description: "Pilih lomba untuk perayaan kemerdekaan.".to_string(),
            category: PollCategory::Event,
            end_date: "2025-08-10".to_string(),
            allow_multiple: false,
            options: options.iter().map(ToString::to_string).collect(),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_submit_vote_increments_once() {
        let (service, store) = service(true).await;

        let poll = service
            .submit_vote("1", "1", "Ahmad Wijaya", "A-15", ids(&["1b"]))
            .await
            .unwrap();
        assert_eq!(poll.total_votes, 77);
        assert_eq!(poll.option("1b").unwrap().votes, 24);
        assert!(service.has_voted("1", "1").await);
        assert_eq!(store.votes.count_by_poll("1").await, 1);
    }

    #[tokio::test]
    async fn test_second_vote_is_rejected_without_changes() {
        let (service, store) = service(true).await;
        service
            .submit_vote("4", "1", "Ahmad Wijaya", "A-15", ids(&["4a"]))
            .await
            .unwrap();

        let err = service
            .submit_vote("4", "1", "Ahmad Wijaya", "A-15", ids(&["4b"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyVoted { .. }));

        let poll = store.polls.get_by_id("4").await.unwrap();
        assert_eq!(poll.total_votes, 1);
        assert_eq!(poll.option("4a").unwrap().votes, 1);
        assert_eq!(poll.option("4b").unwrap().votes, 0);
        assert_eq!(store.votes.count_by_poll("4").await, 1);
    }

    #[tokio::test]
    async fn test_multiple_choice_counts_one_event() {
        let (service, _) = service(true).await;

        let poll = service
            .submit_vote("3", "1", "Ahmad Wijaya", "A-15", ids(&["3a", "3c"]))
            .await
            .unwrap();
        assert_eq!(poll.total_votes, 109);
        assert_eq!(poll.option("3a").unwrap().votes, 35);
        assert_eq!(poll.option("3c").unwrap().votes, 32);
        assert_eq!(poll.option("3b").unwrap().votes, 28);
    }

    #[tokio::test]
    async fn test_single_choice_rejects_several_options() {
        let (service, store) = service(true).await;

        let err = service
            .submit_vote("1", "1", "Ahmad Wijaya", "A-15", ids(&["1a", "1b"]))
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("option_ids"));
        assert_eq!(store.polls.get_by_id("1").await.unwrap().total_votes, 76);
        assert!(!store.votes.has_voted("1", "1").await);
    }

    #[tokio::test]
    async fn test_rejects_empty_unknown_and_duplicate_options() {
        let (service, _) = service(true).await;

        for selection in [ids(&[]), ids(&["2a"]), ids(&["3a", "3a"])] {
            let err = service
                .submit_vote("3", "1", "Ahmad Wijaya", "A-15", selection)
                .await
                .unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_ERROR");
        }
        assert!(!service.has_voted("3", "1").await);
    }

    #[tokio::test]
    async fn test_vote_requires_session_and_poll() {
        let (anonymous, _) = service(false).await;
        let err = anonymous
            .submit_vote("1", "1", "Ahmad Wijaya", "A-15", ids(&["1a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));

        let (service, _) = service(true).await;
        let err = service
            .submit_vote("99", "1", "Ahmad Wijaya", "A-15", ids(&["1a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_poll_needs_two_options() {
        let (service, store) = service(true).await;

        let err = service
            .create_poll(create_input(&["Balap karung", "  "]), "Ahmad Wijaya")
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("options"));
        assert_eq!(store.polls.list(CategoryFilter::All).await.len(), 4);

        let poll = service
            .create_poll(
                create_input(&["Balap karung", "", "Panjat pinang"]),
                "Ahmad Wijaya",
            )
            .await
            .unwrap();
        assert_eq!(poll.status, PollStatus::Active);
        assert_eq!(poll.total_votes, 0);
        assert_eq!(poll.created_by, "Ahmad Wijaya");
        let texts: Vec<_> = poll.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Balap karung", "Panjat pinang"]);
        assert!(poll.options.iter().all(|o| o.votes == 0));
        assert_ne!(poll.options[0].id, poll.options[1].id);
    }

    #[tokio::test]
    async fn test_created_poll_is_listed_first() {
        let (service, _) = service(true).await;
        let poll = service
            .create_poll(create_input(&["A", "B"]), "  ")
            .await
            .unwrap();
        assert_eq!(poll.created_by, "Warga Cluster");

        let all = service.list_polls(CategoryFilter::All).await;
        assert_eq!(all[0].id, poll.id);
        assert_eq!(all.len(), 5);

        let events = service
            .list_polls(CategoryFilter::Only(PollCategory::Event))
            .await;
        let event_ids: Vec<_> = events.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(event_ids, vec![poll.id.as_str(), "3"]);
    }

    #[tokio::test]
    async fn test_create_poll_requires_session() {
        let (service, _) = service(false).await;
        let err = service
            .create_poll(create_input(&["A", "B"]), "Ahmad Wijaya")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_create_poll_reports_blank_fields() {
        let (service, _) = service(true).await;
        let input = CreatePollInput {
            title: " ".to_string(),
            description: String::new(),
            end_date: String::new(),
            ..create_input(&["A", "B"])
        };
        let err = service.create_poll(input, "Ahmad Wijaya").await.unwrap_err();
        assert_eq!(
            err.field_errors().unwrap(),
            &btreemap! {
                "description".to_string() => "Deskripsi wajib diisi".to_string(),
                "end_date".to_string() => "Tanggal berakhir wajib diisi".to_string(),
                "title".to_string() => "Judul voting wajib diisi".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_winning_option() {
        let (service, _) = service(true).await;
        let poll = service.get_poll("2").await.unwrap();
        assert_eq!(PollService::winning_option(&poll).unwrap().id, "2a");
    }
}
