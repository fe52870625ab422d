//! Application state.

#![allow(missing_docs)]

use chrono_tz::Tz;
use forum_warga_common::{AppError, AppResult, Config};
use forum_warga_db::Store;
use forum_warga_db::entities::{CategoryFilter, PollCategory, PollStatus, UserRole, poll, user};
use serde::Serialize;

use crate::services::{
    AuthService, CreatePollInput, CsvExport, PollService, RosterService, Session, VoterQuery,
    VoterReport, VoterRow, can_view_roster,
};

/// Application state shared by every view.
///
/// Clones share the same session and collections.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub session: Session,
    pub auth_service: AuthService,
    pub poll_service: PollService,
    pub roster_service: RosterService,
}

/// Percentage of one option, for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSummary {
    pub id: String,
    pub text: String,
    pub votes: u32,
    pub percentage: f64,
}

/// A poll card of the board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSummary {
    pub id: String,
    pub title: String,
    pub category: PollCategory,
    pub category_label: &'static str,
    pub status: PollStatus,
    pub status_label: &'static str,
    pub total_votes: u32,
    pub allow_multiple: bool,
    pub options: Vec<OptionSummary>,
    pub winning_option: Option<String>,
    pub has_voted: bool,
    pub can_vote: bool,
    pub can_view_voters: bool,
}

impl AppState {
    /// Wire services over `store`.
    pub fn new(config: &Config, store: Store) -> AppResult<Self> {
        let timezone: Tz = config.timezone()?;
        let session = Session::new();

        let auth_service = AuthService::new(store.users.clone(), session.clone(), &config.latency);
        let poll_service = PollService::new(
            store.polls.clone(),
            store.votes.clone(),
            session.clone(),
            config.latency.vote(),
            timezone,
            config.app.default_creator.clone(),
        );
        let roster_service = RosterService::new(
            store.polls.clone(),
            store.votes.clone(),
            timezone,
            config.export.filename_prefix.clone(),
        );

        Ok(Self {
            config: config.clone(),
            store,
            session,
            auth_service,
            poll_service,
            roster_service,
        })
    }

    /// State over the seed users and polls.
    pub fn seeded(config: &Config) -> AppResult<Self> {
        Self::new(config, Store::seeded()?)
    }

    /// Vote as the logged-in user.
    pub async fn vote(&self, poll_id: &str, option_ids: Vec<String>) -> AppResult<poll::Model> {
        let user = self.session.require_user().await?;
        self.poll_service
            .submit_vote(poll_id, &user.id, &user.name, &user.house_number, option_ids)
            .await
    }

    /// Create a poll on behalf of the logged-in user.
    pub async fn create_poll(&self, input: CreatePollInput) -> AppResult<poll::Model> {
        let user = self.session.require_user().await?;
        self.poll_service.create_poll(input, &user.name).await
    }

    /// Whether the logged-in user has voted on the poll, per the ledger.
    pub async fn user_has_voted(&self, poll_id: &str) -> bool {
        let Some(user) = self.session.current_user().await else {
            return false;
        };
        self.poll_service.has_voted(poll_id, &user.id).await
    }

    /// Whether the logged-in user may read voter rosters.
    pub async fn can_view_roster(&self) -> bool {
        self.session
            .current_user()
            .await
            .is_some_and(|u| can_view_roster(u.role))
    }

    async fn require_roster_access(&self) -> AppResult<user::Model> {
        let user = self.session.require_user().await?;
        if can_view_roster(user.role) {
            Ok(user)
        } else {
            tracing::debug!(user_id = %user.id, "Roster access denied");
            Err(AppError::Forbidden(
                "Hanya pengurus yang dapat melihat data pemilih".to_string(),
            ))
        }
    }

    /// Voters of one poll, newest first.
    pub async fn voter_roster(&self, poll_id: &str) -> AppResult<Vec<VoterRow>> {
        self.require_roster_access().await?;
        self.roster_service.roster(poll_id).await
    }

    /// Voter tracking across every poll.
    pub async fn track_voters(&self, query: &VoterQuery) -> AppResult<VoterReport> {
        self.require_roster_access().await?;
        Ok(self.roster_service.track(query).await)
    }

    /// CSV export of the voters matching `query`.
    pub async fn export_voters(&self, query: &VoterQuery) -> AppResult<CsvExport> {
        let user = self.require_roster_access().await?;
        let export = self.roster_service.export(query).await;
        tracing::debug!(user_id = %user.id, "Export requested");
        Ok(export)
    }

    /// Poll cards for the current session.
    pub async fn board(&self, filter: CategoryFilter) -> Vec<PollSummary> {
        let role = self.session.current_user().await.map(|u| u.role);
        let can_view_voters = role.is_some_and(can_view_roster);

        let mut cards = Vec::new();
        for poll in self.poll_service.list_polls(filter).await {
            let has_voted = self.user_has_voted(&poll.id).await;
            cards.push(Self::summarize(&poll, role, has_voted, can_view_voters));
        }
        cards
    }

    fn summarize(
        poll: &poll::Model,
        role: Option<UserRole>,
        has_voted: bool,
        can_view_voters: bool,
    ) -> PollSummary {
        let options = poll
            .options
            .iter()
            .map(|o| OptionSummary {
                id: o.id.clone(),
                text: o.text.clone(),
                votes: o.votes,
                percentage: poll.percentage(o),
            })
            .collect();

        PollSummary {
            id: poll.id.clone(),
            title: poll.title.clone(),
            category: poll.category,
            category_label: poll.category.label(),
            status: poll.status,
            status_label: poll.status.label(),
            total_votes: poll.total_votes,
            allow_multiple: poll.allow_multiple,
            options,
            winning_option: PollService::winning_option(poll).map(|o| o.text.clone()),
            has_voted,
            can_vote: role.is_some() && poll.accepts_votes() && !has_voted,
            can_view_voters,
        }
    }
}
