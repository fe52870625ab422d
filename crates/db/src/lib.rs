//! Storage layer for forum-warga.
//!
//! All state lives in memory: users in one collection, polls and the vote
//! ledger in another guarded by a single lock. [`Store`] bundles their
//! repositories; clones share the same collections.

pub mod entities;
pub mod repositories;
pub mod seed;

use entities::{poll, user};
use forum_warga_common::AppResult;
use repositories::{PollRepository, UserRepository, VoteRepository, shared_tables};
use tracing::info;

/// Handles to every collection.
#[derive(Clone)]
pub struct Store {
    /// Registered users.
    pub users: UserRepository,
    /// Polls, newest first.
    pub polls: PollRepository,
    /// Vote ledger.
    pub votes: VoteRepository,
}

impl Store {
    /// A store holding `users` and `polls` and an empty vote ledger.
    #[must_use]
    pub fn new(users: Vec<user::Model>, polls: Vec<poll::Model>) -> Self {
        let tables = shared_tables(polls);
        Self {
            users: UserRepository::new(users),
            polls: PollRepository::new(tables.clone()),
            votes: VoteRepository::new(tables),
        }
    }

    /// A store with no users, polls or votes.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A store holding the seed users and polls and an empty vote ledger.
    pub fn seeded() -> AppResult<Self> {
        let users = seed::users();
        let polls = seed::polls()?;
        info!(users = users.len(), polls = polls.len(), "Seed data loaded");

        Ok(Self::new(users, polls))
    }
}

