//! In-memory repositories.

pub mod poll;
pub mod user;
pub mod vote;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::{poll as poll_entity, user_vote, vote_record};

pub use poll::PollRepository;
pub use user::UserRepository;
pub use vote::{Tally, VoteRepository};

/// Polls and the vote ledger behind one lock.
///
/// A vote appends to the ledger and bumps the poll tally under a single
/// write guard.
#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) polls: Vec<poll_entity::Model>,
    pub(crate) votes: Vec<user_vote::Model>,
    pub(crate) records: Vec<vote_record::Model>,
}

pub(crate) type SharedTables = Arc<RwLock<Tables>>;

pub(crate) fn shared_tables(polls: Vec<poll_entity::Model>) -> SharedTables {
    Arc::new(RwLock::new(Tables {
        polls,
        ..Tables::default()
    }))
}
