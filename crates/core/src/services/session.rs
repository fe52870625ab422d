//! Session state.
//!
//! At most one user is logged in at a time. Vote eligibility is not cached
//! here; it is always read from the vote ledger, which outlives logins.

use std::sync::Arc;

use forum_warga_common::{AppError, AppResult};
use forum_warga_db::entities::user;
use tokio::sync::RwLock;

/// Handle to the current session. Clones share the same state.
#[derive(Clone, Default)]
pub struct Session {
    user: Arc<RwLock<Option<user::Model>>>,
}

impl Session {
    /// A logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logged-in user, if any.
    pub async fn current_user(&self) -> Option<user::Model> {
        self.user.read().await.clone()
    }

    /// Whether a user is logged in.
    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// The logged-in user, or [`AppError::Unauthenticated`].
    pub async fn require_user(&self) -> AppResult<user::Model> {
        self.current_user().await.ok_or(AppError::Unauthenticated)
    }

    pub(crate) async fn establish(&self, user: user::Model) {
        *self.user.write().await = Some(user);
    }

    pub(crate) async fn clear(&self) -> Option<user::Model> {
        self.user.write().await.take()
    }
}
