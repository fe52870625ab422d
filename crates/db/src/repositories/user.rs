//! User repository.

use std::sync::Arc;

use crate::entities::user;
use forum_warga_common::{AppError, AppResult};
use tokio::sync::RwLock;

/// In-memory user collection.
///
/// Users are appended at registration and never mutated or removed.
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<user::Model>>>,
}

impl UserRepository {
    /// Create a repository holding `users`.
    #[must_use]
    pub fn new(users: Vec<user::Model>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> Option<user::Model> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("User not found: {id}")))
    }

    /// Find the user whose email and house number both match.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        house_number: &str,
    ) -> Option<user::Model> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.matches_credentials(email, house_number))
            .cloned()
    }

    /// All users, in registration order.
    pub async fn all(&self) -> Vec<user::Model> {
        self.users.read().await.clone()
    }

    /// Number of users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Append a new user.
    pub async fn create(&self, model: user::Model) -> AppResult<user::Model> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == model.id) {
            return Err(AppError::Internal(format!(
                "Duplicate user id: {}",
                model.id
            )));
        }
        users.push(model.clone());
        Ok(model)
    }
}
