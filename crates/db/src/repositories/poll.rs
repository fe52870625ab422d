//! Poll repository.

use crate::entities::{CategoryFilter, poll};
use crate::repositories::SharedTables;
use forum_warga_common::{AppError, AppResult};

/// In-memory poll collection.
///
/// Seeded polls keep their order; polls created later are placed in front.
/// Tallies change only through [`VoteRepository::cast`](super::VoteRepository::cast).
#[derive(Clone)]
pub struct PollRepository {
    tables: SharedTables,
}

impl PollRepository {
    pub(crate) const fn new(tables: SharedTables) -> Self {
        Self { tables }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: &str) -> Option<poll::Model> {
        self.tables
            .read()
            .await
            .polls
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Get a poll by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Poll not found: {id}")))
    }

    /// Polls passing `filter`, newest first.
    pub async fn list(&self, filter: CategoryFilter) -> Vec<poll::Model> {
        self.tables
            .read()
            .await
            .polls
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Insert a new poll in front of the existing ones.
    pub async fn create(&self, model: poll::Model) -> AppResult<poll::Model> {
        let mut tables = self.tables.write().await;
        if tables.polls.iter().any(|p| p.id == model.id) {
            return Err(AppError::Internal(format!(
                "Duplicate poll id: {}",
                model.id
            )));
        }
        tables.polls.insert(0, model.clone());
        Ok(model)
    }
}
