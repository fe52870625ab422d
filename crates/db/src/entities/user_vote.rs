//! User vote entity.
//!
//! One entry per vote event; a (poll, user) pair appears at most once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub poll_id: String,

    pub user_id: String,

    /// Display name of the voter at the time of voting.
    pub user_name: String,

    /// Options selected in this event.
    pub option_ids: Vec<String>,

    pub timestamp: DateTime<Utc>,
}
