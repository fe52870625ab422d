//! Vote record entity.
//!
//! Audit trail shown in voter rosters. Mirrors a user vote and snapshots
//! the voter's house number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,

    pub poll_id: String,

    pub user_id: String,

    pub user_name: String,

    pub house_number: String,

    pub option_ids: Vec<String>,

    pub timestamp: DateTime<Utc>,
}
