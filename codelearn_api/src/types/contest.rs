use serde::{Deserialize, Serialize};

use super::UserSummary;

/// Numeric identifier for a contest.
pub type ContestID = i64;

/// A timed contest. Start and end times are passed through as the server
/// formats them; the list layer derives the contest status from them.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: ContestID,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub created_by: Option<UserSummary>,
    #[serde(default)]
    pub created_at: String,
}
