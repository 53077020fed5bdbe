use serde::{Deserialize, Serialize};

use super::UserSummary;

/// Numeric identifier for a class.
pub type ClassID = i64;

/// A class (cohort) that students join with an invite code.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoom {
    pub id: ClassID,
    pub title: String,
    /// Invite code used to join the class.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub owner: Option<UserSummary>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub enrollments: Vec<serde_json::Value>,
    #[serde(default)]
    pub courses: Vec<CourseRef>,
}

/// The short course listing embedded in a class.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CourseRef {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}
