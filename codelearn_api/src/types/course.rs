//! Course catalog types returned by the `/course` endpoints.

use serde::{Deserialize, Serialize};

use super::{Problem, UserSummary};

/// Numeric identifier for a course.
pub type CourseID = i64;

/// A course with its modules, as returned by `/course/get-all` and `/course/search`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseID,
    pub thumbnail_url: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// The instructor who owns the course. Missing for some legacy records.
    pub owner: Option<UserSummary>,
    pub is_public: Option<bool>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// An ordered chapter of a course.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub title: String,
    pub position: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub position: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
