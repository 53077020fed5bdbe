//! Account types: the user summary embedded in other records, the
//! profile returned by `/users/my-info`, and the login/logout payloads.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    /// `USER` or `ADMIN`.
    pub name: String,
}

/// Owner or author information attached to courses, problems, contests and classes.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub role: Option<Role>,
}

/// The signed-in user's profile.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: Option<String>,
    pub dob: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub role: Option<Role>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl UserProfile {
    pub fn role_name(&self) -> &str {
        self.role.as_ref().map(|r| r.name.as_str()).unwrap_or("USER")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginData {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogoutRequest {
    pub token: String,
}
