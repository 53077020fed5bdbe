use serde::{Deserialize, Serialize};

/// The `{ code, message, data }` wrapper around every response body.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// One page of a list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageData<T> {
    pub total_records: i64,
    #[serde(default)]
    pub total_records_page: i64,
    pub current_page: i64,
    pub total_pages: i64,
    #[serde(default)]
    pub prev_pages: Option<i64>,
    #[serde(default)]
    pub next_pages: Option<i64>,
    pub data: Vec<T>,
}

pub type PaginatedResponse<T> = ApiResponse<PageData<T>>;
