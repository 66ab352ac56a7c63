//! Wire types shared by every backend endpoint

use serde::{Deserialize, Serialize};

/// Application-level success code used by the backend envelope
pub const CODE_OK: &str = "200";

/// Response envelope wrapping every backend payload.
///
/// The backend reports application-level failures through `code`/`message`
/// even when the transport status is 200, so callers must check
/// [`ApiEnvelope::is_success`] before trusting `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the backend reported application-level success
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }

    /// Unwrap the payload, or the envelope's code/message on failure
    pub fn into_data(self) -> Result<Option<T>, (String, String)> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err((self.code, self.message))
        }
    }
}

/// Pagination query parameters (`page` is 1-based)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

/// Paginated list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub pages: u32,
}

/// Authenticated user as reported by the login and `/auth/me` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<String>,
}
