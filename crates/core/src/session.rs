//! Typed session access over the key-value store

use crate::store::SessionStore;
use crate::types::UserInfo;
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Storage keys, cleared together on logout or unrecoverable auth failure
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_INFO: &str = "userInfo";
    pub const LAST_ACTIVE: &str = "lastActive";
}

/// Inactivity window after which a persisted session is discarded on read
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// The authenticated session as persisted by the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

/// Typed operations over a [`SessionStore`].
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
    idle_timeout: Option<Duration>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Override the idle timeout; `None` disables the inactivity check
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Current access token, or `None` when absent or idle-expired.
    ///
    /// An idle-expired session is cleared as a whole before reporting
    /// absence. Never fails on a missing token.
    pub async fn access_token(&self) -> CoreResult<Option<String>> {
        if self.idle_expired().await? {
            tracing::warn!("session idle timeout exceeded, discarding session");
            self.clear().await?;
            return Ok(None);
        }
        self.store.get(keys::ACCESS_TOKEN).await
    }

    pub async fn refresh_token(&self) -> CoreResult<Option<String>> {
        self.store.get(keys::REFRESH_TOKEN).await
    }

    pub async fn user(&self) -> CoreResult<Option<UserInfo>> {
        match self.store.get(keys::USER_INFO).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Persist a freshly established session
    pub async fn save(&self, session: &Session) -> CoreResult<()> {
        self.store
            .set(keys::ACCESS_TOKEN, &session.access_token)
            .await?;
        if let Some(refresh) = &session.refresh_token {
            self.store.set(keys::REFRESH_TOKEN, refresh).await?;
        }
        let user = serde_json::to_string(&session.user)?;
        self.store.set(keys::USER_INFO, &user).await?;
        self.touch().await
    }

    /// Persist a refreshed access token, rotating the refresh token only
    /// when the backend issued a new one
    pub async fn update_tokens(
        &self,
        access_token: &str,
        rotated_refresh: Option<&str>,
    ) -> CoreResult<()> {
        self.store.set(keys::ACCESS_TOKEN, access_token).await?;
        if let Some(refresh) = rotated_refresh {
            self.store.set(keys::REFRESH_TOKEN, refresh).await?;
        }
        self.touch().await
    }

    /// Remove every session key
    pub async fn clear(&self) -> CoreResult<()> {
        self.store.remove(keys::ACCESS_TOKEN).await?;
        self.store.remove(keys::REFRESH_TOKEN).await?;
        self.store.remove(keys::USER_INFO).await?;
        self.store.remove(keys::LAST_ACTIVE).await
    }

    /// Record activity for the idle-timeout check
    pub async fn touch(&self) -> CoreResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.store.set(keys::LAST_ACTIVE, &now.to_string()).await
    }

    async fn idle_expired(&self) -> CoreResult<bool> {
        let Some(timeout) = self.idle_timeout else {
            return Ok(false);
        };
        let Some(last_active) = self.store.get(keys::LAST_ACTIVE).await? else {
            return Ok(false);
        };
        let Ok(last_active) = last_active.parse::<i64>() else {
            // Unparseable marker, treat as stale
            return Ok(true);
        };
        let elapsed = chrono::Utc::now().timestamp_millis() - last_active;
        Ok(elapsed > timeout.as_millis() as i64)
    }
}
