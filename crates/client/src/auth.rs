//! Authentication endpoints

use crate::client::BackofficeClient;
use crate::error::ClientError;
use crate::types::{LoginData, LoginRequest};
use backoffice_core::{Session, UserInfo};

impl BackofficeClient {
    /// Log in and persist the resulting session
    pub async fn login(
        &self,
        user_id: impl Into<String>,
        user_pwd: impl Into<String>,
    ) -> Result<LoginData, ClientError> {
        let request = LoginRequest {
            user_id: user_id.into(),
            user_pwd: user_pwd.into(),
        };
        let data: LoginData = self.post("/api/v1/auth/login", &request).await?;

        self.session()
            .save(&Session {
                access_token: data.token.clone(),
                refresh_token: data.refresh_token.clone(),
                user: data.user.clone(),
            })
            .await?;
        tracing::debug!(user = %data.user.username, "login succeeded, session persisted");
        Ok(data)
    }

    /// Clear the persisted session. Purely local; the backend holds no
    /// server-side session to invalidate.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session().clear().await?;
        Ok(())
    }

    /// Current user as reported by the backend
    pub async fn me(&self) -> Result<UserInfo, ClientError> {
        self.get("/api/v1/auth/me").await
    }

    /// Force a token refresh outside the 401 path. Joins the in-flight
    /// refresh if one is already running.
    pub async fn refresh_session(&self) -> Result<String, ClientError> {
        self.guard().refresh().await
    }
}
