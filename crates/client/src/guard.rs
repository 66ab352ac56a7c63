//! Session/transport guard: bearer lookup and the 401 refresh protocol

use crate::client::SessionExpiredHook;
use crate::error::ClientError;
use crate::refresh::{RefreshCoordinator, RefreshFailure};
use crate::types::{LoginData, RefreshRequest};
use backoffice_core::{ApiEnvelope, SessionHandle};
use std::sync::Arc;

pub(crate) struct SessionGuard {
    http: reqwest::Client,
    refresh_url: String,
    session: SessionHandle,
    coordinator: RefreshCoordinator,
    on_session_expired: Option<SessionExpiredHook>,
}

impl SessionGuard {
    pub fn new(
        http: reqwest::Client,
        refresh_url: String,
        session: SessionHandle,
        on_session_expired: Option<SessionExpiredHook>,
    ) -> Self {
        Self {
            http,
            refresh_url,
            session,
            coordinator: RefreshCoordinator::new(),
            on_session_expired,
        }
    }

    /// Bearer value for the next request. Absence is not an error; the
    /// request simply goes out unauthenticated.
    pub async fn bearer(&self) -> Result<Option<String>, ClientError> {
        Ok(self.session.access_token().await?)
    }

    /// Resolve a 401: join the in-flight refresh or start the single one.
    ///
    /// On failure the flight itself tears the session down and fires the
    /// expiry hook, so teardown happens exactly once no matter how many
    /// requests were waiting.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let flight = self.coordinator.join_or_start(|| {
            let http = self.http.clone();
            let url = self.refresh_url.clone();
            let session = self.session.clone();
            let hook = self.on_session_expired.clone();
            async move {
                match run_refresh(&http, &url, &session).await {
                    Ok(token) => Ok(token),
                    Err(err) => {
                        tracing::error!(error = %err, "token refresh failed, tearing down session");
                        if let Err(clear_err) = session.clear().await {
                            tracing::error!(error = %clear_err, "session teardown failed");
                        }
                        if let Some(hook) = hook {
                            hook();
                        }
                        Err(RefreshFailure(Arc::new(err)))
                    }
                }
            }
        });

        flight
            .await
            .map_err(|failure| ClientError::SessionExpired(failure.to_string()))
    }
}

/// One refresh network call: exchange the stored refresh token for a new
/// access token and persist it.
async fn run_refresh(
    http: &reqwest::Client,
    url: &str,
    session: &SessionHandle,
) -> Result<String, ClientError> {
    let Some(refresh_token) = session.refresh_token().await? else {
        // Never logged in or already cleared; skip the network call.
        return Err(ClientError::AuthenticationFailed(
            "no refresh token stored".into(),
        ));
    };

    let response = http
        .post(url)
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(ClientError::from_status(status, message));
    }

    let envelope: ApiEnvelope<LoginData> = response.json().await?;
    let data = envelope
        .into_data()
        .map_err(|(code, message)| ClientError::Api { code, message })?
        .ok_or(ClientError::MissingData)?;

    session
        .update_tokens(&data.token, data.refresh_token.as_deref())
        .await?;
    tracing::debug!("access token refreshed");
    Ok(data.token)
}
