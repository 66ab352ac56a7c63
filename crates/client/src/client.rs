//! Backoffice API client and builder

use crate::error::ClientError;
use crate::guard::SessionGuard;
use backoffice_core::{ApiEnvelope, MemoryStore, SessionHandle, SessionStore};
use reqwest::{header, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Invoked exactly once per failed refresh flight, after the session has
/// been cleared. The seam where an embedding UI redirects to its login
/// entry point.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Backoffice API client
#[derive(Clone)]
pub struct BackofficeClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionHandle,
    guard: Arc<SessionGuard>,
}

impl BackofficeClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> BackofficeClientBuilder {
        BackofficeClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Typed access to the persisted session
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// GET a payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.required(self.call(Method::GET, path, None::<&()>, None::<&()>).await?)
    }

    /// GET a payload with query parameters
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.required(self.call(Method::GET, path, Some(query), None::<&()>).await?)
    }

    /// POST a JSON body and return the payload
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.required(self.call(Method::POST, path, None::<&()>, Some(body)).await?)
    }

    /// POST a JSON body, ignoring any payload
    pub async fn post_empty<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, None::<&()>, Some(body)).await?;
        Ok(())
    }

    /// PUT a JSON body and return the payload
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.required(self.call(Method::PUT, path, None::<&()>, Some(body)).await?)
    }

    /// PUT a JSON body, ignoring any payload
    pub async fn put_empty<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, None::<&()>, Some(body)).await?;
        Ok(())
    }

    /// DELETE, ignoring any payload
    pub async fn delete_empty(&self, path: &str) -> Result<(), ClientError> {
        self.call(Method::DELETE, path, None::<&()>, None::<&()>)
            .await?;
        Ok(())
    }

    fn required<T: DeserializeOwned>(
        &self,
        data: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let value = data.ok_or(ClientError::MissingData)?;
        Ok(serde_json::from_value(value)?)
    }

    /// One guarded call: attach the bearer, send, and on a 401 run the
    /// refresh protocol and replay exactly once. The replay path cannot
    /// re-enter the refresh, so a second 401 is terminal.
    async fn call<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Option<serde_json::Value>, ClientError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let bearer = self.guard.bearer().await?;
        let envelope = match self.attempt(method.clone(), path, query, body, bearer).await {
            Err(err) if err.is_unauthorized() => {
                tracing::warn!(path, "request rejected with 401, refreshing access token");
                let token = self.guard.refresh().await?;
                tracing::debug!(path, "replaying request with refreshed token");
                self.attempt(method, path, query, body, Some(token)).await?
            }
            other => other?,
        };

        envelope.into_data().map_err(|(code, message)| {
            tracing::debug!(path, %code, "backend reported application error");
            ClientError::Api { code, message }
        })
    }

    /// Build and send a single request; never retries
    async fn attempt<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        bearer: Option<String>,
    ) -> Result<ApiEnvelope<serde_json::Value>, ClientError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            if status == reqwest::StatusCode::FORBIDDEN || status.is_server_error() {
                tracing::error!(path, status = status.as_u16(), "request failed");
            }
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for [`BackofficeClient`]
#[derive(Default)]
pub struct BackofficeClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
    idle_timeout: Option<Option<Duration>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl BackofficeClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (defaults to 10 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the session store (defaults to an in-memory store)
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the session idle timeout; `None` disables it
    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Callback fired exactly once when a refresh flight fails and the
    /// session is torn down
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<BackofficeClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));
        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("backoffice-client/0.1.0");
        }
        let client = client_builder.build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let mut session = SessionHandle::new(store);
        if let Some(idle_timeout) = self.idle_timeout {
            session = session.with_idle_timeout(idle_timeout);
        }

        let guard = SessionGuard::new(
            client.clone(),
            format!("{base_url}/api/v1/auth/refresh"),
            session.clone(),
            self.on_session_expired,
        );

        Ok(BackofficeClient {
            client,
            base_url,
            session,
            guard: Arc::new(guard),
        })
    }
}
