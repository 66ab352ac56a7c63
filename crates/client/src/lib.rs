//! HTTP client for the backoffice REST API
//!
//! Every outbound call goes through the session/transport guard: the current
//! access token is injected as a bearer header, response envelopes are
//! unwrapped, and a 401 triggers at most one token refresh regardless of how
//! many requests fail concurrently. Requests that hit a 401 while a refresh
//! is in flight join it and replay once with the new token.

mod auth;
pub mod client;
pub mod error;
mod guard;
pub mod refresh;
mod resources;
pub mod types;

pub use client::{BackofficeClient, BackofficeClientBuilder, SessionExpiredHook, DEFAULT_TIMEOUT};
pub use error::ClientError;
