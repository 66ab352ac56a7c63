//! Backoffice core types and utilities

pub mod error;
pub mod session;
pub mod store;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use session::{Session, SessionHandle};
pub use store::{FileStore, MemoryStore, SessionStore};
pub use types::{ApiEnvelope, PageQuery, PageResponse, UserInfo};
