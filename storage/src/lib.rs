//! Storage crate: SQLite-backed stores for conversations, read markers and
//! sessions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`conversation_repo`] – ConversationRepository (memberships, latest messages)
//! - [`read_marker_repo`] – ReadMarkerRepository (per-user read markers)
//! - [`session_repo`] – SessionRepository (token → user lookups)
//! - [`sqlite_pool`] – SqlitePoolManager

mod conversation_repo;
mod error;
mod read_marker_repo;
mod session_repo;
mod sqlite_pool;

#[cfg(test)]
mod session_repo_test;

pub use conversation_repo::ConversationRepository;
pub use error::StorageError;
pub use read_marker_repo::ReadMarkerRepository;
pub use session_repo::SessionRepository;
pub use sqlite_pool::SqlitePoolManager;
