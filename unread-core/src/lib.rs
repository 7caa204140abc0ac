//! Read-state domain: conversation records, source ports and the unread
//! reconciler.
//!
//! ## Modules
//!
//! - [`error`] – SourceError for port implementations
//! - [`models`] – Conversation, LastMessage, ReadMarker
//! - [`outcome`] – UnreadOutcome fail-open result
//! - [`reconciler`] – compute_unread_count
//! - [`sources`] – MembershipResolver, LastMessageSource, ReadMarkerStore ports

mod error;
mod models;
mod outcome;
mod reconciler;
mod sources;


pub use error::SourceError;
pub use models::{Conversation, LastMessage, ReadMarker};
pub use outcome::UnreadOutcome;
pub use reconciler::{compute_unread_count, parse_instant};
pub use sources::{LastMessageSource, MembershipResolver, ReadMarkerStore};
