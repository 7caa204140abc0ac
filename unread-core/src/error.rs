//! Error type shared by the source ports.
//!
//! Implementations map their backend failures into this; callers on the
//! read path treat any variant as "no data" rather than propagating it.

use thiserror::Error;

/// Errors that can occur when fetching from or writing to a backing store.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
