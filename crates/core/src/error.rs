//! Error types for the screenfit domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every variant is a
//! terminal, synchronous failure: the operations are deterministic, so
//! retrying a failed call changes nothing.

use thiserror::Error;

/// The top-level error type for all screenfit operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // --- Configuration errors (raised before any summarization work) ---
    #[error("Invalid geometry: {field} {reason}")]
    InvalidGeometry { field: &'static str, reason: String },

    #[error("Unknown layer: {name} (available: {available})")]
    UnknownLayer { name: String, available: String },

    #[error("Unknown persona: {name} (available: {available})")]
    UnknownPersona { name: String, available: String },

    #[error("Duplicate profile name in one run: {0}")]
    DuplicateProfile(String),

    #[error("chars_per_token must be a finite value > 0, got {0}")]
    InvalidRatio(f64),

    // --- Content errors (surfaced by collaborators) ---
    #[error("No text to summarize: {0}")]
    EmptyInput(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidGeometry`] value.
    pub fn geometry(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
