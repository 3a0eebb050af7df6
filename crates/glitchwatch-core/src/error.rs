//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// The engine absorbs these locally; they exist so that component
/// operations can report *why* they declined to act.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A scene id is absent from the configuration.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// A hotspot id is absent from the configuration.
    #[error("unknown hotspot: {0}")]
    UnknownHotspot(String),

    /// A quiz hotspot carries no usable questions.
    #[error("invalid quiz data for hotspot {hotspot_id}: {reason}")]
    InvalidQuizData {
        /// The offending quiz hotspot.
        hotspot_id: String,
        /// What is wrong with its question set.
        reason: String,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),
}
