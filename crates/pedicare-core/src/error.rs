//! # Error Module
//!
//! Errors raised while constructing core inputs.
//!
//! Classification itself never fails: [`crate::TriageEngine::classify`] is
//! total and [`crate::GrowthClassifier`] reports its own
//! [`crate::ValidationError`]. `CoreError` covers the typed constructors
//! and parsers around them.

use thiserror::Error;

/// Errors from core constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Self-reported severity outside 1..=5.
    #[error("Severity {0} out of valid range 1..=5")]
    SeverityOutOfRange(u8),

    /// Text that matches none of the options of a questionnaire field.
    #[error("Unknown {kind} option: {value}")]
    UnknownOption {
        /// The field being parsed (e.g. "fever").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// No vaccine with this id in the record.
    #[error("Unknown vaccine: {0}")]
    UnknownVaccine(String),

    /// Dispatch timeline steps are empty or out of order.
    #[error("Invalid dispatch timeline: {0}")]
    InvalidTimeline(&'static str),
}

impl CoreError {
    pub(crate) fn unknown_option(kind: &'static str, value: &str) -> Self {
        Self::UnknownOption {
            kind,
            value: value.to_string(),
        }
    }
}
