// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Structured error type for nlcor core APIs.
///
/// # Error Philosophy
/// - Error messages are operational and actionable.
/// - Expected failures are represented as `NlcorError` (not panics).
/// - Degenerate statistics (zero-variance segments, undefined p-values) are
///   handled as values, never as errors.
#[derive(thiserror::Error, Debug)]
pub enum NlcorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
}

impl NlcorError {
    /// Creates an `NlcorError::InvalidInput`.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an `NlcorError::NumericalIssue`.
    pub fn numerical_issue(msg: impl Into<String>) -> Self {
        Self::NumericalIssue(msg.into())
    }
}
