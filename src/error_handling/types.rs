//! Error type definitions.
//!
//! One error enum per concern. Peripheral failures (storage, consent,
//! checkout bookkeeping) are swallowed and logged at the point of
//! occurrence and never abort the primary analysis flow.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client for the identity provider.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Error types for durable storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// The storage backend is unavailable (disabled, out of space, ...).
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors the analysis provider can report.
#[derive(Error, Debug, Clone)]
pub enum AnalysisError {
    /// The URL could not be parsed or is not an http(s) address.
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// The provider failed to produce a result (network, malformed
    /// response, internal failure).
    #[error("Analysis provider failure: {0}")]
    Provider(String),
}

/// Terminal rejection or failure of one submit attempt.
///
/// Validation and quota variants are raised synchronously and never reach
/// the analysis provider.
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    /// The input form was empty.
    #[error("No URL was provided")]
    EmptyUrl,

    /// The input could not be normalized into an http(s) URL.
    #[error("Not a valid http(s) URL: {0}")]
    InvalidUrl(String),

    /// The Free-plan daily ceiling has been reached.
    #[error("Daily limit of {limit} analyses reached")]
    QuotaExceeded {
        /// The configured ceiling that was hit.
        limit: u32,
    },

    /// The provider rejected or failed the request.
    #[error(transparent)]
    Provider(#[from] AnalysisError),

    /// The provider did not answer within the configured timeout.
    #[error("Analysis timed out")]
    Timeout,
}

/// Errors from the identity provider fetch.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Transport-level failure talking to the identity provider.
    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not contain a usable profile.
    #[error("Invalid user profile data received from identity provider")]
    MalformedProfile,
}

/// Errors from the checkout provider.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Checkout requires a signed-in user.
    #[error("Please log in to upgrade your plan")]
    NotSignedIn,

    /// The checkout flow could not be started or was rejected.
    #[error("Checkout failed: {0}")]
    Rejected(String),
}

/// Failure categories tracked by [`super::ErrorStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(missing_docs)]
pub enum ErrorKind {
    // Input validation
    EmptyUrl,
    InvalidUrl,
    // Quota
    QuotaExceeded,
    // Provider
    ProviderFailure,
    AnalysisTimeout,
    // Peripheral concerns
    StorageFailure,
    IdentityFailure,
    CheckoutFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Human-readable label for summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyUrl => "Empty URL",
            ErrorKind::InvalidUrl => "Invalid URL",
            ErrorKind::QuotaExceeded => "Daily quota exceeded",
            ErrorKind::ProviderFailure => "Analysis provider failure",
            ErrorKind::AnalysisTimeout => "Analysis timeout",
            ErrorKind::StorageFailure => "Storage failure",
            ErrorKind::IdentityFailure => "Identity provider failure",
            ErrorKind::CheckoutFailure => "Checkout failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_error_kinds_have_string_representation() {
        for kind in ErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{kind:?} should have a label");
        }
    }

    #[test]
    fn test_submit_error_wraps_analysis_error() {
        let err: SubmitError = AnalysisError::InvalidUrl("nope".into()).into();
        assert!(matches!(err, SubmitError::Provider(_)));
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::QuotaExceeded, ErrorKind::QuotaExceeded);
        assert_ne!(ErrorKind::QuotaExceeded, ErrorKind::ProviderFailure);
    }
}
