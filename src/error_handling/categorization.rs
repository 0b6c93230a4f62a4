//! Error categorization and user-facing messages.
//!
//! The UI shows a single inline error region near the input form. Every
//! terminal failure funnels through [`user_message`] so that region always
//! carries one consistent, human-readable sentence, and through
//! [`categorize`] so failure counts stay comparable across categories.

use super::types::{ErrorKind, SubmitError};

/// Maps a terminal submit failure to the message shown in the inline error
/// region.
///
/// Quota exhaustion gets a distinct message with an upgrade call-to-action
/// so it cannot be mistaken for a provider outage.
pub fn user_message(error: &SubmitError) -> String {
    match error {
        SubmitError::EmptyUrl => "Please enter a valid URL.".to_string(),
        SubmitError::InvalidUrl(_) => {
            "Invalid URL provided. Please include http:// or https://".to_string()
        }
        SubmitError::QuotaExceeded { limit } => format!(
            "You have reached your daily limit of {limit} audits on the Free plan. \
             Please upgrade to Premium for unlimited analyses."
        ),
        SubmitError::Provider(_) => {
            "The analysis could not be completed. Please try again in a moment.".to_string()
        }
        SubmitError::Timeout => {
            "The analysis took too long and was cancelled. Please try again.".to_string()
        }
    }
}

/// Maps a terminal submit failure to its statistics category.
pub fn categorize(error: &SubmitError) -> ErrorKind {
    match error {
        SubmitError::EmptyUrl => ErrorKind::EmptyUrl,
        SubmitError::InvalidUrl(_) => ErrorKind::InvalidUrl,
        SubmitError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
        SubmitError::Provider(_) => ErrorKind::ProviderFailure,
        SubmitError::Timeout => ErrorKind::AnalysisTimeout,
    }
}
