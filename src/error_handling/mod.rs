//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions, one enum per concern
//! - Categorization of terminal failures into user-facing messages
//! - Failure statistics tracking

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize, user_message};
pub use stats::ErrorStats;
pub use types::{
    AnalysisError, CheckoutError, ErrorKind, IdentityError, InitializationError, StorageError,
    SubmitError,
};
