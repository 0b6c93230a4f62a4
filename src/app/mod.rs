//! Application controller and view state.
//!
//! This module provides the top-level state struct, the audit request
//! lifecycle, and input URL validation.

pub mod controller;
pub mod lifecycle;
pub mod state;
pub mod url;

// Re-export public API
pub use controller::{AddressOutcome, App};
pub use lifecycle::{AnalysisTicket, CompletionStatus};
pub use state::ViewState;
pub use url::validate_and_normalize_url;
