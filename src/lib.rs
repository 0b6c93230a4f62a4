//! indexflow library: the client core of the IndexFlow SEO audit tool.
//!
//! This library implements the application logic behind the IndexFlow
//! single-page tool: view routing synchronized with a shareable address,
//! the audit request lifecycle, daily quota enforcement for the Free plan,
//! and per-plan audit history persistence. Analysis itself is delegated to
//! an [`provider::AnalysisProvider`]; the shipped [`SimulatedAuditor`]
//! fabricates results without touching the network.
//!
//! # Example
//!
//! ```no_run
//! use indexflow::{App, Config, SimulatedAuditor};
//! use indexflow::storage::MemoryStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut app = App::new(
//!     SimulatedAuditor::new(),
//!     MemoryStore::new(),
//!     &Config::default(),
//! );
//! app.startup().await;
//!
//! if app.submit("https://example.com").await.is_ok() {
//!     let result = app.view().result.as_ref().expect("audit result");
//!     println!("{} checks, shareable at {}", result.checks.len(), app.address());
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod app;
pub mod checkout;
pub mod config;
pub mod error_handling;
pub mod history;
pub mod identity;
pub mod initialization;
pub mod models;
pub mod provider;
pub mod quota;
pub mod router;
pub mod session;
pub mod storage;

// Re-export public API
pub use app::{AddressOutcome, App, CompletionStatus, ViewState};
pub use config::{Config, LogFormat, LogLevel};
pub use models::{AuditCheck, AuditResult, AuditStatus, HistoryEntry, QuotaRecord};
pub use provider::{AnalysisProvider, SimulatedAuditor};
pub use router::Route;
pub use session::{Plan, Session};
pub use storage::{KeyValueStore, SqliteStore};
