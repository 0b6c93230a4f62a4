//! Analysis provider contract and the simulated auditor.
//!
//! The application treats analysis as an opaque asynchronous function from
//! `(url, plan)` to an [`AuditResult`]. Implementations are interchangeable;
//! the one shipped here simulates the audit without touching the network.

mod simulated;
pub(crate) mod sitemap;

use async_trait::async_trait;

use crate::error_handling::AnalysisError;
use crate::models::AuditResult;
use crate::session::Plan;

pub use simulated::SimulatedAuditor;

/// Produces an audit result for a URL.
///
/// Implementations must reject malformed URLs with a descriptive error and
/// must return checks partitioned by tier (Free checks visible to everyone,
/// Premium checks unlocked by the Premium plan).
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyzes `url` for a user on `plan`.
    async fn analyze(&self, url: &str, plan: Plan) -> Result<AuditResult, AnalysisError>;
}
