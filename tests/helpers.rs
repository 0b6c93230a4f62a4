// Shared test helpers for application setup and test data creation.
//
// This module provides common utilities used across multiple test files to
// reduce duplication.

use indexflow::identity::UserProfile;
use indexflow::models::AuditResult;
use indexflow::session::Plan;
use indexflow::storage::MemoryStore;
use indexflow::{AnalysisProvider, App, Config, SimulatedAuditor};

/// Builds an app around an in-memory store and a deterministic, zero-latency
/// auditor.
#[allow(dead_code)] // Used by other test files
pub fn memory_app() -> App<SimulatedAuditor, MemoryStore> {
    memory_app_with(MemoryStore::new(), Config::default())
}

/// Same as [`memory_app`] but with an explicit store and config, for tests
/// that need to inspect storage or change the plan limits.
#[allow(dead_code)]
pub fn memory_app_with(store: MemoryStore, config: Config) -> App<SimulatedAuditor, MemoryStore> {
    App::new(SimulatedAuditor::deterministic(42), store, &config)
}

/// A plausible identity-provider profile for the given address.
#[allow(dead_code)]
pub fn profile(email: &str) -> UserProfile {
    UserProfile {
        id: format!("id-{email}"),
        email: email.to_string(),
        name: "Test User".to_string(),
        picture: "https://example.com/avatar.png".to_string(),
        verified_email: true,
        given_name: "Test".to_string(),
        family_name: "User".to_string(),
        locale: "en".to_string(),
    }
}

/// A complete audit result for fabricated completions.
#[allow(dead_code)]
pub async fn sample_result(url: &str) -> AuditResult {
    SimulatedAuditor::deterministic(42)
        .analyze(url, Plan::Free)
        .await
        .expect("simulated analysis should succeed")
}
