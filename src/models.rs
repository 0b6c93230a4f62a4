//! Core audit data model.
//!
//! These are the shapes every analysis provider must produce and the shapes
//! the history store persists. Stored JSON uses camelCase field names and
//! RFC 3339 timestamps so payloads written by earlier releases of the
//! application keep deserializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro};

use crate::session::Plan;

/// Outcome classification of a single audit check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DisplayMacro, EnumIterMacro,
)]
pub enum AuditStatus {
    /// The check passed.
    #[serde(rename = "OK")]
    #[strum(serialize = "OK")]
    Ok,
    /// The check found an issue that needs fixing.
    Problem,
    /// Informational finding, neither pass nor fail.
    Info,
}

/// One line item of the simulated SEO audit.
///
/// The `id` is a stable identifier used by renderers to decide which checks
/// are locked behind the Premium tier; it carries no other meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditCheck {
    /// Stable identifier, unique within one result (e.g. `titleTag`).
    pub id: String,
    /// Human-readable check name.
    pub label: String,
    /// Outcome classification.
    pub status: AuditStatus,
    /// What was observed on the page.
    pub detail: String,
    /// What the user should do about it.
    pub recommendation: String,
    /// Plan tier that unlocks this check in the report.
    pub tier: Plan,
}

/// Meta tags proposed for the audited page (Premium feature).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GeneratedMetaTags {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// A suggestion to improve the anchor text of one internal link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AnchorTextSuggestion {
    pub link: String,
    pub current_anchor_text: String,
    pub suggested_anchor_text: String,
}

/// A page that would benefit from an internal link it does not have yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct LinkingOpportunity {
    pub target_page: String,
    pub source_page_suggestion: String,
    pub reason: String,
}

/// Internal-link findings for the audited site (Premium feature).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InternalLinkAnalysis {
    pub anchor_text_suggestions: Vec<AnchorTextSuggestion>,
    pub orphaned_pages: Vec<String>,
    pub linking_opportunities: Vec<LinkingOpportunity>,
}

/// Complete result of one analysis.
///
/// Produced by an [`crate::provider::AnalysisProvider`]; treated as opaque
/// and immutable by the rest of the application once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Ordered audit checks, partitioned by `tier`.
    pub checks: Vec<AuditCheck>,
    /// Generated XML sitemap document.
    pub sitemap_xml: String,
    /// Internal links discovered on the audited site.
    pub discovered_links: Vec<String>,
    /// Proposed meta tags; present only for Premium-plan analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_meta_tags: Option<GeneratedMetaTags>,
    /// Internal-link analysis; present only for Premium-plan analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_analysis: Option<InternalLinkAnalysis>,
}

/// One saved past analysis, replayable without re-invoking the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique, timestamp-derived identifier.
    pub id: String,
    /// The URL that was analyzed.
    pub url: String,
    /// When the analysis completed.
    pub timestamp: DateTime<Utc>,
    /// The full result at that time.
    pub result: AuditResult,
}

impl HistoryEntry {
    /// Builds an entry for a just-completed analysis. The id is derived from
    /// the timestamp at nanosecond precision.
    pub fn new(url: impl Into<String>, result: AuditResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: timestamp.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true),
            url: url.into(),
            timestamp,
            result,
        }
    }
}

/// Persisted per-day counter of Free-plan analyses.
///
/// The count implicitly resets when `date` no longer names the current
/// calendar day; no background job rewrites stale records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRecord {
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
    /// Analyses recorded on that day.
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn minimal_result() -> AuditResult {
        AuditResult {
            checks: vec![AuditCheck {
                id: "titleTag".into(),
                label: "Title Tag".into(),
                status: AuditStatus::Ok,
                detail: "\"Sample Title\" (Length: 12)".into(),
                recommendation: "Keep title tags between 10 and 60 characters.".into(),
                tier: Plan::Free,
            }],
            sitemap_xml: "<urlset/>".into(),
            discovered_links: vec!["https://example.com/".into()],
            generated_meta_tags: None,
            link_analysis: None,
        }
    }

    #[test]
    fn test_audit_status_serializes_as_legacy_strings() {
        assert_eq!(serde_json::to_string(&AuditStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(
            serde_json::to_string(&AuditStatus::Problem).unwrap(),
            "\"Problem\""
        );
        assert_eq!(
            serde_json::to_string(&AuditStatus::Info).unwrap(),
            "\"Info\""
        );
    }

    #[test]
    fn test_audit_status_display_matches_serialization() {
        for status in AuditStatus::iter() {
            let display = status.to_string();
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{display}\""));
        }
    }

    #[test]
    fn test_check_accepts_legacy_tier_spellings() {
        let json = r#"{
            "id": "openGraphTags",
            "label": "Open Graph Tags",
            "status": "Problem",
            "detail": "og:image missing",
            "recommendation": "Add og:image.",
            "tier": "PRO"
        }"#;
        let check: AuditCheck = serde_json::from_str(json).unwrap();
        assert_eq!(check.tier, Plan::Premium);

        let json = json.replace("\"PRO\"", "\"FREE\"");
        let check: AuditCheck = serde_json::from_str(&json).unwrap();
        assert_eq!(check.tier, Plan::Free);
    }

    #[test]
    fn test_result_roundtrips_with_camel_case_fields() {
        let result = minimal_result();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"sitemapXml\""));
        assert!(json.contains("\"discoveredLinks\""));
        // Absent premium sections are omitted entirely, not serialized as null
        assert!(!json.contains("generatedMetaTags"));
        let back: AuditResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_history_entry_id_is_timestamp_derived() {
        let ts = Utc::now();
        let entry = HistoryEntry::new("https://example.com", minimal_result(), ts);
        assert_eq!(entry.id, ts.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true));
        assert_eq!(entry.timestamp, ts);
    }

    #[test]
    fn test_history_entry_timestamp_serializes_as_rfc3339() {
        let ts = "2026-08-07T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let entry = HistoryEntry::new("https://example.com", minimal_result(), ts);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":\"2026-08-07T12:00:00Z\""));
    }

    #[test]
    fn test_quota_record_shape() {
        let record = QuotaRecord {
            date: "2026-08-07".into(),
            count: 2,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"date":"2026-08-07","count":2}"#);
    }
}
