//! The simulated analysis provider.
//!
//! Stands in for a server-side crawler or an AI-backed analysis endpoint:
//! given a URL it fabricates a plausible on-page audit, a sitemap, and (for
//! Premium requests) generated meta tags and an internal-link analysis.
//! Nothing here touches the network.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

use super::sitemap;
use crate::config::SIMULATED_ANALYSIS_DELAY;
use crate::error_handling::AnalysisError;
use crate::models::{
    AnchorTextSuggestion, AuditCheck, AuditResult, AuditStatus, GeneratedMetaTags,
    InternalLinkAnalysis, LinkingOpportunity,
};
use crate::provider::AnalysisProvider;
use crate::session::Plan;

/// Simulated auditor with configurable latency and optional fixed RNG seed.
pub struct SimulatedAuditor {
    latency: Duration,
    seed: Option<u64>,
}

impl SimulatedAuditor {
    /// An auditor with production-like simulated latency.
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_ANALYSIS_DELAY,
            seed: None,
        }
    }

    /// Overrides the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// A zero-latency auditor producing identical results for a given seed.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            latency: Duration::ZERO,
            seed: Some(seed),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for SimulatedAuditor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisProvider for SimulatedAuditor {
    async fn analyze(&self, url: &str, plan: Plan) -> Result<AuditResult, AnalysisError> {
        let parsed = Url::parse(url).map_err(|_| AnalysisError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(AnalysisError::InvalidUrl(url.to_string()));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut rng = self.rng();
        let checks = build_checks(&parsed, &mut rng);
        let (sitemap_xml, discovered_links) =
            sitemap::generate(&parsed, Utc::now().date_naive())?;

        let (generated_meta_tags, link_analysis) = match plan {
            Plan::Premium => (
                Some(generate_meta_tags(&parsed)),
                Some(analyze_internal_links(&parsed, &discovered_links)),
            ),
            Plan::Free => (None, None),
        };

        Ok(AuditResult {
            checks,
            sitemap_xml,
            discovered_links,
            generated_meta_tags,
            link_analysis,
        })
    }
}

fn host(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

fn build_checks(url: &Url, rng: &mut StdRng) -> Vec<AuditCheck> {
    let hostname = host(url);

    let title_text = format!("Sample Title for {hostname}");
    let title_len = title_text.len();

    let meta_desc_text = format!(
        "This is a sample meta description for {hostname}. It's generated for \
         demonstration purposes and should be between 120 and 150 characters."
    );
    let meta_desc_len = meta_desc_text.len();
    let length_ok = meta_desc_len > 70 && meta_desc_len < 160;
    // 80% chance the sampled copy "contains" relevant keywords
    let has_keywords = rng.random_bool(0.8);

    let h1_text = format!("Welcome to {hostname}");

    let mut checks = vec![
        AuditCheck {
            id: "statusCode".into(),
            label: "Status Code".into(),
            status: AuditStatus::Ok,
            detail: "200 OK".into(),
            recommendation: "The page is accessible. No action needed.".into(),
            tier: Plan::Free,
        },
        AuditCheck {
            id: "titleTag".into(),
            label: "Title Tag".into(),
            status: if title_len > 10 && title_len < 60 {
                AuditStatus::Ok
            } else {
                AuditStatus::Problem
            },
            detail: format!("\"{title_text}\" (Length: {title_len})"),
            recommendation: "Keep title tags between 10 and 60 characters for best \
                             visibility in search results."
                .into(),
            tier: Plan::Free,
        },
        AuditCheck {
            id: "metaDescription".into(),
            label: "Meta Description".into(),
            status: if length_ok && has_keywords {
                AuditStatus::Ok
            } else {
                AuditStatus::Problem
            },
            detail: format!(
                "\"{meta_desc_text}\" (Length: {meta_desc_len} | Keywords: {})",
                if has_keywords { "Detected" } else { "Missing" }
            ),
            recommendation: "Meta descriptions should be between 70 and 160 characters and \
                             include relevant keywords to attract users from search results."
                .into(),
            tier: Plan::Free,
        },
        AuditCheck {
            id: "h1Tag".into(),
            label: "H1 Tag".into(),
            status: if h1_text.is_empty() {
                AuditStatus::Problem
            } else {
                AuditStatus::Ok
            },
            detail: format!("\"{h1_text}\""),
            recommendation: "Ensure every page has exactly one H1 tag that accurately \
                             describes the page content."
                .into(),
            tier: Plan::Free,
        },
    ];

    // Canonical tag scenario split: 15% missing, 70% self-referencing,
    // 15% pointing elsewhere.
    let canonical_scenario: f64 = rng.random_range(0.0..1.0);
    checks.push(if canonical_scenario < 0.15 {
        AuditCheck {
            id: "canonicalTag".into(),
            label: "Canonical Tag".into(),
            status: AuditStatus::Problem,
            detail: "Not found".into(),
            recommendation: "Add a canonical tag to prevent duplicate content issues. It \
                             tells search engines which version of a page is the primary one."
                .into(),
            tier: Plan::Free,
        }
    } else if canonical_scenario < 0.85 {
        AuditCheck {
            id: "canonicalTag".into(),
            label: "Canonical Tag".into(),
            status: AuditStatus::Ok,
            detail: format!("Self-referencing: \"{url}\""),
            recommendation: "The self-referencing canonical tag is correctly set up, which \
                             is great for SEO."
                .into(),
            tier: Plan::Free,
        }
    } else {
        let preferred = url
            .join("/preferred-page")
            .map(|u| u.to_string())
            .unwrap_or_else(|_| "/preferred-page".to_string());
        AuditCheck {
            id: "canonicalTag".into(),
            label: "Canonical Tag".into(),
            status: AuditStatus::Info,
            detail: format!("Points to: \"{preferred}\""),
            recommendation: "This page points to another URL as the canonical version. \
                             Ensure this is intentional, as only the canonical URL will be \
                             indexed."
                .into(),
            tier: Plan::Free,
        }
    });

    checks.push(AuditCheck {
        id: "robotsTxt".into(),
        label: "Robots.txt".into(),
        status: AuditStatus::Info,
        detail: format!("Present at {}robots.txt", origin_with_slash(url)),
        recommendation: "A robots.txt file was found. Review it to ensure it allows \
                         crawlers to access important pages."
            .into(),
        tier: Plan::Free,
    });

    // Premium-tier checks. Always part of the result; renderers lock them
    // for Free-plan viewers.
    let missing_alts: u32 = rng.random_range(0..=4);
    checks.push(AuditCheck {
        id: "imageAltTags".into(),
        label: "Image Alt Tags".into(),
        status: if missing_alts == 0 {
            AuditStatus::Ok
        } else {
            AuditStatus::Problem
        },
        detail: if missing_alts == 0 {
            "All 12 sampled images have alt attributes".into()
        } else {
            format!("{missing_alts} of 12 sampled images are missing alt text")
        },
        recommendation: "Describe every meaningful image with alt text so search engines \
                         and assistive technology can interpret it."
            .into(),
        tier: Plan::Premium,
    });

    let og_complete = rng.random_bool(0.7);
    checks.push(AuditCheck {
        id: "openGraphTags".into(),
        label: "Open Graph Tags".into(),
        status: if og_complete {
            AuditStatus::Ok
        } else {
            AuditStatus::Problem
        },
        detail: if og_complete {
            "og:title, og:description and og:image are present".into()
        } else {
            "og:image is missing".into()
        },
        recommendation: "Complete the Open Graph tags so shared links render rich previews \
                         on social platforms."
            .into(),
        tier: Plan::Premium,
    });

    let mobile_friendly = rng.random_bool(0.85);
    checks.push(AuditCheck {
        id: "mobileFriendly".into(),
        label: "Mobile-Friendliness".into(),
        status: if mobile_friendly {
            AuditStatus::Ok
        } else {
            AuditStatus::Problem
        },
        detail: if mobile_friendly {
            "Viewport meta tag found; content scales correctly on small screens".into()
        } else {
            "No viewport meta tag found".into()
        },
        recommendation: "Serve a responsive layout with a viewport meta tag; mobile \
                         usability is a ranking factor."
            .into(),
        tier: Plan::Premium,
    });

    checks
}

fn generate_meta_tags(url: &Url) -> GeneratedMetaTags {
    let hostname = host(url);
    GeneratedMetaTags {
        title: format!("{hostname} | Products, Services & Expert Insights"),
        description: format!(
            "Discover {hostname}: explore our services, browse the latest blog posts, \
             and get in touch with the team. Clear answers, fast pages, no fluff."
        ),
        keywords: format!("{hostname}, services, blog, products, contact"),
    }
}

fn analyze_internal_links(url: &Url, discovered_links: &[String]) -> InternalLinkAnalysis {
    let hostname = host(url);
    let link_to = |path: &str| {
        discovered_links
            .iter()
            .find(|l| l.ends_with(path))
            .cloned()
            .unwrap_or_else(|| path.to_string())
    };

    InternalLinkAnalysis {
        anchor_text_suggestions: vec![
            AnchorTextSuggestion {
                link: link_to("/about"),
                current_anchor_text: "click here".into(),
                suggested_anchor_text: format!("About {hostname}"),
            },
            AnchorTextSuggestion {
                link: link_to("/blog"),
                current_anchor_text: "read more".into(),
                suggested_anchor_text: format!("{hostname} blog"),
            },
        ],
        orphaned_pages: vec![link_to("/products/cool-product-1")],
        linking_opportunities: vec![LinkingOpportunity {
            target_page: link_to("/services"),
            source_page_suggestion: link_to("/"),
            reason: "The homepage has the most internal authority and does not yet link \
                     to the services page."
                .into(),
        }],
    }
}

fn origin_with_slash(url: &Url) -> String {
    url.join("/")
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}
