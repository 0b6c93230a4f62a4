//! Configuration constants.

use std::time::Duration;

/// Default daily ceiling on Free-plan analyses.
pub const FREE_PLAN_DAILY_LIMIT: u32 = 3;

/// Default cap on persisted Free-plan history entries.
pub const FREE_PLAN_HISTORY_LIMIT: usize = 5;

/// Upper bound on a single analysis attempt, provider latency included.
/// Expiry is reported as a failed analysis, not a hang.
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Latency the simulated analysis provider adds to each request.
pub const SIMULATED_ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// Maximum URL length (2048 characters) accepted from the input form.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Durable storage keys. These names address records written by earlier
// releases of the application and must stay stable.
/// Key for the Free-plan daily usage record (`{date, count}` JSON).
pub const QUOTA_KEY: &str = "freeAuditTracker";
/// Key for the persisted Free-plan audit history (JSON array, newest first).
pub const FREE_HISTORY_KEY: &str = "freeAuditHistory";
/// Key for the cookie-consent flag.
pub const COOKIE_CONSENT_KEY: &str = "cookieConsent";

/// E-mail suffix the simulated plan lookup treats as a Premium subscriber.
/// A real deployment would resolve the plan from a billing backend instead.
pub const PREMIUM_EMAIL_SUFFIX: &str = "@premium-user.com";

/// Price identifier submitted to the checkout provider for the Premium plan.
pub const PREMIUM_PRICE_ID: &str = "price_indexflow_premium_monthly";

/// Identity provider userinfo endpoint.
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// Timeout for the identity provider userinfo fetch.
pub const IDENTITY_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default path of the SQLite file backing durable local storage.
pub const DB_PATH: &str = "./indexflow.db";
