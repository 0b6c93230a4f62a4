//! The application controller.
//!
//! One explicit state struct owns the session, the view state, the address,
//! and the quota/history bookkeeping; every handler is a method that
//! mutates it in place. There are no ambient globals and no scattered
//! boolean flags: the submit lifecycle is the begin/complete machine from
//! [`crate::app::lifecycle`], and navigation invalidates in-flight requests
//! by bumping the request generation.

use chrono::Utc;
use log::{debug, info, warn};

use crate::app::lifecycle::{AnalysisTicket, CompletionStatus};
use crate::app::state::ViewState;
use crate::app::url::validate_and_normalize_url;
use crate::checkout::CheckoutProvider;
use crate::config::{Config, ANALYSIS_TIMEOUT, COOKIE_CONSENT_KEY, PREMIUM_EMAIL_SUFFIX, PREMIUM_PRICE_ID};
use crate::error_handling::{categorize, user_message, CheckoutError, ErrorKind, ErrorStats, SubmitError};
use crate::history::HistoryStore;
use crate::identity::UserProfile;
use crate::models::{AuditResult, HistoryEntry};
use crate::provider::AnalysisProvider;
use crate::quota::QuotaTracker;
use crate::router::{scrub_checkout_params, CheckoutReturn, Route};
use crate::session::{resolve_plan, Plan, Session};
use crate::storage::KeyValueStore;

/// What an address change asks the driver to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressOutcome {
    /// The view state was updated; nothing else to do.
    Applied,
    /// The address names an analyze view whose result is not on screen;
    /// the driver should submit the contained URL.
    AnalysisRequired(String),
    /// A checkout confirmation was processed and scrubbed.
    CheckoutCompleted,
    /// A checkout cancellation was processed and scrubbed.
    CheckoutCancelled,
}

/// Top-level application state and its handlers.
pub struct App<P, S> {
    provider: P,
    store: S,
    session: Session,
    view: ViewState,
    address: String,
    quota: QuotaTracker<S>,
    history: HistoryStore<S>,
    stats: ErrorStats,
    generation: u64,
}

impl<P, S> App<P, S>
where
    P: AnalysisProvider,
    S: KeyValueStore + Clone,
{
    /// Builds an application around an analysis provider and a storage
    /// backend. Call [`Self::startup`] before handling input.
    pub fn new(provider: P, store: S, config: &Config) -> Self {
        let quota = QuotaTracker::new(store.clone(), config.daily_limit);
        let history = HistoryStore::new(store.clone(), config.history_limit);
        Self {
            provider,
            store,
            session: Session::anonymous(),
            view: ViewState::new(),
            address: Route::Home.to_address(),
            quota,
            history,
            stats: ErrorStats::new(),
            generation: 0,
        }
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The address bar contents. Always derivable from the current route.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Audit history entries, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Failure counters for this session.
    pub fn stats(&self) -> &ErrorStats {
        &self.stats
    }

    /// The quota tracker (storage truth, as opposed to the cached
    /// `quota_exhausted` view flag).
    pub fn quota(&self) -> &QuotaTracker<S> {
        &self.quota
    }

    /// Initial reconciliation with durable storage: the quota lockout flag
    /// is restored so a reloaded page cannot sidestep yesterday's usage.
    pub async fn startup(&mut self) {
        self.refresh_quota_state().await;
    }

    // ---- audit request lifecycle -------------------------------------

    /// Accepts or rejects one submit attempt.
    ///
    /// Rejections (empty URL, invalid URL, exhausted quota) only set the
    /// inline error message and never reach the provider. An accepted
    /// request supersedes any in-flight one: the older ticket's completion
    /// will be discarded.
    pub fn begin_analysis(&mut self, raw_url: &str) -> Result<AnalysisTicket, SubmitError> {
        let trimmed = raw_url.trim();
        if trimmed.is_empty() {
            return Err(self.reject(SubmitError::EmptyUrl));
        }
        let Some(url) = validate_and_normalize_url(trimmed) else {
            return Err(self.reject(SubmitError::InvalidUrl(trimmed.to_string())));
        };
        if self.session.plan() == Plan::Free && self.view.quota_exhausted {
            let limit = self.quota.ceiling();
            return Err(self.reject(SubmitError::QuotaExceeded { limit }));
        }

        self.generation += 1;
        self.view.route = Route::Analyze {
            url: Some(url.clone()),
        };
        self.view.result = None;
        self.view.error_message = None;
        self.view.is_busy = true;
        self.view.status_message = Some("Analyzing your URL...".to_string());

        Ok(AnalysisTicket {
            url,
            generation: self.generation,
        })
    }

    /// Commits the outcome of one analysis attempt.
    ///
    /// A stale ticket (superseded request, or navigation moved the view off
    /// its URL) is discarded without touching state. Both terminal paths
    /// clear the busy indicator; only success touches history and quota.
    pub async fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AuditResult, SubmitError>,
    ) -> CompletionStatus {
        if ticket.generation != self.generation
            || self.view.active_url() != Some(ticket.url.as_str())
        {
            debug!("Discarding stale analysis response for {}", ticket.url);
            return CompletionStatus::Discarded;
        }

        self.view.is_busy = false;
        self.view.status_message = None;

        match outcome {
            Ok(result) => {
                self.view.result = Some(result.clone());
                self.view.error_message = None;
                // The address becomes shareable only once there is a result
                self.address = self.view.route.to_address();

                if self.session.is_signed_in() {
                    let entry = HistoryEntry::new(ticket.url.clone(), result, Utc::now());
                    self.history.append(entry, self.session.plan()).await;
                }
                if self.session.plan() == Plan::Free {
                    let count = self.quota.record_usage().await;
                    if count >= self.quota.ceiling() {
                        self.view.quota_exhausted = true;
                    }
                }
                CompletionStatus::Succeeded
            }
            Err(error) => {
                self.view.error_message = Some(user_message(&error));
                self.stats.record(categorize(&error));
                CompletionStatus::Failed(error)
            }
        }
    }

    /// Drives one full analysis attempt: validation, the provider call
    /// under [`ANALYSIS_TIMEOUT`], and completion.
    pub async fn submit(&mut self, raw_url: &str) -> Result<(), SubmitError> {
        let ticket = self.begin_analysis(raw_url)?;
        let plan = self.session.plan();

        let outcome =
            match tokio::time::timeout(ANALYSIS_TIMEOUT, self.provider.analyze(&ticket.url, plan))
                .await
            {
                Ok(Ok(result)) => Ok(result),
                Ok(Err(provider_error)) => Err(SubmitError::from(provider_error)),
                Err(_) => Err(SubmitError::Timeout),
            };

        match self.complete_analysis(ticket, outcome).await {
            CompletionStatus::Failed(error) => Err(error),
            CompletionStatus::Succeeded | CompletionStatus::Discarded => Ok(()),
        }
    }

    // ---- navigation ---------------------------------------------------

    /// Moves to another view, rewriting the address.
    ///
    /// Leaving the analyze view drops its result, error, and busy
    /// indicator, and orphans any in-flight request.
    pub fn navigate(&mut self, route: Route) {
        if !route.is_analyze() {
            self.view.reset_analysis();
            self.generation += 1;
        }
        self.view.error_message = None;
        self.view.route = route;
        self.address = self.view.route.to_address();
    }

    /// Reconciles the view with an externally changed address (browser
    /// back/forward, reload, or a checkout return).
    ///
    /// Checkout outcomes are applied and scrubbed first. Deriving an
    /// analyze view whose result is already displayed is idempotent; a
    /// different URL is handed back as [`AddressOutcome::AnalysisRequired`]
    /// for the driver to submit.
    pub async fn on_address_changed(&mut self, address: &str) -> AddressOutcome {
        let (effective, checkout_outcome) = match CheckoutReturn::from_address(address) {
            Some(CheckoutReturn::Success { session_token }) => {
                self.finalize_upgrade(&session_token);
                (scrub_checkout_params(address), Some(AddressOutcome::CheckoutCompleted))
            }
            Some(CheckoutReturn::Cancelled) => {
                info!("Checkout cancelled; keeping the current plan");
                (scrub_checkout_params(address), Some(AddressOutcome::CheckoutCancelled))
            }
            None => (address.to_string(), None),
        };

        let derived = self.derive_from_address(&effective);
        match checkout_outcome {
            Some(outcome) => outcome,
            None => derived,
        }
    }

    fn derive_from_address(&mut self, address: &str) -> AddressOutcome {
        let route = Route::from_address(address);

        if let Route::Analyze { url: Some(raw) } = &route {
            if let Some(url) = validate_and_normalize_url(raw) {
                let already_displayed =
                    self.view.result.is_some() && self.view.active_url() == Some(url.as_str());
                self.view.route = Route::Analyze {
                    url: Some(url.clone()),
                };
                self.view.error_message = None;
                self.address = self.view.route.to_address();
                return if already_displayed {
                    AddressOutcome::Applied
                } else {
                    AddressOutcome::AnalysisRequired(url)
                };
            }
            // Malformed URL parameter: fall back to the empty-input
            // analyze view rather than erroring.
        }

        let route = match route {
            Route::Analyze { .. } => Route::Analyze { url: None },
            other => other,
        };
        self.view.reset_analysis();
        self.generation += 1;
        self.view.route = route;
        self.address = self.view.route.to_address();
        AddressOutcome::Applied
    }

    // ---- session ------------------------------------------------------

    /// Installs a signed-in user and rehydrates their plan-dependent state.
    pub async fn login(&mut self, profile: UserProfile) {
        let plan = resolve_plan(&profile, PREMIUM_EMAIL_SUFFIX);
        info!("Signed in {} on the {} plan", profile.email, plan);
        self.session.sign_in(profile, plan);
        match plan {
            Plan::Free => self.history.load_on_login().await,
            // Premium history lives in (simulated) cloud storage and
            // starts empty for the session.
            Plan::Premium => self.history.reset_in_memory(),
        }
        self.refresh_quota_state().await;
    }

    /// Resets the session to anonymous/Free.
    ///
    /// The in-memory history is dropped; durable storage is untouched, so
    /// a Free user's on-device history survives logout/login cycles. The
    /// device-scoped quota is likewise preserved.
    pub async fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            info!("Signed out {}", user.email);
        }
        self.session.sign_out();
        self.history.reset_in_memory();
        self.refresh_quota_state().await;
    }

    /// Starts the external checkout flow and processes its return address.
    pub async fn upgrade<C: CheckoutProvider>(
        &mut self,
        checkout: &C,
    ) -> Result<AddressOutcome, CheckoutError> {
        let Some(user) = self.session.user() else {
            let error = CheckoutError::NotSignedIn;
            self.view.error_message = Some(format!("{error}."));
            self.stats.record(ErrorKind::CheckoutFailure);
            return Err(error);
        };
        let email = user.email.clone();

        match checkout.begin_checkout(PREMIUM_PRICE_ID, &email).await {
            Ok(redirect) => Ok(self.on_address_changed(&redirect.return_address).await),
            Err(error) => {
                self.view.error_message = Some(format!("Upgrade failed: {error}"));
                self.stats.record(ErrorKind::CheckoutFailure);
                Err(error)
            }
        }
    }

    fn finalize_upgrade(&mut self, session_token: &str) {
        if !self.session.is_signed_in() {
            warn!("Ignoring a checkout confirmation without a signed-in user");
            return;
        }
        info!(
            "Checkout confirmed ({} chars of session token); plan is now Premium",
            session_token.len()
        );
        self.session.upgrade_to_premium();
        // Cloud history takes over; only the in-memory list is dropped.
        self.history.reset_in_memory();
        self.view.quota_exhausted = false;
    }

    // ---- history ------------------------------------------------------

    /// Replays a stored result without re-invoking the provider.
    ///
    /// Returns `false` when no entry carries the given id.
    pub fn view_history_entry(&mut self, id: &str) -> bool {
        let Some(entry) = self
            .history
            .entries()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
        else {
            return false;
        };
        self.generation += 1;
        self.view.route = Route::Analyze {
            url: Some(entry.url),
        };
        self.view.result = Some(entry.result);
        self.view.error_message = None;
        self.view.status_message = None;
        self.view.is_busy = false;
        self.address = self.view.route.to_address();
        true
    }

    /// Removes one history entry.
    pub async fn delete_history_entry(&mut self, id: &str) {
        self.history.remove(id, self.session.plan()).await;
    }

    /// Empties the history (and, for Free plan, the persisted record).
    pub async fn clear_history(&mut self) {
        self.history.clear(self.session.plan()).await;
    }

    // ---- peripheral concerns ------------------------------------------

    /// Whether the consent banner should be shown. Storage failures are
    /// logged and suppress the banner rather than propagating.
    pub async fn cookie_banner_needed(&self) -> bool {
        match self.store.get(COOKIE_CONSENT_KEY).await {
            Ok(consent) => consent.is_none(),
            Err(e) => {
                warn!("Could not read the cookie consent flag: {e}");
                false
            }
        }
    }

    /// Records consent; write failures are swallowed and logged.
    pub async fn accept_cookies(&self) {
        if let Err(e) = self.store.set(COOKIE_CONSENT_KEY, "true").await {
            warn!("Could not save the cookie consent flag: {e}");
        }
    }

    /// Re-reads the quota lockout state for the current plan.
    pub async fn refresh_quota_state(&mut self) {
        self.view.quota_exhausted = self.quota.limit_reached(self.session.plan()).await;
    }

    fn reject(&mut self, error: SubmitError) -> SubmitError {
        self.view.error_message = Some(user_message(&error));
        self.stats.record(categorize(&error));
        error
    }
}
