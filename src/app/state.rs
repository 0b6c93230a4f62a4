//! View state.

use crate::models::AuditResult;
use crate::router::Route;

/// Everything the renderer needs to draw the current view.
///
/// Mutated only by navigation events and the audit request lifecycle; the
/// browser address is always derivable from `route` (see
/// [`crate::app::App::address`]).
#[derive(Debug, Clone)]
pub struct ViewState {
    /// The displayed view. For the analyze view this also carries the
    /// active URL.
    pub route: Route,
    /// The last completed analysis, if any.
    pub result: Option<AuditResult>,
    /// Message for the inline error region near the input form.
    pub error_message: Option<String>,
    /// Progress line shown while an analysis is in flight.
    pub status_message: Option<String>,
    /// Whether an analysis is in flight.
    pub is_busy: bool,
    /// Whether the Free-plan daily ceiling is currently reached.
    pub quota_exhausted: bool,
}

impl ViewState {
    pub(crate) fn new() -> Self {
        Self {
            route: Route::Home,
            result: None,
            error_message: None,
            status_message: None,
            is_busy: false,
            quota_exhausted: false,
        }
    }

    /// The URL the analyze view is currently about, if any.
    pub fn active_url(&self) -> Option<&str> {
        match &self.route {
            Route::Analyze { url: Some(url) } => Some(url),
            _ => None,
        }
    }

    /// Clears everything belonging to an analysis in progress or displayed.
    pub(crate) fn reset_analysis(&mut self) {
        self.result = None;
        self.error_message = None;
        self.status_message = None;
        self.is_busy = false;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
