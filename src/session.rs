//! Session state and plan resolution.

use serde::{Deserialize, Serialize};
use strum_macros::Display as DisplayMacro;

use crate::identity::UserProfile;

/// Service tier gating quota, history persistence, and check visibility.
///
/// Earlier releases spelled the tiers `FREE` and `PRO` in stored data; both
/// spellings still deserialize.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DisplayMacro, Default,
)]
pub enum Plan {
    /// Default tier: limited daily analyses, bounded on-device history.
    #[serde(alias = "FREE")]
    #[default]
    Free,
    /// Paid tier: unlimited analyses, session-held (cloud-simulated) history.
    #[serde(alias = "PRO")]
    Premium,
}

/// The signed-in user (if any) and their plan.
///
/// Owned exclusively by the application controller; mutated only through
/// sign-in, sign-out, and upgrade.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserProfile>,
    plan: Plan,
}

impl Session {
    /// An anonymous Free-plan session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Installs a signed-in user with their resolved plan.
    pub fn sign_in(&mut self, user: UserProfile, plan: Plan) {
        self.user = Some(user);
        self.plan = plan;
    }

    /// Resets the session to anonymous/Free.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.plan = Plan::Free;
    }

    /// Moves the session to the Premium plan.
    pub fn upgrade_to_premium(&mut self) {
        self.plan = Plan::Premium;
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Current plan.
    pub fn plan(&self) -> Plan {
        self.plan
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Resolves the plan for a freshly signed-in profile.
///
/// Stands in for a billing-backend lookup: addresses ending in the
/// configured premium suffix are treated as Premium subscribers.
pub fn resolve_plan(profile: &UserProfile, premium_suffix: &str) -> Plan {
    if profile.email.ends_with(premium_suffix) {
        Plan::Premium
    } else {
        Plan::Free
    }
}
