//! Identity provider contract and HTTP implementation.
//!
//! Login itself is delegated to a third-party OAuth flow; the application
//! only exchanges the resulting access token for a user profile.

use async_trait::async_trait;
use log::error;
use serde::{Deserialize, Serialize};

use crate::config::{IDENTITY_FETCH_TIMEOUT, USERINFO_ENDPOINT};
use crate::error_handling::{IdentityError, InitializationError};

/// Profile returned by the identity provider on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub locale: String,
}

/// Exchanges an access token for the user's profile.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetches the profile behind `access_token`, or a generic failure.
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, IdentityError>;
}

/// [`IdentityProvider`] backed by the OAuth2 userinfo endpoint.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIdentityProvider {
    /// Creates a provider against the default userinfo endpoint.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_endpoint(USERINFO_ENDPOINT)
    }

    /// Creates a provider against a custom endpoint (tests point this at a
    /// local mock server).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, InitializationError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(IDENTITY_FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, IdentityError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("access_token", access_token)])
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                error!("Identity provider rejected the userinfo request: {e}");
                IdentityError::Http(e)
            })?;

        let profile: UserProfile = response.json().await.map_err(|e| {
            error!("Identity provider returned an unreadable profile: {e}");
            IdentityError::MalformedProfile
        })?;

        // The id and email are load-bearing downstream (plan resolution,
        // checkout customer); an empty profile is as bad as none.
        if profile.id.is_empty() || profile.email.is_empty() {
            return Err(IdentityError::MalformedProfile);
        }
        Ok(profile)
    }
}
