//! SessionProvider trait and UserProfile

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use crate::error::AuthError;

/// The signed-in user, as shown in the navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
}

impl UserProfile {
    /// Name to display, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Source of the current session.
///
/// Pages ask for a token before loading their records and for the profile to
/// label the session. Both calls fail with [`AuthError::Unauthenticated`]
/// when nobody is signed in.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current access token.
    async fn access_token(&self) -> Result<AccessToken, AuthError>;

    /// Resolves the profile belonging to a token.
    async fn profile(&self, token: &AccessToken) -> Result<UserProfile, AuthError>;
}

/// Fetches the token and then the profile, rejecting expired tokens.
pub async fn current_profile(provider: &dyn SessionProvider) -> Result<UserProfile, AuthError> {
    let token = provider.access_token().await?;
    if token.is_expired() {
        return Err(AuthError::TokenExpired {
            message: "access token is past its expiry".to_string(),
        });
    }
    provider.profile(&token).await
}

/// A session provider that always returns the same token and profile.
///
/// # Example
///
/// ```
/// use chapter_lib::auth::{StaticSession, UserProfile};
///
/// let session = StaticSession::new(
///     "token",
///     UserProfile { email: "ada@example.com".into(), name: None, tenant: None },
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StaticSession {
    token: AccessToken,
    profile: UserProfile,
}

impl StaticSession {
    pub fn new(access_token: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            token: AccessToken::new(access_token),
            profile,
        }
    }

    pub fn from_token(token: AccessToken, profile: UserProfile) -> Self {
        Self { token, profile }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }

    async fn profile(&self, token: &AccessToken) -> Result<UserProfile, AuthError> {
        if token.access_token != self.token.access_token {
            return Err(AuthError::Unauthenticated);
        }
        Ok(self.profile.clone())
    }
}
