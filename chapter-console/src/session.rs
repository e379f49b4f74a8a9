//! Environment-backed session

use async_trait::async_trait;
use chapter_lib::auth::AccessToken;
use chapter_lib::auth::SessionProvider;
use chapter_lib::auth::UserProfile;
use chapter_lib::error::AuthError;
use log::debug;

/// Variable holding the bearer token.
pub const TOKEN_VAR: &str = "CHAPTER_ACCESS_TOKEN";
/// Variable holding the signed-in user's email.
pub const EMAIL_VAR: &str = "CHAPTER_USER_EMAIL";

/// Session read from the process environment once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvSession {
    token: Option<String>,
    email: Option<String>,
}

impl EnvSession {
    pub fn new(token: Option<String>, email: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            email,
        }
    }

    pub fn from_env() -> Self {
        let session = Self::new(std::env::var(TOKEN_VAR).ok(), std::env::var(EMAIL_VAR).ok());
        debug!("Session from environment, token present: {}", session.token.is_some());
        session
    }
}

#[async_trait]
impl SessionProvider for EnvSession {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        self.token
            .as_deref()
            .map(AccessToken::new)
            .ok_or(AuthError::Unauthenticated)
    }

    async fn profile(&self, token: &AccessToken) -> Result<UserProfile, AuthError> {
        if self.token.as_deref() != Some(token.access_token.as_str()) {
            return Err(AuthError::Unauthenticated);
        }
        let email = self
            .email
            .clone()
            .ok_or_else(|| AuthError::ProfileUnavailable(format!("{EMAIL_VAR} is not set")))?;
        Ok(UserProfile {
            email,
            name: None,
            tenant: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use chapter_lib::auth::current_profile;

    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_unauthenticated() {
        let session = EnvSession::new(Some("  ".to_string()), None);
        assert_eq!(session.access_token().await, Err(AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_profile_needs_email() {
        let session = EnvSession::new(Some("abc".to_string()), None);
        let err = current_profile(&session).await.unwrap_err();
        assert!(matches!(err, AuthError::ProfileUnavailable(_)));
        assert!(!err.requires_sign_in());

        let session = EnvSession::new(Some("abc".to_string()), Some("ada@example.com".to_string()));
        let profile = current_profile(&session).await.unwrap();
        assert_eq!(profile.display_name(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_foreign_token_rejected() {
        let session = EnvSession::new(Some("abc".to_string()), Some("ada@example.com".to_string()));
        let result = session.profile(&AccessToken::new("other")).await;
        assert_eq!(result, Err(AuthError::Unauthenticated));
    }
}
