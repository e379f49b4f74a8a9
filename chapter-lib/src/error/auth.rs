//! Session error types

/// Errors raised by a session provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// No session is active, or the supplied token is not recognised.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The access token expired and the session must be re-established.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    /// The profile service answered but the profile could not be read.
    #[error("Profile unavailable: {0}")]
    ProfileUnavailable(String),
}

impl AuthError {
    /// Returns `true` if the user has to sign in again to recover.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::TokenExpired { .. })
    }
}
