//! Driving port for authentication.
//!
//! Inbound adapters call it to check credentials without knowing where the
//! expected values come from.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}
