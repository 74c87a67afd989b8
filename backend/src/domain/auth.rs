//! Authentication primitives: credentials, the authenticated identity and
//! the configured single-account login service.
//!
//! The expected username and password are injected at startup from
//! configuration; nothing here is compiled into the binary.

use std::fmt;

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use super::Error;
use super::ports::LoginService;

/// Credentials presented by a caller.
///
/// Values are kept exactly as supplied so comparisons are exact string
/// equality. The password is zeroised on drop.
///
/// # Examples
/// ```
/// use incident_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin", "s3cret");
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username string as presented.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string as presented.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity established by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(String);

impl AuthenticatedUser {
    /// Wrap an authenticated username.
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// Authenticated username.
    pub fn username(&self) -> &str {
        self.0.as_str()
    }
}

/// Login service accepting exactly one configured credential pair.
#[derive(Clone)]
pub struct ConfiguredLoginService {
    expected: LoginCredentials,
}

impl ConfiguredLoginService {
    /// Create a service that accepts only `expected`.
    pub fn new(expected: LoginCredentials) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        if credentials.username() == self.expected.username()
            && credentials.password() == self.expected.password()
        {
            Ok(AuthenticatedUser::new(credentials.username()))
        } else {
            warn!(username = credentials.username(), "rejected credentials");
            Err(Error::unauthorized("Incorrect username or password"))
        }
    }
}
