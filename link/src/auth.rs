//! Authentication provider for Airtable requests.
//!
//! The remote service authenticates every call with a bearer token derived
//! from the configured API key (legacy API keys and personal access tokens
//! are both sent this way).

use std::fmt;

/// Credentials attached to every outgoing request.
///
/// # Examples
///
/// ```rust
/// use airtable_link::AuthProvider;
///
/// let auth = AuthProvider::api_key("patXXXXXXXX.YYYY");
/// assert!(auth.is_authenticated());
///
/// let anonymous = AuthProvider::none();
/// assert!(anonymous.bearer_token().is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum AuthProvider {
    /// API key or personal access token, sent as `Authorization: Bearer <key>`
    ApiKey(String),

    /// No authentication header
    None,
}

impl AuthProvider {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    pub fn none() -> Self {
        Self::None
    }

    /// Token to place after `Bearer `, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Self::ApiKey(key) => Some(key.as_str()),
            Self::None => None,
        }
    }

    /// Attach the authorization header to a reqwest request builder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::ApiKey(key) => request.bearer_auth(key),
            Self::None => request,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// Keys must never end up in logs.
impl fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::None => f.write_str("None"),
        }
    }
}
