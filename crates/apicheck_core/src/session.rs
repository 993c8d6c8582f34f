//! Run-scoped credential state.

use crate::error::{HarnessError, Result};
use crate::types::AuthResponse;

/// Credentials produced by signup or login and consumed by later requests.
///
/// A Session is handed explicitly to every authenticated endpoint call. It is
/// filled once per run and cloned into each scenario, so scenarios never
/// share a mutable copy. There is no expiry or refresh: a token is assumed
/// valid for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
    user_id: Option<u64>,
    user_email: Option<String>,
}

impl Session {
    /// Creates an empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session carrying only a token, e.g. to send an invalid one.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            user_id: None,
            user_email: None,
        }
    }

    /// Stores the credentials of a signup response, replacing whatever was held.
    pub fn set_from_signup(&mut self, resp: &AuthResponse) {
        self.replace(resp);
    }

    /// Stores the credentials of a login response, replacing whatever was held.
    pub fn set_from_login(&mut self, resp: &AuthResponse) {
        self.replace(resp);
    }

    fn replace(&mut self, resp: &AuthResponse) {
        *self = Self {
            access_token: Some(resp.access_token.clone()),
            user_id: Some(resp.user.id),
            user_email: Some(resp.user.email.clone()),
        };
    }

    /// Returns the bearer token, or `NotAuthenticated` if none was ever set.
    pub fn token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(HarnessError::NotAuthenticated)
    }

    /// Returns the bearer token if one is held.
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}
