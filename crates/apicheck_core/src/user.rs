//! User endpoint client: signup and login.

use crate::error::{HarnessError, Result};
use crate::session::Session;
use crate::transport::{ApiClient, RequestDescriptor};
use crate::types::{AuthRequest, AuthResponse, Credentials};
use tracing::{debug, info};

/// Password used when none is given.
pub const DEFAULT_PASSWORD: &str = "bestPassw0rd";

const REGISTER_PATH: &str = "/register";
const LOGIN_PATH: &str = "/login";

/// Wraps the `/register` and `/login` routes.
pub struct UserEndpoint<'a> {
    client: &'a ApiClient,
}

impl<'a> UserEndpoint<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Registers a user and stores the returned credentials in `session`.
    ///
    /// Anything but 201 Created is reported as `RegistrationFailed`; there is
    /// no retry.
    pub async fn sign_up(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<Credentials> {
        info!(email, "signing up new user");
        let auth = self
            .authenticate(REGISTER_PATH, email, password, 201)
            .await
            .map_err(|e| match e {
                HarnessError::UnexpectedStatus { actual, .. } => {
                    HarnessError::RegistrationFailed { status: actual }
                }
                other => other,
            })?;
        session.set_from_signup(&auth);
        Ok(Credentials::from(&auth))
    }

    /// Logs in an existing user and stores the returned credentials in `session`.
    pub async fn log_in(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<Credentials> {
        info!(email, "logging in");
        let auth = self
            .authenticate(LOGIN_PATH, email, password, 200)
            .await
            .map_err(|e| match e {
                HarnessError::UnexpectedStatus { actual, .. } => {
                    HarnessError::LoginFailed { status: actual }
                }
                other => other,
            })?;
        session.set_from_login(&auth);
        Ok(Credentials::from(&auth))
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
        expected: u16,
    ) -> Result<AuthResponse> {
        let body = serde_json::to_value(AuthRequest { email, password })
            .map_err(|e| HarnessError::Decode(e.to_string()))?;
        let resp = self
            .client
            .send(&RequestDescriptor::post(path).json(body))
            .await?;

        if resp.status != expected {
            debug!(path, status = resp.status, body = %resp.body, "authentication rejected");
            return Err(HarnessError::UnexpectedStatus {
                expected,
                actual: resp.status,
            });
        }
        resp.json()
    }
}
