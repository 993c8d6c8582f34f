//! Error types for apicheck_core operations.

use thiserror::Error;

/// Core error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The server rejected the request's credentials (or their absence).
    #[error("unauthorized: server answered {status}")]
    Unauthorized {
        /// Status returned by the server (401 or 403)
        status: u16,
    },

    /// The addressed resource does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// Request path that produced the 404
        path: String,
    },

    /// Signup did not return 201 Created.
    #[error("registration failed with status {status}")]
    RegistrationFailed {
        /// Status returned by the server
        status: u16,
    },

    /// Login did not return 200 OK.
    #[error("login failed with status {status}")]
    LoginFailed {
        /// Status returned by the server
        status: u16,
    },

    /// A bearer token was required but the session never received one.
    #[error("session is not authenticated")]
    NotAuthenticated,

    /// The server answered with a status other than the expected one.
    #[error("unexpected status: expected {expected}, got {actual}")]
    UnexpectedStatus {
        /// Status the caller expected
        expected: u16,
        /// Status the server returned
        actual: u16,
    },

    /// The response violates the contract the scenario states.
    #[error("assertion failed: {0}")]
    AssertionFailure(String),

    /// A scenario referred to an id alias that no earlier step bound.
    #[error("no post id bound to alias '{0}'")]
    UnboundAlias(String),

    /// An email address without an '@' was handed to the email helpers.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The HTTP transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    Config(String),
}

impl HarnessError {
    /// Classifies a status mismatch.
    ///
    /// 401/403 become [`HarnessError::Unauthorized`], 404 becomes
    /// [`HarnessError::NotFound`]; anything else is propagated as-is through
    /// [`HarnessError::UnexpectedStatus`].
    pub fn from_status(expected: u16, actual: u16, path: &str) -> Self {
        match actual {
            401 | 403 => Self::Unauthorized { status: actual },
            404 => Self::NotFound {
                path: path.to_string(),
            },
            _ => Self::UnexpectedStatus { expected, actual },
        }
    }

    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized { .. } | Self::NotAuthenticated => {
                Some("Check the account section of the config; the suite needs a working signup or login.")
            }
            Self::RegistrationFailed { .. } => {
                Some("The email may already be registered. Set 'register = false' to log in instead.")
            }
            Self::LoginFailed { .. } => {
                Some("Verify the account email and password, or set 'register = true' to sign up a fresh user.")
            }
            Self::Transport(_) => Some("Is the API running? Check 'base_url' in the target section."),
            Self::Config(_) => Some("Run 'apicheck init' to write a fresh default config."),
            _ => None,
        }
    }
}

/// Convenience Result type for apicheck_core operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
