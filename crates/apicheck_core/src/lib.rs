//! apicheck Core Library
//!
//! Contract testing for a "posts" REST API with user registration, providing:
//! - An explicit, run-scoped [`Session`] holding the bearer token
//! - Endpoint clients that separate request mechanics from verification
//! - Reusable verification contracts over responses
//! - A fluent scenario DSL that chains dependent calls
//!
//! # Quick Start
//!
//! ```no_run
//! use apicheck_core::{ApiClient, Config, PostDraft, Scenario, establish_session};
//!
//! # async fn demo() -> apicheck_core::Result<()> {
//! let config = Config::default();
//! let client = ApiClient::new(&config.target)?;
//! let session = establish_session(&client, &config.account).await?;
//!
//! Scenario::new("full_lifecycle")
//!     .with_session(session)
//!     .create_post_as("created", PostDraft::new("T", "B"))
//!     .update_post("created", PostDraft::new("T2", "B2"))
//!     .delete_post("created")
//!     .get_post_expecting("created", apicheck_core::Expect::NotFound)
//!     .run(&client)
//!     .await
//!     .unwrap();
//! # Ok(())
//! # }
//! ```
//!
//! # Verification contracts
//!
//! Checks are plain functions, so they apply to any response:
//!
//! ```
//! use apicheck_core::{verify, ApiResponse};
//! use reqwest::header::HeaderMap;
//! use serde_json::json;
//!
//! let resp = ApiResponse::new(200, HeaderMap::new(), json!([{"id": 60}, {"id": 55}]));
//! verify::expect_ids(&resp, &[55, 60]).unwrap();
//! ```

mod config;
mod error;
mod helpers;
mod posts;
mod scenario;
mod session;
mod suite;
mod transport;
mod types;
mod user;
pub mod verify;

pub use config::{AccountConfig, Config, SuiteConfig, TargetConfig, CONFIG_FILE_NAME};
pub use error::{HarnessError, Result};
pub use helpers::{email_with_timestamp, unique_email, unique_title};
pub use posts::{post_path, PostsEndpoint, POSTS_PATH};
pub use scenario::{
    Assertion, AuthMode, Expect, PostRef, Scenario, ScenarioContext, ScenarioResult,
    ScenarioRunner, ScenarioStep,
};
pub use session::Session;
pub use suite::{establish_session, run_scenarios, run_suite, standard_suite, SuiteReport};
pub use transport::{ApiClient, ApiResponse, RequestDescriptor};
pub use types::{AuthResponse, AuthUser, Credentials, NewPost, Post, PostDraft};
pub use user::{UserEndpoint, DEFAULT_PASSWORD};
