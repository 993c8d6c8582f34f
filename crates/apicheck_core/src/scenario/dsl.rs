use super::assertions::Assertion;
use super::runner::ScenarioRunner;
use super::steps::{AuthMode, Expect, PostRef, ScenarioStep};
use crate::error::HarnessError;
use crate::session::Session;
use crate::transport::ApiClient;
use crate::types::PostDraft;
use tracing::{info, warn};

/// Fluent DSL for building scenarios
pub struct Scenario {
    name: String,
    session: Session,
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Create a new scenario with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            session: Session::default(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    fn push(mut self, step: ScenarioStep) -> Self {
        self.steps.push(step);
        self
    }

    // ===== Session =====

    /// Start from an already established session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Register a user; the scenario's session takes its credentials
    pub fn sign_up(self, email: &str, password: &str) -> Self {
        self.push(ScenarioStep::SignUp {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Log in; the scenario's session takes the credentials
    pub fn log_in(self, email: &str, password: &str) -> Self {
        self.push(ScenarioStep::LogIn {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    // ===== Reads =====

    /// List every post (200, JSON)
    pub fn list_all(self) -> Self {
        self.push(ScenarioStep::ListAll)
    }

    /// List the first `limit` posts (200, exactly `limit` entries)
    pub fn list_limited(self, limit: usize) -> Self {
        self.push(ScenarioStep::ListLimited { limit })
    }

    /// List posts by id (200, exactly the distinct ids)
    pub fn list_by_ids(self, ids: &[u64]) -> Self {
        self.push(ScenarioStep::ListByIds { ids: ids.to_vec() })
    }

    // ===== Writes =====

    /// Create a post with the session token, expecting 201
    pub fn create_post(self, draft: PostDraft) -> Self {
        self.create_post_expecting(draft, AuthMode::Session, Expect::Created)
    }

    /// Create a post and bind its id to `alias` for later steps
    pub fn create_post_as(self, alias: &str, draft: PostDraft) -> Self {
        self.push(ScenarioStep::CreatePost {
            draft,
            bind: Some(alias.to_string()),
            auth: AuthMode::Session,
            expect: Expect::Created,
        })
    }

    /// Create a post without any token, expecting 401
    pub fn create_post_without_token(self, draft: PostDraft) -> Self {
        self.create_post_expecting(draft, AuthMode::Anonymous, Expect::Unauthorized)
    }

    pub fn create_post_expecting(self, draft: PostDraft, auth: AuthMode, expect: Expect) -> Self {
        self.push(ScenarioStep::CreatePost {
            draft,
            bind: None,
            auth,
            expect,
        })
    }

    /// Replace a post, expecting 200 and the new field values
    pub fn update_post(self, target: impl Into<PostRef>, draft: PostDraft) -> Self {
        self.update_post_expecting(target, draft, Expect::Ok)
    }

    pub fn update_post_expecting(
        self,
        target: impl Into<PostRef>,
        draft: PostDraft,
        expect: Expect,
    ) -> Self {
        self.push(ScenarioStep::UpdatePost {
            target: target.into(),
            draft,
            expect,
        })
    }

    /// Delete a post, expecting 200
    pub fn delete_post(self, target: impl Into<PostRef>) -> Self {
        self.delete_post_expecting(target, Expect::Ok)
    }

    pub fn delete_post_expecting(self, target: impl Into<PostRef>, expect: Expect) -> Self {
        self.push(ScenarioStep::DeletePost {
            target: target.into(),
            expect,
        })
    }

    /// Fetch a post, expecting 200
    pub fn get_post(self, target: impl Into<PostRef>) -> Self {
        self.get_post_expecting(target, Expect::Ok)
    }

    pub fn get_post_expecting(self, target: impl Into<PostRef>, expect: Expect) -> Self {
        self.push(ScenarioStep::GetPost {
            target: target.into(),
            expect,
        })
    }

    // ===== Assertions =====

    /// Add a general assertion
    pub fn assert(self, assertion: Assertion) -> Self {
        self.push(ScenarioStep::Assert { assertion })
    }

    /// Assert the status of the last response
    pub fn assert_status(self, status: u16) -> Self {
        self.assert(Assertion::Status(status))
    }

    /// Assert the last response is a list of `len` entries
    pub fn assert_body_length(self, len: usize) -> Self {
        self.assert(Assertion::BodyLength(len))
    }

    /// Assert the last response carries the draft's fields and an id
    pub fn assert_body_matches(self, draft: PostDraft) -> Self {
        self.assert(Assertion::BodyMatches(draft))
    }

    /// Assert no listed post carries `title`
    pub fn assert_list_excludes_title(self, title: &str) -> Self {
        self.assert(Assertion::ListExcludesTitle(title.to_string()))
    }

    /// Assert an earlier create bound `alias`
    pub fn assert_bound(self, alias: &str) -> Self {
        self.assert(Assertion::Bound(alias.to_string()))
    }

    // ===== Execution =====

    /// Execute the scenario and return results
    pub async fn run(self, client: &ApiClient) -> ScenarioResult {
        info!(scenario = %self.name, steps = self.steps.len(), "running scenario");
        let mut runner = ScenarioRunner::new(client, self.session);

        match runner.execute(&self.steps).await {
            Ok(()) => {
                info!(scenario = %self.name, "scenario passed");
                ScenarioResult {
                    name: self.name,
                    success: true,
                    steps_executed: self.steps.len(),
                    failure_step: None,
                    failed_step: None,
                    error: None,
                }
            }
            Err(e) => {
                let failure_step = runner.current_step();
                warn!(scenario = %self.name, step = failure_step, error = %e, "scenario failed");
                ScenarioResult {
                    name: self.name,
                    success: false,
                    steps_executed: failure_step,
                    failure_step: Some(failure_step),
                    failed_step: self.steps.get(failure_step).map(|s| format!("{:?}", s)),
                    error: Some(e),
                }
            }
        }
    }
}

/// Result of running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub steps_executed: usize,
    pub failure_step: Option<usize>,
    /// Debug rendering of the step that failed
    pub failed_step: Option<String>,
    pub error: Option<HarnessError>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.success
    }

    /// One-line failure description, `None` when the scenario passed
    pub fn failure_summary(&self) -> Option<String> {
        if self.success {
            return None;
        }
        Some(format!(
            "step {} ({}): {}",
            self.failure_step.unwrap_or(0),
            self.failed_step.as_deref().unwrap_or("?"),
            self.error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown error".to_string())
        ))
    }

    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) {
        if let Some(summary) = self.failure_summary() {
            panic!("Scenario '{}' failed at {}", self.name, summary);
        }
    }

    /// Expect the result to be successful
    pub fn expect(self, msg: &str) {
        if let Some(summary) = self.failure_summary() {
            panic!("{}: Scenario '{}' failed at {}", msg, self.name, summary);
        }
    }
}
