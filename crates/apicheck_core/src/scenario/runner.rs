use super::assertions::{Assertion, ScenarioContext};
use super::steps::{AuthMode, Expect, PostRef, ScenarioStep};
use crate::error::{HarnessError, Result};
use crate::posts::{post_path, PostsEndpoint, POSTS_PATH};
use crate::session::Session;
use crate::transport::{ApiClient, ApiResponse};
use crate::types::{NewPost, PostDraft};
use crate::user::UserEndpoint;
use crate::verify;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Executes scenario steps against a live API
pub struct ScenarioRunner<'a> {
    client: &'a ApiClient,
    session: Session,
    bindings: HashMap<String, u64>,
    /// Ids handed out by creates in this scenario. Scenarios get a fresh
    /// runner, so reuse across scenarios is not detected.
    seen_ids: HashSet<u64>,
    last_response: Option<ApiResponse>,
    current_step: usize,
}

impl<'a> ScenarioRunner<'a> {
    /// Create a new runner starting from the given session
    pub fn new(client: &'a ApiClient, session: Session) -> Self {
        Self {
            client,
            session,
            bindings: HashMap::new(),
            seen_ids: HashSet::new(),
            last_response: None,
            current_step: 0,
        }
    }

    /// Get current step number
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Id bound to an alias by an earlier create.
    pub fn binding(&self, alias: &str) -> Option<u64> {
        self.bindings.get(alias).copied()
    }

    /// Execute all steps in sequence, stopping at the first failure
    pub async fn execute(&mut self, steps: &[ScenarioStep]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            self.current_step = i;
            debug!(step = i, ?step, "executing step");
            self.execute_step(step).await?;
        }
        Ok(())
    }

    async fn execute_step(&mut self, step: &ScenarioStep) -> Result<()> {
        match step {
            ScenarioStep::SignUp { email, password } => self.handle_sign_up(email, password).await,
            ScenarioStep::LogIn { email, password } => self.handle_log_in(email, password).await,

            ScenarioStep::ListAll => self.handle_list_all().await,
            ScenarioStep::ListLimited { limit } => self.handle_list_limited(*limit).await,
            ScenarioStep::ListByIds { ids } => self.handle_list_by_ids(ids).await,

            ScenarioStep::CreatePost {
                draft,
                bind,
                auth,
                expect,
            } => self.handle_create(draft, bind.as_deref(), *auth, *expect).await,
            ScenarioStep::UpdatePost {
                target,
                draft,
                expect,
            } => self.handle_update(target, draft, *expect).await,
            ScenarioStep::DeletePost { target, expect } => {
                self.handle_delete(target, *expect).await
            }
            ScenarioStep::GetPost { target, expect } => self.handle_get(target, *expect).await,

            ScenarioStep::Assert { assertion } => self.handle_assertion(assertion).await,
        }
    }

    fn posts(&self) -> PostsEndpoint<'a> {
        PostsEndpoint::new(self.client)
    }

    /// Records the response and returns a reference to it.
    fn record(&mut self, resp: ApiResponse) -> &ApiResponse {
        self.last_response.insert(resp)
    }

    fn resolve_target(&self, target: &PostRef) -> Result<u64> {
        match target {
            PostRef::Id(id) => Ok(*id),
            PostRef::Alias(alias) => self
                .binding(alias)
                .ok_or_else(|| HarnessError::UnboundAlias(alias.clone())),
        }
    }

    fn resolve_draft(&self, draft: &PostDraft) -> Result<NewPost> {
        draft
            .resolve(self.session.user_id())
            .ok_or(HarnessError::NotAuthenticated)
    }

    // ===== Session handlers =====

    async fn handle_sign_up(&mut self, email: &str, password: &str) -> Result<()> {
        UserEndpoint::new(self.client)
            .sign_up(&mut self.session, email, password)
            .await?;
        Ok(())
    }

    async fn handle_log_in(&mut self, email: &str, password: &str) -> Result<()> {
        UserEndpoint::new(self.client)
            .log_in(&mut self.session, email, password)
            .await?;
        Ok(())
    }

    // ===== Read handlers =====

    async fn handle_list_all(&mut self) -> Result<()> {
        let resp = self.posts().list_all().await?;
        verify::list_all_contract(self.record(resp), POSTS_PATH)
    }

    async fn handle_list_limited(&mut self, limit: usize) -> Result<()> {
        let resp = self.posts().list_limited(limit).await?;
        verify::list_limited_contract(self.record(resp), limit, POSTS_PATH)
    }

    async fn handle_list_by_ids(&mut self, ids: &[u64]) -> Result<()> {
        let resp = self.posts().list_by_ids(ids).await?;
        verify::list_by_ids_contract(self.record(resp), ids, POSTS_PATH)
    }

    // ===== Write handlers =====

    async fn handle_create(
        &mut self,
        draft: &PostDraft,
        bind: Option<&str>,
        auth: AuthMode,
        expect: Expect,
    ) -> Result<()> {
        let post = self.resolve_draft(draft)?;
        let resp = match auth {
            AuthMode::Session => self.posts().create(&self.session, &post).await?,
            AuthMode::Anonymous => self.posts().create_unauthenticated(&post).await?,
        };

        if expect != Expect::Created {
            return verify::expect_status(self.record(resp), expect.status(), POSTS_PATH);
        }

        let id = verify::created_contract(self.record(resp), &post, POSTS_PATH)?;
        if !self.seen_ids.insert(id) {
            return Err(HarnessError::AssertionFailure(format!(
                "server reused id {} within one scenario",
                id
            )));
        }
        if let Some(alias) = bind {
            debug!(alias, id, "bound created post");
            self.bindings.insert(alias.to_string(), id);
        }
        Ok(())
    }

    async fn handle_update(
        &mut self,
        target: &PostRef,
        draft: &PostDraft,
        expect: Expect,
    ) -> Result<()> {
        let id = self.resolve_target(target)?;
        let post = self.resolve_draft(draft)?;
        let path = post_path(id);
        let resp = self.posts().update(&self.session, id, &post).await?;

        if expect != Expect::Ok {
            return verify::expect_status(self.record(resp), expect.status(), &path);
        }

        let returned = verify::updated_contract(self.record(resp), &post, &path)?;
        if returned != id {
            return Err(HarnessError::AssertionFailure(format!(
                "updated post {} came back with id {}",
                id, returned
            )));
        }
        Ok(())
    }

    async fn handle_delete(&mut self, target: &PostRef, expect: Expect) -> Result<()> {
        let id = self.resolve_target(target)?;
        let resp = self.posts().delete(&self.session, id).await?;
        verify::expect_status(self.record(resp), expect.status(), &post_path(id))
    }

    async fn handle_get(&mut self, target: &PostRef, expect: Expect) -> Result<()> {
        let id = self.resolve_target(target)?;
        let path = post_path(id);
        let resp = self.posts().get_by_id(&self.session, id).await?;
        let resp = self.record(resp);
        verify::expect_status(resp, expect.status(), &path)?;

        if expect == Expect::Ok {
            let returned = resp.body.get("id").and_then(serde_json::Value::as_u64);
            if returned != Some(id) {
                return Err(HarnessError::AssertionFailure(format!(
                    "fetched post {} but body carries id {:?}",
                    id, returned
                )));
            }
        }
        Ok(())
    }

    // ===== Assertions =====

    fn last(&self) -> Result<&ApiResponse> {
        self.last_response
            .as_ref()
            .ok_or_else(|| HarnessError::AssertionFailure("no response recorded yet".into()))
    }

    async fn handle_assertion(&self, assertion: &Assertion) -> Result<()> {
        match assertion {
            Assertion::Status(expected) => {
                let resp = self.last()?;
                if resp.status == *expected {
                    Ok(())
                } else {
                    Err(HarnessError::AssertionFailure(format!(
                        "expected status {}, got {}",
                        expected, resp.status
                    )))
                }
            }
            Assertion::ContentTypeContains(fragment) => {
                verify::expect_content_type(self.last()?, fragment)
            }
            Assertion::BodyLength(len) => verify::expect_len(self.last()?, *len),
            Assertion::BodyIncludesIds(ids) => verify::expect_ids(self.last()?, ids),
            Assertion::BodyMatches(draft) => {
                let post = self.resolve_draft(draft)?;
                verify::expect_post_fields(self.last()?, &post).map(|_| ())
            }
            Assertion::Authenticated => self.session.token().map(|_| ()),
            Assertion::Bound(alias) => self
                .binding(alias)
                .map(|_| ())
                .ok_or_else(|| HarnessError::UnboundAlias(alias.clone())),
            Assertion::ListExcludesTitle(title) => {
                let resp = self.posts().list_all_as(&self.session).await?;
                verify::expect_status(&resp, 200, POSTS_PATH)?;
                verify::expect_list_excludes_title(&resp, title)
            }
            Assertion::Custom(check) => check(&ScenarioContext {
                session: &self.session,
                last_response: self.last_response.as_ref(),
                bindings: &self.bindings,
            }),
        }
    }
}
