//! The standard posts suite, generated from [`SuiteConfig`].

use crate::config::{AccountConfig, Config, SuiteConfig};
use crate::error::Result;
use crate::helpers::{unique_email, unique_title};
use crate::scenario::{Expect, Scenario, ScenarioResult};
use crate::session::Session;
use crate::transport::ApiClient;
use crate::types::PostDraft;
use crate::user::UserEndpoint;
use tracing::info;

const NEW_TITLE: &str = "New Post Title";
const NEW_BODY: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";
const INITIAL_TITLE: &str = "Initial Post Title";
const INITIAL_BODY: &str = "Initial content for the new post.";
const UPDATED_TITLE: &str = "Updated Post Title";
const UPDATED_BODY: &str = "Updated content for the post.";

/// Establishes the run's session. Must complete before any scenario starts.
///
/// With `register` a timestamp-unique address derived from `account.email`
/// is signed up; otherwise the configured credentials log in.
pub async fn establish_session(client: &ApiClient, account: &AccountConfig) -> Result<Session> {
    let users = UserEndpoint::new(client);
    let mut session = Session::new();
    if account.register {
        let email = unique_email(&account.email)?;
        users.sign_up(&mut session, &email, &account.password).await?;
    } else {
        users
            .log_in(&mut session, &account.email, &account.password)
            .await?;
    }
    Ok(session)
}

/// Builds the standard scenarios. None of them carries a session yet.
pub fn standard_suite(suite: &SuiteConfig) -> Vec<Scenario> {
    let new_post = || PostDraft::new(NEW_TITLE, NEW_BODY);
    let initial = || PostDraft::new(INITIAL_TITLE, INITIAL_BODY);
    let updated = || PostDraft::new(UPDATED_TITLE, UPDATED_BODY);
    let ghost_title = unique_title("Unauthorized Post");

    vec![
        Scenario::new("get_all_posts").list_all(),
        Scenario::new("get_first_posts").list_limited(suite.list_limit),
        Scenario::new("get_posts_by_ids").list_by_ids(&suite.lookup_ids),
        Scenario::new("create_without_token")
            .create_post_without_token(PostDraft::new(ghost_title.as_str(), NEW_BODY))
            .assert_list_excludes_title(&ghost_title),
        Scenario::new("create_with_token")
            .create_post(new_post())
            .assert_body_matches(new_post()),
        Scenario::new("create_then_update")
            .create_post_as("created", initial())
            .update_post("created", updated()),
        Scenario::new("update_missing_post").update_post_expecting(
            suite.missing_id,
            updated(),
            Expect::NotFound,
        ),
        Scenario::new("delete_missing_post")
            .delete_post_expecting(suite.missing_id, Expect::NotFound),
        Scenario::new("full_lifecycle")
            .create_post_as("created", initial())
            .update_post("created", updated())
            .delete_post("created")
            .get_post_expecting("created", Expect::NotFound),
        Scenario::new("repeated_delete")
            .create_post_as("doomed", initial())
            .delete_post("doomed")
            .delete_post_expecting("doomed", Expect::NotFound)
            .delete_post_expecting("doomed", Expect::NotFound),
    ]
}

/// Outcome of a whole suite run.
#[derive(Debug)]
pub struct SuiteReport {
    /// Email of the account the run authenticated as.
    pub user_email: Option<String>,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::passed)
    }
}

/// Runs scenarios one after another, each with its own copy of `session`.
///
/// `observer` sees every result as soon as its scenario finishes.
pub async fn run_scenarios<F>(
    client: &ApiClient,
    session: &Session,
    scenarios: Vec<Scenario>,
    mut observer: F,
) -> Vec<ScenarioResult>
where
    F: FnMut(&ScenarioResult),
{
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let result = scenario.with_session(session.clone()).run(client).await;
        observer(&result);
        results.push(result);
    }
    results
}

/// Establishes the session, then runs the given scenarios.
///
/// A failed signup/login is an error of the whole run: no scenario starts.
pub async fn run_suite<F>(
    client: &ApiClient,
    config: &Config,
    scenarios: Vec<Scenario>,
    observer: F,
) -> Result<SuiteReport>
where
    F: FnMut(&ScenarioResult),
{
    let session = establish_session(client, &config.account).await?;
    info!(
        user = session.user_email().unwrap_or("?"),
        scenarios = scenarios.len(),
        "session established"
    );
    let results = run_scenarios(client, &session, scenarios, observer).await;
    Ok(SuiteReport {
        user_email: session.user_email().map(str::to_string),
        results,
    })
}
