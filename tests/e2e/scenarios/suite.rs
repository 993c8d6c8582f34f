use crate::harness::FakeApi;
use apicheck_core::{
    run_scenarios, run_suite, standard_suite, unique_email, Assertion, HarnessError, Scenario,
    SuiteConfig, DEFAULT_PASSWORD,
};

#[tokio::test]
async fn test_standard_suite_passes() {
    let api = FakeApi::start().await;
    let config = api.config();
    let mut seen = Vec::new();

    let report = run_suite(
        &api.client(),
        &config,
        standard_suite(&config.suite),
        |result| seen.push(result.name.clone()),
    )
    .await
    .unwrap();

    for result in &report.results {
        assert!(result.passed(), "{:?}", result.failure_summary());
    }
    assert!(report.all_passed());
    assert_eq!(report.passed(), 10);
    assert_eq!(seen.len(), 10);
    assert_eq!(seen[0], "get_all_posts");
    assert!(report.user_email.unwrap().ends_with("@example.com"));
}

#[tokio::test]
async fn test_suite_reports_failing_scenario_and_continues() {
    let api = FakeApi::start().await;
    let mut config = api.config();
    config.suite = SuiteConfig {
        lookup_ids: vec![55, 5000],
        ..SuiteConfig::default()
    };

    let report = run_suite(&api.client(), &config, standard_suite(&config.suite), |_| {})
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    let failed = report.results.iter().find(|r| !r.passed()).unwrap();
    assert_eq!(failed.name, "get_posts_by_ids");
    assert!(matches!(failed.error, Some(HarnessError::AssertionFailure(_))));
    // Scenarios after the failure still ran
    assert!(report.results.last().unwrap().passed());
}

#[tokio::test]
async fn test_failed_session_barrier_runs_nothing() {
    let api = FakeApi::start().await;
    let mut config = api.config();
    config.account.register = false;
    config.account.email = "nobody@apicheck.test".into();
    let mut ran = 0;

    let err = run_suite(&api.client(), &config, standard_suite(&config.suite), |_| {
        ran += 1
    })
    .await
    .unwrap_err();

    assert!(matches!(err, HarnessError::LoginFailed { status: 400 }));
    assert_eq!(ran, 0);
}

#[tokio::test]
async fn test_limit_larger_than_collection_fails_contract() {
    let api = FakeApi::with_posts(3).await;
    let mut config = api.config();
    config.suite = SuiteConfig {
        list_limit: 10,
        lookup_ids: vec![1, 2],
        missing_id: 999_999,
    };

    let report = run_suite(&api.client(), &config, standard_suite(&config.suite), |_| {})
        .await
        .unwrap();

    let names: Vec<&str> = report
        .results
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["get_first_posts"]);
}

#[tokio::test]
async fn test_scenarios_get_independent_sessions() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("shared@apicheck.test").await;
    let other = unique_email("other@apicheck.test").unwrap();

    let scenarios = vec![
        Scenario::new("switches_user").sign_up(&other, DEFAULT_PASSWORD),
        Scenario::new("keeps_user").assert(Assertion::custom(|ctx| {
            match ctx.session.user_email() {
                Some("shared@apicheck.test") => Ok(()),
                other => Err(HarnessError::AssertionFailure(format!(
                    "session leaked between scenarios: {:?}",
                    other
                ))),
            }
        })),
    ];

    let results = run_scenarios(&api.client(), &session, scenarios, |_| {}).await;
    assert!(results.iter().all(|r| r.passed()));
    assert_eq!(session.user_email(), Some("shared@apicheck.test"));
}
