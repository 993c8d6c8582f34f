use crate::harness::FakeApi;
use apicheck_core::{verify, Assertion, HarnessError, PostsEndpoint, Scenario, POSTS_PATH};

#[tokio::test]
async fn test_list_all_is_json() {
    let api = FakeApi::start().await;
    Scenario::new("get_all_posts")
        .list_all()
        .assert_status(200)
        .assert(Assertion::ContentTypeContains("application/json".into()))
        .assert_body_length(100)
        .run(&api.client())
        .await
        .expect("listing all posts should pass");
}

#[tokio::test]
async fn test_list_limited_returns_exactly_limit() {
    let api = FakeApi::start().await;
    Scenario::new("get_first_posts")
        .list_limited(10)
        .assert_body_length(10)
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_by_ids_returns_requested_ids() {
    let api = FakeApi::start().await;
    Scenario::new("get_posts_by_ids")
        .list_by_ids(&[55, 60])
        .assert(Assertion::BodyIncludesIds(vec![60, 55]))
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_by_duplicate_ids_counts_distinct() {
    let api = FakeApi::start().await;
    Scenario::new("duplicate_ids")
        .list_by_ids(&[55, 55, 60])
        .assert_body_length(2)
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_by_unknown_id_fails_contract() {
    let api = FakeApi::start().await;
    let result = Scenario::new("unknown_id")
        .list_by_ids(&[55, 5000])
        .run(&api.client())
        .await;

    assert!(!result.passed());
    assert_eq!(result.failure_step, Some(0));
    assert!(matches!(result.error, Some(HarnessError::AssertionFailure(_))));
}

#[tokio::test]
async fn test_list_limited_on_small_collection() {
    // Fewer posts than the limit: the server returns what it has.
    let api = FakeApi::with_posts(4).await;
    let client = api.client();
    let resp = PostsEndpoint::new(&client).list_limited(10).await.unwrap();

    verify::expect_status(&resp, 200, POSTS_PATH).unwrap();
    verify::expect_len(&resp, 4).unwrap();
}

#[tokio::test]
async fn test_endpoint_list_by_ids_decodes_posts() {
    let api = FakeApi::start().await;
    let client = api.client();
    let mut posts = PostsEndpoint::new(&client)
        .posts_by_ids(&[60, 55])
        .await
        .unwrap();
    posts.sort_by_key(|p| p.id);

    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![55, 60]);
    assert_eq!(posts[0].user_id, 6);
}

#[tokio::test]
async fn test_assertion_without_response_fails() {
    let api = FakeApi::start().await;
    let result = Scenario::new("premature_assert")
        .assert_status(200)
        .run(&api.client())
        .await;

    assert!(!result.passed());
    assert_eq!(result.steps_executed, 0);
}
