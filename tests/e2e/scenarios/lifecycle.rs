use crate::harness::FakeApi;
use apicheck_core::{
    verify, Assertion, Expect, HarnessError, NewPost, PostDraft, PostsEndpoint, Scenario,
    POSTS_PATH,
};
use serde_json::json;

fn initial() -> PostDraft {
    PostDraft::new("Initial Post Title", "Initial content for the new post.")
}

fn updated() -> PostDraft {
    PostDraft::new("Updated Post Title", "Updated content for the post.")
}

#[tokio::test]
async fn test_create_with_token() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("create@apicheck.test").await;
    let draft = PostDraft::new(
        "New Post Title",
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    );

    Scenario::new("create_with_token")
        .with_session(session)
        .create_post_as("created", draft.clone())
        .assert_status(201)
        .assert_body_matches(draft)
        .assert_bound("created")
        .run(&api.client())
        .await
        .unwrap();

    assert_eq!(api.posts_titled("New Post Title"), 1);
}

#[tokio::test]
async fn test_create_then_update() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("update@apicheck.test").await;

    Scenario::new("create_then_update")
        .with_session(session)
        .create_post_as("created", initial())
        .update_post("created", updated())
        .assert_body_matches(updated())
        .run(&api.client())
        .await
        .unwrap();

    let stored = api.post(101).expect("created post is stored");
    assert_eq!(stored["title"], "Updated Post Title");
    assert_eq!(stored["body"], "Updated content for the post.");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("missing@apicheck.test").await;

    Scenario::new("update_missing_post")
        .with_session(session)
        .update_post_expecting(999_999_u64, updated(), Expect::NotFound)
        .assert_status(404)
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("missing@apicheck.test").await;

    Scenario::new("delete_missing_post")
        .with_session(session)
        .delete_post_expecting(999_999_u64, Expect::NotFound)
        .get_post_expecting(999_999_u64, Expect::NotFound)
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_full_lifecycle() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("lifecycle@apicheck.test").await;
    let before = api.post_count();

    Scenario::new("full_lifecycle")
        .with_session(session)
        .create_post_as("created", PostDraft::new("T", "B").owned_by(1))
        .get_post("created")
        .assert_body_matches(PostDraft::new("T", "B").owned_by(1))
        .update_post("created", PostDraft::new("T2", "B2").owned_by(1))
        .delete_post("created")
        .get_post_expecting("created", Expect::NotFound)
        .run(&api.client())
        .await
        .expect("create, update, delete, verify gone");

    assert_eq!(api.post_count(), before);
}

#[tokio::test]
async fn test_repeated_delete_is_not_found_both_times() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("repeat@apicheck.test").await;

    Scenario::new("repeated_delete")
        .with_session(session)
        .create_post_as("doomed", initial())
        .delete_post("doomed")
        .delete_post_expecting("doomed", Expect::NotFound)
        .delete_post_expecting("doomed", Expect::NotFound)
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_created_ids_are_fresh() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("fresh@apicheck.test").await;

    Scenario::new("fresh_ids")
        .with_session(session)
        .create_post_as("first", initial())
        .create_post_as("second", initial())
        .assert(Assertion::custom(|ctx| {
            let first = ctx.bindings["first"];
            let second = ctx.bindings["second"];
            if first > 0 && second > 0 && first != second {
                Ok(())
            } else {
                Err(HarnessError::AssertionFailure(format!(
                    "ids not fresh: {} and {}",
                    first, second
                )))
            }
        }))
        .run(&api.client())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unbound_alias_aborts_scenario() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("alias@apicheck.test").await;

    let result = Scenario::new("unbound_alias")
        .with_session(session)
        .list_all()
        .delete_post("never-created")
        .list_all()
        .run(&api.client())
        .await;

    assert!(!result.passed());
    assert_eq!(result.failure_step, Some(1));
    assert!(matches!(result.error, Some(HarnessError::UnboundAlias(ref a)) if a == "never-created"));
}

#[tokio::test]
async fn test_failed_create_aborts_the_chain() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("abort@apicheck.test").await;
    let before = api.post_count();

    // The delete is expected to succeed, which it cannot for a missing id,
    // so the trailing create must never run.
    let result = Scenario::new("abort_chain")
        .with_session(session)
        .delete_post(999_999_u64)
        .create_post(initial())
        .run(&api.client())
        .await;

    assert!(matches!(result.error, Some(HarnessError::NotFound { ref path }) if path == "/posts/999999"));
    assert_eq!(api.post_count(), before);
}

#[tokio::test]
async fn test_typed_endpoint_round_trip() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("typed@apicheck.test").await;
    let client = api.client();
    let posts = PostsEndpoint::new(&client);
    let user_id = session.user_id().unwrap();

    let created = posts
        .create_post(&session, &NewPost::new("T", "B", user_id))
        .await
        .unwrap();
    assert!(created.id > 100);
    assert!(NewPost::new("T", "B", user_id).matches(&created));

    let fetched = posts.fetch_post(&session, created.id).await.unwrap();
    assert_eq!(fetched, created);

    let changed = posts
        .update_post(&session, created.id, &NewPost::new("T2", "B2", user_id))
        .await
        .unwrap();
    assert_eq!(changed.id, created.id);
    assert_eq!(changed.title, "T2");

    posts.delete_post(&session, created.id).await.unwrap();
    assert!(matches!(
        posts.fetch_post(&session, created.id).await,
        Err(HarnessError::NotFound { .. })
    ));
    assert!(matches!(
        posts.delete_post(&session, created.id).await,
        Err(HarnessError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_status_is_propagated() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("raw@apicheck.test").await;
    let client = api.client();
    let before = api.post_count();

    let resp = PostsEndpoint::new(&client)
        .create_raw(&session, &json!(["not", "an", "object"]))
        .await
        .unwrap();
    assert_eq!(resp.status, 400);

    // Held against the create contract, the server's 400 surfaces unchanged.
    assert!(matches!(
        verify::expect_status(&resp, 201, POSTS_PATH),
        Err(HarnessError::UnexpectedStatus {
            expected: 201,
            actual: 400
        })
    ));
    assert_eq!(api.post_count(), before);
}

#[tokio::test]
async fn test_reused_id_within_scenario_fails() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("reuse@apicheck.test").await;
    api.recycle_ids();

    let result = Scenario::new("reused_id")
        .with_session(session)
        .create_post_as("first", initial())
        .delete_post("first")
        .create_post_as("second", updated())
        .run(&api.client())
        .await;

    assert!(!result.success);
    assert_eq!(result.failure_step, Some(2));
    assert!(matches!(
        result.error,
        Some(HarnessError::AssertionFailure(ref msg)) if msg.contains("reused id")
    ));
}

#[tokio::test]
async fn test_id_reuse_across_scenarios_is_not_tracked() {
    let api = FakeApi::start().await;
    let session = api.signed_up_session("reuse-across@apicheck.test").await;
    api.recycle_ids();
    let client = api.client();

    for name in ["first_owner", "second_owner"] {
        Scenario::new(name)
            .with_session(session.clone())
            .create_post_as("post", initial())
            .delete_post("post")
            .run(&client)
            .await
            .unwrap();
    }
}
