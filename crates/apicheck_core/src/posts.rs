//! Posts endpoint client.
//!
//! The mechanics (`list_all`, `create`, `update`, ...) build and send a
//! request and hand back the raw [`ApiResponse`] without judging its status.
//! The `*_post` forms send, check the success status and decode a [`Post`].

use crate::error::{HarnessError, Result};
use crate::session::Session;
use crate::transport::{ApiClient, ApiResponse, RequestDescriptor};
use crate::types::{NewPost, Post};
use crate::verify;
use serde_json::Value;

pub const POSTS_PATH: &str = "/posts";

/// Path of a single post.
pub fn post_path(id: u64) -> String {
    format!("{}/{}", POSTS_PATH, id)
}

/// Wraps the `/posts` resource.
pub struct PostsEndpoint<'a> {
    client: &'a ApiClient,
}

impl<'a> PostsEndpoint<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /posts`
    pub async fn list_all(&self) -> Result<ApiResponse> {
        self.client.send(&RequestDescriptor::get(POSTS_PATH)).await
    }

    /// `GET /posts` as the session's user, so owner-restricted posts show up.
    pub async fn list_all_as(&self, session: &Session) -> Result<ApiResponse> {
        let req = RequestDescriptor::get(POSTS_PATH).bearer(session.token()?);
        self.client.send(&req).await
    }

    /// `GET /posts?_limit=n`
    pub async fn list_limited(&self, limit: usize) -> Result<ApiResponse> {
        self.client
            .send(&RequestDescriptor::get(POSTS_PATH).query("_limit", limit))
            .await
    }

    /// `GET /posts?id=A&id=B...`
    pub async fn list_by_ids(&self, ids: &[u64]) -> Result<ApiResponse> {
        let req = ids
            .iter()
            .fold(RequestDescriptor::get(POSTS_PATH), |req, id| req.query("id", id));
        self.client.send(&req).await
    }

    /// Authenticated `POST /posts`.
    pub async fn create(&self, session: &Session, post: &NewPost) -> Result<ApiResponse> {
        self.create_raw(session, &to_body(post)?).await
    }

    /// Authenticated create with an arbitrary body. The server's verdict on
    /// the body is returned untouched.
    pub async fn create_raw(&self, session: &Session, body: &Value) -> Result<ApiResponse> {
        let req = RequestDescriptor::post(POSTS_PATH)
            .bearer(session.token()?)
            .json(body.clone());
        self.client.send(&req).await
    }

    /// `POST {protected_prefix}/posts` with no credentials at all.
    pub async fn create_unauthenticated(&self, post: &NewPost) -> Result<ApiResponse> {
        let path = format!("{}{}", self.client.protected_prefix(), POSTS_PATH);
        self.client
            .send(&RequestDescriptor::post(path).json(to_body(post)?))
            .await
    }

    /// Authenticated `PUT /posts/{id}` (full replace).
    pub async fn update(&self, session: &Session, id: u64, post: &NewPost) -> Result<ApiResponse> {
        let req = RequestDescriptor::put(post_path(id))
            .bearer(session.token()?)
            .json(to_body(post)?);
        self.client.send(&req).await
    }

    /// Authenticated `DELETE /posts/{id}`.
    pub async fn delete(&self, session: &Session, id: u64) -> Result<ApiResponse> {
        let req = RequestDescriptor::delete(post_path(id)).bearer(session.token()?);
        self.client.send(&req).await
    }

    /// `GET /posts/{id}`, sending the session's token when it has one.
    pub async fn get_by_id(&self, session: &Session, id: u64) -> Result<ApiResponse> {
        let req = RequestDescriptor::get(post_path(id)).maybe_bearer(session.bearer());
        self.client.send(&req).await
    }

    // ===== Request-plus-parse =====

    /// Creates a post; 201 expected.
    pub async fn create_post(&self, session: &Session, post: &NewPost) -> Result<Post> {
        let resp = self.create(session, post).await?;
        verify::expect_status(&resp, 201, POSTS_PATH)?;
        resp.json()
    }

    /// Replaces a post; 200 expected.
    pub async fn update_post(&self, session: &Session, id: u64, post: &NewPost) -> Result<Post> {
        let resp = self.update(session, id, post).await?;
        verify::expect_status(&resp, 200, &post_path(id))?;
        resp.json()
    }

    /// Deletes a post; 200 expected.
    pub async fn delete_post(&self, session: &Session, id: u64) -> Result<()> {
        let resp = self.delete(session, id).await?;
        verify::expect_status(&resp, 200, &post_path(id))
    }

    /// Fetches a post; 200 expected.
    pub async fn fetch_post(&self, session: &Session, id: u64) -> Result<Post> {
        let resp = self.get_by_id(session, id).await?;
        verify::expect_status(&resp, 200, &post_path(id))?;
        resp.json()
    }

    /// Lists posts by id and decodes them.
    pub async fn posts_by_ids(&self, ids: &[u64]) -> Result<Vec<Post>> {
        let resp = self.list_by_ids(ids).await?;
        verify::expect_status(&resp, 200, POSTS_PATH)?;
        resp.json()
    }
}

fn to_body(post: &NewPost) -> Result<Value> {
    serde_json::to_value(post).map_err(|e| HarnessError::Decode(e.to_string()))
}
