//! Wire and domain types shared by the endpoint clients.

use serde::{Deserialize, Serialize};

/// A post as returned by the server.
///
/// The `id` is authoritative only when it came back from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// Post content.
    pub body: String,
    /// Owning user.
    pub user_id: u64,
}

/// The body sent on create and update. Never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post content.
    pub body: String,
    /// Owning user.
    pub user_id: u64,
}

impl NewPost {
    /// Creates a new post body.
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: u64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// Returns true if `post` carries the same title, body and owner.
    pub fn matches(&self, post: &Post) -> bool {
        self.title == post.title && self.body == post.body && self.user_id == post.user_id
    }
}

/// A post body whose owner may still be unresolved.
///
/// `user_id: None` means "the user the session belongs to" and is filled in
/// when the draft is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Post content.
    pub body: String,
    /// Explicit owner, or `None` for the session user.
    pub user_id: Option<u64>,
}

impl PostDraft {
    /// Draft owned by whoever the session belongs to.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id: None,
        }
    }

    /// Pins the owner to an explicit user id.
    pub fn owned_by(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Resolves the owner against a fallback user id.
    pub fn resolve(&self, session_user: Option<u64>) -> Option<NewPost> {
        let user_id = self.user_id.or(session_user)?;
        Some(NewPost::new(self.title.clone(), self.body.clone(), user_id))
    }
}

/// The user block inside an auth response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Server-assigned user id.
    pub id: u64,
    /// Registered email.
    pub email: String,
}

/// Body returned by `/register` and `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for later requests.
    pub access_token: String,
    /// The authenticated user.
    pub user: AuthUser,
}

/// Body sent to `/register` and `/login`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// The credential triple produced by signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: u64,
    pub user_email: String,
}

impl From<&AuthResponse> for Credentials {
    fn from(resp: &AuthResponse) -> Self {
        Self {
            access_token: resp.access_token.clone(),
            user_id: resp.user.id,
            user_email: resp.user.email.clone(),
        }
    }
}
