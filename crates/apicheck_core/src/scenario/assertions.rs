use crate::error::Result;
use crate::session::Session;
use crate::transport::ApiResponse;
use crate::types::PostDraft;
use std::collections::HashMap;

/// Read-only view of a running scenario, handed to custom assertions.
pub struct ScenarioContext<'a> {
    pub session: &'a Session,
    pub last_response: Option<&'a ApiResponse>,
    pub bindings: &'a HashMap<String, u64>,
}

/// Declarative assertions on scenario state
pub enum Assertion {
    // Last response
    Status(u16),
    ContentTypeContains(String),
    BodyLength(usize),
    BodyIncludesIds(Vec<u64>),
    BodyMatches(PostDraft),

    // Session and bindings
    Authenticated,
    Bound(String),

    // Server state (issues a fresh list request)
    ListExcludesTitle(String),

    // Custom
    Custom(Box<dyn Fn(&ScenarioContext<'_>) -> Result<()> + Send + Sync>),
}

impl Assertion {
    /// Wraps a closure as a custom assertion
    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&ScenarioContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(check))
    }
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(n) => write!(f, "Status({})", n),
            Self::ContentTypeContains(s) => write!(f, "ContentTypeContains({:?})", s),
            Self::BodyLength(n) => write!(f, "BodyLength({})", n),
            Self::BodyIncludesIds(ids) => write!(f, "BodyIncludesIds({:?})", ids),
            Self::BodyMatches(draft) => write!(f, "BodyMatches({:?})", draft),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Bound(alias) => write!(f, "Bound({:?})", alias),
            Self::ListExcludesTitle(title) => write!(f, "ListExcludesTitle({:?})", title),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
