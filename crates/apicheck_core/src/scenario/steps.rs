use super::assertions::Assertion;
use crate::types::PostDraft;

/// Status a request step is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// 200, plus the operation's shape contract.
    Ok,
    /// 201, plus the created-post contract.
    Created,
    /// 401.
    Unauthorized,
    /// 404.
    NotFound,
    /// Any other status, checked as-is.
    Status(u16),
}

impl Expect {
    pub fn status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Status(code) => code,
        }
    }
}

/// Which credentials a create step sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer token from the scenario's session, on the plain route.
    Session,
    /// No header, on the protected route prefix.
    Anonymous,
}

/// The post a step addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRef {
    /// A literal id, used to address posts that must not exist.
    Id(u64),
    /// An id bound by an earlier create step.
    Alias(String),
}

impl PostRef {
    pub fn alias(name: &str) -> Self {
        Self::Alias(name.to_string())
    }
}

impl From<u64> for PostRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for PostRef {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

/// All possible actions in a scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // Session
    SignUp {
        email: String,
        password: String,
    },
    LogIn {
        email: String,
        password: String,
    },

    // Reads
    ListAll,
    ListLimited {
        limit: usize,
    },
    ListByIds {
        ids: Vec<u64>,
    },

    // Writes
    CreatePost {
        draft: PostDraft,
        bind: Option<String>,
        auth: AuthMode,
        expect: Expect,
    },
    UpdatePost {
        target: PostRef,
        draft: PostDraft,
        expect: Expect,
    },
    DeletePost {
        target: PostRef,
        expect: Expect,
    },
    GetPost {
        target: PostRef,
        expect: Expect,
    },

    // Assertions (can be interspersed)
    Assert {
        assertion: Assertion,
    },
}
