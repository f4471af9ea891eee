//! Session entity
//!
//! Who is looking at the feed. The role comes from the server's session
//! claim; the client treats it as a hint for which affordances to render,
//! never as an authorization decision.

use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Session {
    pub fn new(user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_name: Some(user_name.into()),
            role,
        }
    }

    /// Session used when the server offers no claim
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
