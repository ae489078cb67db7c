//! Per-invocation session state.
//!
//! A [`Session`] is built once at startup from configuration and handed to
//! whatever needs to know who is acting. Nothing reads identity from a global.

use std::fmt;

use serde::Serialize;

use crate::types::ValidationError;

/// The person the logs belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "user name" });
        }
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Ok(Self { name, email })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{email}>", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Session state for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub const fn new(user: Option<User>) -> Self {
        Self { user }
    }

    /// The signed-in user, if an identity was configured.
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Display form of the current identity.
    pub fn sender(&self) -> String {
        self.user
            .as_ref()
            .map_or_else(|| "anonymous".to_string(), ToString::to_string)
    }
}
