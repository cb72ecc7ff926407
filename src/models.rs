// src/models.rs

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,
}

impl Message {
    fn new(role: Role, content: String, is_loading: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            role,
            timestamp: Local::now(),
            is_loading,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), false)
    }

    /// Empty assistant message shown while a simulated reply is pending.
    pub fn placeholder() -> Self {
        Self::new(Role::Assistant, String::new(), true)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
