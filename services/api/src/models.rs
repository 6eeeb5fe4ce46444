//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod user;

pub use user::{User, UserPayload};

/// Body returned by operations that have no resource to show
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
