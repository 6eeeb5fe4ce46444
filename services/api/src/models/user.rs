//! User model and its lifecycle

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current time as Unix epoch seconds
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// User entity
///
/// Timestamps are Unix epoch seconds. `deleted_at` is set exactly when
/// `is_deleted` becomes true and is never cleared afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub is_deleted: bool,
    pub deleted_at: Option<i64>,
}

impl User {
    /// Build a fresh, not yet persisted user stamped with the current time
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self::new_at(name, email, password_hash, unix_now())
    }

    /// Build a fresh user with an explicit creation time
    pub fn new_at(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Record a mutation at the current time, optionally soft-deleting
    pub fn update_timestamps(&mut self, is_deleted: bool) {
        self.update_timestamps_at(unix_now(), is_deleted);
    }

    /// Record a mutation at `now`.
    ///
    /// A user that is already deleted keeps its original `deleted_at`.
    pub fn update_timestamps_at(&mut self, now: i64, is_deleted: bool) {
        self.updated_at = Some(now);
        if is_deleted && !self.is_deleted {
            self.is_deleted = true;
            self.deleted_at = Some(now);
        }
    }
}

/// Full user record as submitted by clients on create and update.
///
/// Every field defaults so that absent required fields surface as a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub is_deleted: bool,
    pub deleted_at: Option<i64>,
}

impl UserPayload {
    /// Turn the submitted record into a user addressed by `id`.
    ///
    /// The deletion flag is derived from `deleted_at` so the result keeps
    /// both fields in agreement.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_deleted: self.deleted_at.is_some(),
            deleted_at: self.deleted_at,
        }
    }
}
