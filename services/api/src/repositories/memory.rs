//! In-memory user repository
//!
//! Mirrors the PostgreSQL repository's semantics, including the unique
//! email constraint, without needing a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;

use super::{UserChanges, UserStore};
use crate::models::User;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

/// In-memory implementation of `UserStore`
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether no user is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn email_taken(table: &Table, email: &str, except: Option<i64>) -> bool {
    table
        .rows
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn email_exists(&self, email: &str) -> DatabaseResult<bool> {
        let table = self.table.read().await;
        Ok(email_taken(&table, email, None))
    }

    async fn insert(&self, user: &User) -> DatabaseResult<User> {
        let mut table = self.table.write().await;

        if email_taken(&table, &user.email, None) {
            return Err(DatabaseError::Conflict(format!(
                "email '{}' already registered",
                user.email
            )));
        }

        table.next_id += 1;
        let stored = User {
            id: table.next_id,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
            ..user.clone()
        };
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &UserChanges, updated_at: i64) -> DatabaseResult<u64> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&id) {
            return Ok(0);
        }

        if email_taken(&table, &changes.email, Some(id)) {
            return Err(DatabaseError::Conflict(format!(
                "email '{}' already registered",
                changes.email
            )));
        }

        if let Some(user) = table.rows.get_mut(&id) {
            user.name = changes.name.clone();
            user.email = changes.email.clone();
            user.password_hash = changes.password_hash.clone();
            user.updated_at = Some(updated_at);
        }

        Ok(1)
    }

    async fn soft_delete(&self, id: i64, deleted_at: i64) -> DatabaseResult<()> {
        let mut table = self.table.write().await;

        if let Some(user) = table.rows.get_mut(&id) {
            if user.deleted_at.is_none() {
                user.is_deleted = true;
                user.deleted_at = Some(deleted_at);
            }
        }

        Ok(())
    }

    async fn hard_delete(&self, id: i64) -> DatabaseResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
