//! Repositories for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::User;

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;

/// Fields written by a user update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Persistence operations for users.
///
/// Implementations must reject a second user with an email that is already
/// stored, reporting it as `DatabaseError::Conflict`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether any stored user has exactly this email
    async fn email_exists(&self, email: &str) -> DatabaseResult<bool>;

    /// Store a new user and return it with its assigned id
    async fn insert(&self, user: &User) -> DatabaseResult<User>;

    /// Every stored user, ordered by id
    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>>;

    /// Overwrite the mutable fields of a user, returning the rows affected
    async fn update(&self, id: i64, changes: &UserChanges, updated_at: i64) -> DatabaseResult<u64>;

    /// Mark a user deleted at `deleted_at`, keeping any earlier deletion time
    async fn soft_delete(&self, id: i64, deleted_at: i64) -> DatabaseResult<()>;

    /// Remove a user permanently; removing an absent id succeeds
    async fn hard_delete(&self, id: i64) -> DatabaseResult<()>;
}
