use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{User, UserPatch};

/// Persistence contract for users
///
/// Identifiers are the store's string form. A malformed identifier fails with
/// `InvalidIdentifier` before any query is issued; a well-formed one that
/// matches nothing fails with `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a user and return the store-assigned id. `user.id` is ignored.
    async fn create(&self, user: &User) -> UserResult<String>;

    async fn find_one(&self, id: &str) -> UserResult<User>;

    /// Every stored user; empty when there are none
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Overwrite the mapped fields of the user identified by `user.id`.
    /// The identifier itself is never written.
    async fn update(&self, user: &User) -> UserResult<()>;

    /// Write only the fields present in `patch`
    async fn patch(&self, id: &str, patch: &UserPatch) -> UserResult<()>;

    async fn delete(&self, id: &str) -> UserResult<()>;
}
