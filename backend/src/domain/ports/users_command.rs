//! Driving port for user mutations.
//!
//! Implementations must make each operation atomic with respect to the
//! others: the existence check and the write of `update_user` and
//! `delete_user` cannot be interleaved with another mutation.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Write side of the users resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user under a freshly generated identifier.
    async fn create_user(&self, fields: NewUser) -> Result<User, Error>;

    /// Merge `patch` into the stored user and return the result.
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::NotFound`] when `id` is not stored.
    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    /// Remove the stored user and return it.
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::NotFound`] when `id` is not stored.
    async fn delete_user(&self, id: &UserId) -> Result<User, Error>;
}
