//! Driving port for read-only user operations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read side of the users resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user in insertion order. May be empty.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user.
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::NotFound`] when `id` is not stored.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
