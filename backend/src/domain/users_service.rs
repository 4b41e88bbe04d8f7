//! CRUD semantics over the in-memory [`UserStore`].
//!
//! The store sits behind one mutex. Every operation takes the lock exactly
//! once, so update's read-merge-write and delete's lookup-and-remove are
//! atomic even when actix runs several workers.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::ports::{UsersCommand, UsersQuery};
use super::{Error, NewUser, User, UserId, UserPatch, UserStore};

/// Store-backed implementation of [`UsersQuery`] and [`UsersCommand`].
///
/// # Examples
/// ```
/// use roster::domain::{UserStore, UserStoreService};
///
/// let service = UserStoreService::new(UserStore::seeded());
/// assert_eq!(service.len().expect("healthy lock"), 3);
/// ```
#[derive(Debug, Default)]
pub struct UserStoreService {
    store: Mutex<UserStore>,
}

impl UserStoreService {
    /// Take ownership of `store`.
    #[must_use]
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Replace the stored users, e.g. to isolate tests.
    pub fn reseed(&self, users: impl IntoIterator<Item = User>) -> Result<(), Error> {
        self.lock()?.reseed(users);
        Ok(())
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }

    /// True when no users are stored.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStore>, Error> {
        self.store.lock().map_err(|err| {
            error!(error = %err, "user store lock poisoned");
            Error::internal("user store unavailable")
        })
    }
}

fn not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

#[async_trait]
impl UsersQuery for UserStoreService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.lock()?.list().cloned().collect())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.lock()?.get(id).cloned().ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl UsersCommand for UserStoreService {
    async fn create_user(&self, fields: NewUser) -> Result<User, Error> {
        let mut store = self.lock()?;
        let mut id = UserId::random();
        while store.get(&id).is_some() {
            id = UserId::random();
        }
        let user = User::new(id.clone(), fields);
        store.set(id, user.clone());
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        let mut store = self.lock()?;
        let existing = store.get(id).cloned().ok_or_else(|| not_found(id))?;
        if patch.is_empty() {
            debug!(user_id = %id, "empty patch; record unchanged");
        }
        let merged = existing.apply(patch);
        store.set(merged.id().clone(), merged.clone());
        info!(user_id = %id, "user updated");
        Ok(merged)
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, Error> {
        let removed = self.lock()?.remove(id).ok_or_else(|| not_found(id))?;
        info!(user_id = %id, "user deleted");
        Ok(removed)
    }
}
