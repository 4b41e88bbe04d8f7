//! Authoritative in-memory user table.
//!
//! Iteration follows insertion order. Overwriting an existing id keeps its
//! slot; removal preserves the order of the remaining records. The store does
//! no validation of its own.

use indexmap::IndexMap;
use tracing::debug;

use super::{Gender, NewUser, User, UserId};

/// Identifiers and fields of the records loaded when seeding is enabled.
const DEFAULT_SEED: [(&str, &str, &str, u32, Gender); 3] = [
    (
        "8fb8e010-4572-446d-b778-9a6e06fe8a44",
        "Johnny",
        "Maverick",
        45,
        Gender::Male,
    ),
    (
        "72398210-5dbb-4566-ada9-e992d8df1b09",
        "Martha",
        "Peach",
        32,
        Gender::Female,
    ),
    (
        "63396210-5dbb-4236-adc9-d094d7ad3c90",
        "Caryl",
        "Baker",
        38,
        Gender::Female,
    ),
];

/// The default seed set.
#[must_use]
pub fn default_users() -> Vec<User> {
    DEFAULT_SEED
        .iter()
        .filter_map(|&(id, firstname, lastname, age, gender)| {
            let id = UserId::new(id).ok()?;
            Some(User::new(
                id,
                NewUser {
                    firstname: firstname.to_owned(),
                    lastname: lastname.to_owned(),
                    age,
                    gender,
                },
            ))
        })
        .collect()
}

/// Mapping from [`UserId`] to [`User`].
///
/// # Examples
/// ```
/// use roster::domain::UserStore;
///
/// let mut store = UserStore::seeded();
/// assert_eq!(store.len(), 3);
/// store.clear();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: IndexMap<UserId, User>,
}

impl UserStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `users`, keyed by their own identifiers. Later
    /// duplicates overwrite earlier ones.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut store = Self::new();
        for user in users {
            store.set(user.id().clone(), user);
        }
        store
    }

    /// A store holding [`default_users`].
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_users(default_users())
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Every record in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Insert or overwrite the record stored under `id`.
    pub fn set(&mut self, id: UserId, user: User) {
        debug!(user_id = %id, "store set");
        self.users.insert(id, user);
    }

    /// Remove and return the record stored under `id`.
    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        let removed = self.users.shift_remove(id);
        if removed.is_some() {
            debug!(user_id = %id, "store remove");
        }
        removed
    }

    /// Remove the record stored under `id`; true when one existed.
    pub fn delete(&mut self, id: &UserId) -> bool {
        self.remove(id).is_some()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.users.clear();
    }

    /// Replace the contents with `users`.
    pub fn reseed(&mut self, users: impl IntoIterator<Item = User>) {
        self.clear();
        for user in users {
            self.set(user.id().clone(), user);
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn user(id: &str, firstname: &str) -> User {
        User::new(
            UserId::new(id).expect("test id"),
            NewUser {
                firstname: firstname.into(),
                lastname: "Tester".into(),
                age: 30,
                gender: Gender::Female,
            },
        )
    }

    fn ids(store: &UserStore) -> Vec<&str> {
        store.list().map(|u| u.id().as_ref()).collect()
    }

    #[fixture]
    fn store() -> UserStore {
        UserStore::with_users([user("a", "Alpha"), user("b", "Bravo"), user("c", "Charlie")])
    }

    #[rstest]
    fn default_seed_is_complete() {
        let users = default_users();
        assert_eq!(users.len(), DEFAULT_SEED.len());
        assert_eq!(users[0].firstname(), "Johnny");
    }

    #[rstest]
    fn list_follows_insertion_order(store: UserStore) {
        assert_eq!(ids(&store), ["a", "b", "c"]);
    }

    #[rstest]
    fn overwrite_keeps_position(mut store: UserStore) {
        let id = UserId::new("b").expect("test id");
        store.set(id.clone(), user("b", "Beta"));
        assert_eq!(ids(&store), ["a", "b", "c"]);
        assert_eq!(store.get(&id).map(User::firstname), Some("Beta"));
    }

    #[rstest]
    fn delete_reports_presence(mut store: UserStore) {
        let id = UserId::new("b").expect("test id");
        assert!(store.delete(&id));
        assert!(!store.delete(&id));
        assert_eq!(ids(&store), ["a", "c"]);
    }

    #[rstest]
    fn remove_returns_the_record(mut store: UserStore) {
        let id = UserId::new("c").expect("test id");
        let removed = store.remove(&id).expect("record present");
        assert_eq!(removed.firstname(), "Charlie");
        assert!(store.get(&id).is_none());
    }

    #[rstest]
    fn reseed_replaces_contents(mut store: UserStore) {
        store.reseed([user("z", "Zulu")]);
        assert_eq!(ids(&store), ["z"]);
        store.clear();
        assert!(store.is_empty());
    }
}
