//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised against doubles.

use std::sync::Arc;

use crate::domain::UserStoreService;
use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for the users handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side of the users resource.
    pub users_query: Arc<dyn UsersQuery>,
    /// Write side of the users resource.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle independently supplied ports.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Serve both ports from one store-backed service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use roster::domain::{UserStore, UserStoreService};
    /// use roster::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(UserStoreService::new(UserStore::seeded()));
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service(service: Arc<UserStoreService>) -> Self {
        Self {
            users_query: service.clone(),
            users_command: service,
        }
    }
}
