//! Outbound adapters for talking to external services.
//!
//! - **users_client**: reqwest-backed client for the users REST API, used by
//!   form-driven callers and the end-to-end tests.

pub mod users_client;

pub use users_client::{UsersClient, UsersClientError};
