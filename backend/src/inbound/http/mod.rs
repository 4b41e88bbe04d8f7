//! HTTP inbound adapter exposing the users REST resource.

pub mod error;
pub mod health;
pub mod json;
pub mod state;
pub mod users;

pub use error::ApiResult;
