//! Domain types and services for the user roster.
//!
//! Purpose: hold the user record, the in-memory store, the CRUD semantics
//! over it, and the form acceptance rules. Nothing here depends on HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId / Gender / NewUser / UserPatch: the record and its
//!   create and update payloads.
//! - UserStore: insertion-ordered in-memory table.
//! - UserStoreService: list/get/create/update/delete over a store.
//! - form: client-side field rules and typed submission.

pub mod error;
pub mod form;
pub mod ports;
pub mod store;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::store::{UserStore, default_users};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Gender, NewUser, User, UserId, UserList, UserPatch, UserValidationError};
pub use self::users_service::UserStoreService;
