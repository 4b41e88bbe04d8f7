//! User roster service library.
//!
//! An in-memory, insertion-ordered user table exposed as a small REST API,
//! plus the form rules and typed client used to drive it.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
