//! Driving ports for the hexagonal boundary.
//!
//! Inbound adapters depend on these traits only, so handlers can be exercised
//! against doubles without the in-memory store.

mod users_command;
mod users_query;

#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
