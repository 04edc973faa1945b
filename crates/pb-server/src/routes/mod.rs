//! Route handlers for the HTTP API.

pub mod climbers;
pub mod climbs;
pub mod health;
pub mod peaks;

use std::str::FromStr;

/// Parse a path segment into a typed ID, rejecting garbage with a 400.
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &str) -> pb_core::Result<T> {
    raw.parse()
        .map_err(|_| pb_core::Error::Validation(format!("Invalid {entity} ID: {raw}")))
}
