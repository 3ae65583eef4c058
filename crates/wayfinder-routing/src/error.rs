use std::time::Duration;
use thiserror::Error;

/// Transport-level failures of the routing service boundary.
///
/// Anything the service sends that is not a well-formed success response
/// maps to one of these; none of them ever crashes the session, and a
/// caller holding a drawn route keeps it when one of these comes back.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("route request failed: {0}")]
    Network(String),

    #[error("routing service returned status {0}")]
    BadStatus(u16),

    #[error("malformed routing response: {0}")]
    Parse(String),

    #[error("route request timed out after {0:?}")]
    Timeout(Duration),
}
