//! Error types for rota-sync.

use thiserror::Error;

/// Failure of a remote call made through [`GroupGateway`](crate::GroupGateway)
/// or [`Announcer`](crate::Announcer).
///
/// None of these abort a run; the reconciler turns them into labelled
/// outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service rejected the credentials.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The service answered with an application-level error.
    #[error("{method} failed: {message}")]
    Api { method: String, message: String },

    /// Network or protocol failure before a usable answer arrived.
    #[error("transport error: {0}")]
    Transport(String),
}
