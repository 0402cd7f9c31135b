//! The access-gate contract consumed by the reader loop.
//!
//! The gate is the authorization/actuation subsystem (whitelist database,
//! lock, admin surface). The reader core only ever asks it two things: "is
//! this identifier currently authorized" and, in learn mode, "enroll this
//! identifier". Everything else the gate does is outside the reader's view.

use crate::error::Result;
use crate::types::CardId;
use std::future::Future;

/// Authorization and enrollment operations exposed to the reader loop.
///
/// Methods are declared as `impl Future + Send` (desugared RPITIT) rather
/// than plain `async fn` so generic consumers can await them from spawned
/// tasks; implementations may still be written with `async fn`.
pub trait AccessGate: Send + Sync {
    /// Whether the identifier is currently authorized.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be consulted. The reader
    /// treats a gate error like a denial, with an error-level log.
    fn is_authorized(&self, card: &CardId) -> impl Future<Output = Result<bool>> + Send;

    /// Enroll an identifier as authorized, with a descriptive label.
    ///
    /// Only invoked when learn mode is active and the identifier is not yet
    /// authorized.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment could not be persisted.
    fn enroll(&self, card: &CardId, label: &str) -> impl Future<Output = Result<()>> + Send;
}
