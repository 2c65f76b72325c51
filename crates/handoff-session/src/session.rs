//! The session contract: what the holder needs from a live connection.
//!
//! Handoff does not implement sessions. The handshake, encryption and I/O
//! all live in your session type; the holder only needs to:
//! - ASK whether it is still usable (`is_valid`)
//! - TEAR IT DOWN when it is replaced or found dead (`close`)
//! - HEAR about it closing itself (`add_close_listener`)
//! - HAND it a reconnection handler (`add_reconnection_listener`)

use std::sync::Arc;

use crate::SessionError;

/// Callback a session runs when it closes itself, for whatever reason.
///
/// The holder registers one of these on every session it installs. It only
/// holds a weak reference back to the holder, so a session that outlives
/// its holder can still call it safely.
pub type CloseListener = Box<dyn Fn() + Send + Sync>;

/// Handler told about connection drops and recoveries inside a session.
///
/// The holder treats this as opaque: it attaches the configured handler to
/// every session it installs and never calls it itself. Both hooks default
/// to no-ops so implementors pick what they care about.
pub trait ReconnectionListener: Send + Sync + 'static {
    /// The session lost its underlying connection and is retrying.
    fn on_connection_dropped(&self) {}

    /// The session re-established its connection.
    fn on_connection_established(&self) {}
}

/// A live connection handle the holder can hand out.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because sessions are shared as `Arc<S>` between
/// the discovery thread that installs them and any number of consumer
/// threads that read them.
///
/// # Identity
///
/// Two sessions are "the same" when they are the same `Arc` allocation.
/// The holder never compares sessions by value.
pub trait Session: Send + Sync + 'static {
    /// Returns `true` while the session can still be used.
    ///
    /// Must be cheap and non-blocking; [`SessionHolder::session`] calls it
    /// on every read.
    ///
    /// [`SessionHolder::session`]: crate::SessionHolder::session
    fn is_valid(&self) -> bool;

    /// Tears the session down.
    ///
    /// Best effort: the holder logs an `Err` and carries on.
    fn close(&self) -> Result<(), SessionError>;

    /// Registers a callback to run when the session closes itself.
    fn add_close_listener(&self, listener: CloseListener);

    /// Attaches a reconnection handler to the session.
    fn add_reconnection_listener(&self, listener: Arc<dyn ReconnectionListener>);
}
