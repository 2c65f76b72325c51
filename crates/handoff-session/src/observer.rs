//! Observer hook for session install/clear transitions.

use std::sync::Arc;

/// Listener notified whenever the holder's current session changes.
///
/// Calls are synchronous and happen on whichever thread performed the
/// transition, after the slot has been updated. Implementations may call
/// back into the holder; no holder lock is held during a notification.
pub trait SessionObserver<S>: Send + Sync + 'static {
    /// A session was installed (or was already current when the observer
    /// was registered).
    fn on_new_session(&self, session: &Arc<S>);

    /// `old` was removed from the slot and closed.
    fn on_session_cleared(&self, old: &Arc<S>);
}
