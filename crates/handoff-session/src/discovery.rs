//! Discovery hook: how new sessions reach the holder.
//!
//! Something outside this crate (a zeroconf server, a login flow, a test)
//! decides when a session is born and when it is about to be thrown away.
//! It reports both through the [`SessionListener`] callbacks. The
//! [`SessionDiscovery`] trait is the single registration point the holder
//! uses in discovery mode.
//!
//! [`DiscoveryHub`] is a ready-made in-process implementation: call
//! [`announce`](DiscoveryHub::announce) and [`retire`](DiscoveryHub::retire)
//! and every registered listener hears about it.

use std::sync::Arc;

use parking_lot::Mutex;

/// Callbacks a discovery service invokes, from any thread, in any order.
pub trait SessionListener<S>: Send + Sync + 'static {
    /// `session` should become the current session.
    fn session_changed(&self, session: Arc<S>);

    /// `session` is about to be discarded by the discovery service.
    fn session_closing(&self, session: &Arc<S>);

    /// Returns `false` once the listener can never act again.
    ///
    /// [`DiscoveryHub`] drops inactive listeners instead of dispatching to
    /// them.
    fn is_active(&self) -> bool {
        true
    }
}

/// A source of session changes that accepts listeners.
pub trait SessionDiscovery<S> {
    /// Registers `listener` for every future change/closing event.
    fn add_session_listener(&self, listener: Arc<dyn SessionListener<S>>);
}

// ---------------------------------------------------------------------------
// DiscoveryHub
// ---------------------------------------------------------------------------

/// In-process discovery service that fans events out to its listeners.
///
/// Dispatch happens on the caller's thread. The listener list is
/// snapshotted before dispatch, so a listener may register further
/// listeners without deadlocking; those only see later events. Listeners
/// that report themselves inactive are pruned on every dispatch and
/// registration.
pub struct DiscoveryHub<S> {
    listeners: Mutex<Vec<Arc<dyn SessionListener<S>>>>,
}

impl<S: 'static> DiscoveryHub<S> {
    /// Creates a hub with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Tells every listener that `session` is the new current session.
    pub fn announce(&self, session: Arc<S>) {
        let listeners = self.snapshot();
        tracing::debug!(listeners = listeners.len(), "announcing session");
        for listener in listeners {
            listener.session_changed(Arc::clone(&session));
        }
    }

    /// Tells every listener that `session` is being discarded.
    pub fn retire(&self, session: &Arc<S>) {
        let listeners = self.snapshot();
        tracing::debug!(listeners = listeners.len(), "retiring session");
        for listener in listeners {
            listener.session_closing(session);
        }
    }

    /// Number of registered listeners that are still active.
    pub fn listener_count(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> Vec<Arc<dyn SessionListener<S>>> {
        let mut listeners = self.listeners.lock();
        listeners.retain(|l| l.is_active());
        listeners.clone()
    }
}

impl<S: 'static> Default for DiscoveryHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> SessionDiscovery<S> for DiscoveryHub<S> {
    fn add_session_listener(&self, listener: Arc<dyn SessionListener<S>>) {
        let mut listeners = self.listeners.lock();
        listeners.retain(|l| l.is_active());
        listeners.push(listener);
    }
}
