//! The session holder: one slot, at most one current session.
//!
//! This is the central piece of the crate. It's responsible for:
//! - Installing sessions pushed by a discovery service (or pinned up front)
//! - Handing the current session to any number of concurrent readers
//! - Noticing, lazily, when the current session went bad
//! - Tearing each session down at most once
//! - Telling the observer about every install and every clear
//!
//! # Concurrency note
//!
//! The slot is an [`ArcSwapOption`]: reads never block, and every state
//! change is a single atomic operation on it.
//!
//! - An unconditional clear is one `swap(None)`. Whoever gets the old value
//!   back owns its teardown; everyone else gets `None` and does nothing.
//! - A conditional clear (closing signal, self-close hook, invalid read) is
//!   one `compare_and_swap` against the exact session instance, so it can
//!   never knock out a session that was installed after it looked.
//!
//! No lock is held while calling into a session or the observer.

use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use arc_swap::ArcSwapOption;
use parking_lot::RwLock;

use crate::{
    CloseListener, EventsConfig, ReconnectionListener, Session, SessionDiscovery, SessionListener,
    SessionObserver,
};

/// State shared by every clone of a [`SessionHolder`] and by the hooks it
/// registers. Hooks only ever hold a [`Weak`] to it.
struct Shared<S> {
    slot: ArcSwapOption<S>,
    observer: RwLock<Option<Arc<dyn SessionObserver<S>>>>,
    reconnection: Option<Arc<dyn ReconnectionListener>>,
}

impl<S: Session> Shared<S> {
    fn observer(&self) -> Option<Arc<dyn SessionObserver<S>>> {
        self.observer.read().clone()
    }

    /// Puts `session` in the slot and hooks it up. Does not notify.
    fn install(this: &Arc<Self>, session: &Arc<S>) {
        // Overwrites without closing: retiring the previous session is the
        // discovery service's job, via the closing signal.
        this.slot.store(Some(Arc::clone(session)));
        session.add_close_listener(close_hook(this, session));
        if let Some(listener) = &this.reconnection {
            session.add_reconnection_listener(Arc::clone(listener));
        }
    }

    fn set(this: &Arc<Self>, session: Arc<S>) {
        Self::install(this, &session);
        tracing::info!("session installed");

        if let Some(observer) = this.observer() {
            observer.on_new_session(&session);
        }
    }

    fn clear(&self) {
        if let Some(old) = self.slot.swap(None) {
            self.teardown(old);
        }
    }

    /// Clears the slot only if it still holds `expected`.
    ///
    /// Returns `true` if this call won the transition and tore `expected`
    /// down.
    fn clear_if_current(&self, expected: &Arc<S>) -> bool {
        let current = Some(Arc::clone(expected));
        let previous = self.slot.compare_and_swap(&current, None::<Arc<S>>);
        let won = (*previous)
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, expected));
        drop(previous);

        if won {
            self.teardown(Arc::clone(expected));
        }
        won
    }

    /// Runs after `old` has already left the slot.
    fn teardown(&self, old: Arc<S>) {
        if let Err(err) = old.close() {
            tracing::warn!(error = %err, "session close failed, slot vacated anyway");
        }
        tracing::info!("session cleared");

        if let Some(observer) = self.observer() {
            observer.on_session_cleared(&old);
        }
    }
}

/// Builds the callback a session runs when it closes itself.
///
/// Holds weak references in both directions: the session must not keep
/// the holder alive, and the callback stored inside the session must not
/// keep the session alive.
fn close_hook<S: Session>(shared: &Arc<Shared<S>>, session: &Arc<S>) -> CloseListener {
    let shared = Arc::downgrade(shared);
    let session = Arc::downgrade(session);
    Box::new(move || {
        let (Some(shared), Some(session)) = (shared.upgrade(), session.upgrade()) else {
            return;
        };
        if shared.clear_if_current(&session) {
            tracing::debug!("session closed itself, cleared from holder");
        }
    })
}

/// Forwards discovery events into a holder it does not keep alive.
struct DiscoveryBridge<S> {
    shared: Weak<Shared<S>>,
}

impl<S: Session> SessionListener<S> for DiscoveryBridge<S> {
    fn session_changed(&self, session: Arc<S>) {
        if let Some(shared) = self.shared.upgrade() {
            Shared::set(&shared, session);
        }
    }

    fn session_closing(&self, session: &Arc<S>) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        if !shared.clear_if_current(session) {
            tracing::debug!("ignoring closing signal for a session that is not current");
        }
    }

    fn is_active(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

// ---------------------------------------------------------------------------
// SessionHolder
// ---------------------------------------------------------------------------

/// Thread-safe holder of the current session.
///
/// Cloning is cheap and every clone shares the same slot, so one holder can
/// be handed to as many threads or tasks as needed.
///
/// ## Lifecycle
///
/// ```text
///             set() / discovery "changed"
///   [Empty] ─────────────────────────────→ [Holding S]
///      ↑                                        │
///      └────────────────────────────────────────┘
///        clear() / discovery "closing" for S
///        S closes itself / session() finds S invalid
/// ```
pub struct SessionHolder<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SessionHolder<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Session> SessionHolder<S> {
    /// Starts configuring a holder.
    pub fn builder() -> SessionHolderBuilder<S> {
        SessionHolderBuilder::new()
    }

    /// A holder pinned to `session`, with reconnection events disabled.
    ///
    /// No discovery service can replace it. It leaves only through
    /// [`clear`](Self::clear), by closing itself, or by turning invalid.
    pub fn from_session(session: Arc<S>) -> Self {
        Self::builder().build_static(session)
    }

    /// An empty holder kept up to date by `discovery`, with reconnection
    /// events disabled.
    pub fn from_discovery<D>(discovery: &D) -> Self
    where
        D: SessionDiscovery<S> + ?Sized,
    {
        Self::builder().build_with_discovery(discovery)
    }

    /// Returns the current session if there is one and it is still valid.
    ///
    /// An invalid session is cleared (closed, observer notified) before
    /// returning `None`. Only the caller that wins that clear tears it
    /// down; concurrent readers just see `None`.
    pub fn session(&self) -> Option<Arc<S>> {
        let current = self.shared.slot.load_full()?;
        if current.is_valid() {
            return Some(current);
        }

        tracing::debug!("current session is no longer valid");
        self.shared.clear_if_current(&current);
        None
    }

    /// Returns `true` if the slot is occupied, without checking validity.
    pub fn has_session(&self) -> bool {
        self.shared.slot.load().is_some()
    }

    /// Registers `observer`, replacing any previous one.
    ///
    /// If a session is already current, the observer is told about it
    /// immediately, on this thread.
    pub fn set_observer(&self, observer: Arc<dyn SessionObserver<S>>) {
        *self.shared.observer.write() = Some(Arc::clone(&observer));

        if let Some(current) = self.shared.slot.load_full() {
            observer.on_new_session(&current);
        }
    }

    /// Makes `session` current, without closing whatever was there before.
    ///
    /// Registers a close hook and the reconnection listener (if enabled) on
    /// the session, then notifies the observer before returning.
    pub fn set(&self, session: Arc<S>) {
        Shared::set(&self.shared, session);
    }

    /// Empties the slot, closes the former session and notifies the
    /// observer. A no-op if the slot is already empty.
    pub fn clear(&self) {
        self.shared.clear();
    }
}

// ---------------------------------------------------------------------------
// SessionHolderBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`SessionHolder`].
///
/// # Example
///
/// ```rust,ignore
/// let holder = SessionHolder::builder()
///     .events(EventsConfig::enabled())
///     .reconnection_listener(Arc::new(MyEventsForwarder::new()))
///     .build_with_discovery(&zeroconf);
/// ```
pub struct SessionHolderBuilder<S> {
    events: EventsConfig,
    reconnection: Option<Arc<dyn ReconnectionListener>>,
    _session: PhantomData<fn() -> S>,
}

impl<S: Session> SessionHolderBuilder<S> {
    /// Creates a builder with events disabled and no listener.
    pub fn new() -> Self {
        Self {
            events: EventsConfig::default(),
            reconnection: None,
            _session: PhantomData,
        }
    }

    /// Sets the reconnection-events configuration.
    pub fn events(mut self, config: EventsConfig) -> Self {
        self.events = config;
        self
    }

    /// Sets the handler attached to every installed session when events
    /// are enabled.
    pub fn reconnection_listener(mut self, listener: Arc<dyn ReconnectionListener>) -> Self {
        self.reconnection = Some(listener);
        self
    }

    /// Builds a holder pinned to `session`.
    pub fn build_static(self, session: Arc<S>) -> SessionHolder<S> {
        let shared = self.into_shared();
        Shared::install(&shared, &session);
        tracing::info!("holder created with static session");
        SessionHolder { shared }
    }

    /// Builds an empty holder and subscribes it to `discovery`.
    pub fn build_with_discovery<D>(self, discovery: &D) -> SessionHolder<S>
    where
        D: SessionDiscovery<S> + ?Sized,
    {
        let shared = self.into_shared();
        discovery.add_session_listener(Arc::new(DiscoveryBridge {
            shared: Arc::downgrade(&shared),
        }));
        tracing::info!("holder created, waiting for discovery");
        SessionHolder { shared }
    }

    fn into_shared(self) -> Arc<Shared<S>> {
        let reconnection = match (self.events.enabled, self.reconnection) {
            (true, Some(listener)) => Some(listener),
            (true, None) => {
                tracing::warn!("events enabled but no reconnection listener supplied");
                None
            }
            (false, listener) => {
                if listener.is_some() {
                    tracing::debug!("events disabled, reconnection listener ignored");
                }
                None
            }
        };

        Arc::new(Shared {
            slot: ArcSwapOption::empty(),
            observer: RwLock::new(None),
            reconnection,
        })
    }
}

impl<S: Session> Default for SessionHolderBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
