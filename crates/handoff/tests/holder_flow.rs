//! End-to-end tests through the facade's prelude.
//!
//! Models the usual deployment: a discovery service rotates sessions, a
//! player-style observer tracks the current one, and an events forwarder
//! rides along on every session when enabled.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use handoff::prelude::*;
use handoff::CloseListener;
use parking_lot::Mutex;

// =========================================================================
// Helpers
// =========================================================================

#[derive(Default)]
struct Connection {
    name: &'static str,
    closed: AtomicBool,
    close_calls: AtomicUsize,
    on_close: Mutex<Vec<CloseListener>>,
    forwarders: Mutex<Vec<Arc<dyn ReconnectionListener>>>,
}

impl Connection {
    fn named(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            ..Default::default()
        })
    }

    fn drop_remote(&self) {
        self.closed.store(true, Ordering::SeqCst);
        for listener in std::mem::take(&mut *self.on_close.lock()) {
            listener();
        }
    }

    fn simulate_reconnect(&self) {
        for forwarder in self.forwarders.lock().iter() {
            forwarder.on_connection_dropped();
            forwarder.on_connection_established();
        }
    }
}

impl Session for Connection {
    fn is_valid(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    fn close(&self) -> Result<(), SessionError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyClosed);
        }
        Ok(())
    }

    fn add_close_listener(&self, listener: CloseListener) {
        self.on_close.lock().push(listener);
    }

    fn add_reconnection_listener(&self, listener: Arc<dyn ReconnectionListener>) {
        self.forwarders.lock().push(listener);
    }
}

/// Observer that mirrors what a player would display.
#[derive(Default)]
struct NowPlaying {
    log: Mutex<Vec<String>>,
}

impl SessionObserver<Connection> for NowPlaying {
    fn on_new_session(&self, session: &Arc<Connection>) {
        self.log.lock().push(format!("+{}", session.name));
    }

    fn on_session_cleared(&self, old: &Arc<Connection>) {
        self.log.lock().push(format!("-{}", old.name));
    }
}

#[derive(Default)]
struct Forwarder {
    drops: AtomicUsize,
    recoveries: AtomicUsize,
}

impl ReconnectionListener for Forwarder {
    fn on_connection_dropped(&self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }

    fn on_connection_established(&self) {
        self.recoveries.fetch_add(1, Ordering::SeqCst);
    }
}

// =========================================================================
// Flows
// =========================================================================

#[test]
fn test_discovery_rotation_reported_to_observer_in_order() {
    handoff::init_tracing();
    let hub = DiscoveryHub::<Connection>::new();
    let holder = SessionHolder::from_discovery(&hub);
    let player = Arc::new(NowPlaying::default());
    holder.set_observer(player.clone());

    let kitchen = Connection::named("kitchen");
    let office = Connection::named("office");

    hub.announce(kitchen.clone());
    hub.retire(&kitchen);
    hub.announce(office.clone());
    office.drop_remote();

    assert_eq!(
        *player.log.lock(),
        vec!["+kitchen", "-kitchen", "+office", "-office"]
    );
    assert!(holder.session().is_none());
    // The remote already closed it, so the holder's close reports an error
    // that must not leak out; it is still called exactly once.
    assert_eq!(office.close_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_events_forwarder_rides_along_when_enabled() {
    let hub = DiscoveryHub::<Connection>::new();
    let forwarder = Arc::new(Forwarder::default());
    let holder = SessionHolder::builder()
        .events(EventsConfig::from_json(r#"{"enabled": true}"#).unwrap())
        .reconnection_listener(forwarder.clone())
        .build_with_discovery(&hub);

    let conn = Connection::named("living-room");
    hub.announce(conn.clone());
    conn.simulate_reconnect();

    assert!(holder.session().is_some());
    assert_eq!(forwarder.drops.load(Ordering::SeqCst), 1);
    assert_eq!(forwarder.recoveries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_static_holder_ignores_unrelated_discovery() {
    let hub = DiscoveryHub::<Connection>::new();
    let pinned = Connection::named("pinned");
    let holder = SessionHolder::from_session(pinned.clone());

    hub.announce(Connection::named("intruder"));

    let current = holder.session().expect("pinned session stays current");
    assert_eq!(current.name, "pinned");
    assert_eq!(hub.listener_count(), 0);
}
