use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use handoff::prelude::*;
use handoff::CloseListener;
use parking_lot::Mutex;
use rand::Rng;

// ---------------------------------------------------------------------------
// A pretend speaker connection
// ---------------------------------------------------------------------------

struct SpeakerSession {
    id: u64,
    open: AtomicBool,
    on_close: Mutex<Vec<CloseListener>>,
}

impl SpeakerSession {
    fn connect(id: u64) -> Arc<Self> {
        tracing::info!(id, "speaker connected");
        Arc::new(Self {
            id,
            open: AtomicBool::new(true),
            on_close: Mutex::new(Vec::new()),
        })
    }

    /// The remote end hung up.
    fn hang_up(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            tracing::warn!(id = self.id, "speaker hung up");
            for listener in std::mem::take(&mut *self.on_close.lock()) {
                listener();
            }
        }
    }
}

impl Session for SpeakerSession {
    fn is_valid(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn close(&self) -> Result<(), SessionError> {
        // Closing a speaker that already hung up is a no-op, not a failure.
        if !self.open.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        for listener in std::mem::take(&mut *self.on_close.lock()) {
            listener();
        }
        Ok(())
    }

    fn add_close_listener(&self, listener: CloseListener) {
        self.on_close.lock().push(listener);
    }

    fn add_reconnection_listener(&self, listener: Arc<dyn ReconnectionListener>) {
        // Speakers here never reconnect; tell the forwarder we're up.
        listener.on_connection_established();
    }
}

// ---------------------------------------------------------------------------
// Observer + events forwarder
// ---------------------------------------------------------------------------

struct Console;

impl SessionObserver<SpeakerSession> for Console {
    fn on_new_session(&self, session: &Arc<SpeakerSession>) {
        tracing::info!(id = session.id, "now playing through speaker");
    }

    fn on_session_cleared(&self, old: &Arc<SpeakerSession>) {
        tracing::info!(id = old.id, "speaker gone, playback paused");
    }
}

struct EventsForwarder;

impl ReconnectionListener for EventsForwarder {
    fn on_connection_dropped(&self) {
        tracing::info!("forwarding: connection dropped");
    }

    fn on_connection_established(&self) {
        tracing::info!("forwarding: connection established");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), HandoffError> {
    handoff::init_tracing();

    let events = match std::env::args().nth(1) {
        Some(path) => handoff::load_events_config(path)?,
        None => EventsConfig::enabled(),
    };
    tracing::info!(
        enabled = events.enabled,
        host = %events.host,
        port = events.port,
        "events config"
    );

    let hub = Arc::new(DiscoveryHub::<SpeakerSession>::new());
    let holder = SessionHolder::builder()
        .events(events)
        .reconnection_listener(Arc::new(EventsForwarder))
        .build_with_discovery(hub.as_ref());
    holder.set_observer(Arc::new(Console));

    // Discovery: a new speaker shows up every so often, the old one is
    // retired, and now and then one hangs up on its own.
    let discovery = {
        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            let mut current: Option<Arc<SpeakerSession>> = None;
            for id in 1..=8u64 {
                let (delay_ms, hang_up) = {
                    let mut rng = rand::rng();
                    (rng.random_range(150..400), rng.random_bool(0.3))
                };
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                if let Some(old) = current.take() {
                    if hang_up {
                        old.hang_up();
                    } else {
                        hub.retire(&old);
                    }
                }
                let next = SpeakerSession::connect(id);
                hub.announce(Arc::clone(&next));
                current = Some(next);
            }
        })
    };

    let consumers: Vec<_> = (0..3)
        .map(|worker| {
            let holder = holder.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_millis(120));
                for _ in 0..25 {
                    interval.tick().await;
                    match holder.session() {
                        Some(session) => tracing::debug!(worker, id = session.id, "using speaker"),
                        None => tracing::debug!(worker, "no speaker available"),
                    }
                }
            })
        })
        .collect();

    if let Err(err) = discovery.await {
        tracing::error!(error = %err, "discovery task failed");
    }
    for consumer in consumers {
        if let Err(err) = consumer.await {
            tracing::error!(error = %err, "consumer task failed");
        }
    }

    holder.clear();
    Ok(())
}
