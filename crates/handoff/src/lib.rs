//! # Handoff
//!
//! Keeps track of "the current session" when sessions come and go under
//! your feet.
//!
//! A discovery service (zeroconf, a login flow, anything implementing
//! [`SessionDiscovery`]) pushes new sessions in and retires old ones.
//! Consumers on any thread ask the [`SessionHolder`] for the current one and
//! get it only while it is still valid. A single [`SessionObserver`] hears
//! about every install and every clear.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use handoff::prelude::*;
//!
//! handoff::init_tracing();
//!
//! let hub = DiscoveryHub::<MySession>::new();
//! let holder = SessionHolder::builder()
//!     .events(handoff::load_events_config("events.json")?)
//!     .reconnection_listener(Arc::new(MyForwarder::default()))
//!     .build_with_discovery(&hub);
//!
//! hub.announce(Arc::new(MySession::connect()?));
//! if let Some(session) = holder.session() {
//!     // use it
//! }
//! ```

mod config;
mod error;
mod logging;

pub use config::load_events_config;
pub use error::HandoffError;
pub use logging::{init_tracing, try_init_tracing};

pub use handoff_session::{
    CloseListener, DiscoveryHub, EventsConfig, ReconnectionListener, Session, SessionDiscovery,
    SessionError, SessionHolder, SessionHolderBuilder, SessionListener, SessionObserver,
};

/// Everything needed to wire a holder up, in one import.
pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::{
        DiscoveryHub, EventsConfig, HandoffError, ReconnectionListener, Session, SessionDiscovery,
        SessionError, SessionHolder, SessionListener, SessionObserver,
    };
}
