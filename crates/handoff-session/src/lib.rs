//! Current-session management for Handoff.
//!
//! This crate keeps track of "the session" a program is currently talking
//! through, when that session can be swapped out underneath it:
//!
//! 1. **Holding** — a single atomically swappable slot ([`SessionHolder`])
//! 2. **Replacing** — sessions pushed in by a discovery service
//!    ([`SessionDiscovery`], [`DiscoveryHub`]) or pinned at construction
//! 3. **Observing** — one registered [`SessionObserver`] told about every
//!    install and every clear
//!
//! # How it fits in the stack
//!
//! ```text
//! Consumers (above)  ← call holder.session() from any thread
//!     ↕
//! Session Holder (this crate)  ← owns the slot, validity check, teardown
//!     ↕
//! Discovery + Session (below)  ← external: negotiate, announce, close
//! ```

mod config;
mod discovery;
mod error;
mod holder;
mod observer;
mod session;

pub use config::EventsConfig;
pub use discovery::{DiscoveryHub, SessionDiscovery, SessionListener};
pub use error::SessionError;
pub use holder::{SessionHolder, SessionHolderBuilder};
pub use observer::SessionObserver;
pub use session::{CloseListener, ReconnectionListener, Session};
