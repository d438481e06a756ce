//! # Event subscribers for game lifecycle observability.
//!
//! This module provides the [`Subscribe`] trait, the worker that forwards
//! bus events to a subscriber, and (behind the `logging` feature) a simple
//! built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Game ── publish(GameEvent) ──► Bus ──► broadcast to receivers
//!                                           │
//!                                           ├──► raw Receiver (subscribe())
//!                                           └──► worker ──► Subscribe::on_event()
//!                                                 (attach(), panic-isolated)
//! ```

mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use subscriber::Subscribe;
pub(crate) use subscriber::spawn_worker;

#[cfg(feature = "logging")]
pub use log::LogWriter;
