//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] owned by each
//! game instance. The lifecycle publishes from whichever operation task is
//! finalizing a transition; the host subscribes as many receivers as it
//! wants.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; the minimum capacity is 1 (clamped).
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip
//!   the `n` oldest items.
//! - **No persistence**: events published with no active receivers are
//!   dropped.

use tokio::sync::broadcast;

/// Broadcast channel for lifecycle events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); receivers only
/// observe events published after they subscribe.
#[derive(Clone, Debug)]
pub struct Bus<E> {
    tx: broadcast::Sender<E>,
}

impl<E: Clone> Bus<E> {
    /// Creates a new bus with the given channel capacity (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers the event is dropped; this still returns
    /// immediately.
    pub fn publish(&self, ev: E) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new independent receiver observing subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_active_receivers() {
        let bus: Bus<u32> = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(1);
        bus.publish(2);
        assert_eq!(rx.recv().await.ok(), Some(1));
        assert_eq!(rx.recv().await.ok(), Some(2));
    }

    #[tokio::test]
    async fn receiver_misses_earlier_events() {
        let bus: Bus<u32> = Bus::new(8);
        bus.publish(1);
        let mut rx = bus.subscribe();
        bus.publish(2);
        assert_eq!(rx.recv().await.ok(), Some(2));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        // Would panic inside broadcast::channel without the clamp.
        let bus: Bus<u32> = Bus::new(0);
        bus.publish(1);
    }
}
