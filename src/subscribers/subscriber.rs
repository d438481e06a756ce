//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging event handlers
//! (logging, metrics, UI updates) into a game instance without touching the
//! raw broadcast receiver.
//!
//! Each attached subscriber gets a dedicated worker task:
//!
//! ```text
//! Game ──► Bus ──► [worker: recv loop] ──► subscriber.on_event(&ev)
//!                        └─► panic caught and reported, worker continues
//! ```
//!
//! ## Rules
//! - Events are processed sequentially (receiver order) per subscriber.
//! - A slow subscriber lags its own receiver only; lagged events are
//!   skipped, other subscribers are unaffected.
//! - Panics inside a subscriber are caught and logged; one bad event does
//!   not kill the worker.
//! - The worker exits when the game instance (and with it the bus sender)
//!   is dropped.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::events::GameEvent;

/// Event subscriber for lifecycle observability.
///
/// Implementations should use async I/O and handle their own errors; a
/// panic is caught by the worker and reported to stderr.
#[async_trait]
pub trait Subscribe<M>: Send + Sync + 'static
where
    M: Clone + Send + Sync + 'static,
{
    /// Processes a single event.
    ///
    /// Called from the subscriber's dedicated worker task, never from the
    /// publisher context.
    async fn on_event(&self, event: &GameEvent<M>);

    /// Returns the subscriber name used in panic reports.
    ///
    /// Prefer short, descriptive names; the default uses
    /// `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Spawns the worker task that forwards events from `rx` to `subscriber`.
pub(crate) fn spawn_worker<M>(
    mut rx: broadcast::Receiver<GameEvent<M>>,
    subscriber: Arc<dyn Subscribe<M>>,
) -> JoinHandle<()>
where
    M: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    let fut = subscriber.on_event(&ev);
                    if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!(
                            "[gamevisor] subscriber '{}' panicked: {:?}",
                            subscriber.name(),
                            panic_err
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use tokio::sync::Notify;

    use crate::games::{GameFn, RunOutcome};
    use crate::Game;

    struct Recorder {
        labels: Mutex<Vec<&'static str>>,
        saw_end: Notify,
    }

    #[async_trait]
    impl Subscribe<u32> for Recorder {
        async fn on_event(&self, event: &GameEvent<u32>) {
            self.labels
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(event.as_label());
            if event.is_end() {
                self.saw_end.notify_one();
            }
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test]
    async fn attached_subscriber_observes_the_lifecycle() {
        let game = Game::new(GameFn::new("observed", || async {
            Ok(RunOutcome::Success { metadata: 9u32 })
        }));
        let recorder = Arc::new(Recorder {
            labels: Mutex::new(Vec::new()),
            saw_end: Notify::new(),
        });
        let worker = game.attach(Arc::clone(&recorder) as Arc<dyn Subscribe<u32>>);

        game.start().unwrap().await.unwrap();
        recorder.saw_end.notified().await;

        let labels = recorder
            .labels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        assert_eq!(labels, vec!["started", "loading", "loaded", "end"]);

        drop(game);
        worker.await.expect("worker exits when the game is dropped");
    }

    struct Grumpy {
        events: Mutex<usize>,
        saw_end: Notify,
    }

    #[async_trait]
    impl Subscribe<u32> for Grumpy {
        async fn on_event(&self, event: &GameEvent<u32>) {
            *self.events.lock().unwrap_or_else(|e| e.into_inner()) += 1;
            if event.is_end() {
                self.saw_end.notify_one();
            }
            if matches!(event, GameEvent::Started) {
                panic!("started events offend me");
            }
        }

        fn name(&self) -> &'static str {
            "grumpy"
        }
    }

    #[tokio::test]
    async fn a_panicking_subscriber_keeps_its_worker_alive() {
        let game = Game::new(GameFn::new("hazard", || async {
            Ok(RunOutcome::Success { metadata: 1u32 })
        }));
        let grumpy = Arc::new(Grumpy {
            events: Mutex::new(0),
            saw_end: Notify::new(),
        });
        let _worker = game.attach(Arc::clone(&grumpy) as Arc<dyn Subscribe<u32>>);

        game.start().unwrap().await.unwrap();
        grumpy.saw_end.notified().await;

        // Started panicked, yet the later events were still delivered.
        let seen = *grumpy.events.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(seen, 4, "started, loading, loaded, end");
    }
}
