//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`GameEvent`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [started]
//! [loading]
//! [loading] progress=40
//! [loaded]
//! [end] outcome=Success { metadata: 100 }
//! [end] canceled
//! ```

use std::fmt;

use async_trait::async_trait;

use crate::events::GameEvent;
use crate::subscribers::Subscribe;

/// Event writer subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event lines to
/// stdout for debugging and demonstration purposes; implement a custom
/// [`Subscribe`] for structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<M> Subscribe<M> for LogWriter
where
    M: Clone + Send + Sync + fmt::Debug + 'static,
{
    async fn on_event(&self, event: &GameEvent<M>) {
        match event {
            GameEvent::Loading(None) => println!("[loading]"),
            GameEvent::Loading(Some(pct)) => println!("[loading] progress={pct}"),
            GameEvent::Loaded => println!("[loaded]"),
            GameEvent::Started => println!("[started]"),
            GameEvent::End(Ok(outcome)) => println!("[end] outcome={outcome:?}"),
            GameEvent::End(Err(_)) => println!("[end] canceled"),
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
