//! # Example: log_writer
//!
//! Demonstrates the built-in [`LogWriter`] subscriber printing every
//! lifecycle event to stdout.
//!
//! ## Run
//! ```bash
//! cargo run --example log_writer --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use gamevisor::{BoxError, Game, GameFn, LogWriter, Progress, RunOutcome, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let module = GameFn::new("snake", || async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok::<_, BoxError>(RunOutcome::Success { metadata: 27u32 })
    })
    .with_load(|progress: Progress| async move {
        progress(50.0);
        progress(100.0);
        Ok(())
    });

    let game = Game::new(module);
    let worker = game.attach(Arc::new(LogWriter::new()) as Arc<dyn Subscribe<u32>>);

    let run = game.start().expect("nothing running yet");
    let _ = run.await;

    // Dropping the game closes the bus; the worker drains and exits.
    drop(game);
    let _ = worker.await;
}
