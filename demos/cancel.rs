//! # Example: cancel
//!
//! Demonstrates how a reset cancels a run that would otherwise never end.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► start() a run that loops until externally stopped
//!   ├─► sleep 100ms (let it run)
//!   ├─► reset(500ms)
//!   │     ├─► run's cancellation token fires
//!   │     ├─► stop routine flips the module's quit flag
//!   │     └─► run settles Err(Canceled), End(Canceled) published
//!   └─► verify join()/last_result() are empty again
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example cancel
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gamevisor::{BoxError, Game, GameFn, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let quit = Arc::new(AtomicBool::new(false));

    let run_quit = Arc::clone(&quit);
    let stop_quit = Arc::clone(&quit);
    let module = GameFn::<()>::new("endless-runner", move || {
        let quit = Arc::clone(&run_quit);
        async move {
            while !quit.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            // The graceful path still resolves Canceled once reset settles.
            Ok::<_, BoxError>(RunOutcome::Failure)
        }
    })
    .with_stop(move || {
        stop_quit.store(true, Ordering::SeqCst);
        async { Ok(()) }
    });

    let game = Game::new(module);
    let run = game.start().expect("nothing running yet");
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("resetting…");
    game.reset_with_timeout(Duration::from_millis(500))
        .await
        .expect("reset is infallible by default");

    println!("run settled: {:?}", run.await);
    println!("join() now: {:?}", game.join().is_some());
    println!("last result now: {:?}", game.last_result());
}
