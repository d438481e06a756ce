//! # Example: basic
//!
//! Demonstrates the happy path: load with progress, start a run, read its
//! outcome and the recorded last result.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Game::new(GameFn with loader + run routine)
//!   ├─► subscribe() for raw events
//!   ├─► start()
//!   │     ├─► publish Started
//!   │     ├─► ensure load: Loading(None), Loading(0..100), Loaded
//!   │     └─► run routine completes ─► End(Success)
//!   └─► print the events and the outcome
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::time::Duration;

use gamevisor::{BoxError, Game, GameFn, Progress, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let module = GameFn::new("minesweeper", || async {
        // One full session: pretend the player clears the board.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, BoxError>(RunOutcome::Success { metadata: 1480u32 })
    })
    .with_load(|progress: Progress| async move {
        for step in [0.0, 25.0, 50.0, 75.0, 100.0] {
            tokio::time::sleep(Duration::from_millis(10)).await;
            progress(step);
        }
        Ok(())
    });

    let game = Game::new(module);
    let mut events = game.subscribe();

    let run = game.start().expect("nothing running yet");
    let outcome = run.await;
    println!("outcome: {outcome:?}");
    println!("last result: {:?}", game.last_result());

    while let Ok(ev) = events.try_recv() {
        println!("event: {ev:?}");
    }
}
