//! # gamevisor
//!
//! **Gamevisor** is a lifecycle supervision library for game modules hosted
//! inside a larger application.
//!
//! It standardizes loading, starting, ending, and resetting a game behind
//! one type, [`Game`], while broadcasting typed lifecycle events and
//! providing cancellation with a bounded reset timeout. The crate contains
//! no rendering, input, or game logic — a concrete game plugs in as a
//! [`GameModule`] and gets the orchestration for free.
//!
//! ## Architecture
//! ```text
//!       host application
//!    ┌──────────┬──────────────┬──────────────────┐
//!    ▼          ▼              ▼                  │ subscribe()/attach()
//! load()     start()/join()  reset(timeout)       ▼
//!    └──────────┴──────┬───────┘            broadcast receivers,
//!                      ▼                    Subscribe workers
//! ┌───────────────────────────────────────────────────┐
//! │  Game (lifecycle core)                            │
//! │  - one slot per operation kind (load/run/reset)   │
//! │  - concurrent calls share the pending handle      │
//! │  - run raced against its CancellationToken        │
//! │  - reset bounded: stop routine vs timer           │
//! └──────┬──────────────────────────────┬─────────────┘
//!        ▼ load/run/stop                ▼ publish
//! ┌──────────────┐              ┌──────────────────┐
//! │  GameModule  │              │ Bus<GameEvent>   │
//! │ (your game)  │              │ Loading/Loaded/  │
//! └──────────────┘              │ Started/End      │
//!                               └──────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//! start() ─► Started ─► ensure load ─► module.run() ──► End(outcome)
//!                        │                  ▲
//!                        │ Loading(None),   │ raced against the run's
//!                        │ Loading(pct)…,   │ cancellation token
//!                        │ Loaded           │
//! reset(t) ─► token.cancel() ─► module.stop() vs sleep(t)
//!                               └► run settles Err(Canceled), End(Canceled)
//! ```
//!
//! ## Guarantees
//! | Area             | Contract                                                        |
//! |------------------|-----------------------------------------------------------------|
//! | **Loading**      | The loader runs at most once ever; concurrent `load` calls share one pending handle. |
//! | **Starting**     | `start` fails synchronously with [`AlreadyRunning`] while a run is active; `join` returns the identical run handle. |
//! | **Outcomes**     | Success/Failure/Error resolve normally; only cancellation resolves to `Err(`[`Canceled`]`)`. |
//! | **Resetting**    | `reset` settles within its timeout even if the stop routine never does, and always leaves the instance not-running. |
//! | **Errors**       | Module failures are wrapped into a per-instance [`GameError`] (idempotent, no double-suffixing). |
//! | **Events**       | Typed topics with causal ordering: `Loading` before `Loaded`, `Started` before `End`. |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use gamevisor::{BoxError, Game, GameFn, GameEvent, RunOutcome};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let module = GameFn::new("minesweeper", || async {
//!         // One full session of the game.
//!         Ok::<_, BoxError>(RunOutcome::Success { metadata: 1480u32 })
//!     });
//!     let game = Game::new(module);
//!     let mut events = game.subscribe();
//!
//!     let run = game.start().expect("nothing running yet");
//!     let outcome = run.await;
//!     assert_eq!(outcome, Ok(RunOutcome::Success { metadata: 1480 }));
//!
//!     assert_eq!(events.recv().await.ok(), Some(GameEvent::Started));
//! }
//! ```

mod core;
mod error;
mod events;
mod games;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Game, GameConfig, OpFuture, ResetPolicy, RunFuture};
pub use error::{AlreadyRunning, BoxError, Canceled, GameError, GameErrorCtor, ERROR_NAME_SUFFIX};
pub use events::{Bus, GameEvent};
pub use games::{GameFn, GameModule, Progress, RunOutcome, RunResult};
pub use subscribers::Subscribe;

// Optional: expose the simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
