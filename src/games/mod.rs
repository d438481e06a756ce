//! Game modules: the hosted-game abstraction.
//!
//! This module defines what the lifecycle consumes, not what it does:
//!
//! - [`GameModule`] — the trait a concrete game implements
//!   (loader / run / stop routines plus a stable name);
//! - [`RunOutcome`] / [`RunResult`] — what a run terminates with;
//! - [`GameFn`] — a closure-backed implementation for tests and demos.

mod game;
mod game_fn;
mod outcome;

pub use game::{GameModule, Progress};
pub use game_fn::GameFn;
pub use outcome::{RunOutcome, RunResult};
