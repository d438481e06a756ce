//! # Game module trait.
//!
//! [`GameModule`] is the interface a concrete game implements to be hosted
//! by the lifecycle: a stable name, a one-time loader, a run routine, and a
//! graceful stop routine. The lifecycle owns all orchestration — modules
//! never see handles, tokens, or timers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::games::RunOutcome;

/// Progress-reporting callback handed to [`GameModule::load`].
///
/// Values are percentages; the lifecycle clamps reports to `[0, 100]`
/// before emitting them as `Loading` events.
pub type Progress = Arc<dyn Fn(f32) + Send + Sync>;

/// # A hostable game.
///
/// The lifecycle invokes these routines under its own orchestration:
///
/// - [`load`](GameModule::load) runs **at most once ever** per instance
///   (concurrent and repeat calls share one pending operation);
/// - [`run`](GameModule::run) executes one start-to-end session and
///   reports its outcome;
/// - [`stop`](GameModule::stop) is invoked only while a run is active and
///   should settle promptly — a reset tolerates it hanging, but only by
///   abandoning the run at the reset timeout.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use gamevisor::{BoxError, GameModule, RunOutcome};
///
/// struct Demo;
///
/// #[async_trait]
/// impl GameModule for Demo {
///     type Metadata = u32;
///
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self) -> Result<RunOutcome<u32>, BoxError> {
///         Ok(RunOutcome::Success { metadata: 100 })
///     }
/// }
/// ```
#[async_trait]
pub trait GameModule: Send + Sync + 'static {
    /// Metadata carried by a successful outcome.
    type Metadata: Clone + Send + Sync + 'static;

    /// Returns the stable, human-readable game name.
    ///
    /// Also the base of the instance's error type name.
    fn name(&self) -> &str;

    /// One-time resource loading.
    ///
    /// May call `progress` with percentages in `[0, 100]`; a module that
    /// cannot report granular progress just never calls it. The default
    /// loads nothing.
    async fn load(&self, progress: Progress) -> Result<(), BoxError> {
        let _ = progress;
        Ok(())
    }

    /// Runs one game session to completion.
    ///
    /// An `Err` here is wrapped into the instance's error type and becomes
    /// a [`RunOutcome::Error`] resolution, not a rejection.
    async fn run(&self) -> Result<RunOutcome<Self::Metadata>, BoxError>;

    /// Gracefully stops the active run.
    ///
    /// Invoked by `reset` while a run is in flight. The default does
    /// nothing.
    async fn stop(&self) -> Result<(), BoxError> {
        Ok(())
    }
}
