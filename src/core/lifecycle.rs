//! # Game: the lifecycle orchestrator.
//!
//! [`Game`] wraps one [`GameModule`] and standardizes its lifecycle:
//! load → start → end → reset, with deduplicated concurrent calls,
//! cancellation raced against the in-flight run, and resets bounded by a
//! timeout regardless of module misbehavior.
//!
//! ## Flow
//! ```text
//! load()   ─► loaded? ─► ready handle
//!          ─► pending? ─► same shared handle (dedup)
//!          ─► else: publish Loading(None)
//!                   ├─► loader task: module.load(progress)
//!                   │     ├─ progress(pct) ─► publish Loading(Some(pct))
//!                   │     ├─ Ok  ─► loaded = true ─► publish Loaded
//!                   │     └─ Err ─► wrap, propagate to callers
//!                   └─► clear pending slot either way (failed loads retry)
//!
//! start()  ─► running? ─► Err(AlreadyRunning)        (synchronous)
//!          ─► else: clear last_result, new token, publish Started
//!                   └─► driver task:
//!                         ensure load ─► module.run()
//!                         select! {
//!                           outcome      ─► record, publish End(outcome)
//!                           token fired  ─► race run vs pending reset,
//!                                           then End(Err(Canceled))
//!                         }
//!
//! reset(t) ─► pending? ─► same shared handle (dedup)
//!          ─► no run?  ─► clear last_result, ready handle
//!          ─► else: token.cancel()
//!                   └─► reset task:
//!                         select! { module.stop() | sleep(t) }
//!                         clear running/last_result/pending slot
//! ```
//!
//! ## Rules
//! - At most one load, one run, and one reset in flight per instance.
//! - Each handle slot is written by the call that creates the operation and
//!   cleared by that operation's own finalization; the state mutex is never
//!   held across an await.
//! - Operations run on spawned tasks, so they finalize even if no caller
//!   polls the returned handle. The handles are `Shared` observers over the
//!   owning task's result.
//! - `Started` and `Loading(None)` publish under the state lock; operation
//!   tasks reacquire that lock before their terminal publishes, which yields
//!   causal event order (`Started` before `End`, `Loading` before `Loaded`).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::{broadcast, oneshot};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::config::{GameConfig, ResetPolicy};
use crate::error::{AlreadyRunning, Canceled, GameError, GameErrorCtor};
use crate::events::{Bus, GameEvent};
use crate::games::{GameModule, Progress, RunOutcome, RunResult};
use crate::subscribers::Subscribe;

/// Shared handle to an in-flight (or already settled) load/reset operation.
///
/// All concurrent callers of a pending operation hold clones of the same
/// handle; [`Shared::ptr_eq`] witnesses the deduplication.
pub type OpFuture = Shared<BoxFuture<'static, Result<(), GameError>>>;

/// Shared handle to an active run's result.
///
/// The identical handle is returned by `start` and every `join` call during
/// one run.
pub type RunFuture<M> = Shared<BoxFuture<'static, RunResult<M>>>;

/// Active-run bookkeeping: the shared result, the cancellation trigger, and
/// an id guarding against stale finalization.
struct RunHandle<M> {
    id: u64,
    outcome: RunFuture<M>,
    cancel: CancellationToken,
}

struct LifecycleState<M> {
    loaded: bool,
    loading: Option<OpFuture>,
    running: Option<RunHandle<M>>,
    resetting: Option<OpFuture>,
    last_result: Option<RunResult<M>>,
    next_run_id: u64,
}

impl<M> Default for LifecycleState<M> {
    fn default() -> Self {
        Self {
            loaded: false,
            loading: None,
            running: None,
            resetting: None,
            last_result: None,
            next_run_id: 0,
        }
    }
}

struct Inner<G: GameModule> {
    module: G,
    cfg: GameConfig,
    bus: Bus<GameEvent<G::Metadata>>,
    errors: GameErrorCtor,
    state: Mutex<LifecycleState<G::Metadata>>,
}

/// Lifecycle wrapper around one [`GameModule`].
///
/// Cheap to clone; all clones drive the same instance. Requires a running
/// Tokio runtime: `load`/`start`/`reset` spawn the task that owns the
/// operation.
///
/// # Example
/// ```
/// use gamevisor::{BoxError, Game, GameFn, RunOutcome};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let game = Game::new(GameFn::new("demo", || async {
///         Ok::<_, BoxError>(RunOutcome::Success { metadata: 100u32 })
///     }));
///
///     let run = game.start().expect("no run active yet");
///     assert_eq!(run.await, Ok(RunOutcome::Success { metadata: 100 }));
/// }
/// ```
pub struct Game<G: GameModule> {
    inner: Arc<Inner<G>>,
}

impl<G: GameModule> Clone for Game<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: GameModule> Game<G> {
    /// Creates a lifecycle around `module` with the default configuration.
    pub fn new(module: G) -> Self {
        Self::with_config(module, GameConfig::default())
    }

    /// Creates a lifecycle around `module` with an explicit configuration.
    pub fn with_config(module: G, cfg: GameConfig) -> Self {
        let errors = GameErrorCtor::new(module.name());
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            inner: Arc::new(Inner {
                module,
                cfg,
                bus,
                errors,
                state: Mutex::new(LifecycleState::default()),
            }),
        }
    }

    /// Returns the game name.
    pub fn name(&self) -> &str {
        self.inner.module.name()
    }

    /// Returns this instance's error constructor.
    pub fn errors(&self) -> &GameErrorCtor {
        &self.inner.errors
    }

    /// True once the one-time load step has completed. Monotonic.
    pub fn loaded(&self) -> bool {
        self.inner.lock().loaded
    }

    /// True while a run is active (including the window where a reset is
    /// tearing it down).
    pub fn is_running(&self) -> bool {
        self.inner.lock().running.is_some()
    }

    /// Creates a new receiver observing subsequent lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent<G::Metadata>> {
        self.inner.bus.subscribe()
    }

    /// Attaches a subscriber on its own worker task.
    ///
    /// The worker forwards every subsequent event to `subscriber`, isolates
    /// its panics, and exits when this game instance is dropped.
    pub fn attach(
        &self,
        subscriber: Arc<dyn Subscribe<G::Metadata>>,
    ) -> tokio::task::JoinHandle<()> {
        crate::subscribers::spawn_worker(self.subscribe(), subscriber)
    }

    /// Triggers the one-time load step.
    ///
    /// Concurrent calls while loading is pending receive the same shared
    /// handle; calls after completion receive a ready handle and never
    /// re-invoke the loader. A failed load clears the pending slot so a
    /// later call retries.
    pub fn load(&self) -> OpFuture {
        Inner::load_op(&self.inner)
    }

    /// Begins a new run.
    ///
    /// Fails synchronously with [`AlreadyRunning`] while a run is active —
    /// no queueing, no replacement. Otherwise emits `Started` and returns
    /// the run's shared result handle; the run itself first ensures loading
    /// has completed, then invokes the module's run routine raced against
    /// the cancellation signal.
    ///
    /// A run routine failure resolves the handle to
    /// [`RunOutcome::Error`] — only cancellation resolves to `Err`.
    pub fn start(&self) -> Result<RunFuture<G::Metadata>, AlreadyRunning> {
        Inner::start_op(&self.inner)
    }

    /// Cancels any active run, bounded by the configured
    /// [`reset_timeout`](GameConfig::reset_timeout).
    pub fn reset(&self) -> OpFuture {
        Inner::reset_op(&self.inner, self.inner.cfg.reset_timeout)
    }

    /// Cancels any active run, bounded by an explicit timeout.
    ///
    /// Triggers the run's cancellation signal, then races the module's stop
    /// routine against the timer; the loser is discarded. By the time the
    /// returned handle settles, no run is active and [`Game::last_result`]
    /// is absent — regardless of whether the stop routine ever settled.
    /// Concurrent calls while a reset is pending receive the same shared
    /// handle (the pending reset's own timeout applies).
    pub fn reset_with_timeout(&self, timeout: Duration) -> OpFuture {
        Inner::reset_op(&self.inner, timeout)
    }

    /// Returns the active run's shared result handle, or `None`.
    ///
    /// The identical handle ([`Shared::ptr_eq`]) is returned across repeated
    /// calls during a single run, and matches the one returned by `start`.
    pub fn join(&self) -> Option<RunFuture<G::Metadata>> {
        self.inner.lock().running.as_ref().map(|h| h.outcome.clone())
    }

    /// Returns the most recently completed run's result, or `None` if no
    /// run has completed or a reset has occurred since.
    pub fn last_result(&self) -> Option<RunResult<G::Metadata>> {
        self.inner.lock().last_result.clone()
    }
}

impl<G: GameModule> Inner<G> {
    /// State lock. Never held across an await; a poisoned lock yields the
    /// inner state (panics in operation tasks are isolated, not amplified).
    fn lock(&self) -> MutexGuard<'_, LifecycleState<G::Metadata>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ready_op() -> OpFuture {
        futures::future::ready(Ok(())).boxed().shared()
    }

    fn load_op(inner: &Arc<Self>) -> OpFuture {
        let mut st = inner.lock();
        if st.loaded {
            return Self::ready_op();
        }
        if let Some(op) = &st.loading {
            return op.clone();
        }

        inner.bus.publish(GameEvent::Loading(None));

        let (tx, rx) = oneshot::channel();
        let task = Arc::clone(inner);
        tokio::spawn(async move {
            let progress: Progress = {
                let bus = task.bus.clone();
                Arc::new(move |pct: f32| {
                    bus.publish(GameEvent::Loading(Some(pct.clamp(0.0, 100.0))));
                })
            };
            let res = task
                .module
                .load(progress)
                .await
                .map_err(|e| task.errors.wrap(e));

            // Finalization owned by this operation: clear the slot on any
            // outcome so a failed load can be retried.
            {
                let mut st = task.lock();
                st.loading = None;
                if res.is_ok() {
                    st.loaded = true;
                }
            }
            if res.is_ok() {
                task.bus.publish(GameEvent::Loaded);
            }
            let _ = tx.send(res);
        });

        let errors = inner.errors.clone();
        let op: OpFuture = async move {
            rx.await
                .unwrap_or_else(|_| Err(errors.msg("loader task terminated unexpectedly")))
        }
        .boxed()
        .shared();
        st.loading = Some(op.clone());
        op
    }

    fn start_op(inner: &Arc<Self>) -> Result<RunFuture<G::Metadata>, AlreadyRunning> {
        let mut st = inner.lock();
        if st.running.is_some() {
            return Err(AlreadyRunning);
        }

        st.last_result = None;
        let id = st.next_run_id;
        st.next_run_id += 1;
        let cancel = CancellationToken::new();

        let (tx, rx) = oneshot::channel();
        let task = Arc::clone(inner);
        let token = cancel.clone();
        tokio::spawn(async move {
            let result = Self::drive_run(&task, token).await;
            Self::settle_run(&task, id, &result);
            let _ = tx.send(result);
        });

        let outcome: RunFuture<G::Metadata> =
            async move { rx.await.unwrap_or_else(|_| Err(Canceled)) }
                .boxed()
                .shared();
        st.running = Some(RunHandle {
            id,
            outcome: outcome.clone(),
            cancel,
        });

        // Published before the lock is released: operation tasks reacquire
        // it before their own terminal publishes, so Started precedes End.
        inner.bus.publish(GameEvent::Started);
        Ok(outcome)
    }

    /// Drives one run: ensure load, invoke the module, race cancellation.
    async fn drive_run(inner: &Arc<Self>, cancel: CancellationToken) -> RunResult<G::Metadata> {
        let body = async {
            if let Err(e) = Self::load_op(inner).await {
                return RunOutcome::Error(e);
            }
            match inner.module.run().await {
                Ok(outcome) => outcome,
                Err(e) => RunOutcome::Error(inner.errors.wrap(e)),
            }
        };
        tokio::pin!(body);

        tokio::select! {
            biased;
            outcome = &mut body => Ok(outcome),
            _ = cancel.cancelled() => {
                // Second race: a graceful finish takes precedence over the
                // reset's timer, but the run resolves Canceled either way.
                let reset = inner.lock().resetting.clone();
                match reset {
                    Some(op) => {
                        tokio::select! {
                            biased;
                            _ = &mut body => {}
                            _ = op => {}
                        }
                    }
                    None => {
                        (&mut body).await;
                    }
                }
                Err(Canceled)
            }
        }
    }

    /// Run finalization: record the result and release the handle, unless a
    /// later operation already owns the slot.
    fn settle_run(inner: &Arc<Self>, id: u64, result: &RunResult<G::Metadata>) {
        {
            let mut st = inner.lock();
            if st.running.as_ref().is_some_and(|h| h.id == id) {
                st.running = None;
            }
            // A canceled run leaves last_result to the reset's
            // unconditional clear, which is already ordered before this.
            if result.is_ok() {
                st.last_result = Some(result.clone());
            }
        }
        inner.bus.publish(GameEvent::End(result.clone()));
    }

    fn reset_op(inner: &Arc<Self>, timeout: Duration) -> OpFuture {
        let mut st = inner.lock();
        if let Some(op) = &st.resetting {
            return op.clone();
        }
        let cancel = match st.running.as_ref() {
            Some(handle) => handle.cancel.clone(),
            None => {
                // Equivalent to run-ended-with-no-result; loaded stays set.
                st.last_result = None;
                return Self::ready_op();
            }
        };
        let (tx, rx) = oneshot::channel();
        let op: OpFuture = async move { rx.await.unwrap_or_else(|_| Ok(())) }
            .boxed()
            .shared();
        // The driver looks this slot up once the token fires; the slot is
        // published first, under the same lock.
        st.resetting = Some(op.clone());
        cancel.cancel();

        let task = Arc::clone(inner);
        tokio::spawn(async move {
            let stopped = tokio::select! {
                biased;
                res = task.module.stop() => Some(res),
                _ = time::sleep(timeout) => None,
            };

            {
                let mut st = task.lock();
                st.running = None;
                st.resetting = None;
                st.last_result = None;
            }

            let result = match (stopped, task.cfg.reset_policy) {
                (Some(Err(e)), ResetPolicy::Propagate) => Err(task.errors.wrap(e)),
                _ => Ok(()),
            };
            let _ = tx.send(result);
        });

        op
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::error::BoxError;
    use crate::games::GameFn;

    fn drain<M: Clone>(rx: &mut broadcast::Receiver<GameEvent<M>>) -> Vec<GameEvent<M>> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Run routine that never settles on its own.
    fn endless() -> GameFn<()> {
        GameFn::new("endless", || async {
            futures::future::pending::<Result<RunOutcome<()>, BoxError>>().await
        })
    }

    #[tokio::test]
    async fn load_dedups_concurrent_calls_and_invokes_loader_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let counted = Arc::clone(&calls);
        let gated = Arc::clone(&gate);
        let module = GameFn::<()>::new("dedup", || async { Ok(RunOutcome::Failure) }).with_load(
            move |_progress| {
                counted.fetch_add(1, Ordering::SeqCst);
                let gated = Arc::clone(&gated);
                async move {
                    gated.notified().await;
                    Ok(())
                }
            },
        );
        let game = Game::new(module);
        let mut rx = game.subscribe();

        let a = game.load();
        let b = game.load();
        assert!(a.ptr_eq(&b), "pending loads must share one handle");
        assert!(!game.loaded());

        gate.notify_one();
        assert!(a.await.is_ok());
        assert!(b.await.is_ok());
        assert!(game.loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // After completion: resolves immediately, no re-invocation, no
        // re-emission of Loaded.
        assert!(game.load().await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let events = drain(&mut rx);
        assert_eq!(events, vec![GameEvent::Loading(None), GameEvent::Loaded]);
    }

    #[tokio::test]
    async fn loading_events_follow_reported_progress() {
        let module = GameFn::<()>::new("progress", || async { Ok(RunOutcome::Failure) })
            .with_load(|progress: Progress| async move {
                for step in (0..=100).step_by(5) {
                    progress(step as f32);
                }
                Ok(())
            });
        let game = Game::new(module);
        let mut rx = game.subscribe();

        game.load().await.unwrap();

        let events = drain(&mut rx);
        // Indeterminate marker, 21 progress steps, then Loaded.
        assert_eq!(events.len(), 23);
        assert_eq!(events[0], GameEvent::Loading(None));
        for (i, step) in (0..=100).step_by(5).enumerate() {
            assert_eq!(events[i + 1], GameEvent::Loading(Some(step as f32)));
        }
        assert_eq!(events[22], GameEvent::Loaded);
    }

    #[tokio::test]
    async fn progress_reports_are_clamped() {
        let module = GameFn::<()>::new("clamped", || async { Ok(RunOutcome::Failure) })
            .with_load(|progress: Progress| async move {
                progress(150.0);
                progress(-3.0);
                Ok(())
            });
        let game = Game::new(module);
        let mut rx = game.subscribe();

        game.load().await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events[1], GameEvent::Loading(Some(100.0)));
        assert_eq!(events[2], GameEvent::Loading(Some(0.0)));
    }

    #[tokio::test]
    async fn failed_load_propagates_and_allows_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let module = GameFn::<()>::new("flaky", || async { Ok(RunOutcome::Failure) }).with_load(
            move |_progress| {
                let attempt = counted.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(BoxError::from("no disk"))
                    } else {
                        Ok(())
                    }
                }
            },
        );
        let game = Game::new(module);
        let mut rx = game.subscribe();

        let err = game.load().await.expect_err("first load fails");
        assert_eq!(err.type_name(), "flakyGameError");
        assert_eq!(err.message(), "no disk");
        assert!(!game.loaded());
        assert!(!drain(&mut rx).contains(&GameEvent::Loaded));

        game.load().await.expect("retry succeeds");
        assert!(game.loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn start_rejects_synchronously_while_running() {
        let gate = Arc::new(Notify::new());
        let gated = Arc::clone(&gate);
        let module = GameFn::new("busy", move || {
            let gated = Arc::clone(&gated);
            async move {
                gated.notified().await;
                Ok(RunOutcome::Success { metadata: 5u32 })
            }
        });
        let game = Game::new(module);

        let run = game.start().expect("first start accepted");
        assert_eq!(game.start().err(), Some(AlreadyRunning));

        // The original run is unaffected and still settles.
        gate.notify_one();
        assert_eq!(run.await, Ok(RunOutcome::Success { metadata: 5 }));
        assert!(game.start().is_ok());
    }

    #[tokio::test]
    async fn join_returns_the_identical_run_handle() {
        let gate = Arc::new(Notify::new());
        let gated = Arc::clone(&gate);
        let module = GameFn::<()>::new("joinable", move || {
            let gated = Arc::clone(&gated);
            async move {
                gated.notified().await;
                Ok(RunOutcome::Failure)
            }
        });
        let game = Game::new(module);

        assert!(game.join().is_none());
        let run = game.start().unwrap();
        let j1 = game.join().expect("run active");
        let j2 = game.join().expect("run active");
        assert!(j1.ptr_eq(&j2));
        assert!(j1.ptr_eq(&run));

        gate.notify_one();
        assert_eq!(run.await, Ok(RunOutcome::Failure));
        assert!(game.join().is_none());
    }

    #[tokio::test]
    async fn successful_run_records_result_and_emits_one_end() {
        let game = Game::new(GameFn::new("win", || async {
            Ok(RunOutcome::Success { metadata: 42u32 })
        }));
        let mut rx = game.subscribe();

        let run = game.start().unwrap();
        assert_eq!(run.await, Ok(RunOutcome::Success { metadata: 42 }));
        assert_eq!(
            game.last_result(),
            Some(Ok(RunOutcome::Success { metadata: 42 }))
        );
        assert!(game.loaded(), "start ensures the load step");

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                GameEvent::Started,
                GameEvent::Loading(None),
                GameEvent::Loaded,
                GameEvent::End(Ok(RunOutcome::Success { metadata: 42 })),
            ]
        );
    }

    #[tokio::test]
    async fn failing_run_resolves_to_an_error_outcome() {
        let game = Game::new(GameFn::<()>::new("faulty", || async {
            Err(BoxError::from("exploded"))
        }));

        let run = game.start().unwrap();
        let outcome = run.await.expect("errors resolve, only cancellation rejects");
        let err = outcome.error().expect("error outcome");
        assert_eq!(err.type_name(), "faultyGameError");
        assert_eq!(err.message(), "exploded");
        assert_eq!(game.last_result(), Some(Ok(RunOutcome::Error(err.clone()))));
    }

    #[tokio::test]
    async fn reset_cancels_the_active_run() {
        let game = Game::new(endless());
        let mut rx = game.subscribe();

        let run = game.start().unwrap();
        let r1 = game.reset();
        let r2 = game.reset();
        assert!(r1.ptr_eq(&r2), "pending resets must share one handle");

        assert_eq!(run.await, Err(Canceled));
        r1.await.unwrap();
        r2.await.unwrap();

        assert!(game.join().is_none());
        assert!(game.last_result().is_none());
        assert!(!game.is_running());

        let ends: Vec<_> = drain(&mut rx).into_iter().filter(|e| e.is_end()).collect();
        assert_eq!(ends, vec![GameEvent::End(Err(Canceled))]);
    }

    #[tokio::test]
    async fn reset_without_a_run_clears_last_result() {
        let game = Game::new(GameFn::new("quick", || async {
            Ok(RunOutcome::Success { metadata: 1u32 })
        }));

        game.start().unwrap().await.unwrap();
        assert!(game.last_result().is_some());

        game.reset().await.unwrap();
        assert!(game.last_result().is_none());
        assert!(game.loaded(), "loaded never reverts");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_is_bounded_when_stop_never_settles() {
        let module = endless().with_stop(|| async {
            futures::future::pending::<Result<(), BoxError>>().await
        });
        let game = Game::new(module);

        let run = game.start().unwrap();
        let before = time::Instant::now();
        game.reset_with_timeout(Duration::from_millis(250))
            .await
            .unwrap();

        assert!(before.elapsed() >= Duration::from_millis(250));
        assert!(before.elapsed() < Duration::from_millis(300));
        assert!(!game.is_running());
        assert_eq!(run.await, Err(Canceled));
    }

    #[tokio::test]
    async fn graceful_stop_wins_over_the_timer() {
        let stops = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&stops);
        let module = endless().with_stop(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        });
        let game = Game::new(module);

        let run = game.start().unwrap();
        game.reset_with_timeout(Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(run.await, Err(Canceled));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reset_policy_controls_stop_failure_propagation() {
        let failing_stop =
            || endless().with_stop(|| async { Err(BoxError::from("stop failed")) });

        // Default: swallowed, reset is infallible.
        let game = Game::new(failing_stop());
        let _run = game.start().unwrap();
        assert!(game.reset().await.is_ok());

        // Opt-in: surfaced as a wrapped error.
        let cfg = GameConfig {
            reset_policy: ResetPolicy::Propagate,
            ..GameConfig::default()
        };
        let game = Game::with_config(failing_stop(), cfg);
        let _run = game.start().unwrap();
        let err = game.reset().await.expect_err("propagated stop failure");
        assert_eq!(err.type_name(), "endlessGameError");
        assert_eq!(err.message(), "stop failed");
        assert!(!game.is_running(), "failed reset still clears the run");
    }

    #[tokio::test]
    async fn start_is_rejected_until_the_reset_settles() {
        let game = Game::new(endless());

        let _run = game.start().unwrap();
        let reset = game.reset();
        // The old run occupies the slot until the reset finalizes it.
        assert_eq!(game.start().err(), Some(AlreadyRunning));

        reset.await.unwrap();
        let rerun = game.start().expect("slot free after reset");
        let _cleanup = game.reset();
        assert_eq!(rerun.await, Err(Canceled));
    }

    #[tokio::test]
    async fn a_new_run_is_not_clobbered_by_the_previous_one() {
        let game = Game::new(GameFn::new("turns", || async {
            Ok(RunOutcome::Success { metadata: 7u32 })
        }));

        game.start().unwrap().await.unwrap();
        let second = game.start().unwrap();
        assert_eq!(second.await, Ok(RunOutcome::Success { metadata: 7 }));
        assert_eq!(
            game.last_result(),
            Some(Ok(RunOutcome::Success { metadata: 7 }))
        );
    }
}
