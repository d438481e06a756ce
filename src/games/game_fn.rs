//! # Closure-backed game module (`GameFn`)
//!
//! [`GameFn`] builds a [`GameModule`] out of closures, producing a fresh
//! future per invocation. This avoids shared mutable state between runs; if
//! runs need common state, move an `Arc<...>` into the closure explicitly.
//!
//! The run routine is mandatory; loader and stop routines are optional and
//! default to completing immediately.
//!
//! ## Example
//! ```
//! use gamevisor::{BoxError, GameFn, GameModule, RunOutcome};
//!
//! let module = GameFn::new("coin-flip", || async {
//!     Ok::<_, BoxError>(RunOutcome::Success { metadata: "heads" })
//! })
//! .with_stop(|| async { Ok(()) });
//!
//! assert_eq!(module.name(), "coin-flip");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::BoxError;
use crate::games::game::{GameModule, Progress};
use crate::games::RunOutcome;

type LoadFn = Box<dyn Fn(Progress) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;
type RunFn<M> = Box<dyn Fn() -> BoxFuture<'static, Result<RunOutcome<M>, BoxError>> + Send + Sync>;
type StopFn = Box<dyn Fn() -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Closure-backed game module.
///
/// Each lifecycle invocation calls the corresponding closure to *create* a
/// new future, so nothing is shared between attempts unless the closure
/// captures it.
pub struct GameFn<M> {
    name: Cow<'static, str>,
    load: Option<LoadFn>,
    run: RunFn<M>,
    stop: Option<StopFn>,
}

impl<M> GameFn<M>
where
    M: Clone + Send + Sync + 'static,
{
    /// Creates a module from a name and a run routine.
    pub fn new<F, Fut>(name: impl Into<Cow<'static, str>>, run: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RunOutcome<M>, BoxError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            load: None,
            run: Box::new(move || run().boxed()),
            stop: None,
        }
    }

    /// Sets the one-time loader routine.
    pub fn with_load<F, Fut>(mut self, load: F) -> Self
    where
        F: Fn(Progress) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.load = Some(Box::new(move |progress| load(progress).boxed()));
        self
    }

    /// Sets the graceful stop routine.
    pub fn with_stop<F, Fut>(mut self, stop: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.stop = Some(Box::new(move || stop().boxed()));
        self
    }
}

impl<M> fmt::Debug for GameFn<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameFn").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<M> GameModule for GameFn<M>
where
    M: Clone + Send + Sync + 'static,
{
    type Metadata = M;

    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self, progress: Progress) -> Result<(), BoxError> {
        match &self.load {
            Some(load) => load(progress).await,
            None => Ok(()),
        }
    }

    async fn run(&self) -> Result<RunOutcome<M>, BoxError> {
        (self.run)().await
    }

    async fn stop(&self) -> Result<(), BoxError> {
        match &self.stop {
            Some(stop) => stop().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn run_creates_a_fresh_future_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let module = GameFn::new("fresh", move || {
            let counted = Arc::clone(&counted);
            async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(RunOutcome::Success { metadata: () })
            }
        });

        let _ = module.run().await;
        let _ = module.run().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn load_and_stop_default_to_ok() {
        let module: GameFn<()> =
            GameFn::new("defaults", || async { Ok(RunOutcome::Failure) });
        let progress: Progress = Arc::new(|_| {});
        assert!(module.load(progress).await.is_ok());
        assert!(module.stop().await.is_ok());
    }
}
