//! # Lifecycle events emitted by a game instance.
//!
//! [`GameEvent`] is a closed topic set with a compile-time-checked payload
//! per topic — there is no stringly-typed bus to subscribe to, only this
//! enum. `M` is the module's success metadata type.
//!
//! ## Ordering guarantees
//! Emission follows the causal order of state transitions:
//! - `Loading(None)` precedes every progress report and `Loaded`;
//! - `Started` precedes the `End` of the same run.
//!
//! ## Topics
//! ```text
//! Loading(None)       loading began, progress indeterminate
//! Loading(Some(pct))  loader progress report, pct clamped to [0, 100]
//! Loaded              one-time load completed (fires at most once)
//! Started             a run was accepted; its future is now live
//! End(result)         the run settled: outcome, or Err(Canceled)
//! ```

use crate::games::RunResult;

/// Lifecycle event with its topic payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent<M> {
    /// Loading began (`None`, indeterminate) or progressed (`Some(pct)`).
    Loading(Option<f32>),
    /// The one-time load step completed.
    Loaded,
    /// A run was accepted. Emitted synchronously by `start`, before the
    /// run future is handed to the caller.
    Started,
    /// A run settled with the given result.
    End(RunResult<M>),
}

impl<M> GameEvent<M> {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            GameEvent::Loading(_) => "loading",
            GameEvent::Loaded => "loaded",
            GameEvent::Started => "started",
            GameEvent::End(_) => "end",
        }
    }

    /// True for the `End` topic.
    pub fn is_end(&self) -> bool {
        matches!(self, GameEvent::End(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Canceled;

    #[test]
    fn labels_are_stable() {
        assert_eq!(GameEvent::<()>::Loading(None).as_label(), "loading");
        assert_eq!(GameEvent::<()>::Loading(Some(40.0)).as_label(), "loading");
        assert_eq!(GameEvent::<()>::Loaded.as_label(), "loaded");
        assert_eq!(GameEvent::<()>::Started.as_label(), "started");
        assert_eq!(GameEvent::<()>::End(Err(Canceled)).as_label(), "end");
    }

    #[test]
    fn end_is_terminal() {
        assert!(GameEvent::<()>::End(Err(Canceled)).is_end());
        assert!(!GameEvent::<()>::Started.is_end());
    }
}
