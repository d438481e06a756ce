//! # Run outcome types.
//!
//! A run's terminal outcome is exactly one of Success, Failure, Error, or
//! Canceled. The first three form the [`RunOutcome`] tagged union and are
//! reachable via normal resolution; cancellation is a separate sentinel
//! surfaced as the `Err` arm of [`RunResult`], so only a reset-triggered
//! cancellation reads as a rejection.

use crate::error::{Canceled, GameError};

/// Terminal outcome of a completed (non-canceled) run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<M> {
    /// The run completed as a win/clear; carries module-defined metadata.
    Success { metadata: M },
    /// The run completed as a loss/failure. No metadata.
    Failure,
    /// The run routine failed; the cause is wrapped per instance.
    Error(GameError),
}

/// What a run future resolves to: an outcome, or the cancellation sentinel.
pub type RunResult<M> = Result<RunOutcome<M>, Canceled>;

impl<M> RunOutcome<M> {
    /// True for [`RunOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    /// Returns the success metadata, if any.
    pub fn metadata(&self) -> Option<&M> {
        match self {
            RunOutcome::Success { metadata } => Some(metadata),
            _ => None,
        }
    }

    /// Returns the wrapped error, if the run errored.
    pub fn error(&self) -> Option<&GameError> {
        match self {
            RunOutcome::Error(e) => Some(e),
            _ => None,
        }
    }
}
