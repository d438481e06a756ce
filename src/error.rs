//! Error types used by the gamevisor lifecycle and game modules.
//!
//! This module defines three kinds of failure values:
//!
//! - [`GameError`] — a named, wrapped error produced from whatever a game
//!   module's loader/run/stop routine failed with.
//! - [`AlreadyRunning`] — synchronous control-flow signal rejecting a
//!   redundant `start` attempt.
//! - [`Canceled`] — the terminal sentinel of a run stopped via `reset`,
//!   distinct from an `Error` outcome.
//!
//! Each game instance owns a [`GameErrorCtor`] that stamps wrapped errors
//! with a stable per-instance type name (the game name plus the
//! [`ERROR_NAME_SUFFIX`] token).

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error type accepted from game module routines.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Suffix appended to a game name to derive its error type name.
///
/// Appended only when not already present, so re-deriving from an already
/// suffixed name never double-suffixes.
pub const ERROR_NAME_SUFFIX: &str = "GameError";

/// A `start` call was rejected because a run is already active.
///
/// This is a synchronous signal: `start` fails before any suspension point,
/// and the active run is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("game is already running")]
pub struct AlreadyRunning;

/// Terminal sentinel of a run stopped via `reset`.
///
/// Cancellation is not a [`GameError`]: a canceled run resolves to
/// `Err(Canceled)` while every other outcome resolves normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("game run canceled")]
pub struct Canceled;

/// Named error wrapping whatever a game module routine failed with.
///
/// Produced by [`GameErrorCtor::wrap`]. Carries the per-instance type name,
/// a message derived from stringifying the original failure, and the
/// original failure itself for introspection via
/// [`source`](std::error::Error::source).
#[derive(Debug, Clone)]
pub struct GameError {
    type_name: Arc<str>,
    message: String,
    cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl GameError {
    /// Returns the per-instance error type name, e.g. `"tetrisGameError"`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the message derived from the original failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the original failure, if one was captured.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| &**c as &(dyn std::error::Error + 'static))
    }
}

impl PartialEq for GameError {
    /// Two wrapped errors are equal when their type name and message match.
    /// The captured cause is deliberately ignored.
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.message == other.message
    }
}

/// Per-instance error constructor.
///
/// Replaces a runtime-generated error class with a value-level descriptor:
/// the derived type name plus a [`wrap`](GameErrorCtor::wrap) operation. One
/// ctor is created per game instance and shared with every operation that
/// needs to normalize a failure.
///
/// # Example
/// ```
/// use gamevisor::GameErrorCtor;
///
/// let errs = GameErrorCtor::new("tetris");
/// assert_eq!(errs.type_name(), "tetrisGameError");
///
/// let err = errs.wrap("disk on fire");
/// assert_eq!(err.to_string(), "tetrisGameError: disk on fire");
/// ```
#[derive(Debug, Clone)]
pub struct GameErrorCtor {
    type_name: Arc<str>,
}

impl GameErrorCtor {
    /// Derives the error type name from `game_name`.
    ///
    /// The [`ERROR_NAME_SUFFIX`] token is appended only if not already
    /// present.
    pub fn new(game_name: &str) -> Self {
        let type_name: Arc<str> = if game_name.ends_with(ERROR_NAME_SUFFIX) {
            Arc::from(game_name)
        } else {
            Arc::from(format!("{game_name}{ERROR_NAME_SUFFIX}"))
        };
        Self { type_name }
    }

    /// Returns the derived error type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Normalizes an arbitrary failure into a [`GameError`] of this instance.
    ///
    /// - A [`GameError`] already carrying this instance's type name is
    ///   returned unchanged (idempotent, no nested wrapping).
    /// - A [`GameError`] from a different instance has its fields copied
    ///   onto a freshly named value instead of being nested.
    /// - Anything else becomes the captured cause; the message is its
    ///   string form.
    pub fn wrap(&self, cause: impl Into<BoxError>) -> GameError {
        match cause.into().downcast::<GameError>() {
            Ok(own) if own.type_name == self.type_name => *own,
            Ok(foreign) => GameError {
                type_name: Arc::clone(&self.type_name),
                message: foreign.message.clone(),
                cause: foreign.cause.clone(),
            },
            Err(other) => GameError {
                type_name: Arc::clone(&self.type_name),
                message: other.to_string(),
                cause: Some(Arc::from(other)),
            },
        }
    }

    /// Builds a [`GameError`] from a bare message, with no captured cause.
    ///
    /// Used for failures that originate inside the lifecycle itself rather
    /// than in a module routine.
    pub fn msg(&self, message: impl Into<String>) -> GameError {
        GameError {
            type_name: Arc::clone(&self.type_name),
            message: message.into(),
            cause: None,
        }
    }
}
