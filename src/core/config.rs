//! # Per-instance lifecycle configuration.
//!
//! Provides [`GameConfig`], the settings a host hands to `Game::new`.
//!
//! ## Field semantics
//! - `reset_timeout`: bound on how long `reset` waits for the module's stop
//!   routine before abandoning the run (`reset` itself always settles within
//!   this bound).
//! - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus).
//! - `reset_policy`: what `reset` does when the stop routine fails.

use std::time::Duration;

/// What `reset` does with a stop-routine failure.
///
/// Timer expiry is never an error under either policy; only the stop
/// routine's own failure is affected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Swallow stop failures: `reset` is infallible.
    #[default]
    Swallow,
    /// Surface stop failures as a wrapped error from `reset`.
    Propagate,
}

/// Configuration for one game instance.
///
/// All fields are public for flexibility. Prefer the helper accessors over
/// re-deriving clamps at call sites.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Maximum time `reset` waits for the stop routine.
    ///
    /// When a reset is issued against an active run:
    /// - the run's cancellation token is triggered,
    /// - the stop routine races this timer,
    /// - whichever finishes first wins; the loser is discarded.
    pub reset_timeout: Duration,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Receivers lagging behind more than `bus_capacity` events observe
    /// `Lagged` and skip the oldest items. Minimum value is 1.
    pub bus_capacity: usize,

    /// What to do when the stop routine fails during a reset.
    pub reset_policy: ResetPolicy,
}

impl GameConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for GameConfig {
    /// Default configuration:
    ///
    /// - `reset_timeout = 5s`
    /// - `bus_capacity = 64` (ample for lifecycle traffic)
    /// - `reset_policy = ResetPolicy::Swallow` (infallible reset)
    fn default() -> Self {
        Self {
            reset_timeout: Duration::from_secs(5),
            bus_capacity: 64,
            reset_policy: ResetPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.reset_timeout, Duration::from_secs(5));
        assert_eq!(cfg.reset_policy, ResetPolicy::Swallow);
        assert!(cfg.bus_capacity_clamped() >= 1);
    }

    #[test]
    fn capacity_clamp() {
        let cfg = GameConfig {
            bus_capacity: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
