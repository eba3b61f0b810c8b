//! Global busy lock guarding host-bound actions.
//!
//! # Design
//! - One lock for the whole UI; the last acquirer wins and nothing queues.
//! - Every acquire and release bumps a generation counter so auto-release
//!   timers scheduled by an earlier acquire are ignored when they fire.
//! - The deadline is also checked directly, so the lock reads as free once it
//!   expires even if the shell has not delivered the timer yet.

use tracing::debug;

use crate::core::effects::{Effect, Millis, TimerEvent};

/// Snapshot of the lock, mainly for views and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyState {
    /// Whether the lock is held.
    pub locked: bool,
    /// Deadline of the auto-release, when one was requested.
    pub expires_at: Option<Millis>,
    /// Counter bumped on every state change.
    pub generation: u64,
}

/// Mutual-exclusion flag with an optional auto-release.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusyLock {
    state: BusyState,
}

impl BusyLock {
    /// Lock for `timeout_ms` (no auto-release when zero) and return the new
    /// generation.
    pub fn acquire(&mut self, now: Millis, timeout_ms: Millis, effects: &mut Vec<Effect>) -> u64 {
        self.state.generation += 1;
        self.state.locked = true;
        let generation = self.state.generation;
        if timeout_ms > 0 {
            self.state.expires_at = Some(now.saturating_add(timeout_ms));
            effects.push(Effect::Schedule {
                delay_ms: timeout_ms,
                timer: TimerEvent::BusyExpired { generation },
            });
        } else {
            self.state.expires_at = None;
        }
        debug!(generation, timeout_ms, "busy lock acquired");
        generation
    }

    /// Unlock and invalidate any pending auto-release.
    pub const fn release(&mut self) {
        self.state.generation += 1;
        self.state.locked = false;
        self.state.expires_at = None;
    }

    /// Release only if the lock is still the one acquired under `generation`.
    pub fn release_if_current(&mut self, generation: u64) -> bool {
        if self.state.locked && self.state.generation == generation {
            self.release();
            true
        } else {
            debug!(generation, current = self.state.generation, "stale busy release ignored");
            false
        }
    }

    /// Whether actions must be refused at `now`.
    #[must_use]
    pub fn is_locked(&self, now: Millis) -> bool {
        self.state.locked
            && self
                .state
                .expires_at
                .is_none_or(|deadline| now < deadline)
    }

    /// Whether busy-sensitive controls render disabled.
    #[must_use]
    pub const fn controls_disabled(&self) -> bool {
        self.state.locked
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> BusyState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_schedules_auto_release_with_generation() {
        let mut lock = BusyLock::default();
        let mut effects = Vec::new();
        let generation = lock.acquire(1_000, 2_500, &mut effects);
        assert!(lock.is_locked(1_000));
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                delay_ms: 2_500,
                timer: TimerEvent::BusyExpired { generation },
            }]
        );
        assert_eq!(lock.state().expires_at, Some(3_500));
    }

    #[test]
    fn lock_reads_free_once_deadline_passes() {
        let mut lock = BusyLock::default();
        lock.acquire(0, 100, &mut Vec::new());
        assert!(lock.is_locked(99));
        assert!(!lock.is_locked(100));
    }

    #[test]
    fn zero_timeout_holds_until_released() {
        let mut lock = BusyLock::default();
        let mut effects = Vec::new();
        lock.acquire(0, 0, &mut effects);
        assert!(effects.is_empty());
        assert!(lock.is_locked(u64::MAX));
        lock.release();
        assert!(!lock.is_locked(0));
    }

    #[test]
    fn reacquire_invalidates_the_earlier_timer() {
        let mut lock = BusyLock::default();
        let first = lock.acquire(0, 5_000, &mut Vec::new());
        let second = lock.acquire(1_000, 5_000, &mut Vec::new());
        assert!(!lock.release_if_current(first));
        assert!(lock.is_locked(5_500));
        assert!(lock.release_if_current(second));
        assert!(!lock.controls_disabled());
    }

    #[test]
    fn release_after_release_is_harmless() {
        let mut lock = BusyLock::default();
        let generation = lock.acquire(0, 10, &mut Vec::new());
        lock.release();
        lock.release();
        assert!(!lock.release_if_current(generation));
        assert!(!lock.is_locked(0));
    }
}
