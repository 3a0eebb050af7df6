//! Virtual-time timer registry.
//!
//! Components that defer work own a `TimerRegistry` and advance it with the
//! host's frame delta. Every pending timer is an explicit entry in the
//! registry, so cancelling means iterating the registry rather than guessing
//! which handles might still be alive.

use std::collections::{BTreeMap, HashMap};

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A set of pending one-shot timers, each carrying a payload.
///
/// Timers fire in deadline order; timers sharing a deadline fire in the
/// order they were scheduled.
#[derive(Debug)]
pub struct TimerRegistry<T> {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), T>,
    deadlines: HashMap<u64, u64>,
}

impl<T> Default for TimerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerRegistry<T> {
    /// Creates an empty registry at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns `true` if `handle` is still pending.
    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Schedules `payload` to fire `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    /// Cancels one timer, returning its payload if it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let deadline = self.deadlines.remove(&handle.0)?;
        self.queue.remove(&(deadline, handle.0))
    }

    /// Cancels every pending timer and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        dropped
    }

    /// Removes and returns the earliest timer due at or before `until_ms`,
    /// moving the virtual clock to that timer's deadline.
    ///
    /// Callers loop on this so that work scheduled by a firing timer can
    /// itself fire within the same advance window.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, T)> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > until_ms {
            return None;
        }
        let payload = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(deadline);
        Some((TimerHandle(id), payload))
    }

    /// Moves the virtual clock forward to `until_ms` without firing anything.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Pops every timer due within the next `delta_ms` and advances the
    /// clock past them. Only for owners whose timers never reschedule.
    pub fn drain_due(&mut self, delta_ms: u64) -> Vec<(TimerHandle, T)> {
        let until = self.now_ms.saturating_add(delta_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(until) {
            fired.push(entry);
        }
        self.advance_to(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        // Arrange
        let mut timers = TimerRegistry::new();
        timers.schedule(300, "late");
        timers.schedule(100, "early");
        timers.schedule(200, "middle");

        // Act
        let fired: Vec<_> = timers.drain_due(1000).into_iter().map(|(_, p)| p).collect();

        // Assert
        assert_eq!(fired, vec!["early", "middle", "late"]);
        assert!(timers.is_empty());
        assert_eq!(timers.now_ms(), 1000);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timers = TimerRegistry::new();
        timers.schedule(50, 1);
        timers.schedule(50, 2);
        timers.schedule(50, 3);

        let fired: Vec<_> = timers.drain_due(50).into_iter().map(|(_, p)| p).collect();

        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_timer_not_due_stays_pending() {
        let mut timers = TimerRegistry::new();
        let handle = timers.schedule(500, ());

        assert!(timers.drain_due(499).is_empty());
        assert!(timers.contains(handle));
        assert_eq!(timers.drain_due(1).len(), 1);
        assert!(!timers.contains(handle));
    }

    #[test]
    fn test_cancel_removes_single_timer() {
        let mut timers = TimerRegistry::new();
        let keep = timers.schedule(10, "keep");
        let drop = timers.schedule(10, "drop");

        assert_eq!(timers.cancel(drop), Some("drop"));
        assert_eq!(timers.cancel(drop), None);

        let fired = timers.drain_due(10);
        assert_eq!(fired, vec![(keep, "keep")]);
    }

    #[test]
    fn test_cancel_all_prevents_every_pending_timer() {
        let mut timers = TimerRegistry::new();
        for delay in [10, 20, 30] {
            timers.schedule(delay, delay);
        }

        assert_eq!(timers.cancel_all(), 3);
        assert!(timers.drain_due(u64::from(u32::MAX)).is_empty());
    }

    #[test]
    fn test_pop_due_moves_clock_to_deadline_for_rescheduling() {
        // Arrange — a repeating owner re-arms from inside the loop.
        let mut timers = TimerRegistry::new();
        timers.schedule(30, 0u32);
        let mut fired = Vec::new();

        // Act
        while let Some((_, n)) = timers.pop_due(100) {
            fired.push((timers.now_ms(), n));
            if n < 5 {
                timers.schedule(30, n + 1);
            }
        }
        timers.advance_to(100);

        // Assert — three re-armed ticks land inside the window.
        assert_eq!(fired, vec![(30, 0), (60, 1), (90, 2)]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.now_ms(), 100);
    }
}
