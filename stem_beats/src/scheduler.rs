//! Cooperative timer queue
//!
//! Everything time-driven (animation ticks, sound loop repetitions) is a
//! timer on this queue. The clock is a virtual millisecond counter that the
//! event loop advances, so nothing here ever sleeps or spawns threads.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered queue of payloads
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    // (deadline, id); ids break ties in scheduling order
    deadlines: BinaryHeap<Reverse<(u64, TimerId)>>,
    pending: HashMap<TimerId, T>,
    max_lag_ms: Option<u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            deadlines: BinaryHeap::new(),
            pending: HashMap::new(),
            max_lag_ms: None,
        }
    }

    /// Queue that drops missed time instead of replaying it.
    ///
    /// A timer popped more than `max_lag_ms` after its deadline moves the
    /// clock straight to the caller's `now_ms`, so whatever it reschedules
    /// counts from the present and each chain fires at most once per call.
    pub fn with_max_lag(max_lag_ms: u64) -> Self {
        Self {
            max_lag_ms: Some(max_lag_ms),
            ..Self::new()
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `payload` `delay_ms` after the current virtual time
    pub fn schedule_after(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.deadlines.push(Reverse((self.now_ms + delay_ms, id)));
        self.pending.insert(id, payload);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// The clock moves to the timer's deadline, so anything the caller
    /// schedules while handling it is measured from when it was due. Past
    /// the lag limit the clock jumps to `now_ms` instead.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, T)> {
        while let Some(&Reverse((deadline, id))) = self.deadlines.peek() {
            if deadline > now_ms {
                break;
            }
            self.deadlines.pop();
            // Cancelled timers leave a stale heap entry behind
            if let Some(payload) = self.pending.remove(&id) {
                let fired_at = match self.max_lag_ms {
                    Some(limit) if now_ms - deadline > limit => now_ms,
                    _ => deadline,
                };
                self.now_ms = self.now_ms.max(fired_at);
                return Some((id, payload));
            }
        }
        self.now_ms = self.now_ms.max(now_ms);
        None
    }

    /// Deadline of the earliest live timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines
            .iter()
            .filter(|Reverse((_, id))| self.pending.contains_key(id))
            .map(|Reverse((deadline, _))| *deadline)
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, now: u64) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some((_, payload)) = queue.pop_due(now) {
            fired.push((queue.now_ms(), payload));
        }
        fired
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(30, "c");
        queue.schedule_after(10, "a");
        queue.schedule_after(20, "b");
        assert_eq!(queue.next_deadline(), Some(10));
        assert_eq!(drain(&mut queue, 25), vec![(10, "a"), (20, "b")]);
        assert_eq!(queue.now_ms(), 25);
        assert_eq!(drain(&mut queue, 100), vec![(30, "c")]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(5, "first");
        queue.schedule_after(5, "second");
        assert_eq!(drain(&mut queue, 5), vec![(5, "first"), (5, "second")]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_after(10, "gone");
        queue.schedule_after(20, "kept");
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(!queue.is_pending(id));
        assert_eq!(queue.next_deadline(), Some(20));
        assert_eq!(drain(&mut queue, 50), vec![(20, "kept")]);
    }

    #[test]
    fn rescheduling_from_a_late_fire_keeps_cadence() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(50, "tick");
        // The loop wakes up late, at 120 ms
        let (_, payload) = queue.pop_due(120).unwrap();
        assert_eq!(payload, "tick");
        assert_eq!(queue.now_ms(), 50);
        queue.schedule_after(50, "tick");
        assert_eq!(queue.next_deadline(), Some(100));
        assert!(queue.pop_due(120).is_some());
        assert!(queue.pop_due(120).is_none());
        assert_eq!(queue.now_ms(), 120);
    }

    #[test]
    fn late_fires_past_the_lag_limit_restart_from_now() {
        let mut queue = TimerQueue::with_max_lag(50);
        queue.schedule_after(50, "tick");
        queue.schedule_after(600, "beat");

        // Ten seconds without a frame: each timer fires once
        assert_eq!(queue.pop_due(10_000).map(|(_, p)| p), Some("tick"));
        assert_eq!(queue.now_ms(), 10_000);
        queue.schedule_after(50, "tick");
        assert_eq!(queue.pop_due(10_000).map(|(_, p)| p), Some("beat"));
        queue.schedule_after(600, "beat");
        assert!(queue.pop_due(10_000).is_none());
        assert_eq!(queue.next_deadline(), Some(10_050));

        // A fire inside the limit keeps its cadence
        assert!(queue.pop_due(10_080).is_some());
        assert_eq!(queue.now_ms(), 10_050);
    }
}
