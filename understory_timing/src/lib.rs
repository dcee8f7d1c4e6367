// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timer queue primitives.
//!
//! UI components often need deferred work: "do this after the animation
//! finishes", "advance again after the pause", "update the indicator halfway
//! through the transition". This crate keeps that bookkeeping out of the host
//! event loop. A [`TimerQueue`] stores pending timers with their deadlines and
//! payloads; the host only needs to:
//!
//! - feed the current time into [`TimerQueue::pop_due`] (or
//!   [`TimerQueue::drain_due`]) whenever its own timer fires, and
//! - arm a single platform timer for [`TimerQueue::next_deadline`].
//!
//! Time is an opaque `u64` in a caller-chosen monotonic unit (typically
//! milliseconds since some host epoch). The queue never reads a clock.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//!
//! let blink = timers.schedule_after(1_000, 500, "blink");
//! let _save = timers.schedule_after(1_000, 200, "save");
//! assert_eq!(timers.next_deadline(), Some(1_200));
//!
//! // The user did something that makes the blink obsolete.
//! assert_eq!(timers.cancel(blink), Some("blink"));
//!
//! // Host timer fires at 1_250.
//! let fired: Vec<_> = timers.drain_due(1_250).map(|f| f.payload).collect();
//! assert_eq!(fired, ["save"]);
//! assert!(timers.is_empty());
//! ```
//!
//! ## Ordering
//!
//! Due timers are yielded in deadline order. Timers sharing a deadline are
//! yielded in the order they were scheduled. A cancelled timer never fires.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use smallvec::SmallVec;

/// Handle identifying one scheduled timer.
///
/// Handles are unique for the lifetime of a [`TimerQueue`]; a handle whose
/// timer already fired or was cancelled is simply no longer pending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw sequence number of this handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that became due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle returned when the timer was scheduled.
    pub id: TimerId,
    /// Deadline the timer was scheduled for.
    pub deadline: u64,
    /// Payload stored with the timer.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    payload: T,
}

/// Ordered queue of pending timers.
///
/// Entries are kept sorted by `(deadline, scheduling order)`. The queue is
/// optimized for the handful of timers a single component keeps alive, so it
/// stores them inline up to a small capacity.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: SmallVec<[Entry<T>; 4]>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `payload` to fire at the absolute time `deadline`.
    pub fn schedule_at(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        // Equal deadlines go after existing entries to keep scheduling order.
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            at,
            Entry {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Schedules `payload` to fire `delay` units after `now`.
    ///
    /// The deadline saturates at `u64::MAX`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule_at(now.saturating_add(delay), payload)
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index).payload)
    }

    /// Cancels every pending timer whose payload matches `predicate`.
    ///
    /// Returns the number of cancelled timers.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.payload));
        before - self.entries.len()
    }

    /// Returns `true` if the timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline_of(&self, id: TimerId) -> Option<u64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Returns the earliest pending deadline.
    ///
    /// Hosts arm their platform timer for this instant.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer if it is due at `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired<T>> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let Entry {
            id,
            deadline,
            payload,
        } = self.entries.remove(0);
        Some(Fired {
            id,
            deadline,
            payload,
        })
    }

    /// Returns an iterator removing every timer due at `now`, in order.
    ///
    /// Timers that are not yet due stay in the queue even if the iterator is
    /// dropped early.
    pub fn drain_due(&mut self, now: u64) -> DrainDue<'_, T> {
        DrainDue { queue: self, now }
    }

    /// Iterates over pending payloads in firing order.
    pub fn iter(&self) -> impl Iterator<Item = (TimerId, u64, &T)> + '_ {
        self.entries.iter().map(|e| (e.id, e.deadline, &e.payload))
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Iterator returned by [`TimerQueue::drain_due`].
#[derive(Debug)]
pub struct DrainDue<'a, T> {
    queue: &'a mut TimerQueue<T>,
    now: u64,
}

impl<T> Iterator for DrainDue<'_, T> {
    type Item = Fired<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_due(self.now)
    }
}
