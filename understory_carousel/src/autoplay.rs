// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay: one pending "advance by one" timer at a time.

use understory_timing::{TimerId, TimerQueue};

/// Bookkeeping for the autoplay timer.
///
/// The timer itself lives in the caller's [`TimerQueue`]; this type only
/// remembers which entry is the autoplay one so it can be replaced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Autoplay {
    interval: u64,
    paused: bool,
    pending: Option<TimerId>,
}

impl Autoplay {
    /// Creates autoplay bookkeeping for `interval` milliseconds (`0` = off).
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            paused: false,
            pending: None,
        }
    }

    /// Configured interval.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Returns `true` if autoplay is configured and not paused.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.interval > 0 && !self.paused
    }

    /// Returns `true` if autoplay is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses or resumes autoplay. Callers cancel or rearm the timer.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Handle of the pending autoplay timer.
    #[must_use]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Delay until the next advance after a move.
    ///
    /// An unanimated move did not spend `animation_timing` animating, so the
    /// delay shrinks by that much to keep a steady cadence.
    #[must_use]
    pub fn delay_after(&self, animated: bool, animation_timing: u64) -> u64 {
        if animated {
            self.interval
        } else {
            self.interval.saturating_sub(animation_timing)
        }
    }

    /// Replaces the pending timer with `payload` due `delay` after `now`.
    pub fn rearm<T>(&mut self, timers: &mut TimerQueue<T>, now: u64, delay: u64, payload: T) {
        self.cancel(timers);
        self.pending = Some(timers.schedule_after(now, delay, payload));
    }

    /// Cancels the pending timer, if any.
    pub fn cancel<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    /// Forgets the pending timer after it fired.
    ///
    /// Returns `true` if `id` was the autoplay timer.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
