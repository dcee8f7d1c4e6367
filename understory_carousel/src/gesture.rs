// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe tracking: turn raw touch samples into navigation intents.
//!
//! ## Usage
//!
//! 1) Call [`SwipeTracker::start`] on touch-start with the number of active
//!    touches and the first touch position.
//! 2) Call [`SwipeTracker::update`] on each touch-move. The first sample
//!    decides the axis of the gesture, and that decision sticks until the
//!    next touch-start.
//! 3) Call [`SwipeTracker::end`] on touch-end to get a [`SwipeDecision`].
//!
//! A gesture that starts with more than one finger is never tracked, which
//! leaves pinch-zoom to the host.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::gesture::{SwipeAxis, SwipeDecision, SwipeTracker};
//!
//! let mut swipe = SwipeTracker::new(50.0);
//!
//! swipe.start(1, Point::new(200.0, 100.0));
//! let sample = swipe.update(Point::new(170.0, 104.0)).unwrap();
//! assert_eq!(sample.axis, SwipeAxis::Horizontal);
//! assert_eq!(sample.delta.x, -30.0);
//!
//! // Finger travelled 70px to the left: go to the next slide.
//! assert_eq!(swipe.end(Point::new(130.0, 104.0)), SwipeDecision::Next);
//! assert!(!swipe.is_tracking());
//! ```

use kurbo::{Point, Vec2};

/// Axis a gesture was classified on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeAxis {
    /// No movement seen yet.
    #[default]
    Undetermined,
    /// Mostly horizontal; the carousel owns the gesture.
    Horizontal,
    /// Mostly vertical; the host keeps scrolling.
    Vertical,
}

/// One classified touch-move sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeSample {
    /// Offset from the touch-start position.
    pub delta: Vec2,
    /// Axis of the gesture.
    pub axis: SwipeAxis,
}

/// What a finished gesture asks the carousel to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    /// Go back one step (the finger moved right).
    Previous,
    /// Go forward one step (the finger moved left).
    Next,
    /// Too short or not horizontal: settle back onto the current slide.
    SpringBack,
    /// No gesture was being tracked.
    Ignored,
}

/// Per-gesture touch bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeTracker {
    start: Option<Point>,
    axis: SwipeAxis,
    threshold: f64,
}

impl SwipeTracker {
    /// Creates a tracker recognizing swipes of at least `threshold` pixels.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            start: None,
            axis: SwipeAxis::Undetermined,
            threshold,
        }
    }

    /// Minimum horizontal travel of a swipe.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Begins a gesture. More than one touch cancels tracking.
    pub fn start(&mut self, touch_count: usize, pos: Point) {
        self.axis = SwipeAxis::Undetermined;
        self.start = (touch_count == 1).then_some(pos);
    }

    /// Feeds a touch-move sample.
    ///
    /// Returns `None` when no gesture is tracked.
    pub fn update(&mut self, pos: Point) -> Option<SwipeSample> {
        let delta = pos - self.start?;
        if self.axis == SwipeAxis::Undetermined {
            self.axis = classify(delta);
        }
        Some(SwipeSample {
            delta,
            axis: self.axis,
        })
    }

    /// Ends the gesture at `pos` and resets the tracker.
    pub fn end(&mut self, pos: Point) -> SwipeDecision {
        let Some(start) = self.start.take() else {
            return SwipeDecision::Ignored;
        };
        let delta = pos - start;
        let axis = match self.axis {
            SwipeAxis::Undetermined => classify(delta),
            axis => axis,
        };
        self.axis = SwipeAxis::Undetermined;

        if axis != SwipeAxis::Horizontal || delta.x.abs() < self.threshold {
            SwipeDecision::SpringBack
        } else if delta.x < 0.0 {
            SwipeDecision::Next
        } else {
            SwipeDecision::Previous
        }
    }

    /// Drops the current gesture without a decision.
    pub fn cancel(&mut self) {
        self.start = None;
        self.axis = SwipeAxis::Undetermined;
    }

    /// Returns `true` while a single-finger gesture is tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Axis of the current gesture.
    #[must_use]
    pub fn axis(&self) -> SwipeAxis {
        self.axis
    }
}

fn classify(delta: Vec2) -> SwipeAxis {
    if delta.x.abs() >= delta.y.abs() {
        SwipeAxis::Horizontal
    } else {
        SwipeAxis::Vertical
    }
}
