// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state machine: position bookkeeping, clamping and wrapping.
//!
//! [`NavState`] decides where a navigation request lands. It knows nothing
//! about timers, geometry or hosts; it only answers "given the current
//! state, what does a request for `target` do?" and records the answer.
//!
//! ## Positions
//!
//! Positions are 1-based. Internally a looping, translating carousel can sit
//! for one animation on a boundary clone, represented by the sentinel
//! positions `0` (mirror of the last slide) and `length + 1` (mirror of the
//! first slide). A [`Move`] that lands on a sentinel carries the real index
//! it must re-snap to once the animation is over. Sentinels never leak out:
//! [`NavState::reported`] and [`Move::reported`] always return a
//! [`SlideIndex`] in `1..=length`.
//!
//! ## Generations
//!
//! Every accepted request bumps a generation counter. Deferred work
//! scheduled by a move (re-snap, indicator update, autoplay) remembers the
//! generation it was scheduled under and is discarded if the counter moved
//! on in the meantime.
//!
//! ```
//! use understory_carousel::{AnimationKind, EdgePolicy, NavState};
//!
//! let mut nav = NavState::new(3, true, AnimationKind::Translate, EdgePolicy::ClampAndStop, 3);
//!
//! // "Next" on the last slide animates onto the clone of slide 1 ...
//! let mv = nav.request(4, true).unwrap();
//! assert_eq!(mv.position, 4);
//! assert_eq!(mv.resnap, Some(1));
//! assert_eq!(mv.reported.get(), 1);
//! assert!(!nav.is_settled());
//!
//! // ... and the deferred re-snap lands on the real slide without animation.
//! let snap = nav.request(1, false).unwrap();
//! assert_eq!(snap.resnap, None);
//! assert!(nav.is_settled());
//! ```

use core::fmt;

use crate::config::{AnimationKind, EdgePolicy};

/// A 1-based slide index that is always within `1..=length`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideIndex(usize);

impl SlideIndex {
    /// The first slide.
    pub const FIRST: Self = Self(1);

    /// Creates an index from a 1-based number; `0` is rejected.
    #[must_use]
    pub const fn new(one_based: usize) -> Option<Self> {
        if one_based == 0 {
            None
        } else {
            Some(Self(one_based))
        }
    }

    /// Returns the 1-based number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the 0-based number, for hosts that count from zero.
    #[must_use]
    pub const fn zero_based(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for SlideIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Outcome of an accepted navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// Raw target that was requested.
    pub target: i64,
    /// Internal position after the request; may be a boundary sentinel.
    pub position: i64,
    /// Externally valid position.
    pub reported: SlideIndex,
    /// Real position to snap to, unanimated, once the animation is over.
    pub resnap: Option<i64>,
    /// Whether the move is animated.
    pub animated: bool,
    /// Generation assigned to this move.
    pub generation: u64,
}

/// Position state of a carousel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    position: i64,
    last: i64,
    infinite: bool,
    animation: AnimationKind,
    edge_policy: EdgePolicy,
    generation: u64,
}

impl NavState {
    /// Creates the state for `length` slides starting at `initial`.
    ///
    /// `initial` is clamped into `1..=length`. `length` is expected to be at
    /// least 1; an empty carousel is rejected earlier, at bind time.
    #[must_use]
    pub fn new(
        length: usize,
        infinite: bool,
        animation: AnimationKind,
        edge_policy: EdgePolicy,
        initial: i64,
    ) -> Self {
        debug_assert!(length > 0, "a carousel needs at least one slide");
        let last = i64::try_from(length).unwrap_or(i64::MAX).max(1);
        Self {
            position: initial.clamp(1, last),
            last,
            infinite,
            animation,
            edge_policy,
            generation: 0,
        }
    }

    /// Number of real slides.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.last).unwrap_or(usize::MAX)
    }

    /// Always `false`; present for API symmetry with [`NavState::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Internal position, possibly a boundary sentinel.
    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Externally valid position.
    #[must_use]
    pub fn reported(&self) -> SlideIndex {
        to_index(wrap(self.position, self.last))
    }

    /// Returns `true` unless the position is a boundary sentinel.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (1..=self.last).contains(&self.position)
    }

    /// Generation of the last accepted request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if navigation wraps around.
    #[must_use]
    pub fn infinite(&self) -> bool {
        self.infinite
    }

    /// Applies a request for `target`.
    ///
    /// Returns `None` when the request is ignored by the edge policy; the
    /// state (including the generation) is then left untouched.
    pub fn request(&mut self, target: i64, animated: bool) -> Option<Move> {
        let over_end = target > self.last;
        let under_start = target < 1;

        let (position, resnap) = if !self.infinite {
            if over_end {
                return None;
            }
            if under_start {
                match self.edge_policy {
                    EdgePolicy::ClampAndStop => return None,
                    EdgePolicy::SnapUnderToFirst => (1, None),
                }
            } else {
                (target, None)
            }
        } else {
            match (self.animation, over_end, under_start) {
                (AnimationKind::Fade, true, _) => (1, None),
                (AnimationKind::Fade, _, true) => (self.last, None),
                (AnimationKind::Translate, true, _) => (self.last + 1, Some(1)),
                (AnimationKind::Translate, _, true) => (0, Some(self.last)),
                (_, false, false) => (target, None),
            }
        };

        self.position = position;
        self.generation = self.generation.wrapping_add(1);
        Some(Move {
            target,
            position,
            reported: self.reported(),
            resnap,
            animated,
            generation: self.generation,
        })
    }
}

/// Wraps a possibly out-of-range position onto `1..=last`.
fn wrap(position: i64, last: i64) -> i64 {
    if position < 1 {
        last
    } else if position > last {
        1
    } else {
        position
    }
}

fn to_index(position: i64) -> SlideIndex {
    SlideIndex(usize::try_from(position).unwrap_or(1).max(1))
}
