// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame builder: the slide strip layout and its geometry.
//!
//! A [`Frame`] is the ordered sequence of slots the host renders inside the
//! slide holder. For a looping, translating carousel it contains a mirror of
//! the last slide before the first one and a mirror of the first slide after
//! the last one, so that stepping past an edge can animate onto a familiar
//! slide before the position silently jumps back onto the real strip:
//!
//! ```text
//! slot:     0          1        2        3        4
//! kind:  CloneLow   Real(1)  Real(2)  Real(3)  CloneHigh
//! mirror:   3          1        2        3        1
//! ```
//!
//! Offsets are always derived from a slot found by identity in that sequence,
//! never from child-list arithmetic, so the same code serves frames with and
//! without clones.

use alloc::string::String;

use smallvec::SmallVec;

use crate::config::AnimationKind;
use crate::surface::Measurement;

/// Role of one slot in the frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlideKind {
    /// A real slide, with its 1-based index.
    Real(usize),
    /// Mirror of the last slide, placed before the first one.
    CloneLow,
    /// Mirror of the first slide, placed after the last one.
    CloneHigh,
}

/// One slot of the frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideRecord {
    /// What the slot is.
    pub kind: SlideKind,
    /// 1-based index of the slide whose content the slot shows.
    pub source: usize,
}

impl SlideRecord {
    /// Returns `true` for boundary clones.
    #[must_use]
    pub fn is_clone(&self) -> bool {
        !matches!(self.kind, SlideKind::Real(_))
    }
}

/// The ordered slot sequence built once per carousel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    records: SmallVec<[SlideRecord; 8]>,
    length: usize,
}

impl Frame {
    /// Builds the slot sequence for `length` real slides.
    ///
    /// Clones are added only when the carousel both translates and loops.
    #[must_use]
    pub fn build(length: usize, animation: AnimationKind, infinite: bool) -> Self {
        let with_clones = infinite && animation == AnimationKind::Translate && length > 0;
        let mut records = SmallVec::with_capacity(length + if with_clones { 2 } else { 0 });
        if with_clones {
            records.push(SlideRecord {
                kind: SlideKind::CloneLow,
                source: length,
            });
        }
        records.extend((1..=length).map(|i| SlideRecord {
            kind: SlideKind::Real(i),
            source: i,
        }));
        if with_clones {
            records.push(SlideRecord {
                kind: SlideKind::CloneHigh,
                source: 1,
            });
        }
        Self { records, length }
    }

    /// Number of real slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the frame has no real slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Every slot in render order.
    #[must_use]
    pub fn records(&self) -> &[SlideRecord] {
        &self.records
    }

    /// Number of boundary clones (0 or 2).
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_clone()).count()
    }

    /// Finds the slot presenting `position`.
    ///
    /// Positions below 1 resolve to the low clone and positions past the
    /// last slide to the high clone; `None` is returned when that clone does
    /// not exist in this frame.
    #[must_use]
    pub fn slot_of(&self, position: i64) -> Option<usize> {
        let wanted = if position < 1 {
            SlideKind::CloneLow
        } else {
            match usize::try_from(position) {
                Ok(p) if p <= self.length => SlideKind::Real(p),
                _ => SlideKind::CloneHigh,
            }
        };
        self.records.iter().position(|r| r.kind == wanted)
    }
}

/// Style the host applies to the frame once at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    /// Transition style; a fade frame stacks its slots.
    pub animation: AnimationKind,
    /// Duration of one transition in milliseconds.
    pub animation_duration: u64,
    /// Optional width hint for the frame.
    pub width: Option<String>,
}

/// Geometry used for offset computation, refreshed on every resize.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Width of the visible holder.
    pub holder_width: f64,
    /// Width of one slide.
    pub slide_width: f64,
    /// How many whole slides fit in the holder; at least 1.
    pub slides_per_screen: usize,
}

impl Geometry {
    /// Derives geometry from a host measurement.
    ///
    /// Non-finite or negative sizes count as zero, and a zero slide width
    /// falls back to the holder width.
    #[must_use]
    pub fn from_measurement(measurement: Measurement) -> Self {
        let holder_width = sanitize(measurement.holder.width);
        let slide_width = sanitize(measurement.slide.width);
        let slide_width = if slide_width > 0.0 {
            slide_width
        } else {
            holder_width
        };
        let slides_per_screen = if slide_width > 0.0 {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Flooring a small positive ratio of two widths"
            )]
            let fit = (holder_width / slide_width) as usize;
            fit.max(1)
        } else {
            1
        };
        Self {
            holder_width,
            slide_width,
            slides_per_screen,
        }
    }

    /// Horizontal strip offset bringing `slot` to the leading edge.
    #[must_use]
    pub fn offset_for_slot(&self, slot: usize) -> f64 {
        -(slot as f64 * self.slide_width)
    }

    /// Frame height for an aspect ratio given in percent of the width.
    #[must_use]
    pub fn frame_height(&self, ratio_percent: Option<f64>) -> Option<f64> {
        ratio_percent.map(|ratio| self.holder_width * ratio / 100.0)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
