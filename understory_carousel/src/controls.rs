// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control surface: arrows, dot indicators and the slide-number text.
//!
//! Two halves live here:
//!
//! - [`ControlLayout`] describes the controls to generate once at build
//!   time: which ones exist, their accessible role and label.
//! - [`ControlState::project`] is a pure function from the current position
//!   to what those controls should show. It holds no state of its own and
//!   never influences navigation.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::config::{Capabilities, Config, DotStyle};

/// Accessible role given to every generated control.
pub const CONTROL_ROLE: &str = "button";

/// An activatable control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The "previous" arrow.
    Previous,
    /// The "next" arrow.
    Next,
    /// The dot of the given 1-based slide.
    Dot(usize),
}

/// Markup description of one control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// What activating the control does.
    pub control: Control,
    /// Accessible role.
    pub role: &'static str,
    /// Accessible label.
    pub label: String,
}

/// Every control a carousel generates, built once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlLayout {
    /// Previous and next arrows, in that order.
    pub arrows: Option<[ControlDescriptor; 2]>,
    /// One dot per real slide, in slide order. Empty when dots are off.
    pub dots: Vec<ControlDescriptor>,
    /// Visual style of the dots.
    pub dot_style: DotStyle,
    /// Whether a slide-number element is generated.
    pub slide_number: bool,
}

impl ControlLayout {
    /// Builds the layout for `length` slides.
    #[must_use]
    pub fn build(config: &Config, length: usize) -> Self {
        let caps = config.capabilities;
        let arrows = caps.contains(Capabilities::ARROWS).then(|| {
            [
                ControlDescriptor {
                    control: Control::Previous,
                    role: CONTROL_ROLE,
                    label: config.labels.previous.clone(),
                },
                ControlDescriptor {
                    control: Control::Next,
                    role: CONTROL_ROLE,
                    label: config.labels.next.clone(),
                },
            ]
        });
        let dots = if caps.contains(Capabilities::DOTS) {
            (1..=length)
                .map(|slide| ControlDescriptor {
                    control: Control::Dot(slide),
                    role: CONTROL_ROLE,
                    label: config.labels.dot(slide),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            arrows,
            dots,
            dot_style: config.dot_style,
            slide_number: caps.contains(Capabilities::SLIDE_NUMBER),
        }
    }
}

/// Visibility of the two arrows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrowState {
    /// The "previous" arrow is shown.
    pub previous: bool,
    /// The "next" arrow is shown.
    pub next: bool,
}

/// The `position/length` text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideNumber {
    /// Displayed position, within `1..=length`.
    pub position: usize,
    /// Slide count.
    pub length: usize,
}

impl fmt::Display for SlideNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.length)
    }
}

/// What the controls show for a given position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControlState {
    /// Arrow visibility, when arrows exist.
    pub arrows: Option<ArrowState>,
    /// 0-based active dot, when dots exist.
    pub active_dot: Option<usize>,
    /// Slide-number text, when enabled.
    pub slide_number: Option<SlideNumber>,
}

impl ControlState {
    /// Projects an internal `position` (sentinels allowed) onto the controls.
    ///
    /// Arrows are always shown when looping. Otherwise "previous" hides on
    /// the first slide and "next" hides once the last screen is reached.
    #[must_use]
    pub fn project(
        position: i64,
        length: usize,
        slides_per_screen: usize,
        capabilities: Capabilities,
    ) -> Self {
        let last = i64::try_from(length).unwrap_or(i64::MAX);
        let per_screen = i64::try_from(slides_per_screen.max(1)).unwrap_or(1);
        let infinite = capabilities.contains(Capabilities::INFINITE);

        let arrows = capabilities
            .contains(Capabilities::ARROWS)
            .then(|| ArrowState {
                previous: infinite || position != 1,
                next: infinite || position <= last - per_screen,
            });

        let active_dot = capabilities
            .contains(Capabilities::DOTS)
            .then(|| active_dot_index(position, length));

        let slide_number = capabilities
            .contains(Capabilities::SLIDE_NUMBER)
            .then(|| SlideNumber {
                position: usize::try_from(position.clamp(1, last.max(1))).unwrap_or(1),
                length,
            });

        Self {
            arrows,
            active_dot,
            slide_number,
        }
    }
}

/// 0-based dot index for an internal position, wrapping boundary sentinels.
#[must_use]
pub fn active_dot_index(position: i64, length: usize) -> usize {
    let last = i64::try_from(length).unwrap_or(i64::MAX);
    if position < 1 {
        length.saturating_sub(1)
    } else if position > last {
        0
    } else {
        usize::try_from(position - 1).unwrap_or(0)
    }
}
