// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: what the carousel needs from the rendering side.
//!
//! A [`Surface`] stands in for the container element and its subtree. The
//! carousel never touches a DOM, a widget tree or a renderer directly; it
//! reads geometry and markup facts from the surface and writes style and
//! control updates back to it. Hosts translate those calls into whatever
//! their toolkit needs (CSS transforms, retained widgets, immediate-mode
//! draws, and so on).
//!
//! Calls arrive in a fixed order during construction:
//!
//! 1. [`Surface::slide_holder`]
//! 2. [`Surface::build_frame`] and [`Surface::build_controls`], exactly once
//! 3. [`Surface::measure`] and, with a height ratio, [`Surface::set_frame_height`]
//! 4. the first navigation (style setters, [`Surface::position_changed`])
//!
//! After that, every navigation issues style setters followed by control
//! updates and, unless it is a silent boundary re-snap, a position
//! notification.

use kurbo::Size;

use crate::controls::{ArrowState, ControlLayout, SlideNumber};
use crate::frame::{Frame, FrameStyle};
use crate::navigation::SlideIndex;

/// Facts about the slide holder declared by the host markup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlideHolder {
    /// Number of slides (immediate children of the holder).
    pub slide_count: usize,
    /// The holder carries the marker selecting the fade transition.
    pub fade_marker: bool,
}

/// Geometry reported by the host layout engine.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Size of the visible slide holder.
    pub holder: Size,
    /// Size of one slide. A zero width means "as wide as the holder".
    pub slide: Size,
}

/// Host collaborator for a carousel.
pub trait Surface {
    /// Looks up the slide holder region of the container.
    ///
    /// Returns `None` when the container has no such region; the carousel
    /// then stays inert.
    fn slide_holder(&self) -> Option<SlideHolder>;

    /// Measures the holder and slide boxes.
    fn measure(&self) -> Measurement;

    /// Wraps each slide and creates the boundary clones listed in `frame`.
    ///
    /// Slots in `frame` are the indices used by [`Surface::set_slide_opacity`]
    /// and [`Surface::set_active_slide`].
    fn build_frame(&mut self, frame: &Frame, style: &FrameStyle);

    /// Creates the arrows, dots and slide-number element.
    fn build_controls(&mut self, layout: &ControlLayout);

    /// Applies a frame height computed from the configured aspect ratio.
    fn set_frame_height(&mut self, height: f64) {
        let _ = height;
    }

    /// Enables or disables the transition for subsequent style changes.
    fn set_transition(&mut self, enabled: bool);

    /// Translates the slide strip horizontally.
    fn set_offset(&mut self, offset_x: f64);

    /// Sets the opacity of the slide in `slot`.
    fn set_slide_opacity(&mut self, slot: usize, opacity: f64);

    /// Marks the slide in `slot` as the current one.
    fn set_active_slide(&mut self, slot: usize) {
        let _ = slot;
    }

    /// Shows or hides the arrows.
    fn set_arrows(&mut self, arrows: ArrowState);

    /// Marks the dot at the 0-based `index` active and every other dot inactive.
    fn set_active_dot(&mut self, index: usize);

    /// Renders the slide-number text.
    fn set_slide_number(&mut self, number: SlideNumber);

    /// Notifies subscribers that the carousel moved to `position`.
    fn position_changed(&mut self, position: SlideIndex);

    /// Releases host listeners (touch, resize) owned on behalf of the carousel.
    fn release(&mut self) {}
}
