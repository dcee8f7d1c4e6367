// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: a headless carousel (slider) component.
//!
//! The component turns a slide holder declared by the host into a
//! navigable carousel:
//!
//! - **Navigation** ([`NavState`]): 1-based positions, edge clamping, and
//!   wrap-around through boundary clones with a deferred, silent re-snap.
//! - **Frame** ([`Frame`], [`Geometry`]): the slot sequence the host renders,
//!   with a mirror of the last slide before the first and of the first after
//!   the last when a translating carousel loops.
//! - **Controls** ([`ControlLayout`], [`ControlState`]): arrows, dots and a
//!   `position/length` text, projected from the position on every move.
//! - **Gestures** ([`gesture`]): horizontal swipes navigate, vertical ones are
//!   left to the host.
//! - **Autoplay**: a periodic advance whose cadence is kept across moves.
//!
//! Rendering is delegated to a [`Surface`] implementation. Deferred work is
//! kept in an [`understory_timing::TimerQueue`]; the host calls
//! [`Carousel::tick`] with its clock and arms one platform timer for
//! [`Carousel::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{
//!     ArrowState, Carousel, CarouselOptions, ControlLayout, Frame, FrameStyle, Measurement,
//!     SlideHolder, SlideIndex, SlideNumber, Surface,
//! };
//!
//! #[derive(Default)]
//! struct Page {
//!     offset: f64,
//!     reported: Vec<usize>,
//! }
//!
//! impl Surface for Page {
//!     fn slide_holder(&self) -> Option<SlideHolder> {
//!         Some(SlideHolder { slide_count: 3, fade_marker: false })
//!     }
//!     fn measure(&self) -> Measurement {
//!         Measurement { holder: Size::new(400.0, 225.0), slide: Size::new(400.0, 225.0) }
//!     }
//!     fn set_offset(&mut self, offset_x: f64) {
//!         self.offset = offset_x;
//!     }
//!     fn position_changed(&mut self, position: SlideIndex) {
//!         self.reported.push(position.get());
//!     }
//! #   fn build_frame(&mut self, _: &Frame, _: &FrameStyle) {}
//! #   fn build_controls(&mut self, _: &ControlLayout) {}
//! #   fn set_transition(&mut self, _: bool) {}
//! #   fn set_slide_opacity(&mut self, _: usize, _: f64) {}
//! #   fn set_arrows(&mut self, _: ArrowState) {}
//! #   fn set_active_dot(&mut self, _: usize) {}
//! #   fn set_slide_number(&mut self, _: SlideNumber) {}
//!     // ...
//! }
//!
//! let options = CarouselOptions::default().with_infinite_cycle(true);
//! let mut carousel = Carousel::bind(Page::default(), &options, 0).unwrap();
//! // Slot 1 is the first real slide; slot 0 holds the clone of slide 3.
//! assert_eq!(carousel.surface().offset, -400.0);
//!
//! // "Next" from the last slide animates onto the clone of slide 1 ...
//! carousel.show(3, 0);
//! carousel.next(1_000);
//! assert_eq!(carousel.surface().offset, -1600.0);
//!
//! // ... and once the transition is over, snaps back onto the real slide.
//! carousel.tick(1_200);
//! assert_eq!(carousel.surface().offset, -400.0);
//! assert_eq!(carousel.surface().reported, [1, 3, 1]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build against the standard library.
//! - `libm`: `no_std` float math for Kurbo.
//! - `serde`: deserialize [`CarouselOptions`] from host option records.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoplay;
mod carousel;
mod config;
mod controls;
mod error;
mod frame;
pub mod gesture;
mod navigation;
mod surface;

pub use autoplay::Autoplay;
pub use carousel::{Carousel, TouchResponse};
pub use config::{
    AnimationKind, Capabilities, CarouselOptions, Config, ControlLabels, DEFAULT_ANIMATION_TIMING,
    DEFAULT_SWIPE_THRESHOLD, DotStyle, EdgePolicy,
};
pub use controls::{
    ArrowState, CONTROL_ROLE, Control, ControlDescriptor, ControlLayout, ControlState, SlideNumber,
    active_dot_index,
};
pub use error::BindError;
pub use frame::{Frame, FrameStyle, Geometry, SlideKind, SlideRecord};
pub use navigation::{Move, NavState, SlideIndex};
pub use surface::{Measurement, SlideHolder, Surface};
