// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A surface that records every call, for integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use kurbo::Size;
use understory_carousel::{
    ArrowState, ControlLayout, Frame, FrameStyle, Measurement, SlideHolder, SlideIndex,
    SlideNumber, Surface,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    BuildFrame(usize),
    BuildControls,
    FrameHeight(f64),
    Transition(bool),
    Offset(f64),
    Opacity(usize, f64),
    ActiveSlide(usize),
    Arrows(ArrowState),
    ActiveDot(usize),
    Number(String),
    Position(usize),
    Release,
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub holder: Option<SlideHolder>,
    pub measurement: Measurement,
    pub calls: Vec<Call>,
    pub frame: Option<Frame>,
    pub style: Option<FrameStyle>,
    pub layout: Option<ControlLayout>,
}

impl RecordingSurface {
    /// `slides` slides, each as wide as a 400px holder.
    pub fn new(slides: usize) -> Self {
        Self::with_widths(slides, 400.0, 400.0)
    }

    pub fn with_widths(slides: usize, holder: f64, slide: f64) -> Self {
        Self {
            holder: Some(SlideHolder {
                slide_count: slides,
                fade_marker: false,
            }),
            measurement: Measurement {
                holder: Size::new(holder, 225.0),
                slide: Size::new(slide, 225.0),
            },
            calls: Vec::new(),
            frame: None,
            style: None,
            layout: None,
        }
    }

    pub fn fade(slides: usize) -> Self {
        let mut surface = Self::new(slides);
        surface.holder = Some(SlideHolder {
            slide_count: slides,
            fade_marker: true,
        });
        surface
    }

    pub fn without_holder() -> Self {
        let mut surface = Self::new(0);
        surface.holder = None;
        surface
    }

    pub fn take(&mut self) -> Vec<Call> {
        core::mem::take(&mut self.calls)
    }

    pub fn positions(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Position(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn offsets(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Offset(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    pub fn last_offset(&self) -> Option<f64> {
        self.offsets().last().copied()
    }

    pub fn last_dot(&self) -> Option<usize> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::ActiveDot(i) => Some(*i),
            _ => None,
        })
    }

    pub fn last_number(&self) -> Option<String> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Number(n) => Some(n.clone()),
            _ => None,
        })
    }

    pub fn last_arrows(&self) -> Option<ArrowState> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Arrows(a) => Some(*a),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn slide_holder(&self) -> Option<SlideHolder> {
        self.holder
    }

    fn measure(&self) -> Measurement {
        self.measurement
    }

    fn build_frame(&mut self, frame: &Frame, style: &FrameStyle) {
        self.calls.push(Call::BuildFrame(frame.records().len()));
        self.frame = Some(frame.clone());
        self.style = Some(style.clone());
    }

    fn build_controls(&mut self, layout: &ControlLayout) {
        self.calls.push(Call::BuildControls);
        self.layout = Some(layout.clone());
    }

    fn set_frame_height(&mut self, height: f64) {
        self.calls.push(Call::FrameHeight(height));
    }

    fn set_transition(&mut self, enabled: bool) {
        self.calls.push(Call::Transition(enabled));
    }

    fn set_offset(&mut self, offset_x: f64) {
        self.calls.push(Call::Offset(offset_x));
    }

    fn set_slide_opacity(&mut self, slot: usize, opacity: f64) {
        self.calls.push(Call::Opacity(slot, opacity));
    }

    fn set_active_slide(&mut self, slot: usize) {
        self.calls.push(Call::ActiveSlide(slot));
    }

    fn set_arrows(&mut self, arrows: ArrowState) {
        self.calls.push(Call::Arrows(arrows));
    }

    fn set_active_dot(&mut self, index: usize) {
        self.calls.push(Call::ActiveDot(index));
    }

    fn set_slide_number(&mut self, number: SlideNumber) {
        self.calls.push(Call::Number(number.to_string()));
    }

    fn position_changed(&mut self, position: SlideIndex) {
        self.calls.push(Call::Position(position.get()));
    }

    fn release(&mut self) {
        self.calls.push(Call::Release);
    }
}
