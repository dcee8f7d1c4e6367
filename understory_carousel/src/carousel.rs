// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel component: binds a [`Surface`], owns the navigation state and
//! drives every deferred follow-up from a single timer queue.
//!
//! ## Time
//!
//! The carousel never reads a clock. Every entry point that can schedule
//! work takes the host's current time in milliseconds, and the host is
//! expected to call [`Carousel::tick`] no later than
//! [`Carousel::next_deadline`]. Deferred work runs at its own deadline, so a
//! late tick does not drift the autoplay cadence.
//!
//! ## Deferred work
//!
//! A navigation may leave up to three timers behind:
//!
//! - a boundary re-snap, when a looping strip animated onto a clone,
//! - a dot update, delayed by half the transition so the indicator changes
//!   mid-animation,
//! - the next autoplay advance.
//!
//! Each one records the navigation generation it was scheduled under and is
//! dropped on fire if a newer navigation happened since.

use kurbo::Point;
use tracing::{debug, trace, warn};
use understory_timing::{TimerId, TimerQueue};

use crate::autoplay::Autoplay;
use crate::config::{AnimationKind, CarouselOptions, Capabilities, Config};
use crate::controls::{Control, ControlLayout, ControlState};
use crate::error::BindError;
use crate::frame::{Frame, FrameStyle, Geometry};
use crate::gesture::{SwipeAxis, SwipeDecision, SwipeTracker};
use crate::navigation::{NavState, SlideIndex};
use crate::surface::Surface;

/// Work scheduled by a navigation and run from [`Carousel::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Deferred {
    /// Jump, unanimated and silently, from a boundary clone to `to`.
    Resnap { to: i64, generation: u64 },
    /// Mark the 0-based dot `index` active.
    DotUpdate { index: usize, generation: u64 },
    /// Advance one slide.
    Advance { generation: u64 },
}

/// Whether a navigation reports its position to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Notify {
    Subscribers,
    Silent,
}

/// What the host should do with a touch-move event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchResponse {
    /// The gesture belongs to the carousel: suppress default scrolling.
    pub prevent_default: bool,
    /// The strip was moved to follow the finger.
    pub dragged: bool,
}

/// A carousel bound to a host [`Surface`].
///
/// A carousel whose binding failed is *inert*: it keeps the surface but
/// every operation is a no-op.
#[derive(Debug)]
pub struct Carousel<S> {
    surface: S,
    active: Option<Active>,
}

#[derive(Debug)]
struct Active {
    config: Config,
    frame: Frame,
    geometry: Geometry,
    nav: NavState,
    swipe: Option<SwipeTracker>,
    autoplay: Autoplay,
    timers: TimerQueue<Deferred>,
    resnap: Option<TimerId>,
    dot_update: Option<TimerId>,
}

impl<S: Surface> Carousel<S> {
    /// Binds a carousel to `surface` and shows the initial slide.
    ///
    /// Builds the frame and controls, applies the frame height, shows the
    /// initial position without animation and arms autoplay.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when the surface has no slide holder or the
    /// holder has no slides. Nothing is built in that case.
    pub fn bind(mut surface: S, options: &CarouselOptions, now: u64) -> Result<Self, BindError> {
        let active = Active::bind(&mut surface, options, now)?;
        Ok(Self {
            surface,
            active: Some(active),
        })
    }

    /// Like [`Carousel::bind`], but logs a binding failure and returns an
    /// inert carousel instead.
    pub fn create(mut surface: S, options: &CarouselOptions, now: u64) -> Self {
        match Active::bind(&mut surface, options, now) {
            Ok(active) => Self {
                surface,
                active: Some(active),
            },
            Err(err) => {
                warn!(error = %err, "carousel left inert");
                Self {
                    surface,
                    active: None,
                }
            }
        }
    }

    /// Returns `true` unless binding failed or the carousel was torn down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current position, always within `1..=len`.
    #[must_use]
    pub fn position(&self) -> Option<SlideIndex> {
        self.active.as_ref().map(|a| a.nav.reported())
    }

    /// Internal position, which may briefly be a boundary sentinel.
    #[must_use]
    pub fn internal_position(&self) -> Option<i64> {
        self.active.as_ref().map(|a| a.nav.position())
    }

    /// Returns `true` when no boundary re-snap is outstanding.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.active.as_ref().is_none_or(|a| a.nav.is_settled())
    }

    /// Number of real slides; `0` when inert.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.frame.len())
    }

    /// Returns `true` when inert.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved settings.
    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.active.as_ref().map(|a| &a.config)
    }

    /// The slot sequence handed to the host.
    #[must_use]
    pub fn frame(&self) -> Option<&Frame> {
        self.active.as_ref().map(|a| &a.frame)
    }

    /// Geometry from the last measurement.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        self.active.as_ref().map(|a| a.geometry)
    }

    /// Deadline of the earliest pending follow-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.active.as_ref().and_then(|a| a.timers.next_deadline())
    }

    /// The host surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The host surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the host surface, dropping the carousel.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Shows `target` with a transition.
    ///
    /// Out-of-range targets follow the edge rules: a looping carousel wraps,
    /// a non-looping one ignores the request.
    pub fn show(&mut self, target: i64, now: u64) {
        self.show_with(target, true, now);
    }

    /// Shows `target`, animated or not.
    pub fn show_with(&mut self, target: i64, animated: bool, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.show(&mut self.surface, target, animated, now);
        }
    }

    /// Steps forward, by one slide or a screen with full swipe.
    pub fn next(&mut self, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.step(&mut self.surface, true, now);
        }
    }

    /// Steps back, by one slide or a screen with full swipe.
    pub fn previous(&mut self, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.step(&mut self.surface, false, now);
        }
    }

    /// Handles activation (click, tap, keyboard) of a generated control.
    pub fn activate(&mut self, control: Control, now: u64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        match control {
            Control::Previous => {
                active.step(&mut self.surface, false, now);
            }
            Control::Next => {
                active.step(&mut self.surface, true, now);
            }
            Control::Dot(slide) => {
                if slide == 0 || slide > active.frame.len() {
                    debug!(slide, "ignoring activation of unknown dot");
                    return;
                }
                let mut target = i64::try_from(slide).unwrap_or(i64::MAX);
                if !active.config.infinite() {
                    // Slides past the last screen start are shown as part of it.
                    target = target.min(active.last_start());
                }
                active.show(&mut self.surface, target, true, now);
            }
        }
    }

    /// Touch start with `touch_count` active touches, the first at `pos`.
    pub fn touch_start(&mut self, touch_count: usize, pos: Point) {
        if let Some(swipe) = self.active.as_mut().and_then(|a| a.swipe.as_mut()) {
            swipe.start(touch_count, pos);
        }
    }

    /// Touch move to `pos`.
    pub fn touch_move(&mut self, pos: Point) -> TouchResponse {
        match self.active.as_mut() {
            Some(active) => active.touch_move(&mut self.surface, pos),
            None => TouchResponse::default(),
        }
    }

    /// Touch end at `pos`.
    pub fn touch_end(&mut self, pos: Point, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.touch_end(&mut self.surface, pos, now);
        }
    }

    /// Touch cancelled by the host; the strip settles on the current slide.
    pub fn touch_cancel(&mut self, now: u64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let was_tracking = active.swipe.as_ref().is_some_and(SwipeTracker::is_tracking);
        if let Some(swipe) = active.swipe.as_mut() {
            swipe.cancel();
        }
        if was_tracking {
            active.spring_back(&mut self.surface, now);
        }
    }

    /// Re-measures after the holder was resized and re-shows the current
    /// slide without animation.
    pub fn resize(&mut self, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.resize(&mut self.surface, now);
        }
    }

    /// Runs every follow-up due at or before `now`.
    pub fn tick(&mut self, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.tick(&mut self.surface, now);
        }
    }

    /// Pauses or resumes autoplay.
    ///
    /// Resuming arms a full interval from `now`. Has no effect when autoplay
    /// is not configured.
    pub fn set_autoplay_paused(&mut self, paused: bool, now: u64) {
        if let Some(active) = self.active.as_mut() {
            active.set_autoplay_paused(paused, now);
        }
    }

    /// Cancels every pending follow-up, asks the host to release its
    /// listeners and leaves the carousel inert.
    pub fn teardown(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.timers.clear();
            self.surface.release();
            debug!("carousel torn down");
        }
    }
}

impl Active {
    fn bind<S: Surface>(
        surface: &mut S,
        options: &CarouselOptions,
        now: u64,
    ) -> Result<Self, BindError> {
        let holder = surface.slide_holder().ok_or(BindError::MissingSlideHolder)?;
        if holder.slide_count == 0 {
            return Err(BindError::EmptySlideHolder);
        }
        let length = holder.slide_count;
        let config = Config::resolve(options, holder);

        let frame = Frame::build(length, config.animation, config.infinite());
        surface.build_frame(
            &frame,
            &FrameStyle {
                animation: config.animation,
                animation_duration: config.animation_timing,
                width: config.width.clone(),
            },
        );
        surface.build_controls(&ControlLayout::build(&config, length));

        let geometry = Geometry::from_measurement(surface.measure());
        if let Some(height) = geometry.frame_height(config.height_ratio) {
            surface.set_frame_height(height);
        }

        let nav = NavState::new(
            length,
            config.infinite(),
            config.animation,
            config.edge_policy,
            config.initial_position,
        );
        let swipe = config
            .capabilities
            .contains(Capabilities::TOUCH)
            .then(|| SwipeTracker::new(config.swipe_threshold));
        let autoplay = Autoplay::new(config.pause_timing);

        let mut active = Self {
            config,
            frame,
            geometry,
            nav,
            swipe,
            autoplay,
            timers: TimerQueue::new(),
            resnap: None,
            dot_update: None,
        };
        let initial = active.nav.position();
        active.navigate(surface, initial, false, now, Notify::Subscribers);
        debug!(
            slides = length,
            animation = ?active.config.animation,
            infinite = active.config.infinite(),
            "carousel bound"
        );
        Ok(active)
    }

    fn reported(&self) -> i64 {
        i64::try_from(self.nav.reported().get()).unwrap_or(1)
    }

    /// First slide of the last full screen.
    fn last_start(&self) -> i64 {
        let length = i64::try_from(self.frame.len()).unwrap_or(i64::MAX);
        let per_screen = i64::try_from(self.geometry.slides_per_screen).unwrap_or(1);
        (length - per_screen + 1).max(1)
    }

    fn step_size(&self) -> i64 {
        if self.config.capabilities.contains(Capabilities::FULL_SWIPE) {
            i64::try_from(self.geometry.slides_per_screen.max(1)).unwrap_or(1)
        } else {
            1
        }
    }

    /// Requests a user-facing show. Returns `true` if the request moved.
    fn show<S: Surface>(&mut self, surface: &mut S, target: i64, animated: bool, now: u64) -> bool {
        self.flush_resnap(surface, now);
        self.navigate(surface, target, animated, now, Notify::Subscribers)
    }

    fn step<S: Surface>(&mut self, surface: &mut S, forward: bool, now: u64) -> bool {
        let step = self.step_size();
        self.step_by(surface, forward, step, now)
    }

    /// Steps by `step` slides. A finite carousel stops at the start of its
    /// last screen.
    fn step_by<S: Surface>(&mut self, surface: &mut S, forward: bool, step: i64, now: u64) -> bool {
        self.flush_resnap(surface, now);
        let current = self.reported();
        let mut target = if forward {
            current + step
        } else {
            current - step
        };
        if !self.config.infinite() {
            let last_start = self.last_start();
            if forward {
                if current >= last_start {
                    debug!(current, "already on the last screen");
                    return false;
                }
                target = target.min(last_start);
            } else if current > 1 {
                target = target.max(1);
            }
        }
        self.navigate(surface, target, true, now, Notify::Subscribers)
    }

    fn spring_back<S: Surface>(&mut self, surface: &mut S, now: u64) {
        let current = self.reported();
        self.show(surface, current, true, now);
    }

    /// Settles a pending boundary re-snap right away.
    fn flush_resnap<S: Surface>(&mut self, surface: &mut S, now: u64) {
        if let Some(id) = self.resnap.take()
            && let Some(Deferred::Resnap { to, .. }) = self.timers.cancel(id)
        {
            trace!(to, "flushing pending re-snap");
            self.navigate(surface, to, false, now, Notify::Silent);
        }
    }

    fn navigate<S: Surface>(
        &mut self,
        surface: &mut S,
        requested: i64,
        animated: bool,
        now: u64,
        notify: Notify,
    ) -> bool {
        let Some(mv) = self.nav.request(requested, animated) else {
            debug!(requested, "navigation ignored at edge");
            return false;
        };
        self.cancel_follow_ups();

        self.apply_position(surface, mv.position, animated);
        if let Some(to) = mv.resnap {
            let id = self.timers.schedule_after(
                now,
                self.config.animation_timing,
                Deferred::Resnap {
                    to,
                    generation: mv.generation,
                },
            );
            self.resnap = Some(id);
        }
        self.update_controls(surface, mv.position, animated, now, mv.generation);

        if self.autoplay.is_enabled() {
            let delay = self
                .autoplay
                .delay_after(animated, self.config.animation_timing);
            self.autoplay.rearm(
                &mut self.timers,
                now,
                delay,
                Deferred::Advance {
                    generation: mv.generation,
                },
            );
        }

        if notify == Notify::Subscribers {
            surface.position_changed(mv.reported);
        }
        trace!(
            requested,
            position = mv.position,
            reported = mv.reported.get(),
            animated,
            generation = mv.generation,
            "navigated"
        );
        true
    }

    fn cancel_follow_ups(&mut self) {
        if let Some(id) = self.resnap.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.dot_update.take() {
            self.timers.cancel(id);
        }
    }

    fn apply_position<S: Surface>(&self, surface: &mut S, position: i64, animated: bool) {
        let Some(slot) = self.frame.slot_of(position) else {
            warn!(position, "no slot presents position");
            return;
        };
        surface.set_transition(animated);
        match self.config.animation {
            AnimationKind::Translate => surface.set_offset(self.geometry.offset_for_slot(slot)),
            AnimationKind::Fade => {
                for s in 0..self.frame.records().len() {
                    surface.set_slide_opacity(s, if s == slot { 1.0 } else { 0.0 });
                }
            }
        }
        surface.set_active_slide(slot);
    }

    fn update_controls<S: Surface>(
        &mut self,
        surface: &mut S,
        position: i64,
        animated: bool,
        now: u64,
        generation: u64,
    ) {
        let state = ControlState::project(
            position,
            self.frame.len(),
            self.geometry.slides_per_screen,
            self.config.capabilities,
        );
        if let Some(arrows) = state.arrows {
            surface.set_arrows(arrows);
        }
        if let Some(index) = state.active_dot {
            let delay = self.config.animation_timing / 2;
            if animated && delay > 0 {
                let id = self.timers.schedule_after(
                    now,
                    delay,
                    Deferred::DotUpdate { index, generation },
                );
                self.dot_update = Some(id);
            } else {
                surface.set_active_dot(index);
            }
        }
        if let Some(number) = state.slide_number {
            surface.set_slide_number(number);
        }
    }

    fn touch_move<S: Surface>(&mut self, surface: &mut S, pos: Point) -> TouchResponse {
        let Some(sample) = self.swipe.as_mut().and_then(|s| s.update(pos)) else {
            return TouchResponse::default();
        };
        if sample.axis != SwipeAxis::Horizontal {
            return TouchResponse::default();
        }
        let mut response = TouchResponse {
            prevent_default: true,
            dragged: false,
        };

        let dx = sample.delta.x;
        if !self.config.infinite() {
            let current = self.nav.position();
            if (dx < 0.0 && current >= self.last_start()) || (dx > 0.0 && current <= 1) {
                return response;
            }
        }
        if self.config.animation == AnimationKind::Translate
            && let Some(slot) = self.frame.slot_of(self.nav.position())
        {
            surface.set_transition(false);
            surface.set_offset(self.geometry.offset_for_slot(slot) + dx);
            response.dragged = true;
        }
        response
    }

    fn touch_end<S: Surface>(&mut self, surface: &mut S, pos: Point, now: u64) {
        let Some(swipe) = self.swipe.as_mut() else {
            return;
        };
        let decision = swipe.end(pos);
        trace!(?decision, "swipe ended");
        let moved = match decision {
            SwipeDecision::Ignored => return,
            SwipeDecision::Next => self.step(surface, true, now),
            SwipeDecision::Previous => self.step(surface, false, now),
            SwipeDecision::SpringBack => false,
        };
        if !moved {
            self.spring_back(surface, now);
        }
    }

    fn resize<S: Surface>(&mut self, surface: &mut S, now: u64) {
        self.flush_resnap(surface, now);
        self.geometry = Geometry::from_measurement(surface.measure());
        if let Some(height) = self.geometry.frame_height(self.config.height_ratio) {
            surface.set_frame_height(height);
        }
        debug!(
            slide_width = self.geometry.slide_width,
            slides_per_screen = self.geometry.slides_per_screen,
            "carousel resized"
        );
        let current = self.reported();
        self.navigate(surface, current, false, now, Notify::Subscribers);
    }

    fn tick<S: Surface>(&mut self, surface: &mut S, now: u64) {
        while let Some(fired) = self.timers.pop_due(now) {
            // Follow-ups run at their own deadline to keep the cadence.
            let at = fired.deadline;
            match fired.payload {
                Deferred::Resnap { to, generation } => {
                    if self.resnap == Some(fired.id) {
                        self.resnap = None;
                    }
                    if generation != self.nav.generation() {
                        trace!(generation, "dropping stale re-snap");
                        continue;
                    }
                    self.navigate(surface, to, false, at, Notify::Silent);
                }
                Deferred::DotUpdate { index, generation } => {
                    if self.dot_update == Some(fired.id) {
                        self.dot_update = None;
                    }
                    if generation != self.nav.generation() {
                        trace!(generation, "dropping stale dot update");
                        continue;
                    }
                    surface.set_active_dot(index);
                }
                Deferred::Advance { generation } => {
                    let armed = self.autoplay.fired(fired.id);
                    if !armed || generation != self.nav.generation() {
                        trace!(generation, "dropping stale autoplay advance");
                        continue;
                    }
                    if !self.step_by(surface, true, 1, at) {
                        debug!("autoplay reached the last screen");
                    }
                }
            }
        }
    }

    fn set_autoplay_paused(&mut self, paused: bool, now: u64) {
        if !self.config.autoplay() {
            return;
        }
        self.autoplay.set_paused(paused);
        if paused {
            self.autoplay.cancel(&mut self.timers);
        } else if self.autoplay.pending().is_none() {
            let generation = self.nav.generation();
            let interval = self.autoplay.interval();
            self.autoplay.rearm(
                &mut self.timers,
                now,
                interval,
                Deferred::Advance { generation },
            );
        }
        debug!(paused, "autoplay toggled");
    }
}
