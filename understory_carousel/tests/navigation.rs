// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation as seen by a host: binding, edges, wrap-around and controls.

mod common;

use common::{Call, RecordingSurface};
use understory_carousel::{
    AnimationKind, ArrowState, BindError, Carousel, CarouselOptions, Control, EdgePolicy,
};

fn looping() -> CarouselOptions {
    CarouselOptions::default().with_infinite_cycle(true)
}

#[test]
fn bind_builds_once_and_shows_the_first_slide() {
    let carousel = Carousel::bind(RecordingSurface::new(3), &CarouselOptions::default(), 0).unwrap();
    assert_eq!(
        carousel.surface().calls,
        [
            Call::BuildFrame(3),
            Call::BuildControls,
            Call::Transition(false),
            Call::Offset(0.0),
            Call::ActiveSlide(0),
            Call::Arrows(ArrowState {
                previous: false,
                next: true
            }),
            Call::ActiveDot(0),
            Call::Position(1),
        ]
    );
    assert_eq!(carousel.position().unwrap().get(), 1);
    assert_eq!(carousel.len(), 3);
    assert_eq!(carousel.next_deadline(), None);
}

#[test]
fn bind_passes_frame_style_and_height() {
    let options = CarouselOptions::default()
        .with_animation_timing(350)
        .with_width("80%")
        .with_height(50.0);
    let carousel = Carousel::bind(RecordingSurface::new(2), &options, 0).unwrap();
    let surface = carousel.surface();
    let style = surface.style.as_ref().unwrap();
    assert_eq!(style.animation_duration, 350);
    assert_eq!(style.width.as_deref(), Some("80%"));
    assert!(surface.calls.contains(&Call::FrameHeight(200.0)));
}

#[test]
fn initial_position_is_clamped() {
    let options = CarouselOptions::default().with_initial_position(9);
    let carousel = Carousel::bind(RecordingSurface::new(4), &options, 0).unwrap();
    assert_eq!(carousel.position().unwrap().get(), 4);
    assert_eq!(carousel.surface().positions(), [4]);
}

#[test]
fn binding_failures_leave_an_inert_carousel() {
    let err = Carousel::bind(
        RecordingSurface::without_holder(),
        &CarouselOptions::default(),
        0,
    )
    .unwrap_err();
    assert_eq!(err, BindError::MissingSlideHolder);

    let err = Carousel::bind(RecordingSurface::new(0), &CarouselOptions::default(), 0).unwrap_err();
    assert_eq!(err, BindError::EmptySlideHolder);

    let mut inert = Carousel::create(
        RecordingSurface::without_holder(),
        &CarouselOptions::default(),
        0,
    );
    assert!(!inert.is_active());
    inert.next(10);
    inert.show(2, 10);
    inert.activate(Control::Dot(1), 10);
    inert.resize(10);
    inert.tick(10_000);
    assert_eq!(inert.position(), None);
    assert!(inert.is_empty());
    assert!(inert.surface().calls.is_empty());
}

#[test]
fn finite_carousel_ignores_requests_past_its_edges() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &CarouselOptions::default(), 0).unwrap();
    carousel.surface_mut().take();

    carousel.previous(0);
    carousel.show(0, 0);
    carousel.show(5, 0);
    assert!(carousel.surface().calls.is_empty());

    carousel.show(3, 0);
    carousel.surface_mut().take();
    carousel.next(500);
    carousel.activate(Control::Next, 500);
    assert!(carousel.surface().calls.is_empty());
    assert_eq!(carousel.position().unwrap().get(), 3);
    assert_eq!(
        carousel.surface().last_arrows(),
        None,
        "no control refresh for an ignored request"
    );
}

#[test]
fn snap_under_to_first_policy() {
    let options = CarouselOptions::default()
        .with_edge_policy(EdgePolicy::SnapUnderToFirst)
        .with_initial_position(2);
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &options, 0).unwrap();
    carousel.surface_mut().take();

    carousel.show(-4, 0);
    assert_eq!(carousel.position().unwrap().get(), 1);
    assert_eq!(carousel.surface().positions(), [1]);

    carousel.show(4, 0);
    assert_eq!(carousel.position().unwrap().get(), 1);
}

#[test]
fn looping_past_the_end_animates_onto_the_clone_then_resnaps() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &looping(), 0).unwrap();
    assert_eq!(carousel.frame().unwrap().clone_count(), 2);
    carousel.show(3, 0);
    carousel.tick(1_000);
    carousel.surface_mut().take();

    carousel.show(4, 1_000);
    assert_eq!(
        carousel.surface().calls,
        [
            Call::Transition(true),
            Call::Offset(-1600.0),
            Call::ActiveSlide(4),
            Call::Arrows(ArrowState {
                previous: true,
                next: true
            }),
            Call::Position(1),
        ]
    );
    assert_eq!(carousel.position().unwrap().get(), 1);
    assert_eq!(carousel.internal_position(), Some(4));
    assert!(!carousel.is_settled());
    assert_eq!(carousel.next_deadline(), Some(1_100));

    carousel.tick(1_199);
    assert_eq!(carousel.surface().last_dot(), Some(0));
    assert!(!carousel.is_settled());

    carousel.tick(1_200);
    assert!(carousel.is_settled());
    assert_eq!(carousel.internal_position(), Some(1));
    assert_eq!(carousel.surface().last_offset(), Some(-400.0));
    assert!(carousel.surface().calls.contains(&Call::Transition(false)));
    // The silent re-snap does not notify a second time.
    assert_eq!(carousel.surface().positions(), [1]);
    assert_eq!(carousel.next_deadline(), None);
}

#[test]
fn looping_before_the_start_lands_on_the_last_slide() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &looping(), 0).unwrap();
    carousel.surface_mut().take();

    carousel.previous(0);
    assert_eq!(carousel.internal_position(), Some(0));
    assert_eq!(carousel.surface().last_offset(), Some(0.0));
    assert_eq!(carousel.surface().positions(), [3]);

    carousel.tick(200);
    assert_eq!(carousel.internal_position(), Some(3));
    assert_eq!(carousel.surface().last_offset(), Some(-1200.0));
    assert_eq!(carousel.surface().last_dot(), Some(2));
}

#[test]
fn a_new_request_settles_a_pending_resnap_first() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &looping(), 0).unwrap();
    carousel.show(3, 0);
    carousel.next(1_000);
    carousel.surface_mut().take();

    carousel.next(1_050);
    assert_eq!(carousel.surface().offsets(), [-400.0, -800.0]);
    assert_eq!(carousel.surface().positions(), [2]);
    assert!(carousel.is_settled());

    // Nothing stale fires later.
    carousel.tick(5_000);
    assert_eq!(carousel.surface().last_offset(), Some(-800.0));
    assert_eq!(carousel.position().unwrap().get(), 2);
    assert_eq!(carousel.surface().last_dot(), Some(1));
}

#[test]
fn fade_wraps_without_clones() {
    let mut carousel = Carousel::bind(RecordingSurface::fade(3), &looping(), 0).unwrap();
    assert_eq!(carousel.config().unwrap().animation, AnimationKind::Fade);
    assert_eq!(carousel.frame().unwrap().clone_count(), 0);
    assert!(carousel.surface().calls.contains(&Call::Opacity(0, 1.0)));
    carousel.surface_mut().take();

    carousel.previous(0);
    assert_eq!(
        &carousel.surface().calls[..4],
        [
            Call::Transition(true),
            Call::Opacity(0, 0.0),
            Call::Opacity(1, 0.0),
            Call::Opacity(2, 1.0),
        ]
    );
    assert!(carousel.is_settled());
    assert_eq!(carousel.surface().positions(), [3]);
    assert!(carousel.surface().offsets().is_empty());
}

#[test]
fn showing_the_same_slide_twice_is_idempotent() {
    let mut carousel = Carousel::bind(RecordingSurface::new(4), &CarouselOptions::default(), 0).unwrap();
    carousel.show(2, 0);
    carousel.tick(1_000);
    let offset = carousel.surface().last_offset();
    carousel.show(2, 1_000);
    carousel.tick(2_000);
    assert_eq!(carousel.surface().last_offset(), offset);
    assert_eq!(carousel.position().unwrap().get(), 2);
    assert_eq!(carousel.surface().last_dot(), Some(1));
    assert_eq!(carousel.surface().positions(), [1, 2, 2]);
}

#[test]
fn slide_number_replaces_dots() {
    let options = CarouselOptions::default().with_show_slide_number(true);
    let mut carousel = Carousel::bind(RecordingSurface::new(5), &options, 0).unwrap();
    assert!(carousel.surface().layout.as_ref().unwrap().dots.is_empty());
    assert_eq!(carousel.surface().last_number().as_deref(), Some("1/5"));

    carousel.show(3, 0);
    assert_eq!(carousel.surface().last_number().as_deref(), Some("3/5"));
    carousel.tick(1_000);
    assert_eq!(carousel.surface().last_dot(), None);
}

#[test]
fn dot_update_lands_halfway_through_the_transition() {
    let options = CarouselOptions::default().with_animation_timing(400);
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &options, 0).unwrap();
    carousel.surface_mut().take();

    carousel.show(2, 0);
    assert_eq!(carousel.surface().last_dot(), None);
    assert_eq!(carousel.next_deadline(), Some(200));

    carousel.tick(199);
    assert_eq!(carousel.surface().last_dot(), None);
    carousel.tick(200);
    assert_eq!(carousel.surface().last_dot(), Some(1));
}

#[test]
fn dots_track_the_reported_position_after_settling() {
    let mut carousel = Carousel::bind(RecordingSurface::new(4), &looping(), 0).unwrap();
    let mut now = 0;
    for _ in 0..9 {
        carousel.next(now);
        now += 1_000;
        carousel.tick(now);
        let position = carousel.position().unwrap();
        assert_eq!(carousel.surface().last_dot(), Some(position.zero_based()));
    }
    assert_eq!(carousel.position().unwrap().get(), 2);
}

#[test]
fn dot_activation_shows_that_slide() {
    let mut carousel = Carousel::bind(RecordingSurface::new(4), &CarouselOptions::default(), 0).unwrap();
    carousel.surface_mut().take();

    carousel.activate(Control::Dot(3), 0);
    assert_eq!(carousel.surface().positions(), [3]);

    carousel.activate(Control::Dot(0), 0);
    carousel.activate(Control::Dot(9), 0);
    assert_eq!(carousel.surface().positions(), [3]);

    carousel.activate(Control::Previous, 0);
    assert_eq!(carousel.position().unwrap().get(), 2);
}

#[test]
fn dots_past_the_last_screen_show_the_last_screen() {
    // 900px holder and 300px slides: three slides per screen.
    let mut carousel = Carousel::bind(
        RecordingSurface::with_widths(6, 900.0, 300.0),
        &CarouselOptions::default(),
        0,
    )
    .unwrap();

    carousel.activate(Control::Dot(6), 0);
    assert_eq!(carousel.position().unwrap().get(), 4);
    assert_eq!(carousel.surface().last_offset(), Some(-900.0));

    carousel.activate(Control::Dot(1), 0);
    carousel.activate(Control::Dot(5), 0);
    assert_eq!(carousel.position().unwrap().get(), 4);
    assert_eq!(carousel.surface().positions(), [1, 4, 1, 4]);
}

#[test]
fn reshowing_a_looping_carousel_keeps_its_frame() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &looping(), 0).unwrap();
    carousel.show(2, 0);
    carousel.tick(1_000);
    carousel.show_with(2, false, 1_000);
    carousel.resize(1_000);
    carousel.tick(2_000);

    assert_eq!(carousel.frame().unwrap().clone_count(), 2);
    assert_eq!(carousel.surface().frame.as_ref().unwrap().clone_count(), 2);
    assert_eq!(
        carousel.surface().layout.as_ref().unwrap().dots.len(),
        carousel.len()
    );
    let calls = &carousel.surface().calls;
    let frames = calls
        .iter()
        .filter(|call| matches!(call, Call::BuildFrame(_)))
        .count();
    let controls = calls
        .iter()
        .filter(|call| matches!(call, Call::BuildControls))
        .count();
    assert_eq!((frames, controls), (1, 1));
    assert_eq!(carousel.position().unwrap().get(), 2);
}

#[test]
fn full_swipe_steps_by_a_screen() {
    let options = CarouselOptions::default().with_full_swipe(true);
    // 900px holder and 300px slides: three slides per screen.
    let mut carousel = Carousel::bind(RecordingSurface::with_widths(6, 900.0, 300.0), &options, 0).unwrap();
    assert_eq!(carousel.geometry().unwrap().slides_per_screen, 3);

    carousel.next(0);
    assert_eq!(carousel.position().unwrap().get(), 4);
    assert_eq!(carousel.surface().last_offset(), Some(-900.0));
    assert_eq!(
        carousel.surface().last_arrows(),
        Some(ArrowState {
            previous: true,
            next: false
        })
    );

    carousel.next(0);
    assert_eq!(carousel.position().unwrap().get(), 4);

    carousel.previous(0);
    assert_eq!(carousel.position().unwrap().get(), 1);
}

#[test]
fn resize_remeasures_and_reshows_without_animation() {
    let options = CarouselOptions::default().with_height(50.0);
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &options, 0).unwrap();
    carousel.show(2, 0);
    carousel.tick(1_000);
    assert_eq!(carousel.surface().last_offset(), Some(-400.0));
    carousel.surface_mut().take();

    carousel.surface_mut().measurement.holder.width = 500.0;
    carousel.surface_mut().measurement.slide.width = 500.0;
    carousel.resize(1_000);

    let calls = &carousel.surface().calls;
    assert_eq!(calls[0], Call::FrameHeight(250.0));
    assert!(calls.contains(&Call::Transition(false)));
    assert_eq!(carousel.surface().last_offset(), Some(-500.0));
    assert_eq!(carousel.surface().positions(), [2]);
    assert_eq!(carousel.surface().last_dot(), Some(1));
}

#[test]
fn resize_during_a_resnap_settles_on_the_real_slide() {
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &looping(), 0).unwrap();
    carousel.show(3, 0);
    carousel.next(1_000);
    carousel.surface_mut().take();

    carousel.resize(1_050);
    assert!(carousel.is_settled());
    assert_eq!(carousel.surface().last_offset(), Some(-400.0));
    assert_eq!(carousel.surface().positions(), [1]);
    assert_eq!(carousel.next_deadline(), None);
}

#[test]
fn teardown_cancels_everything_and_releases_the_host() {
    let options = looping().with_pause_timing(1_000);
    let mut carousel = Carousel::bind(RecordingSurface::new(3), &options, 0).unwrap();
    carousel.show(3, 0);
    carousel.next(10);
    assert!(carousel.next_deadline().is_some());

    carousel.teardown();
    assert!(!carousel.is_active());
    assert_eq!(carousel.next_deadline(), None);
    assert_eq!(carousel.surface().calls.last(), Some(&Call::Release));
    carousel.surface_mut().take();

    carousel.tick(100_000);
    carousel.next(100_000);
    carousel.teardown();
    assert!(carousel.into_surface().calls.is_empty());
}
