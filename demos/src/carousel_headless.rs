// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless carousel walkthrough.
//!
//! Drives a looping carousel with a simulated clock: autoplay, a swipe, a
//! dot click and a resize. The surface prints the slide strip after every
//! position change.
//!
//! Run:
//! - `cargo run -p understory_carousel_demos --bin carousel_headless`
//! - `RUST_LOG=understory_carousel=trace cargo run -p understory_carousel_demos --bin carousel_headless`

use kurbo::{Point, Size};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use understory_carousel::{
    ArrowState, Carousel, CarouselOptions, Control, ControlLayout, Frame, FrameStyle, Measurement,
    SlideHolder, SlideIndex, SlideNumber, SlideRecord, Surface,
};

const OPTIONS: &str = r#"{
    "pauseTiming": 2000,
    "animationTiming": 300,
    "infiniteCycles": true,
    "height": 56.25
}"#;

struct Terminal {
    slides: usize,
    width: f64,
    records: Vec<SlideRecord>,
    dots: usize,
    active_slot: usize,
    active_dot: usize,
    arrows: Option<ArrowState>,
}

impl Terminal {
    fn new(slides: usize) -> Self {
        Self {
            slides,
            width: 640.0,
            records: Vec::new(),
            dots: 0,
            active_slot: 0,
            active_dot: 0,
            arrows: None,
        }
    }

    fn render(&self) -> String {
        let mut line = String::new();
        if let Some(arrows) = self.arrows {
            line.push_str(if arrows.previous { "< " } else { "  " });
        }
        for (slot, record) in self.records.iter().enumerate() {
            let mark = if record.is_clone() { '\'' } else { ' ' };
            if slot == self.active_slot {
                line.push_str(&format!("[{}{mark}]", record.source));
            } else {
                line.push_str(&format!(" {}{mark} ", record.source));
            }
        }
        if let Some(arrows) = self.arrows {
            line.push_str(if arrows.next { " >" } else { "  " });
        }
        line.push_str("   ");
        for dot in 0..self.dots {
            line.push(if dot == self.active_dot { '●' } else { '○' });
        }
        line
    }
}

impl Surface for Terminal {
    fn slide_holder(&self) -> Option<SlideHolder> {
        Some(SlideHolder {
            slide_count: self.slides,
            fade_marker: false,
        })
    }

    fn measure(&self) -> Measurement {
        Measurement {
            holder: Size::new(self.width, 0.0),
            slide: Size::new(self.width, 0.0),
        }
    }

    fn build_frame(&mut self, frame: &Frame, style: &FrameStyle) {
        self.records = frame.records().to_vec();
        info!(
            slots = self.records.len(),
            duration_ms = style.animation_duration,
            "frame built"
        );
    }

    fn build_controls(&mut self, layout: &ControlLayout) {
        self.dots = layout.dots.len();
        for dot in &layout.dots {
            info!(role = dot.role, label = %dot.label, "dot");
        }
    }

    fn set_frame_height(&mut self, height: f64) {
        info!(height, "frame height");
    }

    fn set_transition(&mut self, _enabled: bool) {}

    fn set_offset(&mut self, _offset_x: f64) {}

    fn set_slide_opacity(&mut self, _slot: usize, _opacity: f64) {}

    fn set_active_slide(&mut self, slot: usize) {
        self.active_slot = slot;
    }

    fn set_arrows(&mut self, arrows: ArrowState) {
        self.arrows = Some(arrows);
    }

    fn set_active_dot(&mut self, index: usize) {
        self.active_dot = index;
    }

    fn set_slide_number(&mut self, _number: SlideNumber) {}

    fn position_changed(&mut self, position: SlideIndex) {
        println!("slide {position}: {}", self.render());
    }

    fn release(&mut self) {
        info!("listeners released");
    }
}

/// Advances the simulated clock to `until`, firing every deadline on the way.
fn run_until(carousel: &mut Carousel<Terminal>, now: &mut u64, until: u64) {
    while let Some(deadline) = carousel.next_deadline() {
        if deadline > until {
            break;
        }
        *now = deadline;
        carousel.tick(deadline);
    }
    *now = until;
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "understory_carousel=debug,carousel_headless=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options: CarouselOptions = match serde_json::from_str(OPTIONS) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };

    let mut now = 0;
    let mut carousel = Carousel::create(Terminal::new(4), &options, now);

    info!("autoplay for 7 seconds");
    run_until(&mut carousel, &mut now, 7_000);

    info!("swipe right");
    carousel.touch_start(1, Point::new(300.0, 200.0));
    carousel.touch_move(Point::new(340.0, 205.0));
    carousel.touch_end(Point::new(400.0, 205.0), now);
    run_until(&mut carousel, &mut now, 8_000);

    info!("click the last dot");
    carousel.activate(Control::Dot(4), now);
    run_until(&mut carousel, &mut now, 9_000);

    info!("window resized");
    carousel.surface_mut().width = 480.0;
    carousel.resize(now);

    info!("autoplay paused");
    carousel.set_autoplay_paused(true, now);
    run_until(&mut carousel, &mut now, 20_000);

    carousel.teardown();
}
