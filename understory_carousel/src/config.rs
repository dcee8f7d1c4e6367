// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options and their resolution into a [`Config`].
//!
//! [`CarouselOptions`] mirrors the loosely typed option record a host page
//! passes at construction. Every field has a neutral value meaning "use the
//! default", so a host can fill in only what it cares about. [`Config::resolve`]
//! folds those options together with what the host markup declares (see
//! [`SlideHolder`]) into the settings the component actually runs with.
//!
//! ```
//! use understory_carousel::{AnimationKind, CarouselOptions, Capabilities, Config, SlideHolder};
//!
//! let options = CarouselOptions::default()
//!     .with_show_slide_number(true)
//!     .with_pause_timing(3_000);
//! let holder = SlideHolder { slide_count: 4, fade_marker: true };
//!
//! let config = Config::resolve(&options, holder);
//! assert_eq!(config.animation, AnimationKind::Fade);
//! assert_eq!(config.animation_timing, 200);
//! // The slide number replaces the dots.
//! assert!(config.capabilities.contains(Capabilities::SLIDE_NUMBER));
//! assert!(!config.capabilities.contains(Capabilities::DOTS));
//! assert!(config.capabilities.contains(Capabilities::AUTOPLAY));
//! ```

use alloc::format;
use alloc::string::{String, ToString};

use crate::surface::SlideHolder;

/// Transition duration used when the options leave it unset (milliseconds).
pub const DEFAULT_ANIMATION_TIMING: u64 = 200;

/// Horizontal travel needed for a swipe to count as navigation (pixels).
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// How slides transition from one to the next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum AnimationKind {
    /// Slides sit side by side and the strip is translated horizontally.
    #[default]
    Translate,
    /// Slides are stacked and cross-faded through opacity.
    Fade,
}

/// What a non-looping carousel does with a request past its edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum EdgePolicy {
    /// Requests past either edge are ignored.
    #[default]
    ClampAndStop,
    /// Requests past the end are ignored; requests before the start show
    /// the first slide.
    SnapUnderToFirst,
}

/// Visual style hint for the dot indicators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum DotStyle {
    /// Round dots.
    #[default]
    Dots,
    /// Short horizontal bars.
    Lines,
}

/// Accessible labels for the generated controls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ControlLabels {
    /// Label of the "previous" arrow.
    pub previous: String,
    /// Label of the "next" arrow.
    pub next: String,
    /// Prefix of each dot label; the 1-based slide number is appended.
    pub dot_prefix: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            previous: "Previous".to_string(),
            next: "Next".to_string(),
            dot_prefix: "slide".to_string(),
        }
    }
}

impl ControlLabels {
    /// Returns the label of the dot for the 1-based `slide`.
    #[must_use]
    pub fn dot(&self, slide: usize) -> String {
        format!("{} {slide}", self.dot_prefix)
    }
}

/// Options record supplied at construction.
///
/// Zero, `None` and `false` mean "default" for every field, matching how the
/// host option record is usually written by hand.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase", default)
)]
pub struct CarouselOptions {
    /// Duration of one transition in milliseconds. `0` selects
    /// [`DEFAULT_ANIMATION_TIMING`].
    pub animation_timing: u64,
    /// Autoplay interval in milliseconds. `0` disables autoplay.
    pub pause_timing: u64,
    /// Wrap around past the last and first slides instead of stopping.
    #[cfg_attr(feature = "serde", serde(alias = "infiniteCycles"))]
    pub infinite_cycle: bool,
    /// Show previous/next arrows. Defaults to `true`.
    pub show_arrows: Option<bool>,
    /// Show one dot per slide. Defaults to `true`; forced off when the slide
    /// number is shown.
    pub show_dots: Option<bool>,
    /// Show a `position/length` text instead of dots.
    pub show_slide_number: bool,
    /// Advance by a full screen of slides instead of one slide.
    pub full_swipe: bool,
    /// Width applied to the frame by the host, as a CSS-like length.
    pub width: Option<String>,
    /// Frame height as a percentage of its measured width.
    pub height: Option<f64>,
    /// Visual style of the dots.
    pub dot_style: DotStyle,
    /// 1-based slide shown first. `None` or `0` select the first slide.
    pub initial_position: Option<i64>,
    /// Do not interpret touch gestures.
    pub prevent_touch_events: bool,
    /// Transition style. When unset, the holder's fade marker decides.
    pub animation: Option<AnimationKind>,
    /// Behavior of a non-looping carousel at its edges.
    pub edge_policy: EdgePolicy,
    /// Swipe distance in pixels. Defaults to [`DEFAULT_SWIPE_THRESHOLD`].
    pub swipe_threshold: Option<f64>,
    /// Accessible labels for the generated controls.
    pub labels: ControlLabels,
}

impl CarouselOptions {
    /// Sets the transition duration in milliseconds.
    #[must_use]
    pub fn with_animation_timing(mut self, millis: u64) -> Self {
        self.animation_timing = millis;
        self
    }

    /// Sets the autoplay interval in milliseconds (`0` disables autoplay).
    #[must_use]
    pub fn with_pause_timing(mut self, millis: u64) -> Self {
        self.pause_timing = millis;
        self
    }

    /// Enables or disables wrap-around navigation.
    #[must_use]
    pub fn with_infinite_cycle(mut self, infinite: bool) -> Self {
        self.infinite_cycle = infinite;
        self
    }

    /// Shows or hides the arrows.
    #[must_use]
    pub fn with_show_arrows(mut self, show: bool) -> Self {
        self.show_arrows = Some(show);
        self
    }

    /// Shows or hides the dots.
    #[must_use]
    pub fn with_show_dots(mut self, show: bool) -> Self {
        self.show_dots = Some(show);
        self
    }

    /// Shows or hides the slide-number text.
    #[must_use]
    pub fn with_show_slide_number(mut self, show: bool) -> Self {
        self.show_slide_number = show;
        self
    }

    /// Advances by a full screen of slides.
    #[must_use]
    pub fn with_full_swipe(mut self, full: bool) -> Self {
        self.full_swipe = full;
        self
    }

    /// Sets the frame width hint.
    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Sets the frame height as a percentage of its width.
    #[must_use]
    pub fn with_height(mut self, percent: f64) -> Self {
        self.height = Some(percent);
        self
    }

    /// Sets the dot style.
    #[must_use]
    pub fn with_dot_style(mut self, style: DotStyle) -> Self {
        self.dot_style = style;
        self
    }

    /// Sets the 1-based slide shown first.
    #[must_use]
    pub fn with_initial_position(mut self, position: i64) -> Self {
        self.initial_position = Some(position);
        self
    }

    /// Disables touch gesture interpretation.
    #[must_use]
    pub fn with_prevent_touch_events(mut self, prevent: bool) -> Self {
        self.prevent_touch_events = prevent;
        self
    }

    /// Forces a transition style regardless of the holder marker.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Sets the edge policy for non-looping carousels.
    #[must_use]
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Sets the swipe threshold in pixels.
    #[must_use]
    pub fn with_swipe_threshold(mut self, pixels: f64) -> Self {
        self.swipe_threshold = Some(pixels);
        self
    }

    /// Sets the accessible control labels.
    #[must_use]
    pub fn with_labels(mut self, labels: ControlLabels) -> Self {
        self.labels = labels;
        self
    }
}

bitflags::bitflags! {
    /// Features enabled on a resolved carousel.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Previous/next arrows are generated.
        const ARROWS       = 0b0000_0001;
        /// One dot per slide is generated.
        const DOTS         = 0b0000_0010;
        /// The `position/length` text is generated.
        const SLIDE_NUMBER = 0b0000_0100;
        /// Touch gestures are interpreted.
        const TOUCH        = 0b0000_1000;
        /// An autoplay timer advances the carousel.
        const AUTOPLAY     = 0b0001_0000;
        /// Navigation wraps around.
        const INFINITE     = 0b0010_0000;
        /// Steps advance by a screen of slides.
        const FULL_SWIPE   = 0b0100_0000;
    }
}

/// Settings a bound carousel runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Transition style.
    pub animation: AnimationKind,
    /// Duration of one transition in milliseconds; never zero.
    pub animation_timing: u64,
    /// Autoplay interval in milliseconds; zero when autoplay is off.
    pub pause_timing: u64,
    /// Enabled features.
    pub capabilities: Capabilities,
    /// Edge behavior when not looping.
    pub edge_policy: EdgePolicy,
    /// Swipe distance in pixels; finite and positive.
    pub swipe_threshold: f64,
    /// Requested first slide, before clamping to the slide count.
    pub initial_position: i64,
    /// Dot style hint.
    pub dot_style: DotStyle,
    /// Frame width hint.
    pub width: Option<String>,
    /// Frame height as a percentage of width; finite and positive.
    pub height_ratio: Option<f64>,
    /// Control labels.
    pub labels: ControlLabels,
}

impl Config {
    /// Resolves `options` against the host markup.
    #[must_use]
    pub fn resolve(options: &CarouselOptions, holder: SlideHolder) -> Self {
        let animation = options.animation.unwrap_or(if holder.fade_marker {
            AnimationKind::Fade
        } else {
            AnimationKind::Translate
        });

        let animation_timing = match options.animation_timing {
            0 => DEFAULT_ANIMATION_TIMING,
            millis => millis,
        };

        let mut capabilities = Capabilities::empty();
        capabilities.set(Capabilities::ARROWS, options.show_arrows.unwrap_or(true));
        // The slide number prevails over dots.
        capabilities.set(
            Capabilities::DOTS,
            options.show_dots.unwrap_or(true) && !options.show_slide_number,
        );
        capabilities.set(Capabilities::SLIDE_NUMBER, options.show_slide_number);
        capabilities.set(Capabilities::TOUCH, !options.prevent_touch_events);
        capabilities.set(Capabilities::AUTOPLAY, options.pause_timing > 0);
        capabilities.set(Capabilities::INFINITE, options.infinite_cycle);
        capabilities.set(Capabilities::FULL_SWIPE, options.full_swipe);

        let swipe_threshold = options
            .swipe_threshold
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD);

        let initial_position = match options.initial_position {
            None | Some(0) => 1,
            Some(p) => p,
        };

        Self {
            animation,
            animation_timing,
            pause_timing: options.pause_timing,
            capabilities,
            edge_policy: options.edge_policy,
            swipe_threshold,
            initial_position,
            dot_style: options.dot_style,
            width: options.width.clone(),
            height_ratio: options.height.filter(|h| h.is_finite() && *h > 0.0),
            labels: options.labels.clone(),
        }
    }

    /// Returns `true` if navigation wraps around.
    #[must_use]
    pub fn infinite(&self) -> bool {
        self.capabilities.contains(Capabilities::INFINITE)
    }

    /// Returns `true` if an autoplay timer drives the carousel.
    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.capabilities.contains(Capabilities::AUTOPLAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(fade_marker: bool) -> SlideHolder {
        SlideHolder {
            slide_count: 3,
            fade_marker,
        }
    }

    #[test]
    fn defaults_match_latest_markup() {
        let config = Config::resolve(&CarouselOptions::default(), holder(false));
        assert_eq!(config.animation, AnimationKind::Translate);
        assert_eq!(config.animation_timing, DEFAULT_ANIMATION_TIMING);
        assert_eq!(config.pause_timing, 0);
        assert_eq!(
            config.capabilities,
            Capabilities::ARROWS | Capabilities::DOTS | Capabilities::TOUCH
        );
        assert_eq!(config.initial_position, 1);
        assert_eq!(config.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert!(!config.infinite());
        assert!(!config.autoplay());
    }

    #[test]
    fn fade_marker_selects_fade_unless_overridden() {
        let config = Config::resolve(&CarouselOptions::default(), holder(true));
        assert_eq!(config.animation, AnimationKind::Fade);

        let forced = CarouselOptions::default().with_animation(AnimationKind::Translate);
        let config = Config::resolve(&forced, holder(true));
        assert_eq!(config.animation, AnimationKind::Translate);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let options = CarouselOptions::default()
            .with_animation_timing(0)
            .with_initial_position(0)
            .with_swipe_threshold(-3.0)
            .with_height(f64::NAN);
        let config = Config::resolve(&options, holder(false));
        assert_eq!(config.animation_timing, DEFAULT_ANIMATION_TIMING);
        assert_eq!(config.initial_position, 1);
        assert_eq!(config.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(config.height_ratio, None);
    }

    #[test]
    fn explicit_choices_are_kept() {
        let options = CarouselOptions::default()
            .with_show_arrows(false)
            .with_show_dots(false)
            .with_prevent_touch_events(true)
            .with_infinite_cycle(true)
            .with_full_swipe(true)
            .with_swipe_threshold(25.0)
            .with_height(56.25)
            .with_width("80%");
        let config = Config::resolve(&options, holder(false));
        assert_eq!(
            config.capabilities,
            Capabilities::INFINITE | Capabilities::FULL_SWIPE
        );
        assert_eq!(config.swipe_threshold, 25.0);
        assert_eq!(config.height_ratio, Some(56.25));
        assert_eq!(config.width.as_deref(), Some("80%"));
    }

    #[test]
    fn dot_labels_append_slide_number() {
        let labels = ControlLabels::default();
        assert_eq!(labels.dot(4), "slide 4");
    }
}
