//! Overlay widget: refresh tick, resize animation and painting.
//!
//! Two independent timers drive the widget. The refresh tick samples the
//! metrics source once per [`TICK_INTERVAL`] regardless of animation
//! state; the frame timer only runs while the geometry is animating.

use crate::metrics::{MetricSample, MetricsSource};
use crate::platform::Profile;
use crate::shared::SharedContext;
use crate::ui::components::MetricLabel;
use crate::ui::geometry::{
    label_slots, overlay_width, AnimationPhase, GeometryRect, GeometryState, WIDGET_HEIGHT,
};
use crate::ui::theme::to_color32;
use crate::ui::timer::IntervalTimer;
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Interval between metric refreshes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Interval between animation frames (about 60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const BACKGROUND_INSET: f32 = 3.0;
const BACKGROUND_ROUNDING: f32 = 16.0;
const BACKGROUND_ALPHA: u8 = 225;

/// Opacity of the whole overlay, applied on top of each color's own alpha.
pub const OVERLAY_OPACITY: f32 = 0.8;

/// Scale an alpha value by [`OVERLAY_OPACITY`].
pub fn overlay_alpha(alpha: u8) -> u8 {
    (alpha as f32 * OVERLAY_OPACITY).round() as u8
}

/// The always-on-top metrics overlay.
pub struct OverlayWidget {
    profile: Profile,
    geometry: GeometryState,
    source: Box<dyn MetricsSource>,
    shared: Arc<SharedContext>,
    refresh_timer: IntervalTimer,
    frame_timer: IntervalTimer,
}

impl OverlayWidget {
    /// Create the widget sized for `profile`. The first refresh happens on
    /// the first poll.
    pub fn new(
        profile: Profile,
        source: Box<dyn MetricsSource>,
        shared: Arc<SharedContext>,
        now: Instant,
    ) -> Self {
        let width = overlay_width(profile.enabled_count(), profile.font_size);
        let mut refresh_timer = IntervalTimer::new(TICK_INTERVAL);
        refresh_timer.fire_now(now);

        Self {
            profile,
            geometry: GeometryState::new(GeometryRect::new(0.0, 0.0, width, WIDGET_HEIGHT)),
            source,
            shared,
            refresh_timer,
            frame_timer: IntervalTimer::new(FRAME_INTERVAL),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn geometry(&self) -> &GeometryState {
        &self.geometry
    }

    pub fn phase(&self) -> AnimationPhase {
        self.geometry.phase()
    }

    /// Center the widget at the top of a screen without animating.
    pub fn place_on_screen(&mut self, screen_width: f32) -> GeometryRect {
        let current = self.geometry.current();
        let rect = GeometryRect::centered(screen_width, 0.0, current.width, current.height);
        self.geometry.place(rect);
        self.frame_timer.stop();
        rect
    }

    /// Adopt a new profile and start animating toward the matching width.
    ///
    /// The widget stays horizontally centered and keeps its y position.
    pub fn apply_profile(
        &mut self,
        profile: Profile,
        screen_width: f32,
        now: Instant,
    ) -> AnimationPhase {
        let width = overlay_width(profile.enabled_count(), profile.font_size);
        self.profile = profile;

        let target = self.geometry.target();
        let target = GeometryRect::centered(screen_width, target.y, width, target.height);
        let phase = self.geometry.retarget(target);
        match phase {
            AnimationPhase::Animating => {
                debug!(width, "overlay resize started");
                self.frame_timer.start(now);
            }
            AnimationPhase::Idle => self.frame_timer.stop(),
        }
        phase
    }

    /// Run the refresh tick if it is due.
    pub fn poll_refresh(&mut self, now: Instant) -> Option<MetricSample> {
        if self.refresh_timer.poll(now) {
            self.refresh()
        } else {
            None
        }
    }

    /// Sample the metrics source and publish the result.
    ///
    /// On failure the previous sample is kept and returned.
    pub fn refresh(&mut self) -> Option<MetricSample> {
        match self.source.sample() {
            Ok(sample) => {
                self.shared.store_sample(sample);
                Some(sample)
            }
            Err(e) => {
                debug!(error = %e, "metrics sample dropped");
                self.shared.latest_sample()
            }
        }
    }

    /// Advance the animation if a frame is due. Returns the new geometry.
    pub fn poll_animation(&mut self, now: Instant) -> Option<GeometryRect> {
        if !self.frame_timer.poll(now) {
            return None;
        }
        if self.geometry.step() == AnimationPhase::Idle {
            debug!("overlay resize finished");
            self.frame_timer.stop();
        }
        Some(self.geometry.current())
    }

    /// Delay until the next refresh or animation frame.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        [
            self.refresh_timer.time_until_due(now),
            self.frame_timer.time_until_due(now),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(TICK_INTERVAL)
    }

    /// Label text for every enabled metric, in display order.
    pub fn labels(&self) -> Vec<String> {
        let sample = self
            .shared
            .latest_sample()
            .unwrap_or(MetricSample::new(0.0, 0.0, None));
        self.profile
            .enabled_metrics()
            .into_iter()
            .map(|metric| sample.label(metric))
            .collect()
    }

    /// Paint the background and labels at the current geometry.
    pub fn paint(&self, painter: &egui::Painter) {
        let rect = self.geometry.current();
        let origin = painter.clip_rect().min;

        let background = egui::Rect::from_min_max(
            origin + egui::vec2(BACKGROUND_INSET, BACKGROUND_INSET),
            origin
                + egui::vec2(
                    rect.width - BACKGROUND_INSET,
                    rect.height - BACKGROUND_INSET,
                ),
        );
        painter.rect_filled(
            background,
            BACKGROUND_ROUNDING,
            to_color32(self.profile.bg_color, overlay_alpha(BACKGROUND_ALPHA)),
        );

        let labels = self.labels();
        if labels.is_empty() {
            return;
        }

        let style = MetricLabel::new(&self.profile);
        let slots = label_slots(rect.width, labels.len(), self.profile.font_size);
        for (text, (x, width)) in labels.iter().zip(slots) {
            let slot = egui::Rect::from_min_size(
                origin + egui::vec2(x, BACKGROUND_INSET),
                egui::vec2(width, rect.height - BACKGROUND_INSET * 2.0),
            );
            style.paint(painter, slot, text);
        }
    }
}
