//! Overlay layout and resize animation.
//!
//! Width is a pure function of the enabled metric count and font size.
//! Geometry changes are eased toward their target one frame at a time and
//! snapped once every field is within [`SNAP_THRESHOLD`].

/// Overlay height in pixels.
pub const WIDGET_HEIGHT: f32 = 40.0;

/// Width of one metric label slot.
pub const LABEL_WIDTH: f32 = 100.0;

/// Padding on each side of the label row.
pub const SIDE_PADDING: f32 = 20.0;

/// Width used when no metric is enabled.
pub const MIN_WIDTH: f32 = 64.0;

/// Fraction of the remaining distance covered per animation frame.
pub const SMOOTHING_FACTOR: f32 = 0.1;

/// Per-field distance below which the animation snaps to its target.
pub const SNAP_THRESHOLD: f32 = 1.0;

/// Horizontal gap between label slots for a font size.
pub fn label_gap(font_size: u32) -> f32 {
    (font_size as f32 * 0.8).trunc()
}

/// Overlay width for `count` enabled metrics.
pub fn overlay_width(count: usize, font_size: u32) -> f32 {
    if count == 0 {
        return MIN_WIDTH;
    }
    let n = count as f32;
    SIDE_PADDING * 2.0 + LABEL_WIDTH * n + label_gap(font_size) * (n - 1.0)
}

/// Left edge and width of each label slot, centered within `width`.
pub fn label_slots(width: f32, count: usize, font_size: u32) -> Vec<(f32, f32)> {
    if count == 0 {
        return Vec::new();
    }
    let gap = label_gap(font_size);
    let n = count as f32;
    let inner = width - SIDE_PADDING * 2.0;
    let span = LABEL_WIDTH * n + gap * (n - 1.0);
    let start = SIDE_PADDING + (inner - span) / 2.0;

    (0..count)
        .map(|i| (start + i as f32 * (LABEL_WIDTH + gap), LABEL_WIDTH))
        .collect()
}

/// Window rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GeometryRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given width centered horizontally on a screen.
    pub fn centered(screen_width: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(((screen_width - width) / 2.0).trunc(), y, width, height)
    }

    /// Largest absolute per-field difference to `other`.
    pub fn max_delta(&self, other: &GeometryRect) -> f32 {
        [
            other.x - self.x,
            other.y - self.y,
            other.width - self.width,
            other.height - self.height,
        ]
        .iter()
        .fold(0.0_f32, |acc, d| acc.max(d.abs()))
    }

    fn ease_toward(&mut self, target: &GeometryRect, factor: f32) {
        self.x += (target.x - self.x) * factor;
        self.y += (target.y - self.y) * factor;
        self.width += (target.width - self.width) * factor;
        self.height += (target.height - self.height) * factor;
    }
}

/// Animation state of the overlay geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Current geometry equals the target
    Idle,
    /// Geometry is being eased toward the target
    Animating,
}

/// Current and target overlay geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryState {
    current: GeometryRect,
    target: GeometryRect,
}

impl GeometryState {
    /// Idle state at `rect`.
    pub fn new(rect: GeometryRect) -> Self {
        Self {
            current: rect,
            target: rect,
        }
    }

    pub fn current(&self) -> GeometryRect {
        self.current
    }

    pub fn target(&self) -> GeometryRect {
        self.target
    }

    pub fn phase(&self) -> AnimationPhase {
        if self.current == self.target {
            AnimationPhase::Idle
        } else {
            AnimationPhase::Animating
        }
    }

    /// Jump straight to `rect` without animating.
    pub fn place(&mut self, rect: GeometryRect) {
        self.current = rect;
        self.target = rect;
    }

    /// Set a new target. Returns `Animating` if the geometry has to move.
    pub fn retarget(&mut self, target: GeometryRect) -> AnimationPhase {
        self.target = target;
        self.phase()
    }

    /// Advance one animation frame.
    ///
    /// Snaps to the target once every field is within [`SNAP_THRESHOLD`].
    pub fn step(&mut self) -> AnimationPhase {
        if self.current.max_delta(&self.target) < SNAP_THRESHOLD {
            self.current = self.target;
        } else {
            self.current.ease_toward(&self.target, SMOOTHING_FACTOR);
        }
        self.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_formula() {
        // gap for 12pt = trunc(9.6) = 9
        assert_eq!(label_gap(12), 9.0);
        assert_eq!(overlay_width(0, 12), MIN_WIDTH);
        assert_eq!(overlay_width(1, 12), 140.0);
        assert_eq!(overlay_width(2, 12), 249.0);
        assert_eq!(overlay_width(3, 12), 358.0);
    }

    #[test]
    fn test_width_monotonic_in_count() {
        for font_size in [8, 10, 12, 14, 16, 72] {
            let widths: Vec<f32> = (0..=3).map(|n| overlay_width(n, font_size)).collect();
            assert!(widths.windows(2).all(|w| w[0] <= w[1]), "{widths:?}");
        }
    }

    #[test]
    fn test_label_slots_fill_width() {
        let width = overlay_width(3, 12);
        let slots = label_slots(width, 3, 12);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], (SIDE_PADDING, LABEL_WIDTH));
        assert_eq!(slots[1].0, SIDE_PADDING + LABEL_WIDTH + 9.0);
        let (last_x, last_w) = slots[2];
        assert_eq!(last_x + last_w, width - SIDE_PADDING);
        assert!(label_slots(MIN_WIDTH, 0, 12).is_empty());
    }

    #[test]
    fn test_label_slots_centered_in_wider_window() {
        let slots = label_slots(400.0, 1, 12);
        assert_eq!(slots, vec![(150.0, LABEL_WIDTH)]);
    }

    #[test]
    fn test_retarget_same_rect_stays_idle() {
        let rect = GeometryRect::new(10.0, 0.0, 140.0, WIDGET_HEIGHT);
        let mut state = GeometryState::new(rect);
        assert_eq!(state.phase(), AnimationPhase::Idle);
        assert_eq!(state.retarget(rect), AnimationPhase::Idle);
    }

    #[test]
    fn test_step_converges_without_overshoot() {
        let start = GeometryRect::new(0.0, 0.0, 64.0, 40.0);
        let target = GeometryRect::new(781.0, 7.0, 358.0, 52.0);
        let mut state = GeometryState::new(start);
        assert_eq!(state.retarget(target), AnimationPhase::Animating);

        let mut last = state.current().max_delta(&target);
        let mut steps = 0;
        while state.step() == AnimationPhase::Animating {
            let current = state.current();
            let delta = current.max_delta(&target);
            assert!(delta < last, "distance must shrink: {delta} >= {last}");
            assert!(current.x <= target.x && current.width <= target.width);
            assert!(current.y <= target.y && current.height <= target.height);
            last = delta;
            steps += 1;
            assert!(steps < 200, "animation did not converge");
        }
        assert_eq!(state.current(), target);
    }

    #[test]
    fn test_step_shrinking_target() {
        let mut state = GeometryState::new(GeometryRect::new(500.0, 0.0, 358.0, 40.0));
        let target = GeometryRect::new(647.0, 0.0, 64.0, 40.0);
        state.retarget(target);
        let mut steps = 0;
        while state.step() == AnimationPhase::Animating {
            assert!(state.current().width >= target.width);
            steps += 1;
        }
        // ln(294) / ln(1 / 0.9) is about 54
        assert!(steps <= 56, "took {steps} steps");
        assert_eq!(state.current(), target);
    }

    #[test]
    fn test_snap_when_within_threshold() {
        let mut state = GeometryState::new(GeometryRect::new(0.0, 0.0, 100.0, 40.0));
        let target = GeometryRect::new(0.5, 0.0, 100.9, 40.0);
        state.retarget(target);
        assert_eq!(state.step(), AnimationPhase::Idle);
        assert_eq!(state.current(), target);
    }

    #[test]
    fn test_place_skips_animation() {
        let mut state = GeometryState::new(GeometryRect::default());
        let rect = GeometryRect::centered(1920.0, 0.0, 358.0, WIDGET_HEIGHT);
        state.place(rect);
        assert_eq!(rect.x, 781.0);
        assert_eq!(state.phase(), AnimationPhase::Idle);
        assert_eq!(state.current(), rect);
    }
}
