// crates/lottieview-core/src/helpers/slider.rs
//
// Press-position → value mapping shared by both controls-panel sliders.
// One model for both: the value under the pointer, clamped to the track.

use crate::state::{SPEED_MAX, SPEED_MIN};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min:      f32,
    pub max:      f32,
    /// Decimal places the result is rounded to.
    pub decimals: i32,
}

pub const SPEED_RANGE:    SliderRange = SliderRange { min: SPEED_MIN, max: SPEED_MAX, decimals: 1 };
pub const PROGRESS_RANGE: SliderRange = SliderRange { min: 0.0,       max: 1.0,       decimals: 2 };

impl SliderRange {
    /// `min + clamp(x / width, 0, 1) * (max - min)`, rounded to `decimals`.
    /// A zero-width track (not yet measured) maps everything to `min`.
    pub fn value_at(&self, x: f32, width: f32) -> f32 {
        if width <= 0.0 || !x.is_finite() {
            return self.min;
        }
        let t = (x / width).clamp(0.0, 1.0);
        round_to(self.min + t * (self.max - self.min), self.decimals)
    }

    /// Inverse mapping for drawing the thumb: value → fraction of the track.
    pub fn fraction_of(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 { return 0.0; }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

fn round_to(v: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_track_endpoints_and_rounding() {
        assert_eq!(SPEED_RANGE.value_at(0.0, 200.0), 0.1);
        assert_eq!(SPEED_RANGE.value_at(200.0, 200.0), 3.0);
        assert_eq!(SPEED_RANGE.value_at(-30.0, 200.0), 0.1);
        assert_eq!(SPEED_RANGE.value_at(500.0, 200.0), 3.0);
        // 0.1 + 0.3 * 2.9 = 0.97 → 1.0 (one decimal)
        let v = SPEED_RANGE.value_at(60.0, 200.0);
        assert!((v - 1.0).abs() < 1e-6, "got {v}");
    }

    #[test]
    fn progress_track_two_decimals() {
        let v = PROGRESS_RANGE.value_at(123.0, 300.0);
        assert!((v - 0.41).abs() < 1e-6, "got {v}");
        assert_eq!(PROGRESS_RANGE.value_at(300.0, 300.0), 1.0);
    }

    #[test]
    fn unmeasured_track_maps_to_min() {
        assert_eq!(PROGRESS_RANGE.value_at(10.0, 0.0), 0.0);
        assert_eq!(SPEED_RANGE.value_at(f32::NAN, 100.0), 0.1);
    }

    #[test]
    fn fraction_inverts_value() {
        assert!((SPEED_RANGE.fraction_of(1.55) - 0.5).abs() < 1e-6);
        assert_eq!(PROGRESS_RANGE.fraction_of(2.0), 1.0);
    }
}
