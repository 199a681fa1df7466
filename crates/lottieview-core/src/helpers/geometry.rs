// crates/lottieview-core/src/helpers/geometry.rs
//
// Canvas fitting for the animation surface. Kept free of egui so the math is
// testable; the surface converts the result into an egui Rect.

/// Largest `(w, h)` with aspect `ratio` that fits inside `avail_w × avail_h`
/// ("contain" resize mode). Degenerate inputs yield `(0, 0)`.
///
/// ```
/// use lottieview_core::helpers::geometry::fit_contain;
/// assert_eq!(fit_contain(400.0, 400.0, 2.0), (400.0, 200.0));
/// assert_eq!(fit_contain(400.0, 100.0, 2.0), (200.0, 100.0));
/// ```
pub fn fit_contain(avail_w: f32, avail_h: f32, ratio: f32) -> (f32, f32) {
    if avail_w <= 0.0 || avail_h <= 0.0 || ratio.is_nan() || ratio <= 0.0 {
        return (0.0, 0.0);
    }
    let h = avail_w / ratio;
    if h <= avail_h { (avail_w, h) } else { (avail_h * ratio, avail_h) }
}
