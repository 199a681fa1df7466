// crates/lottieview-core/src/helpers/time.rs
//
// Timecode formatting for the surface footer.

/// Format a timeline position as `MM:SS:FF` at the composition's frame rate.
///
/// `frame` is relative to the composition's in point. Non-positive frame
/// rates fall back to 30 fps so a malformed document still shows something.
///
/// ```
/// use lottieview_core::helpers::time::format_timecode;
/// assert_eq!(format_timecode(0.0,    30.0), "00:00:00");
/// assert_eq!(format_timecode(1845.0, 30.0), "01:01:15");
/// assert_eq!(format_timecode(90.0,   60.0), "00:01:30");
/// ```
pub fn format_timecode(frame: f32, fps: f32) -> String {
    let fps = if fps > 0.0 { fps } else { 30.0 };
    let frame = frame.max(0.0);
    let secs  = (frame / fps) as u32;
    let m     = secs / 60;
    let s     = secs % 60;
    let ff    = (frame - secs as f32 * fps).floor() as u32;
    format!("{m:02}:{s:02}:{ff:02}")
}

/// Compact duration for the composition info line: `S.Xs` under a minute,
/// `M:SS` above.
///
/// ```
/// use lottieview_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),   "4.2s");
/// assert_eq!(format_duration(187.0), "3:07");
/// ```
pub fn format_duration(secs: f32) -> String {
    if secs >= 60.0 {
        let whole = secs as u64;
        format!("{}:{:02}", whole / 60, whole % 60)
    } else {
        format!("{secs:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_frames_floor() {
        assert_eq!(format_timecode(29.9, 30.0), "00:00:29");
        assert_eq!(format_timecode(30.0, 30.0), "00:01:00");
    }

    #[test]
    fn bad_rate_falls_back() {
        assert_eq!(format_timecode(45.0, 0.0), "00:01:15");
        assert_eq!(format_timecode(-5.0, 30.0), "00:00:00");
    }
}
