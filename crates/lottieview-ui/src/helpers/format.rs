// crates/lottieview-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in lottieview-core.
//
// Size, time and URI formatting live in lottieview_core::helpers. This module
// holds what is purely about fitting strings into the panels.

use egui::{FontId, Ui};

/// Shortens `text` so it renders within `max_px` in `font`, ending in "…"
/// when cut. Glyphs are measured with the live font atlas.
pub fn fit_label(ui: &Ui, text: &str, font: &FontId, max_px: f32) -> String {
    ui.fonts(|fonts| {
        fit_to_width(text, max_px, fonts.glyph_width(font, ELLIPSIS), |c| fonts.glyph_width(font, c))
    })
}

const ELLIPSIS: char = '…';

/// Width-driven truncation behind `fit_label`. `width_of` returns the advance
/// of one glyph; the ellipsis is only appended when it fits as well.
fn fit_to_width(text: &str, max_px: f32, ellipsis_w: f32, mut width_of: impl FnMut(char) -> f32) -> String {
    let widths: Vec<f32> = text.chars().map(&mut width_of).collect();
    if widths.iter().sum::<f32>() <= max_px {
        return text.to_string();
    }
    let budget = max_px - ellipsis_w;
    if budget < 0.0 {
        return String::new();
    }
    let mut used = 0.0;
    let keep = widths.iter().take_while(|w| {
        used += **w;
        used <= budget
    }).count();
    let mut out: String = text.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}

/// `0.75` → `"75%"`, the progress slider's value label.
pub fn percent(progress: f32) -> String {
    format!("{:.0}%", progress.clamp(0.0, 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Monospace stand-in: every glyph 10px wide, ellipsis 10px.
    fn fit(text: &str, max_px: f32) -> String {
        fit_to_width(text, max_px, 10.0, |_| 10.0)
    }

    #[test]
    fn text_that_fits_is_unchanged() {
        assert_eq!(fit("bounce.json", 110.0), "bounce.json");
        assert_eq!(fit("", 0.0), "");
    }

    #[test]
    fn cut_text_ends_in_ellipsis_within_budget() {
        let out = fit("a_really_long_animation_name.lottie", 70.0);
        assert_eq!(out, "a_real…");
        assert!(out.chars().count() as f32 * 10.0 <= 70.0);
    }

    #[test]
    fn budget_smaller_than_ellipsis_is_empty() {
        assert_eq!(fit("bounce.json", 5.0), "");
        assert_eq!(fit("bounce.json", 10.0), "…");
    }

    #[test]
    fn wide_glyphs_are_cut_sooner() {
        let out = fit_to_width("WWWiii", 40.0, 4.0, |c| if c == 'W' { 12.0 } else { 4.0 });
        assert_eq!(out, "WWW…");
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(0.426), "43%");
        assert_eq!(percent(1.7), "100%");
    }
}
