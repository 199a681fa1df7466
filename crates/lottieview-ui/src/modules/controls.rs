// crates/lottieview-ui/src/modules/controls.rs
//
// Controls panel: theme toggle, file picker button, file size, speed slider,
// autoplay / loop toggles, progress slider, play/pause and reset.
//
// Pure presentation. Reads the store, pushes PlayerCommands, and owns nothing
// but the measured slider track widths. Both sliders use the same
// press-position model: the value under the pointer, clamped to the track.

use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use lottieview_core::commands::PlayerCommand;
use lottieview_core::helpers::size::format_file_size;
use lottieview_core::helpers::slider::{SliderRange, PROGRESS_RANGE, SPEED_RANGE};
use lottieview_core::helpers::uri::display_name;
use lottieview_core::state::PlaybackState;

use super::PanelModule;
use crate::helpers::format::{fit_label, percent};
use crate::theme::{Palette, ThemeMode};

// ── Layout constants ─────────────────────────────────────────────────────────
pub const PANEL_W:   f32 = 300.0;
const TRACK_H:       f32 = 20.0;
const RAIL_H:        f32 = 4.0;
const THUMB_R:       f32 = 8.0;
const RANGE_LABEL_W: f32 = 34.0;
const SWITCH_W:      f32 = 36.0;
const SWITCH_H:      f32 = 20.0;
const BUTTON_H:      f32 = 40.0;

#[derive(Default)]
pub struct ControlsModule {
    /// Current theme, set by app.rs each frame before ui().
    pub theme:        ThemeMode,
    speed_track_w:    f32,
    progress_track_w: f32,
}

impl ControlsModule {
    pub fn new(theme: ThemeMode) -> Self {
        Self { theme, ..Self::default() }
    }

    fn section_label(ui: &mut Ui, text: impl Into<String>, palette: &Palette) {
        ui.label(RichText::new(text).size(14.0).color(palette.text_secondary));
    }

    fn divider(ui: &mut Ui, palette: &Palette) {
        ui.add_space(4.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), Sense::hover());
        ui.painter().rect_filled(rect, 0.0, palette.border);
        ui.add_space(4.0);
    }

    /// Label on the left, painted switch on the right. Returns the new value
    /// when clicked.
    fn toggle_row(ui: &mut Ui, label: &str, on: bool, palette: &Palette) -> Option<bool> {
        let mut out = None;
        ui.horizontal(|ui| {
            Self::section_label(ui, label, palette);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (rect, resp) = ui.allocate_exact_size(Vec2::new(SWITCH_W, SWITCH_H), Sense::click());
                let t = ui.ctx().animate_bool_responsive(resp.id, on);
                let painter = ui.painter();
                let track = if on { palette.primary } else { palette.border };
                painter.rect_filled(rect, SWITCH_H / 2.0, track);
                let knob_x = egui::lerp(rect.left() + SWITCH_H / 2.0..=rect.right() - SWITCH_H / 2.0, t);
                painter.circle_filled(Pos2::new(knob_x, rect.center().y), SWITCH_H / 2.0 - 3.0, Color32::WHITE);
                if resp.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    out = Some(!on);
                }
            });
        });
        out
    }

    /// Range-labelled slider. `track_w` is updated with the measured width;
    /// returns the value under the pointer while pressed, if it differs.
    fn slider_row(
        ui:      &mut Ui,
        id:      &str,
        value:   f32,
        range:   SliderRange,
        labels:  (&str, &str),
        track_w: &mut f32,
        palette: &Palette,
    ) -> Option<f32> {
        let mut out = None;
        ui.horizontal(|ui| {
            let small = |t: &str| RichText::new(t).size(12.0).color(palette.text_secondary);
            ui.add_sized([RANGE_LABEL_W, TRACK_H], egui::Label::new(small(labels.0)));

            let w = (ui.available_width() - RANGE_LABEL_W - ui.spacing().item_spacing.x).max(20.0);
            let (rect, _) = ui.allocate_exact_size(Vec2::new(w, TRACK_H), Sense::hover());
            let resp = ui.interact(rect, ui.id().with(id), Sense::click_and_drag());
            *track_w = rect.width();

            if resp.is_pointer_button_down_on() || resp.dragged() {
                if let Some(p) = resp.interact_pointer_pos() {
                    let v = range.value_at(p.x - rect.left(), *track_w);
                    if v != value {
                        out = Some(v);
                    }
                }
            }

            let shown = out.unwrap_or(value);
            let frac  = range.fraction_of(shown);
            let painter = ui.painter();
            let rail = Rect::from_center_size(rect.center(), Vec2::new(rect.width(), RAIL_H));
            painter.rect_filled(rail, RAIL_H / 2.0, palette.border);
            let x = rect.left() + frac * rect.width();
            painter.rect_filled(Rect::from_min_max(rail.min, Pos2::new(x, rail.max.y)), RAIL_H / 2.0, palette.primary);
            let thumb_r = if resp.hovered() || resp.dragged() { THUMB_R + 1.5 } else { THUMB_R };
            painter.circle_filled(Pos2::new(x, rect.center().y), thumb_r, palette.primary);

            ui.add_sized([RANGE_LABEL_W, TRACK_H], egui::Label::new(small(labels.1)));
        });
        out
    }

    /// Full-width rounded button painted with `fill`.
    fn pill_button(ui: &mut Ui, text: &str, fill: Color32, text_col: Color32, stroke: Stroke, width: f32) -> bool {
        let (rect, resp) = ui.allocate_exact_size(Vec2::new(width, BUTTON_H), Sense::click());
        let painter = ui.painter();
        let fill = if resp.is_pointer_button_down_on() {
            fill.gamma_multiply(0.8)
        } else if resp.hovered() {
            fill.gamma_multiply(0.92)
        } else {
            fill
        };
        painter.rect_filled(rect, BUTTON_H / 2.0, fill);
        if stroke != Stroke::NONE {
            painter.rect_stroke(rect, BUTTON_H / 2.0, stroke, egui::StrokeKind::Inside);
        }
        painter.text(rect.center(), Align2::CENTER_CENTER, text, FontId::proportional(15.0), text_col);
        resp.on_hover_cursor(egui::CursorIcon::PointingHand).clicked()
    }
}

impl PanelModule for ControlsModule {
    fn name(&self) -> &str { "Controls" }

    fn ui(&mut self, ui: &mut Ui, state: &PlaybackState, palette: &Palette, cmd: &mut Vec<PlayerCommand>) {
        ui.add_space(4.0);
        ui.label(RichText::new(self.name()).size(22.0).strong().color(palette.text));
        ui.add_space(12.0);

        // ── Theme ────────────────────────────────────────────────────────────
        if Self::toggle_row(ui, self.theme.label(), self.theme == ThemeMode::Dark, palette).is_some() {
            cmd.push(PlayerCommand::ToggleTheme);
        }
        Self::divider(ui, palette);

        // ── File ─────────────────────────────────────────────────────────────
        let full_w = ui.available_width();
        if Self::pill_button(ui, "🗁 Open Lottie File", palette.primary, Color32::WHITE, Stroke::NONE, full_w) {
            cmd.push(PlayerCommand::PickFile);
        }
        if let Some(src) = state.source() {
            let name = fit_label(ui, &display_name(src), &FontId::proportional(13.0), full_w);
            ui.label(RichText::new(name)
                .size(13.0).strong().color(palette.text));
            Self::section_label(ui, format!("File Size: {}", format_file_size(state.file_size())), palette);
        }
        Self::divider(ui, palette);

        // ── Speed ────────────────────────────────────────────────────────────
        Self::section_label(ui, format!("Playback Speed: {:.1}x", state.speed()), palette);
        if let Some(v) = Self::slider_row(
            ui, "speed_slider", state.speed(), SPEED_RANGE, ("0.1x", "3.0x"),
            &mut self.speed_track_w, palette,
        ) {
            cmd.push(PlayerCommand::SetSpeed(v));
        }

        // ── Toggles ──────────────────────────────────────────────────────────
        if let Some(on) = Self::toggle_row(ui, "Autoplay", state.autoplay(), palette) {
            cmd.push(PlayerCommand::SetAutoplay(on));
        }
        if let Some(on) = Self::toggle_row(ui, "Loop", state.looping(), palette) {
            cmd.push(PlayerCommand::SetLoop(on));
        }

        // ── Progress ─────────────────────────────────────────────────────────
        Self::section_label(ui, format!("Progress: {}", percent(state.progress())), palette);
        if let Some(v) = Self::slider_row(
            ui, "progress_slider", state.progress(), PROGRESS_RANGE, ("0%", "100%"),
            &mut self.progress_track_w, palette,
        ) {
            cmd.push(PlayerCommand::SetProgress(v));
        }
        Self::divider(ui, palette);

        // ── Transport ────────────────────────────────────────────────────────
        let half_w = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
        ui.horizontal(|ui| {
            let (label, fill) = if state.is_playing() {
                ("⏸ Pause", palette.primary_dark)
            } else {
                ("▶ Play", palette.primary)
            };
            if Self::pill_button(ui, label, fill, Color32::WHITE, Stroke::NONE, half_w) {
                cmd.push(if state.is_playing() { PlayerCommand::Pause } else { PlayerCommand::Play });
            }
            if Self::pill_button(ui, "↻ Reset", Color32::TRANSPARENT, palette.primary,
                Stroke::new(1.0, palette.border), half_w)
            {
                cmd.push(PlayerCommand::Reset);
            }
        });
    }
}
