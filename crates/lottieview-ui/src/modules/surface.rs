// crates/lottieview-ui/src/modules/surface.rs
//
// Animation surface panel. The only code that touches the engine.
//
// Each frame app.rs calls `sync(&state)`: the directive diff in
// lottieview_core::surface::SurfaceState turns store changes into
// EngineCommands, applied here. Loads are handed back to app.rs through
// `take_pending_loads` so the FileWorker does the IO; results come back via
// `on_loaded` / `on_load_failed`.
//
// Drawing: the composition canvas at its aspect ratio, a per-layer activity
// strip with the playhead, and a timecode footer. Vector shapes are not
// rasterized.

use std::path::PathBuf;

use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use lottieview_core::commands::PlayerCommand;
use lottieview_core::composition::Composition;
use lottieview_core::error::GatewayError;
use lottieview_core::helpers::geometry::fit_contain;
use lottieview_core::helpers::time::{format_duration, format_timecode};
use lottieview_core::helpers::uri::display_name;
use lottieview_core::state::PlaybackState;
use lottieview_core::surface::{
    EngineCommand, SurfaceDirective, SurfaceHandle, SurfacePhase, SurfaceState,
};
use lottieview_media::{AnimationEngine, EngineEvent, LottieEngine};

use super::PanelModule;
use crate::helpers::format::fit_label;
use crate::theme::Palette;

// ── Layout constants ─────────────────────────────────────────────────────────
const HEADER_H:   f32 = 28.0;
const FOOTER_H:   f32 = 28.0;
const ROW_H:      f32 = 16.0;
const ROW_GAP:    f32 = 3.0;
const NAME_W:     f32 = 110.0;
const MAX_ROWS:   usize = 8;
const CANVAS_PAD: f32 = 16.0;

pub struct SurfaceModule {
    engine:        LottieEngine,
    state:         SurfaceState,
    /// Loads requested by the last `sync`, drained by app.rs.
    pending_loads: Vec<(Uuid, PathBuf)>,
}

impl SurfaceModule {
    pub fn new() -> Self {
        Self {
            engine:        LottieEngine::new(),
            state:         SurfaceState::new(),
            pending_loads: Vec::new(),
        }
    }

    pub fn phase(&self) -> &SurfacePhase { self.state.phase() }

    /// Mirror the store onto the engine. Cheap when nothing changed.
    pub fn sync(&mut self, store: &PlaybackState) {
        let directive = SurfaceDirective::from_state(store);
        for cmd in self.state.observe(&directive) {
            self.apply(cmd);
        }
    }

    fn apply(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Load { session, path } => {
                tracing::debug!("[surface] load {} ({session})", path.display());
                self.engine.set_composition(None);
                self.pending_loads.push((session, path));
            }
            EngineCommand::Reset       => self.engine.reset(),
            EngineCommand::Play        => self.engine.play(),
            EngineCommand::Pause       => self.engine.pause(),
            EngineCommand::Seek(p)     => self.engine.seek(p),
            EngineCommand::SetSpeed(s) => self.engine.set_speed(s),
            EngineCommand::SetLoop(l)  => self.engine.set_loop(l),
        }
    }

    pub fn take_pending_loads(&mut self) -> Vec<(Uuid, PathBuf)> {
        std::mem::take(&mut self.pending_loads)
    }

    pub fn on_loaded(&mut self, session: Uuid, composition: Composition) {
        if self.state.on_load_succeeded(session) {
            self.engine.set_composition(Some(composition));
        } else {
            tracing::debug!("[surface] dropping stale load for {session}");
        }
    }

    /// The title already says the load failed; only the reason is kept.
    pub fn on_load_failed(&mut self, session: Uuid, error: GatewayError) {
        let message = match error {
            GatewayError::LoadFailure(reason) => reason,
            other => other.to_string(),
        };
        if !self.state.on_load_failed(session, message) {
            tracing::debug!("[surface] dropping stale failure for {session}");
        }
    }

    /// Advance the engine clock. Loop wraps are counted here; the caller
    /// reacts to `Completed`.
    pub fn advance(&mut self, dt: f32) -> Vec<EngineEvent> {
        if !matches!(self.state.phase(), SurfacePhase::Loaded) {
            return Vec::new();
        }
        let events = self.engine.advance(dt);
        for ev in &events {
            if *ev == EngineEvent::LoopCompleted {
                self.state.on_loop_completed();
            }
        }
        events
    }

    /// True while the surface needs continuous repaints.
    pub fn is_animating(&self) -> bool {
        match self.state.phase() {
            SurfacePhase::Loading => true,
            SurfacePhase::Loaded  => self.engine.is_playing(),
            _ => false,
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    fn placeholder(ui: &mut Ui, rect: Rect, palette: &Palette) -> egui::Response {
        let resp = ui.allocate_rect(rect, Sense::click());
        ui.painter().rect_filled(rect, 8.0, palette.placeholder);
        resp
    }

    fn draw_no_source(ui: &mut Ui, rect: Rect, palette: &Palette, cmd: &mut Vec<PlayerCommand>) {
        let resp = Self::placeholder(ui, rect, palette);
        let painter = ui.painter();
        painter.text(rect.center() - egui::vec2(0.0, 12.0), Align2::CENTER_CENTER,
            "No file selected", FontId::proportional(16.0), palette.text_secondary);
        painter.text(rect.center() + egui::vec2(0.0, 12.0), Align2::CENTER_CENTER,
            "Click \"Open Lottie File\" to select a .json or .lottie file",
            FontId::proportional(13.0), palette.text_secondary);
        if resp.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
            cmd.push(PlayerCommand::PickFile);
        }
    }

    fn draw_loading(ui: &mut Ui, rect: Rect, palette: &Palette, source: Option<&str>) {
        Self::placeholder(ui, rect, palette);
        let spinner = Rect::from_center_size(rect.center() - egui::vec2(0.0, 14.0), Vec2::splat(24.0));
        ui.put(spinner, egui::Spinner::new().size(24.0).color(palette.primary));
        let label = source.map(display_name).unwrap_or_default();
        ui.painter().text(rect.center() + egui::vec2(0.0, 18.0), Align2::CENTER_CENTER,
            format!("Loading {}", fit_label(ui, &label, &FontId::proportional(13.0), rect.width() - 100.0)),
            FontId::proportional(13.0), palette.text_secondary);
    }

    fn draw_error(ui: &mut Ui, rect: Rect, palette: &Palette, message: &str) {
        Self::placeholder(ui, rect, palette);
        let painter = ui.painter();
        painter.text(rect.center() - egui::vec2(0.0, 12.0), Align2::CENTER_CENTER,
            "Failed to load animation", FontId::proportional(16.0), palette.error);
        let galley = painter.layout(
            message.to_string(), FontId::proportional(13.0), palette.text_secondary,
            (rect.width() - 40.0).max(40.0),
        );
        let pos = Pos2::new(rect.center().x - galley.size().x / 2.0, rect.center().y + 4.0);
        painter.galley(pos, galley, palette.text_secondary);
    }

    /// Canvas, layer strip and footer for a loaded composition.
    fn draw_loaded(&self, ui: &Ui, rect: Rect, palette: &Palette) {
        let Some(comp) = self.engine.composition() else { return };
        let frame    = self.engine.frame();
        let progress = self.engine.progress();
        let painter  = ui.painter();

        let rows      = comp.layers.len().min(MAX_ROWS);
        let overflow  = comp.layers.len() > MAX_ROWS;
        let extra     = if overflow { ROW_H } else { 0.0 };
        let strip_h   = if rows == 0 { 0.0 } else { rows as f32 * (ROW_H + ROW_GAP) + extra + CANVAS_PAD };
        let stage     = Rect::from_min_max(rect.min, Pos2::new(rect.max.x, rect.max.y - strip_h - FOOTER_H));

        // ── Composition canvas ───────────────────────────────────────────────
        let (cw, ch) = fit_contain(stage.width() - CANVAS_PAD * 2.0, stage.height() - CANVAS_PAD * 2.0, comp.aspect());
        let canvas   = Rect::from_center_size(stage.center(), Vec2::new(cw, ch));
        let border = if self.engine.is_playing() {
            Stroke::new(1.5, palette.primary.gamma_multiply(0.6))
        } else {
            Stroke::new(1.0, palette.border)
        };
        painter.rect_filled(canvas, 4.0, palette.placeholder);
        painter.rect_stroke(canvas.expand(1.0), 4.0, border, egui::StrokeKind::Outside);

        // Progress ring: one revolution per pass through the timeline.
        let r = (cw.min(ch) * 0.3).max(8.0);
        let c = canvas.center();
        painter.circle_stroke(c, r, Stroke::new(3.0, palette.border));
        let sweep = progress * std::f32::consts::TAU;
        let steps = ((sweep / std::f32::consts::TAU) * 64.0).ceil().max(1.0) as usize;
        let arc: Vec<Pos2> = (0..=steps).map(|i| {
            let a = -std::f32::consts::FRAC_PI_2 + sweep * i as f32 / steps as f32;
            c + egui::vec2(a.cos() * r, a.sin() * r)
        }).collect();
        painter.add(egui::Shape::line(arc, Stroke::new(3.0, palette.primary)));
        painter.text(c, Align2::CENTER_CENTER,
            fit_label(ui, &comp.name, &FontId::proportional(14.0), r * 1.8), FontId::proportional(14.0), palette.text);

        // ── Layer strip ──────────────────────────────────────────────────────
        if rows > 0 {
            let top    = stage.max.y + CANVAS_PAD / 2.0;
            let bar_x0 = rect.min.x + NAME_W;
            let bar_w  = (rect.width() - NAME_W - 8.0).max(1.0);
            let span   = comp.duration_frames().max(1.0);
            let to_x   = |f: f32| bar_x0 + ((f - comp.in_point) / span).clamp(0.0, 1.0) * bar_w;

            for (i, layer) in comp.layers.iter().take(MAX_ROWS).enumerate() {
                let y      = top + i as f32 * (ROW_H + ROW_GAP);
                let active = layer.is_active(frame);
                let col    = if active { palette.primary } else { palette.border };
                painter.text(Pos2::new(rect.min.x + 4.0, y + ROW_H / 2.0), Align2::LEFT_CENTER,
                    fit_label(ui, &layer.name, &FontId::proportional(11.0), NAME_W - 12.0), FontId::proportional(11.0),
                    if active { palette.text } else { palette.text_secondary });
                let bar = Rect::from_min_max(
                    Pos2::new(to_x(layer.in_point), y + 2.0),
                    Pos2::new(to_x(layer.out_point).max(to_x(layer.in_point) + 2.0), y + ROW_H - 2.0));
                painter.rect_filled(bar, 3.0, col);
                if bar.width() > 48.0 {
                    painter.text(bar.left_center() + egui::vec2(4.0, 0.0), Align2::LEFT_CENTER,
                        layer.kind.label(), FontId::proportional(9.0), Color32::WHITE);
                }
            }
            if overflow {
                let y = top + rows as f32 * (ROW_H + ROW_GAP);
                painter.text(Pos2::new(rect.min.x + 4.0, y + ROW_H / 2.0), Align2::LEFT_CENTER,
                    format!("+{} more layers", comp.layers.len() - MAX_ROWS),
                    FontId::proportional(11.0), palette.text_secondary);
            }

            let px = to_x(frame);
            let strip_bottom = top + rows as f32 * (ROW_H + ROW_GAP);
            painter.line_segment([Pos2::new(px, top - 2.0), Pos2::new(px, strip_bottom)],
                Stroke::new(1.5, palette.error));
        }

        // ── Footer ───────────────────────────────────────────────────────────
        let footer = Rect::from_min_max(Pos2::new(rect.min.x, rect.max.y - FOOTER_H), rect.max);
        let rel    = frame - comp.in_point;
        painter.text(footer.left_center() + egui::vec2(4.0, 0.0), Align2::LEFT_CENTER,
            format!("{}  ·  frame {:.0} / {:.0}",
                format_timecode(rel, comp.frame_rate), rel, comp.duration_frames()),
            FontId::monospace(12.0), palette.text_secondary);
        painter.text(footer.right_center() - egui::vec2(4.0, 0.0), Align2::RIGHT_CENTER,
            format!("{}×{}  ·  {:.0} fps  ·  {}  ·  {}/{} layers  ·  loops {}",
                comp.width, comp.height, comp.frame_rate,
                format_duration(comp.duration_secs()),
                comp.active_layers(frame).count(), comp.layers.len(), self.state.loops()),
            FontId::proportional(12.0), palette.text_secondary);
    }
}

impl Default for SurfaceModule {
    fn default() -> Self { Self::new() }
}

impl SurfaceHandle for SurfaceModule {
    fn play(&mut self)            { self.engine.play(); }
    fn pause(&mut self)           { self.engine.pause(); }
    fn reset(&mut self)           { self.engine.reset(); }
    fn seek(&mut self, progress: f32) { self.engine.seek(progress); }
}

impl PanelModule for SurfaceModule {
    fn name(&self) -> &str { "Animation" }

    fn ui(&mut self, ui: &mut Ui, state: &PlaybackState, palette: &Palette, cmd: &mut Vec<PlayerCommand>) {
        // ── Header ───────────────────────────────────────────────────────────
        ui.allocate_ui(Vec2::new(ui.available_width(), HEADER_H), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.name()).size(13.0).strong().color(palette.text));
                if let Some(src) = state.source() {
                    ui.separator();
                    let name = fit_label(ui, &display_name(src), &FontId::proportional(12.0), ui.available_width() - 16.0);
                    ui.label(RichText::new(name)
                        .size(12.0).color(palette.text_secondary));
                }
            });
        });

        let avail = ui.available_rect_before_wrap();
        let rect  = Rect::from_min_max(avail.min, Pos2::new(avail.max.x, avail.max.y.max(avail.min.y + 120.0)));

        match self.phase().clone() {
            SurfacePhase::NoSource     => Self::draw_no_source(ui, rect, palette, cmd),
            SurfacePhase::Loading      => Self::draw_loading(ui, rect, palette, state.source()),
            SurfacePhase::Errored(msg) => Self::draw_error(ui, rect, palette, &msg),
            SurfacePhase::Loaded       => {
                ui.allocate_rect(rect, Sense::hover());
                self.draw_loaded(ui, rect, palette);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottieview_core::composition::{LayerKind, LayerSpan};

    fn comp() -> Composition {
        Composition {
            name:       "Bounce".into(),
            version:    "5.7.4".into(),
            width:      200,
            height:     100,
            in_point:   0.0,
            out_point:  30.0,
            frame_rate: 30.0,
            layers:     vec![LayerSpan {
                name: "ball".into(), kind: LayerKind::Shape, in_point: 0.0, out_point: 30.0,
            }],
        }
    }

    fn opened() -> (PlaybackState, SurfaceModule, Uuid) {
        let mut store = PlaybackState::new();
        let session = store.open_file("file:///tmp/bounce.json").unwrap();
        let mut surface = SurfaceModule::new();
        surface.sync(&store);
        (store, surface, session)
    }

    #[test]
    fn open_requests_one_load_and_starts_loading() {
        let (_, mut surface, session) = opened();
        assert_eq!(surface.phase(), &SurfacePhase::Loading);
        let loads = surface.take_pending_loads();
        assert_eq!(loads, vec![(session, PathBuf::from("/tmp/bounce.json"))]);
        assert!(surface.take_pending_loads().is_empty());
        assert!(surface.is_animating());
    }

    #[test]
    fn load_success_plays_with_autoplay() {
        let (_, mut surface, session) = opened();
        surface.on_loaded(session, comp());
        assert_eq!(surface.phase(), &SurfacePhase::Loaded);
        assert!(surface.engine.is_playing());
        surface.advance(0.5);
        assert!((surface.engine.frame() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn stale_results_are_ignored() {
        let (mut store, mut surface, old) = opened();
        store.open_file("file:///tmp/other.json").unwrap();
        surface.sync(&store);
        surface.on_loaded(old, comp());
        assert_eq!(surface.phase(), &SurfacePhase::Loading);
        surface.on_load_failed(old, GatewayError::LoadFailure("late".into()));
        assert_eq!(surface.phase(), &SurfacePhase::Loading);
    }

    #[test]
    fn failure_shows_error_until_new_source() {
        let (mut store, mut surface, session) = opened();
        surface.on_load_failed(session, GatewayError::LoadFailure("not a Lottie animation".into()));
        assert_eq!(surface.phase(), &SurfacePhase::Errored("not a Lottie animation".into()));
        assert!(surface.advance(1.0).is_empty());

        let next = store.open_file("file:///tmp/good.json").unwrap();
        surface.sync(&store);
        surface.on_loaded(next, comp());
        assert_eq!(surface.phase(), &SurfacePhase::Loaded);
    }

    #[test]
    fn store_changes_reach_the_engine() {
        let (mut store, mut surface, session) = opened();
        surface.on_loaded(session, comp());

        store.set_speed(2.0);
        store.set_loop(false);
        surface.sync(&store);
        assert_eq!(surface.engine.speed(), 2.0);
        assert!(!surface.engine.looping());

        // Scrub: pause then seek.
        store.set_progress(0.5);
        surface.sync(&store);
        assert!(!surface.engine.is_playing());
        assert!((surface.engine.progress() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn loops_are_counted() {
        let (_, mut surface, session) = opened();
        surface.on_loaded(session, comp());
        let events = surface.advance(2.5);
        assert_eq!(events, vec![EngineEvent::LoopCompleted; 2]);
        assert_eq!(surface.state.loops(), 2);
    }
}
