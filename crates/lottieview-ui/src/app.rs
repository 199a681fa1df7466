// crates/lottieview-ui/src/app.rs
//
// The shell: owns the store, the worker context and the panels, and runs one
// frame at a time.
//
// Per frame:
//   1. dropped files → OpenFile commands
//   2. drain worker results into store + surface
//   3. fire a due deferred autoplay
//   4. panel pass inside the fault boundary (panels only push commands)
//   5. process commands, sync the surface, hand loads to the worker
//   6. advance the engine clock, schedule the next repaint

use std::time::Instant;

use eframe::egui;
use lottieview_core::commands::{dispatch, PlayerCommand};
use lottieview_core::helpers::uri::{is_lottie_path, normalize_source};
use lottieview_core::state::PlaybackState;
use lottieview_core::surface::SurfaceHandle;
use lottieview_media::{EngineEvent, FileWorker};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::helpers::containment::FaultBoundary;
use crate::helpers::picker;
use crate::modules::{
    PanelModule,
    controls::{ControlsModule, PANEL_W},
    surface::SurfaceModule,
};
use crate::theme::{configure_style, ThemeMode};

// ── App ───────────────────────────────────────────────────────────────────────

pub struct LottieViewApp {
    state:        PlaybackState,
    context:      AppContext,
    // Panels as concrete types; the surface also serves as the SurfaceHandle.
    surface:      SurfaceModule,
    controls:     ControlsModule,
    theme:        ThemeMode,
    fault:        FaultBoundary,
    /// Commands emitted by panels each frame, processed after the UI pass
    pending_cmds: Vec<PlayerCommand>,
}

impl LottieViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        configure_style(&cc.egui_ctx, config.theme);

        let fault = FaultBoundary::new();
        fault.install_hook();

        let mut pending_cmds = Vec::new();
        if let Some(uri) = config.initial_file {
            tracing::info!("[app] opening {uri} from the command line");
            pending_cmds.push(PlayerCommand::OpenFile(uri));
        }

        Self {
            state:    PlaybackState::new(),
            context:  AppContext::new(FileWorker::new()),
            surface:  SurfaceModule::new(),
            controls: ControlsModule::new(config.theme),
            theme:    config.theme,
            fault,
            pending_cmds,
        }
    }

    fn process_command(&mut self, ctx: &egui::Context, cmd: PlayerCommand) {
        match cmd {
            // ── File ─────────────────────────────────────────────────────────
            PlayerCommand::PickFile => {
                if let Some(uri) = picker::resolve(picker::pick_lottie_file()) {
                    self.process_command(ctx, PlayerCommand::OpenFile(uri));
                }
            }

            // ── View ─────────────────────────────────────────────────────────
            PlayerCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                configure_style(ctx, self.theme);
                tracing::info!("[app] theme → {:?}", self.theme);
            }
            PlayerCommand::ClearFault => {
                self.fault.clear();
            }

            // ── Playback + open ──────────────────────────────────────────────
            other => {
                let opened = dispatch(&mut self.state, &other, &mut self.surface, Instant::now());
                if let (Some(session), Some(source)) = (opened, self.state.source()) {
                    tracing::info!("[app] opened {source}");
                    self.context.request_file_size(session, source);
                }
            }
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        // One animation at a time: the first usable file wins.
        let picked = files.into_iter()
            .filter_map(|f| f.path)
            .find(|p| {
                let ok = is_lottie_path(p);
                if !ok {
                    tracing::warn!("[app] ignoring dropped file {}", p.display());
                }
                ok
            });
        if let Some(uri) = picked.and_then(|p| normalize_source(&p.to_string_lossy())) {
            self.pending_cmds.push(PlayerCommand::OpenFile(uri));
        }
    }

    /// Both panels, inside the fault boundary. A panic here trips the
    /// boundary; the next frames show the failure screen instead.
    fn show_panels(&mut self, ctx: &egui::Context) {
        let palette = self.theme.palette();
        self.controls.theme = self.theme;

        let fault    = &mut self.fault;
        let controls = &mut self.controls;
        let surface  = &mut self.surface;
        let state    = &self.state;
        let cmds     = &mut self.pending_cmds;

        fault.guard(|| {
            egui::SidePanel::right("controls_panel")
                .resizable(false)
                .exact_width(PANEL_W)
                .frame(egui::Frame::new()
                    .fill(palette.surface)
                    .stroke(egui::Stroke::new(1.0, palette.border))
                    .inner_margin(egui::Margin::same(20)))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        controls.ui(ui, state, &palette, cmds);
                    });
                });

            egui::CentralPanel::default()
                .frame(egui::Frame::new()
                    .fill(palette.background)
                    .inner_margin(egui::Margin::same(12)))
                .show(ctx, |ui| {
                    surface.ui(ui, state, &palette, cmds);
                });
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for LottieViewApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        tracing::info!("[app] shutting down");
        self.context.worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        if self.context.ingest_media_results(&mut self.state, &mut self.surface) {
            ctx.request_repaint();
        }

        let now = Instant::now();
        if self.state.tick(now) {
            self.surface.play();
        }

        if self.fault.is_tripped() {
            let palette = self.theme.palette();
            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(palette.background))
                .show(ctx, |ui| {
                    self.fault.ui(ui, &palette, &mut self.pending_cmds);
                });
        } else {
            self.show_panels(ctx);
        }

        // ── Process commands emitted by panels this frame ─────────────────────
        let cmds: Vec<PlayerCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(ctx, cmd);
        }

        self.surface.sync(&self.state);
        self.context.dispatch_loads(&mut self.surface);

        let dt = ctx.input(|i| i.stable_dt);
        for event in self.surface.advance(dt) {
            if event == EngineEvent::Completed {
                self.state.mark_stopped();
            }
        }

        if self.surface.is_animating() {
            ctx.request_repaint();
        } else if let Some(due) = self.state.pending_autoplay() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }
}
