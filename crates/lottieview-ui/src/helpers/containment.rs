// crates/lottieview-ui/src/helpers/containment.rs
//
// Top-level containment for panics raised while building the panels.
//
// The panel pass runs inside `FaultBoundary::guard`. A panic there is caught,
// recorded and the app switches to a failure screen ("Something went wrong",
// the message, an optional details view, "Try Again"). Try Again clears the
// fault and the next frame renders the panels again.
//
// The panic hook only records message + location; unwinding is left to
// catch_unwind. The previous hook still runs so stderr keeps its output.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use egui::{Color32, RichText, Ui};
use parking_lot::Mutex;

use lottieview_core::commands::PlayerCommand;

use crate::theme::Palette;

const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

#[derive(Clone, Debug, PartialEq)]
pub struct PanicRecord {
    pub message:  String,
    pub location: Option<String>,
}

impl PanicRecord {
    fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload.downcast_ref::<&str>().map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self { message, location: None }
    }
}

#[derive(Default)]
pub struct FaultBoundary {
    /// Written by the panic hook, taken by `guard` when it catches.
    last_panic:   Arc<Mutex<Option<PanicRecord>>>,
    fault:        Option<PanicRecord>,
    show_details: bool,
}

impl FaultBoundary {
    pub fn new() -> Self { Self::default() }

    /// Chain a panic hook that records message and location for `guard`.
    /// Call once at startup.
    pub fn install_hook(&self) {
        let slot = Arc::clone(&self.last_panic);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut record = PanicRecord::from_payload(info.payload());
            record.location = info.location().map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            *slot.lock() = Some(record);
            previous(info);
        }));
    }

    pub fn is_tripped(&self) -> bool { self.fault.is_some() }

    /// Run `f`; a panic trips the boundary and yields None.
    pub fn guard<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        // The hook is process-wide; drop anything another thread left behind.
        self.last_panic.lock().take();
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(r) => Some(r),
            Err(payload) => {
                let record = self.last_panic.lock().take()
                    .unwrap_or_else(|| PanicRecord::from_payload(payload.as_ref()));
                tracing::error!(
                    "[app] panel pass panicked: {} ({})",
                    record.message,
                    record.location.as_deref().unwrap_or("unknown location"),
                );
                self.fault = Some(record);
                self.show_details = false;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        if self.fault.take().is_some() {
            tracing::info!("[app] fault cleared; re-rendering");
        }
        self.show_details = false;
    }

    /// Failure screen. Pushes `ClearFault` when the user asks to retry.
    pub fn ui(&mut self, ui: &mut Ui, palette: &Palette, cmd: &mut Vec<PlayerCommand>) {
        let Some(fault) = &self.fault else { return };

        ui.vertical_centered(|ui| {
            ui.add_space((ui.available_height() * 0.25).max(20.0));
            egui::Frame::new()
                .fill(palette.surface)
                .stroke(egui::Stroke::new(1.0, palette.border))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::same(24))
                .show(ui, |ui| {
                    ui.set_max_width(480.0);
                    ui.label(RichText::new("Something went wrong").size(20.0).strong().color(palette.error));
                    ui.add_space(8.0);
                    ui.label(RichText::new(&fault.message).size(14.0).color(palette.text_secondary));
                    ui.add_space(12.0);

                    ui.checkbox(&mut self.show_details, "Error Details");
                    if self.show_details {
                        egui::Frame::new()
                            .fill(palette.placeholder)
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.label(RichText::new(&fault.message).monospace().size(11.0));
                                if let Some(loc) = &fault.location {
                                    ui.label(RichText::new(format!("at {loc}")).monospace().size(11.0));
                                }
                            });
                    }

                    ui.add_space(12.0);
                    let retry = egui::Button::new(RichText::new("Try Again").color(Color32::WHITE))
                        .fill(palette.primary);
                    if ui.add(retry).clicked() {
                        cmd.push(PlayerCommand::ClearFault);
                    }
                });
        });
    }
}
