#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod context;
mod helpers;
mod modules;
mod theme;

use config::AppConfig;

fn main() -> eframe::Result {
    let config = AppConfig::from_env();
    // Held for the life of the process; dropping it flushes the log file.
    let _log_guard = helpers::log::init(&config);
    for warning in &config.warnings {
        tracing::warn!("[config] {warning}");
    }
    tracing::info!(
        "[app] starting LottieView {} (theme {:?}, file {:?})",
        env!("CARGO_PKG_VERSION"), config.theme, config.initial_file,
    );

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("LottieView")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_drag_and_drop(true)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "LottieView",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::LottieViewApp::new(cc, config)))),
    )
}
