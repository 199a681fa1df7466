// crates/lottieview-ui/src/helpers/log.rs
//
// Logging setup for the binary.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console attached, so stderr output is silently discarded. Every
// event therefore also goes to `<log_dir>/lottieview.log` through a
// non-blocking writer. Filtering follows RUST_LOG, default `info`.
//
// The returned guard flushes the file writer on drop; main() holds it for the
// life of the process.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{AppConfig, LOG_FILE};

pub fn init(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A missing or read-only log dir degrades to stderr only.
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&config.log_dir);
    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("[log] cannot open {}: {e}", config.log_path().display());
            (None, None)
        }
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();
    if let Err(e) = installed {
        eprintln!("[log] subscriber already installed: {e}");
    }

    tracing::info!("[app] logging to {}", config.log_path().display());
    guard
}
