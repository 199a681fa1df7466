// crates/lottieview-ui/src/context.rs
//
// AppContext owns the runtime handles that are NOT part of the playback
// store. LottieViewApp holds one of these plus a PlaybackState and the
// panels.
//
//   AppContext
//     └── worker — FileWorker thread + its result channel

use lottieview_core::helpers::uri::to_fs_path;
use lottieview_core::media_types::MediaResult;
use lottieview_core::state::PlaybackState;
use lottieview_media::FileWorker;
use uuid::Uuid;

use crate::modules::surface::SurfaceModule;

pub struct AppContext {
    pub worker: FileWorker,
}

impl AppContext {
    pub fn new(worker: FileWorker) -> Self {
        Self { worker }
    }

    /// A file was opened: look up its size off the UI thread.
    pub fn request_file_size(&self, session: Uuid, source: &str) {
        self.worker.probe_size(session, to_fs_path(source));
    }

    /// Hand the surface's queued loads to the worker.
    pub fn dispatch_loads(&self, surface: &mut SurfaceModule) {
        for (session, path) in surface.take_pending_loads() {
            self.worker.load(session, path);
        }
    }

    /// Drain all worker results into the store and the surface. Results for a
    /// superseded session are dropped by the receivers.
    /// Returns true when anything arrived, so the caller can repaint.
    pub fn ingest_media_results(&mut self, state: &mut PlaybackState, surface: &mut SurfaceModule) -> bool {
        let mut any = false;
        while let Ok(result) = self.worker.rx.try_recv() {
            any = true;
            match result {
                MediaResult::FileSize { session, bytes } => {
                    if !state.set_file_size(session, bytes) {
                        tracing::debug!("[app] stale file size for {session}");
                    }
                }
                MediaResult::Loaded { session, composition } => {
                    surface.on_loaded(session, composition);
                }
                MediaResult::LoadFailed { session, error } => {
                    surface.on_load_failed(session, error);
                }
            }
        }
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottieview_core::surface::SurfacePhase;
    use std::io::Write;
    use std::time::{Duration, Instant};

    /// Pump the worker until `done` holds or the deadline passes.
    fn pump(
        ctx:     &mut AppContext,
        state:   &mut PlaybackState,
        surface: &mut SurfaceModule,
        done:    impl Fn(&PlaybackState, &SurfaceModule) -> bool,
    ) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            ctx.ingest_media_results(state, surface);
            if done(state, surface) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    fn temp_lottie(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn open_load_and_size_flow_end_to_end() {
        let body = r#"{"nm":"Pulse","ip":0,"op":24,"fr":24,"w":32,"h":32,"layers":[]}"#;
        let file = temp_lottie(body);
        let uri = format!("file://{}", file.path().display());

        let mut ctx     = AppContext::new(FileWorker::new());
        let mut state   = PlaybackState::new();
        let mut surface = SurfaceModule::new();

        let session = state.open_file(&uri).unwrap();
        ctx.request_file_size(session, &uri);
        surface.sync(&state);
        ctx.dispatch_loads(&mut surface);

        let ok = pump(&mut ctx, &mut state, &mut surface, |s, sf| {
            s.file_size().is_some() && *sf.phase() == SurfacePhase::Loaded
        });
        assert!(ok, "worker never answered");
        assert_eq!(state.file_size(), Some(body.len() as u64));
    }

    #[test]
    fn broken_document_errors_the_surface() {
        let file = temp_lottie("{ not json");
        let uri = format!("file://{}", file.path().display());

        let mut ctx     = AppContext::new(FileWorker::new());
        let mut state   = PlaybackState::new();
        let mut surface = SurfaceModule::new();

        state.open_file(&uri).unwrap();
        surface.sync(&state);
        ctx.dispatch_loads(&mut surface);

        let ok = pump(&mut ctx, &mut state, &mut surface, |_, sf| {
            matches!(sf.phase(), SurfacePhase::Errored(_))
        });
        assert!(ok, "load failure never surfaced");
    }
}
