// crates/lottieview-media/src/worker.rs
//
// FileWorker: owns the background thread that does all file IO for the UI —
// composition loads and file-size lookups. The UI thread never touches the
// filesystem; it sends a request and drains `rx` once per frame.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use uuid::Uuid;

use lottieview_core::error::GatewayError;
use lottieview_core::media_types::MediaResult;

use crate::composition::load_composition;
use crate::probe::probe_file_size;

// ── Internal types ────────────────────────────────────────────────────────────

enum FileRequest {
    Load      { session: Uuid, path: PathBuf },
    ProbeSize { session: Uuid, path: PathBuf },
    /// Poison pill: the thread exits after draining nothing further.
    Shutdown,
}

// ── FileWorker ───────────────────────────────────────────────────────────────

pub struct FileWorker {
    /// Results for the UI: Loaded, LoadFailed, FileSize.
    pub rx: Receiver<MediaResult>,
    req_tx: Sender<FileRequest>,
    handle: Option<JoinHandle<()>>,
}

impl FileWorker {
    pub fn new() -> Self {
        let (req_tx, req_rx) = unbounded::<FileRequest>();
        // Unbounded: shutdown joins the thread, so it must never block on a
        // full result queue the UI stopped draining.
        let (tx, rx)         = unbounded::<MediaResult>();

        let handle = thread::Builder::new()
            .name("lottieview-file-worker".into())
            .spawn(move || serve(req_rx, tx))
            .map_err(|e| tracing::error!("[media] could not spawn file worker: {e}"))
            .ok();

        Self { rx, req_tx, handle }
    }

    /// Parse the document at `path` for `session`. Answers with `Loaded` or
    /// `LoadFailed`.
    pub fn load(&self, session: Uuid, path: PathBuf) {
        self.send(FileRequest::Load { session, path });
    }

    /// Look up the byte size of `path` for `session`. Always answers with
    /// `FileSize`, carrying None on failure.
    pub fn probe_size(&self, session: Uuid, path: PathBuf) {
        self.send(FileRequest::ProbeSize { session, path });
    }

    fn send(&self, req: FileRequest) {
        if self.req_tx.send(req).is_err() {
            tracing::warn!("[media] file worker is gone; request dropped");
        }
    }

    /// Stop the worker thread and wait for it. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else { return };
        let _ = self.req_tx.send(FileRequest::Shutdown);
        if handle.join().is_err() {
            tracing::error!("[media] file worker panicked during shutdown");
        }
    }
}

impl Default for FileWorker {
    fn default() -> Self { Self::new() }
}

impl Drop for FileWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn serve(req_rx: Receiver<FileRequest>, tx: Sender<MediaResult>) {
    while let Ok(req) = req_rx.recv() {
        let result = match req {
            FileRequest::Shutdown => return,
            FileRequest::Load { session, path } => match load_composition(&path) {
                Ok(composition) => {
                    tracing::info!(
                        "[media] loaded '{}' {}x{} {:.0}fps {} layers ← {}",
                        composition.name, composition.width, composition.height,
                        composition.frame_rate, composition.layers.len(), path.display(),
                    );
                    MediaResult::Loaded { session, composition }
                }
                Err(e) => {
                    tracing::error!("[media] load failed for {}: {e:#}", path.display());
                    MediaResult::LoadFailed { session, error: GatewayError::LoadFailure(format!("{e:#}")) }
                }
            },
            FileRequest::ProbeSize { session, path } => {
                MediaResult::FileSize { session, bytes: probe_file_size(&path) }
            }
        };
        // UI gone — nothing left to report to.
        if tx.send(result).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn load_and_probe_round_trip() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let body = r#"{"nm":"Dot","ip":0,"op":30,"fr":30,"w":64,"h":64,"layers":[]}"#;
        f.write_all(body.as_bytes()).unwrap();

        let worker = FileWorker::new();
        let session = Uuid::new_v4();
        worker.probe_size(session, f.path().to_path_buf());
        worker.load(session, f.path().to_path_buf());

        match worker.rx.recv_timeout(WAIT).unwrap() {
            MediaResult::FileSize { session: s, bytes } => {
                assert_eq!(s, session);
                assert_eq!(bytes, Some(body.len() as u64));
            }
            other => panic!("expected FileSize, got {other:?}"),
        }
        match worker.rx.recv_timeout(WAIT).unwrap() {
            MediaResult::Loaded { session: s, composition } => {
                assert_eq!(s, session);
                assert_eq!(composition.name, "Dot");
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn failures_are_reported_not_fatal() {
        let worker = FileWorker::new();
        let session = Uuid::new_v4();
        let missing = PathBuf::from("/no/such/anim.json");
        worker.load(session, missing.clone());
        worker.probe_size(session, missing);

        match worker.rx.recv_timeout(WAIT).unwrap() {
            MediaResult::LoadFailed { error: GatewayError::LoadFailure(reason), .. } => {
                assert!(reason.contains("cannot read"));
            }
            other => panic!("expected LoadFailed, got {other:?}"),
        }
        match worker.rx.recv_timeout(WAIT).unwrap() {
            MediaResult::FileSize { bytes, .. } => assert_eq!(bytes, None),
            other => panic!("expected FileSize, got {other:?}"),
        }
    }

    #[test]
    fn shutdown_with_undrained_results_returns() {
        let mut worker = FileWorker::new();
        for _ in 0..200 {
            worker.probe_size(Uuid::new_v4(), PathBuf::from("/no/such/file"));
        }
        let deadline = std::time::Instant::now() + WAIT;
        while worker.rx.len() < 200 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(worker.rx.len(), 200);
        worker.shutdown();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut worker = FileWorker::new();
        worker.shutdown();
        worker.shutdown();
        // Requests after shutdown are dropped quietly.
        worker.probe_size(Uuid::new_v4(), PathBuf::from("/tmp"));
    }
}
