// crates/lottieview-core/src/surface.rs
//
// Animation surface logic, minus the drawing.
//
// The surface is the only thing allowed to address the engine. Each frame the
// UI hands it a `SurfaceDirective` snapshot of the aggregate; `observe()`
// diffs it against the previous snapshot and returns the engine commands that
// bring the engine in line. Load results from the worker drive the phase.
//
// Phases:
//   NoSource ──source set──▶ Loading ──ok──▶ Loaded ◀──ok──┐
//                              │                │           │
//                              └──fail──▶ Errored ◀──fail───┘
// A source, once set, is only ever replaced, so NoSource is not re-entered.

use std::path::PathBuf;
use uuid::Uuid;

use crate::helpers::uri::to_fs_path;
use crate::state::{is_scrub, PlaybackState};

/// Imperative capability set the shell holds on the surface.
pub trait SurfaceHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn reset(&mut self);
    fn seek(&mut self, progress: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum SurfacePhase {
    NoSource,
    /// Source set, waiting for the worker's load result.
    Loading,
    Loaded,
    /// Message shown in place of the animation until a new source arrives.
    Errored(String),
}

/// The directive subset of the aggregate the surface consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceDirective {
    pub source:   Option<String>,
    pub session:  Option<Uuid>,
    pub speed:    f32,
    pub autoplay: bool,
    pub looping:  bool,
    pub progress: f32,
}

impl SurfaceDirective {
    pub fn from_state(state: &PlaybackState) -> Self {
        Self {
            source:   state.source().map(str::to_owned),
            session:  state.session(),
            speed:    state.speed(),
            autoplay: state.autoplay(),
            looping:  state.looping(),
            progress: state.progress(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCommand {
    /// Hand the document at `path` to the worker; the engine unloads meanwhile.
    Load { session: Uuid, path: PathBuf },
    Reset,
    Play,
    Pause,
    Seek(f32),
    SetSpeed(f32),
    SetLoop(bool),
}

#[derive(Debug)]
pub struct SurfaceState {
    phase:     SurfacePhase,
    last:      Option<SurfaceDirective>,
    /// True between a >SCRUB_THRESHOLD progress jump and the next small change.
    scrubbing: bool,
    loops:     u32,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self { phase: SurfacePhase::NoSource, last: None, scrubbing: false, loops: 0 }
    }
}

impl SurfaceState {
    pub fn new() -> Self { Self::default() }

    pub fn phase(&self)        -> &SurfacePhase { &self.phase }
    pub fn is_scrubbing(&self) -> bool          { self.scrubbing }
    pub fn loops(&self)        -> u32           { self.loops }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SurfacePhase::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    fn current_session(&self) -> Option<Uuid> {
        self.last.as_ref().and_then(|d| d.session)
    }

    /// Diff `next` against the last observed directive and return the engine
    /// commands that apply the change. Identical snapshots yield nothing.
    pub fn observe(&mut self, next: &SurfaceDirective) -> Vec<EngineCommand> {
        let prev = self.last.replace(next.clone());
        let mut cmds = Vec::new();

        let (Some(source), Some(session)) = (next.source.as_deref(), next.session) else {
            return cmds;
        };

        let same_session = prev.as_ref().and_then(|p| p.session) == Some(session);
        let prev = match prev {
            Some(p) if same_session => p,
            _ => {
                // New source: clear any error, reset, then autoplay.
                self.phase     = SurfacePhase::Loading;
                self.scrubbing = false;
                self.loops     = 0;
                cmds.push(EngineCommand::Load { session, path: to_fs_path(source) });
                cmds.push(EngineCommand::SetSpeed(next.speed));
                cmds.push(EngineCommand::SetLoop(next.looping));
                cmds.push(EngineCommand::Reset);
                if next.autoplay {
                    cmds.push(EngineCommand::Play);
                }
                return cmds;
            }
        };

        if prev.speed != next.speed {
            cmds.push(EngineCommand::SetSpeed(next.speed));
        }
        if prev.looping != next.looping {
            cmds.push(EngineCommand::SetLoop(next.looping));
        }
        if prev.progress != next.progress {
            if is_scrub(prev.progress, next.progress) {
                self.scrubbing = true;
                cmds.push(EngineCommand::Pause);
            } else {
                self.scrubbing = false;
            }
            cmds.push(EngineCommand::Seek(next.progress));
        }
        if prev.autoplay != next.autoplay {
            if next.autoplay {
                if !self.scrubbing {
                    cmds.push(EngineCommand::Play);
                }
            } else {
                cmds.push(EngineCommand::Pause);
            }
        }
        cmds
    }

    /// Engine finished loading. Returns false for a stale session.
    pub fn on_load_succeeded(&mut self, session: Uuid) -> bool {
        if self.current_session() != Some(session) {
            return false;
        }
        self.phase = SurfacePhase::Loaded;
        true
    }

    /// Engine failed to load. No automatic recovery; only a new source clears it.
    pub fn on_load_failed(&mut self, session: Uuid, message: impl Into<String>) -> bool {
        if self.current_session() != Some(session) {
            return false;
        }
        self.phase = SurfacePhase::Errored(message.into());
        true
    }

    pub fn on_loop_completed(&mut self) {
        self.loops = self.loops.saturating_add(1);
    }
}
