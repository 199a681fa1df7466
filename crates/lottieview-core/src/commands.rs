// crates/lottieview-core/src/commands.rs
//
// Every user action in LottieView is expressed as a PlayerCommand.
// Panels emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs
// (or in `dispatch` below if it only touches playback).

use std::time::Instant;
use uuid::Uuid;

use crate::helpers::uri::normalize_source;
use crate::state::PlaybackState;
use crate::surface::SurfaceHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    // ── Playback ─────────────────────────────────────────────────────────────
    Play,
    Pause,
    Reset,
    SetSpeed(f32),
    SetAutoplay(bool),
    SetLoop(bool),
    SetProgress(f32),

    // ── File ─────────────────────────────────────────────────────────────────
    /// Show the native picker. app.rs resolves it into `OpenFile` or nothing.
    PickFile,
    /// Open a path or URI: picker result, dropped file, or "open with" argument.
    OpenFile(String),

    // ── View ─────────────────────────────────────────────────────────────────
    ToggleTheme,
    /// "Try Again" on the containment boundary's failure screen.
    ClearFault,
}

/// Apply a playback or file command to the store and mirror it onto the
/// surface. Non-playback commands are left to the caller and return None.
///
/// Returns the new session id when the command opened a file, so the caller
/// can kick off the file-size lookup.
pub fn dispatch(
    state:   &mut PlaybackState,
    cmd:     &PlayerCommand,
    surface: &mut dyn SurfaceHandle,
    now:     Instant,
) -> Option<Uuid> {
    match cmd {
        PlayerCommand::Play => {
            if state.play() { surface.play(); }
        }
        PlayerCommand::Pause => {
            if state.pause() { surface.pause(); }
        }
        PlayerCommand::Reset => {
            if state.reset(now) { surface.reset(); }
        }
        PlayerCommand::SetSpeed(v)    => state.set_speed(*v),
        PlayerCommand::SetAutoplay(b) => state.set_autoplay(*b),
        PlayerCommand::SetLoop(b)     => state.set_loop(*b),
        PlayerCommand::SetProgress(v) => {
            if state.set_progress(*v) { surface.pause(); }
        }
        PlayerCommand::OpenFile(path) => {
            return normalize_source(path).and_then(|uri| state.open_file(&uri));
        }
        PlayerCommand::PickFile
        | PlayerCommand::ToggleTheme
        | PlayerCommand::ClearFault => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl SurfaceHandle for Recorder {
        fn play(&mut self)            { self.0.push("play"); }
        fn pause(&mut self)           { self.0.push("pause"); }
        fn reset(&mut self)           { self.0.push("reset"); }
        fn seek(&mut self, _p: f32)   { self.0.push("seek"); }
    }

    #[test]
    fn transport_without_source_sends_nothing() {
        let mut state = PlaybackState::new();
        let mut rec = Recorder::default();
        let now = Instant::now();
        for cmd in [PlayerCommand::Play, PlayerCommand::Pause, PlayerCommand::Reset] {
            assert_eq!(dispatch(&mut state, &cmd, &mut rec, now), None);
        }
        assert!(rec.0.is_empty());
        assert!(!state.is_playing());
        assert!(!state.has_source());
    }

    #[test]
    fn open_file_normalizes_and_returns_session() {
        let mut state = PlaybackState::new();
        let mut rec = Recorder::default();
        let session = dispatch(&mut state, &PlayerCommand::OpenFile("/tmp/a.json".into()), &mut rec, Instant::now());
        assert!(session.is_some());
        assert_eq!(state.session(), session);
        assert_eq!(state.source(), Some("file:///tmp/a.json"));
        assert!(rec.0.is_empty());
    }

    #[test]
    fn cancelled_open_changes_nothing() {
        let mut state = PlaybackState::new();
        let mut rec = Recorder::default();
        let now = Instant::now();
        dispatch(&mut state, &PlayerCommand::OpenFile("/tmp/a.json".into()), &mut rec, now);
        dispatch(&mut state, &PlayerCommand::SetSpeed(2.5), &mut rec, now);
        let session = state.session();
        assert_eq!(dispatch(&mut state, &PlayerCommand::OpenFile(String::new()), &mut rec, now), None);
        assert_eq!(state.session(), session);
        assert_eq!(state.speed(), 2.5);
    }

    #[test]
    fn transport_mirrors_onto_surface() {
        let mut state = PlaybackState::new();
        let mut rec = Recorder::default();
        let now = Instant::now();
        dispatch(&mut state, &PlayerCommand::OpenFile("/tmp/a.json".into()), &mut rec, now);
        dispatch(&mut state, &PlayerCommand::Pause, &mut rec, now);
        dispatch(&mut state, &PlayerCommand::Play, &mut rec, now);
        dispatch(&mut state, &PlayerCommand::Reset, &mut rec, now);
        assert_eq!(rec.0, vec!["pause", "play", "reset"]);
        assert!(!state.is_playing());
        assert!(state.tick(now + Duration::from_millis(150)));
    }

    #[test]
    fn scrub_while_playing_pauses_surface() {
        let mut state = PlaybackState::new();
        let mut rec = Recorder::default();
        let now = Instant::now();
        dispatch(&mut state, &PlayerCommand::OpenFile("/tmp/a.json".into()), &mut rec, now);
        dispatch(&mut state, &PlayerCommand::SetProgress(0.02), &mut rec, now);
        assert!(rec.0.is_empty());
        dispatch(&mut state, &PlayerCommand::SetProgress(0.7), &mut rec, now);
        assert_eq!(rec.0, vec!["pause"]);
        assert!(!state.is_playing());
    }
}
