// crates/lottieview-core/src/state.rs
// The playback aggregate — single source of truth for what the user asked for.
// Mutated only through the transition methods below; never talks to the engine.
use std::time::{Duration, Instant};
use uuid::Uuid;

// ── Limits ───────────────────────────────────────────────────────────────────
pub const SPEED_MIN:       f32 = 0.1;
pub const SPEED_MAX:       f32 = 3.0;
pub const DEFAULT_SPEED:   f32 = 1.0;
/// A progress jump larger than this is a scrub gesture, not playback.
pub const SCRUB_THRESHOLD: f32 = 0.05;
/// Delay between `reset()` and the autoplay resume. The engine resets
/// asynchronously; this is a timing coupling, not a completion guarantee.
pub const RESET_AUTOPLAY_DELAY: Duration = Duration::from_millis(100);

/// A pending "resume playing" scheduled by `reset()` while autoplay is on.
///
/// Owned by the store, so dropping the store (or any cancelling transition)
/// drops the task with it — it can never fire against a torn-down surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredAutoplay {
    pub due: Instant,
}

#[derive(Clone, Debug)]
pub struct PlaybackState {
    source:     Option<String>,
    /// Fresh id per opened file. Worker results tagged with an older id are stale.
    session:    Option<Uuid>,
    speed:      f32,
    autoplay:   bool,
    looping:    bool,
    progress:   f32,
    is_playing: bool,
    file_size:  Option<u64>,
    deferred:   Option<DeferredAutoplay>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            source:     None,
            session:    None,
            speed:      DEFAULT_SPEED,
            autoplay:   true,
            looping:    true,
            progress:   0.0,
            is_playing: false,
            file_size:  None,
            deferred:   None,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self { Self::default() }

    // ── Read access ──────────────────────────────────────────────────────────
    pub fn source(&self)     -> Option<&str>  { self.source.as_deref() }
    pub fn session(&self)    -> Option<Uuid>  { self.session }
    pub fn speed(&self)      -> f32           { self.speed }
    pub fn autoplay(&self)   -> bool          { self.autoplay }
    pub fn looping(&self)    -> bool          { self.looping }
    pub fn progress(&self)   -> f32           { self.progress }
    pub fn is_playing(&self) -> bool          { self.is_playing }
    pub fn file_size(&self)  -> Option<u64>   { self.file_size }
    pub fn has_source(&self) -> bool          { self.source.is_some() }

    /// Due time of the scheduled autoplay resume, if one is pending.
    pub fn pending_autoplay(&self) -> Option<Instant> {
        self.deferred.map(|d| d.due)
    }

    // ── File ─────────────────────────────────────────────────────────────────

    /// Replace the source and reset every playback field to its default.
    /// An empty path is a cancelled pick: nothing changes and None is returned.
    pub fn open_file(&mut self, uri: &str) -> Option<Uuid> {
        let uri = uri.trim();
        if uri.is_empty() {
            return None;
        }
        let session = Uuid::new_v4();
        *self = Self {
            source:     Some(uri.to_string()),
            session:    Some(session),
            is_playing: true,
            ..Self::default()
        };
        Some(session)
    }

    /// Record a file-size lookup result. Results for a superseded session are
    /// dropped. Returns true when the value was accepted.
    pub fn set_file_size(&mut self, session: Uuid, bytes: Option<u64>) -> bool {
        if self.session != Some(session) {
            return false;
        }
        self.file_size = bytes;
        true
    }

    // ── Parameters ───────────────────────────────────────────────────────────

    /// Clamp to [0.1, 3.0] and round to one decimal. NaN leaves speed unchanged.
    pub fn set_speed(&mut self, v: f32) {
        if v.is_nan() {
            return;
        }
        self.speed = clamp_speed(v);
    }

    pub fn set_autoplay(&mut self, on: bool) { self.autoplay = on; }
    pub fn set_loop(&mut self, on: bool)     { self.looping = on; }

    /// Clamp to [0, 1]. A jump above SCRUB_THRESHOLD while playing pauses
    /// first. Returns true when that scrub pause happened.
    pub fn set_progress(&mut self, v: f32) -> bool {
        if v.is_nan() {
            return false;
        }
        let next = v.clamp(0.0, 1.0);
        let scrubbed = self.is_playing && is_scrub(self.progress, next);
        if scrubbed {
            self.is_playing = false;
            self.deferred   = None;
        }
        self.progress = next;
        scrubbed
    }

    // ── Transport ────────────────────────────────────────────────────────────
    // Each returns false (and changes nothing) when no source is loaded.

    pub fn play(&mut self) -> bool {
        if self.source.is_none() { return false; }
        self.is_playing = true;
        self.deferred   = None;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.source.is_none() { return false; }
        self.is_playing = false;
        self.deferred   = None;
        true
    }

    /// Rewind to 0 and stop. With autoplay on, schedules a resume
    /// RESET_AUTOPLAY_DELAY after `now`; a later reset replaces it.
    pub fn reset(&mut self, now: Instant) -> bool {
        if self.source.is_none() { return false; }
        self.progress   = 0.0;
        self.is_playing = false;
        self.deferred   = self.autoplay.then(|| DeferredAutoplay {
            due: now + RESET_AUTOPLAY_DELAY,
        });
        true
    }

    /// Fire the deferred autoplay if it is due. Returns true when it fired,
    /// in which case the caller must command the engine to play.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deferred {
            Some(d) if now >= d.due => {
                self.deferred   = None;
                self.is_playing = true;
                true
            }
            _ => false,
        }
    }

    /// The engine stopped on its own (end of a non-looping animation).
    pub fn mark_stopped(&mut self) {
        self.is_playing = false;
    }
}

/// True when moving from `prev` to `next` is a scrub gesture.
///
/// Compared in whole hundredths (the slider step), so a 0.05 step stays
/// below the threshold whatever f32 rounding the subtraction picks up.
pub fn is_scrub(prev: f32, next: f32) -> bool {
    ((next - prev).abs() * 100.0).round() > (SCRUB_THRESHOLD * 100.0).round()
}

/// Speed clamp shared by the store and the speed slider.
pub fn clamp_speed(v: f32) -> f32 {
    (v.clamp(SPEED_MIN, SPEED_MAX) * 10.0).round() / 10.0
}
