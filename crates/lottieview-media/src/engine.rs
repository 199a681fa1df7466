// crates/lottieview-media/src/engine.rs
//
// The animation engine: owns the composition and its own playback clock.
//
// The surface drives it imperatively (play / pause / reset / seek) and by
// parameter (speed, loop). The UI calls `advance(dt)` once per frame; the
// engine moves its frame cursor and reports loop wraps and end-of-animation.
// Commands issued before a composition arrives are remembered and take effect
// once `set_composition` is called, mirroring an engine that loads
// asynchronously.

use lottieview_core::composition::Composition;
use lottieview_core::state::{clamp_speed, DEFAULT_SPEED};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// Playback wrapped from the out point back to the in point.
    LoopCompleted,
    /// A non-looping animation reached its out point and stopped.
    Completed,
}

pub trait AnimationEngine {
    /// Install a freshly loaded composition (or clear it with None). The
    /// cursor moves to the in point; play state and parameters are kept.
    fn set_composition(&mut self, composition: Option<Composition>);
    fn composition(&self) -> Option<&Composition>;

    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and rewind to the in point.
    fn reset(&mut self);
    /// Jump to a normalized position; play state is unchanged.
    fn seek(&mut self, progress: f32);
    fn set_speed(&mut self, speed: f32);
    fn set_loop(&mut self, looping: bool);

    /// Advance the clock by `dt` seconds of wall time.
    fn advance(&mut self, dt: f32) -> Vec<EngineEvent>;

    fn is_playing(&self) -> bool;
    /// Absolute timeline frame (in point based).
    fn frame(&self) -> f32;
    /// Normalized position in [0, 1]; 0 without a composition.
    fn progress(&self) -> f32;
}

#[derive(Debug)]
pub struct LottieEngine {
    composition: Option<Composition>,
    frame:       f32,
    playing:     bool,
    speed:       f32,
    looping:     bool,
    /// Seek requested before a composition was installed.
    pending_seek: Option<f32>,
}

impl Default for LottieEngine {
    fn default() -> Self {
        Self {
            composition:  None,
            frame:        0.0,
            playing:      false,
            speed:        DEFAULT_SPEED,
            looping:      true,
            pending_seek: None,
        }
    }
}

impl LottieEngine {
    pub fn new() -> Self { Self::default() }

    pub fn speed(&self)   -> f32  { self.speed }
    pub fn looping(&self) -> bool { self.looping }
}

impl AnimationEngine for LottieEngine {
    fn set_composition(&mut self, composition: Option<Composition>) {
        self.frame = composition.as_ref().map(|c| c.in_point).unwrap_or(0.0);
        self.composition = composition;
        if let Some(p) = self.pending_seek.take() {
            self.seek(p);
        }
    }

    fn composition(&self) -> Option<&Composition> {
        self.composition.as_ref()
    }

    fn play(&mut self) {
        // Replaying a finished one-shot starts over.
        if let Some(c) = &self.composition {
            if !self.looping && self.frame >= c.out_point {
                self.frame = c.in_point;
            }
        }
        self.playing = true;
    }

    fn pause(&mut self) { self.playing = false; }

    fn reset(&mut self) {
        self.playing      = false;
        self.pending_seek = None;
        self.frame        = self.composition.as_ref().map(|c| c.in_point).unwrap_or(0.0);
    }

    fn seek(&mut self, progress: f32) {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        match &self.composition {
            Some(c) => self.frame = c.frame_at(progress),
            None    => self.pending_seek = Some(progress),
        }
    }

    fn set_speed(&mut self, speed: f32) {
        if !speed.is_nan() {
            self.speed = clamp_speed(speed);
        }
    }

    fn set_loop(&mut self, looping: bool) { self.looping = looping; }

    fn advance(&mut self, dt: f32) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let Some(c) = &self.composition else { return events };
        if !self.playing || dt.is_nan() || dt <= 0.0 {
            return events;
        }
        let span = c.duration_frames();
        if span <= 0.0 {
            return events;
        }

        self.frame += dt * c.frame_rate * self.speed;
        if self.frame < c.out_point {
            return events;
        }

        if self.looping {
            // A long stall can cover several loops; report each one.
            let overshoot = self.frame - c.in_point;
            let wraps = (overshoot / span).floor() as u32;
            self.frame = c.in_point + overshoot % span;
            events.extend(std::iter::repeat(EngineEvent::LoopCompleted).take(wraps as usize));
        } else {
            self.frame   = c.out_point;
            self.playing = false;
            events.push(EngineEvent::Completed);
        }
        events
    }

    fn is_playing(&self) -> bool { self.playing }
    fn frame(&self)      -> f32  { self.frame }

    fn progress(&self) -> f32 {
        self.composition.as_ref().map(|c| c.progress_at(self.frame)).unwrap_or(0.0)
    }
}
