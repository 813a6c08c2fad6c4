//! Frame driver.
//!
//! The host schedules ticks (the browser's animation-frame callback); each
//! tick reads the clock, feeds the elapsed time to the shader, damps the
//! camera and draws once. The clock is a trait so the loop can be stepped
//! deterministically without a display.

use std::cell::Cell;
use std::rc::Rc;

use crate::app::Playground;
use crate::backend::RenderBackend;

pub trait Clock {
    /// Seconds since the clock was started.
    fn elapsed_seconds(&self) -> f64;
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn elapsed_seconds(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug)]
pub struct RenderLoop<C> {
    clock: C,
    elapsed: f32,
    frames: u64,
}

impl<C: Clock> RenderLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Runs one frame and returns the time it was drawn at. Time never goes
    /// backwards even if the clock does.
    pub fn tick<B: RenderBackend>(&mut self, playground: &mut Playground<B>) -> f32 {
        let now = self.clock.elapsed_seconds() as f32;
        if now.is_finite() && now > self.elapsed {
            self.elapsed = now;
        }
        playground.frame(self.elapsed);
        self.frames += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
