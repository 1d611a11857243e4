//! Cooperative playback over time steps.
//!
//! An external timer owns the cadence; each [`Playback::tick`] advances
//! the controller by one step (wrapping past the end) and runs to
//! completion before returning. Stopping is just not advancing: there is
//! no thread to cancel.

use fescope_core::Result;

use crate::binding::FieldBinder;
use crate::render::RenderTarget;

/// Play/stop state for step animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Playback {
    playing: bool,
}

impl Playback {
    /// Creates a stopped playback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts advancing on ticks.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stops advancing; pending ticks become no-ops.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Returns whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances the controller one step, wrapping to step 0 past the last.
    /// Does nothing while stopped.
    pub fn tick<R: RenderTarget>(&mut self, binder: &mut FieldBinder<R>) -> Result<()> {
        if !self.playing {
            return Ok(());
        }
        let next = if binder.step() + 1 >= binder.num_steps() {
            0
        } else {
            binder.step() + 1
        };
        binder.goto_step(next as isize)
    }
}
