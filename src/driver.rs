//! Startup animations for the face.
//!
//! Two timelines run side by side once the face is shown: the outline grows
//! to its full radius and the hands sweep from 12 o'clock to the current
//! time. Each `drive` call advances both and forwards what happened to the
//! face as events.

use rand_core::RngCore;

use crate::anim::{Advance, Animation, Curve};
use crate::config::{ANIMATION_DELAY_MS, ANIMATION_DURATION_MS};
use crate::face::ClockFace;
use crate::log::debug_println;

pub const SWEEP_DURATION_MS: u32 = 2 * ANIMATION_DURATION_MS;

pub struct FaceAnimations {
    radius: Animation,
    sweep: Animation,
}

impl Default for FaceAnimations {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceAnimations {
    pub const fn new() -> Self {
        Self {
            radius: Animation::new(ANIMATION_DURATION_MS, ANIMATION_DELAY_MS, Curve::EaseInOut),
            sweep: Animation::new(SWEEP_DURATION_MS, ANIMATION_DELAY_MS, Curve::EaseInOut),
        }
    }

    pub fn schedule(&mut self, now_ms: u64) {
        debug_println!("[anim] scheduled at {} ms", now_ms);
        self.radius.schedule(now_ms);
        self.sweep.schedule(now_ms);
    }

    /// Advance both timelines to `now_ms` and pass the results to `face`.
    pub fn drive<R: RngCore>(&mut self, now_ms: u64, face: &mut ClockFace<R>) {
        if let Some(progress) = self.radius.advance(now_ms).progress {
            face.on_radius_progress(progress);
        }

        let Advance {
            started,
            progress,
            stopped,
        } = self.sweep.advance(now_ms);
        if started {
            face.on_sweep_started();
        }
        if let Some(progress) = progress {
            face.on_sweep_progress(progress);
        }
        if stopped {
            debug_println!("[anim] sweep done at {} ms", now_ms);
            face.on_sweep_stopped();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.radius.is_finished() && self.sweep.is_finished()
    }

    pub fn is_running(&self) -> bool {
        self.radius.is_running() || self.sweep.is_running()
    }
}
