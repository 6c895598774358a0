//! Animation progress and timelines.
//!
//! An animation is described by a delay, a duration and a timing curve. The
//! main loop feeds it the current time in milliseconds and gets back what
//! happened since the last call: whether it started, the eased progress, and
//! whether it stopped. Progress is normalized to `0..=ANIMATION_NORMALIZED_MAX`
//! and mapped onto pixels or dial steps with [`anim_percentage`].

pub const ANIMATION_NORMALIZED_MAX: u32 = 65535;

/// Eased fraction of an animation, `0..=ANIMATION_NORMALIZED_MAX`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnimationProgress(u32);

impl AnimationProgress {
    pub const START: AnimationProgress = AnimationProgress(0);
    pub const END: AnimationProgress = AnimationProgress(ANIMATION_NORMALIZED_MAX);

    /// Values above the maximum saturate.
    pub fn new(raw: u32) -> Self {
        Self(raw.min(ANIMATION_NORMALIZED_MAX))
    }

    pub fn from_fraction(fraction: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self(libm::roundf(fraction * ANIMATION_NORMALIZED_MAX as f32) as u32)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn fraction(self) -> f32 {
        self.0 as f32 / ANIMATION_NORMALIZED_MAX as f32
    }
}

/// Scale `max` by the progress, rounding to the nearest whole unit.
pub fn anim_percentage(progress: AnimationProgress, max: i32) -> i32 {
    libm::roundf(progress.fraction() * max as f32) as i32
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Curve {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Scheduled { at_ms: u64 },
    Running { since_ms: u64 },
    Finished,
}

/// What a single `advance` call produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Advance {
    pub started: bool,
    pub progress: Option<AnimationProgress>,
    pub stopped: bool,
}

/// One-shot timeline; once scheduled it always runs to completion.
#[derive(Copy, Clone, Debug)]
pub struct Animation {
    duration_ms: u32,
    delay_ms: u32,
    curve: Curve,
    phase: Phase,
}

impl Animation {
    pub const fn new(duration_ms: u32, delay_ms: u32, curve: Curve) -> Self {
        Self {
            duration_ms,
            delay_ms,
            curve,
            phase: Phase::Idle,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Arm the timeline; the delay counts from `now_ms`. Scheduling again
    /// while armed or running is ignored.
    pub fn schedule(&mut self, now_ms: u64) {
        if matches!(self.phase, Phase::Idle | Phase::Finished) {
            self.phase = Phase::Scheduled {
                at_ms: now_ms + self.delay_ms as u64,
            };
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn advance(&mut self, now_ms: u64) -> Advance {
        let mut out = Advance::default();

        if let Phase::Scheduled { at_ms } = self.phase {
            if now_ms < at_ms {
                return out;
            }
            self.phase = Phase::Running { since_ms: at_ms };
            out.started = true;
        }

        let Phase::Running { since_ms } = self.phase else {
            return out;
        };

        let elapsed = now_ms.saturating_sub(since_ms);
        if elapsed >= self.duration_ms as u64 {
            self.phase = Phase::Finished;
            out.progress = Some(AnimationProgress::END);
            out.stopped = true;
        } else {
            let t = elapsed as f32 / self.duration_ms as f32;
            out.progress = Some(AnimationProgress::from_fraction(self.curve.apply(t)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Curve; 4] = [Curve::Linear, Curve::EaseIn, Curve::EaseOut, Curve::EaseInOut];

    #[test]
    fn percentage_endpoints() {
        assert_eq!(anim_percentage(AnimationProgress::START, 55), 0);
        assert_eq!(anim_percentage(AnimationProgress::END, 55), 55);
        assert_eq!(anim_percentage(AnimationProgress::END, 0), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        // 0.5 * 55 = 27.5
        assert_eq!(anim_percentage(AnimationProgress::from_fraction(0.5), 55), 28);
        assert_eq!(anim_percentage(AnimationProgress::from_fraction(0.25), 60), 15);
        assert_eq!(anim_percentage(AnimationProgress::from_fraction(0.1), 30), 3);
    }

    #[test]
    fn percentage_is_monotonic() {
        let mut last = 0;
        for raw in (0..=ANIMATION_NORMALIZED_MAX).step_by(97) {
            let v = anim_percentage(AnimationProgress::new(raw), 55);
            assert!(v >= last, "{} dropped below {} at {}", v, last, raw);
            last = v;
        }
    }

    #[test]
    fn progress_saturates() {
        assert_eq!(AnimationProgress::new(u32::MAX), AnimationProgress::END);
        assert_eq!(AnimationProgress::from_fraction(1.5), AnimationProgress::END);
        assert_eq!(AnimationProgress::from_fraction(-0.5), AnimationProgress::START);
    }

    #[test]
    fn curve_endpoints_are_stable() {
        for curve in CURVES {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in CURVES {
            let a = curve.apply(0.25);
            let b = curve.apply(0.5);
            let c = curve.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
        assert_eq!(Curve::EaseInOut.apply(0.5), 0.5);
    }

    #[test]
    fn nothing_happens_before_the_delay() {
        let mut anim = Animation::new(500, 600, Curve::EaseInOut);
        assert_eq!(anim.advance(1000), Advance::default());

        anim.schedule(0);
        assert_eq!(anim.advance(0), Advance::default());
        assert_eq!(anim.advance(599), Advance::default());
        assert!(!anim.is_running());
    }

    #[test]
    fn lifecycle_runs_once() {
        let mut anim = Animation::new(500, 600, Curve::EaseInOut);
        anim.schedule(0);

        let first = anim.advance(600);
        assert!(first.started);
        assert_eq!(first.progress, Some(AnimationProgress::START));
        assert!(!first.stopped);

        let mid = anim.advance(850);
        assert!(!mid.started);
        assert_eq!(mid.progress, Some(AnimationProgress::from_fraction(0.5)));

        let last = anim.advance(1100);
        assert_eq!(last.progress, Some(AnimationProgress::END));
        assert!(last.stopped);
        assert!(anim.is_finished());

        assert_eq!(anim.advance(5000), Advance::default());
    }

    #[test]
    fn late_poll_starts_and_stops_in_one_step() {
        let mut anim = Animation::new(1000, 600, Curve::Linear);
        anim.schedule(100);
        let step = anim.advance(10_000);
        assert!(step.started);
        assert!(step.stopped);
        assert_eq!(step.progress, Some(AnimationProgress::END));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut anim = Animation::new(0, 0, Curve::Linear);
        anim.schedule(10);
        let step = anim.advance(10);
        assert!(step.started && step.stopped);
    }

    #[test]
    fn rescheduling_while_running_is_ignored() {
        let mut anim = Animation::new(500, 0, Curve::Linear);
        anim.schedule(0);
        anim.advance(100);
        anim.schedule(400);
        assert!(anim.advance(500).stopped);
    }
}
