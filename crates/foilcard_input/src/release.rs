//! Release-to-rest easing
//!
//! A release animation decays the tilt linearly to zero over a fixed number
//! of discrete steps. It is an owned record: cancelling it means dropping it.

use crate::TiltAngle;

/// Slack when converting accumulated frame time into whole steps, so a run of
/// frames summing to the full duration is not left one step short by rounding
const STEP_EPSILON: f32 = 1e-3;

/// In-flight release animation
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseAnimation {
    /// Angle at the moment of release
    start: TiltAngle,
    /// Steps applied so far
    elapsed_steps: u32,
    /// Steps until rest
    total_steps: u32,
    /// Frame time accumulated since release, in seconds
    elapsed_time: f32,
}

impl ReleaseAnimation {
    /// Start a release from `start` lasting `total_steps` steps (at least one)
    pub fn new(start: TiltAngle, total_steps: u32) -> Self {
        Self {
            start,
            elapsed_steps: 0,
            total_steps: total_steps.max(1),
            elapsed_time: 0.0,
        }
    }

    /// Apply one step and return the angle for it.
    ///
    /// Step `k` yields `start * (1 - k/N)`; the final step yields exactly
    /// [`TiltAngle::ZERO`]. Stepping a finished animation keeps returning zero.
    pub fn step(&mut self) -> TiltAngle {
        if self.elapsed_steps < self.total_steps {
            self.elapsed_steps += 1;
        }
        self.angle()
    }

    /// Angle for the current step count
    pub fn angle(&self) -> TiltAngle {
        if self.is_finished() {
            TiltAngle::ZERO
        } else {
            self.start.scaled(1.0 - self.progress())
        }
    }

    /// Fraction of steps applied (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.elapsed_steps as f32 / self.total_steps as f32
    }

    /// True once every step has been applied
    pub fn is_finished(&self) -> bool {
        self.elapsed_steps >= self.total_steps
    }

    /// Angle at the moment of release
    pub fn start(&self) -> TiltAngle {
        self.start
    }

    /// Steps applied so far
    pub fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
    }

    /// Total steps until rest
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Accumulate `dt` seconds and return how many steps are now due.
    ///
    /// A non-positive `interval` makes every remaining step due at once.
    pub(crate) fn steps_due(&mut self, dt: f32, interval: f32) -> u32 {
        self.elapsed_time += dt;

        let reached = if interval > 0.0 {
            let whole = (self.elapsed_time / interval + STEP_EPSILON).floor();
            if whole >= self.total_steps as f32 {
                self.total_steps
            } else {
                whole as u32
            }
        } else {
            self.total_steps
        };

        reached.saturating_sub(self.elapsed_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_decay() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.2, -0.4), 4);
        let a = anim.step();
        assert!((a.pitch - 0.15).abs() < 1e-6);
        assert!((a.yaw + 0.3).abs() < 1e-6);
        let b = anim.step();
        assert!((b.pitch - 0.1).abs() < 1e-6);
        assert!((b.yaw + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_final_step_is_exact_zero() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.123_456_7, -0.654_321), 30);
        let mut last = anim.angle();
        for _ in 0..30 {
            last = anim.step();
        }
        assert!(anim.is_finished());
        assert_eq!(last, TiltAngle::ZERO);
        assert_eq!(anim.step(), TiltAngle::ZERO);
        assert_eq!(anim.elapsed_steps(), 30);
    }

    #[test]
    fn test_zero_steps_becomes_one() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.1, 0.1), 0);
        assert_eq!(anim.total_steps(), 1);
        assert_eq!(anim.step(), TiltAngle::ZERO);
    }

    #[test]
    fn test_steps_due_accumulates_fractional_frames() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.1, 0.1), 30);
        let interval = 0.5 / 30.0;
        // Half a step: nothing due yet
        assert_eq!(anim.steps_due(interval * 0.5, interval), 0);
        // The other half completes the first step
        assert_eq!(anim.steps_due(interval * 0.5, interval), 1);
    }

    #[test]
    fn test_steps_due_sixty_hz_frames_finish_in_thirty() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.1, 0.1), 30);
        let interval = 0.5 / 30.0;
        let mut total = 0;
        for _ in 0..30 {
            let due = anim.steps_due(1.0 / 60.0, interval);
            for _ in 0..due {
                anim.step();
            }
            total += due;
        }
        assert_eq!(total, 30);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_steps_due_never_overshoots() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.1, 0.1), 30);
        assert_eq!(anim.steps_due(100.0, 0.5 / 30.0), 30);
    }

    #[test]
    fn test_steps_due_zero_interval_finishes() {
        let mut anim = ReleaseAnimation::new(TiltAngle::new(0.1, 0.1), 5);
        assert_eq!(anim.steps_due(0.0, 0.0), 5);
    }
}
