//! Tilt controller for drag-to-tilt card input
//!
//! Interaction:
//! - Pointer down over the card: start dragging
//! - Pointer move (anywhere): tilt by the movement since the last sample
//! - Pointer up (anywhere): ease back to rest over a fixed number of steps
//!
//! The controller never fails. Calls that don't apply to the current state
//! are ignored and every angle it stores is already clamped.

use foilcard_math::Vec2;
use crate::{ReleaseAnimation, TiltAngle, TiltSettings};

/// Live drag state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer position at the last sample
    pub anchor: Vec2,
}

/// Controller state. Holding the session or animation inside the variant
/// means there is never more than one of either.
#[derive(Clone, Debug, PartialEq)]
pub enum TiltState {
    /// At rest, or held at the last angle after [`TiltController::cancel`]
    Idle,
    /// Pointer motion drives the angle
    Dragging(DragSession),
    /// Easing back to rest
    Releasing(ReleaseAnimation),
}

/// Discriminant of [`TiltState`], for hosts that only need to know the phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltPhase {
    Idle,
    Dragging,
    Releasing,
}

/// Drag-to-tilt state machine
pub struct TiltController {
    angle: TiltAngle,
    state: TiltState,
    settings: TiltSettings,
}

impl Default for TiltController {
    fn default() -> Self {
        Self::new()
    }
}

impl TiltController {
    /// Create a controller at rest with default settings
    pub fn new() -> Self {
        Self::with_settings(TiltSettings::default())
    }

    /// Create a controller at rest with the given settings (sanitized)
    pub fn with_settings(settings: TiltSettings) -> Self {
        Self {
            angle: TiltAngle::ZERO,
            state: TiltState::Idle,
            settings: settings.sanitized(),
        }
    }

    /// Pointer pressed over the card.
    ///
    /// Starts a drag anchored at `point`. Interrupts a running release;
    /// re-anchors an ongoing drag.
    pub fn on_pointer_down(&mut self, point: Vec2) {
        if !point.is_finite() {
            return;
        }

        match &mut self.state {
            TiltState::Dragging(session) => {
                session.anchor = point;
                return;
            }
            TiltState::Releasing(anim) => {
                log::debug!(
                    "Release interrupted at step {}/{}",
                    anim.elapsed_steps(),
                    anim.total_steps()
                );
            }
            TiltState::Idle => {}
        }

        log::debug!("Drag started at ({:.1}, {:.1})", point.x, point.y);
        self.state = TiltState::Dragging(DragSession { anchor: point });
    }

    /// Pointer moved. Ignored unless dragging.
    pub fn on_pointer_move(&mut self, point: Vec2) {
        if !point.is_finite() {
            return;
        }

        if let TiltState::Dragging(session) = &mut self.state {
            let delta = (point - session.anchor) * self.settings.sensitivity;
            session.anchor = point;
            // Huge jumps can overflow to infinity; the angle stays put
            if !delta.is_finite() {
                return;
            }
            // Vertical movement pitches, horizontal movement yaws
            self.angle = self.settings.clamp(TiltAngle::new(
                self.angle.pitch + delta.y,
                self.angle.yaw + delta.x,
            ));
        }
    }

    /// Pointer released. Ignored unless dragging; otherwise starts the release.
    pub fn on_pointer_up(&mut self) {
        if let TiltState::Dragging(_) = self.state {
            log::debug!(
                "Drag ended at pitch {:.3}, yaw {:.3}",
                self.angle.pitch,
                self.angle.yaw
            );
            self.state = TiltState::Releasing(ReleaseAnimation::new(
                self.angle,
                self.settings.release_steps,
            ));
        }
    }

    /// Apply one release step.
    ///
    /// Returns `false` (and changes nothing) unless a release is running.
    pub fn tick(&mut self) -> bool {
        let finished = match &mut self.state {
            TiltState::Releasing(anim) => {
                self.angle = anim.step();
                anim.is_finished()
            }
            _ => return false,
        };

        if finished {
            log::debug!("Release finished");
            self.angle = TiltAngle::ZERO;
            self.state = TiltState::Idle;
        }
        true
    }

    /// Advance the release animation by `dt` seconds of frame time.
    ///
    /// Steps are spaced [`TiltSettings::step_interval`] apart. Returns the
    /// number of steps applied; zero when not releasing or `dt` is invalid.
    pub fn advance(&mut self, dt: f32) -> usize {
        if !dt.is_finite() || dt < 0.0 {
            return 0;
        }

        let interval = self.settings.step_interval();
        let due = match &mut self.state {
            TiltState::Releasing(anim) => anim.steps_due(dt, interval),
            _ => return 0,
        };

        let mut applied = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Drop any drag session or running release, keeping the current angle.
    ///
    /// Used on teardown: afterwards no tick or advance changes the angle
    /// until a new drag starts. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if self.state != TiltState::Idle {
            log::debug!("Tilt controller cancelled while {:?}", self.phase());
            self.state = TiltState::Idle;
        }
    }

    /// Cancel and snap back to rest immediately
    pub fn reset(&mut self) {
        self.cancel();
        self.angle = TiltAngle::ZERO;
    }

    /// Current tilt. Valid in every state.
    #[inline]
    pub fn current_angle(&self) -> TiltAngle {
        self.angle
    }

    /// Current phase
    pub fn phase(&self) -> TiltPhase {
        match self.state {
            TiltState::Idle => TiltPhase::Idle,
            TiltState::Dragging(_) => TiltPhase::Dragging,
            TiltState::Releasing(_) => TiltPhase::Releasing,
        }
    }

    /// Full state, including the drag anchor or release progress
    pub fn state(&self) -> &TiltState {
        &self.state
    }

    /// Active settings
    pub fn settings(&self) -> &TiltSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn drag_to(controller: &mut TiltController, from: Vec2, to: Vec2) {
        controller.on_pointer_down(from);
        controller.on_pointer_move(to);
    }

    #[test]
    fn test_starts_idle_at_rest() {
        let c = TiltController::new();
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
    }

    #[test]
    fn test_horizontal_drag_yaws() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(100.0, 100.0), Vec2::new(150.0, 100.0));
        let a = c.current_angle();
        assert_eq!(a.pitch, 0.0);
        assert!((a.yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_clamps_to_limit() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(100.0, 100.0), Vec2::new(150.0, 100.0));
        c.on_pointer_move(Vec2::new(400.0, 100.0));
        assert_eq!(c.current_angle().yaw, PI / 5.0);
        assert_eq!(c.current_angle().pitch, 0.0);
    }

    #[test]
    fn test_vertical_drag_pitches_and_clamps() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(0.0, -1000.0));
        assert_eq!(c.current_angle().pitch, -PI / 13.0);
        assert_eq!(c.current_angle().yaw, 0.0);
    }

    #[test]
    fn test_motion_is_relative_to_last_sample() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        c.on_pointer_move(Vec2::new(20.0, 0.0));
        // Two 10px moves, not 10px + 20px from the origin
        assert!((c.current_angle().yaw - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_clamping_holds_for_any_move_sequence() {
        let mut c = TiltController::new();
        c.on_pointer_down(Vec2::new(0.0, 0.0));
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        for i in 0..500 {
            // Deterministic zig-zag with growing amplitude
            let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
            x += sign * (i as f32 * 1.7);
            y -= sign * (i as f32 * 0.9);
            c.on_pointer_move(Vec2::new(x, y));
            let a = c.current_angle();
            assert!(a.pitch.abs() <= PI / 13.0);
            assert!(a.yaw.abs() <= PI / 5.0);
        }
    }

    #[test]
    fn test_move_ignored_when_not_dragging() {
        let mut c = TiltController::new();
        c.on_pointer_move(Vec2::new(500.0, 500.0));
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
        assert_eq!(c.phase(), TiltPhase::Idle);
    }

    #[test]
    fn test_up_ignored_when_not_dragging() {
        let mut c = TiltController::new();
        c.on_pointer_up();
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert!(!c.tick());
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let mut c = TiltController::new();
        c.on_pointer_down(Vec2::new(f32::NAN, 0.0));
        assert_eq!(c.phase(), TiltPhase::Idle);

        c.on_pointer_down(Vec2::new(0.0, 0.0));
        c.on_pointer_move(Vec2::new(f32::INFINITY, 0.0));
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
        assert_eq!(
            c.state(),
            &TiltState::Dragging(DragSession { anchor: Vec2::new(0.0, 0.0) })
        );
    }

    #[test]
    fn test_overflowing_delta_keeps_angle_finite() {
        let settings = TiltSettings::default().with_sensitivity(0.0);
        let mut c = TiltController::with_settings(settings);
        drag_to(&mut c, Vec2::new(-3e38, 0.0), Vec2::new(3e38, 0.0));

        let a = c.current_angle();
        assert_eq!(a, TiltAngle::ZERO);
        assert!(a.yaw.abs() <= PI / 5.0);

        // Later moves are measured from the new anchor
        c.on_pointer_move(Vec2::new(3e38, 10.0));
        assert!((c.current_angle().pitch - 0.1).abs() < 1e-6);
        assert_eq!(c.current_angle().yaw, 0.0);
    }

    #[test]
    fn test_down_while_dragging_reanchors() {
        let mut c = TiltController::new();
        c.on_pointer_down(Vec2::new(0.0, 0.0));
        c.on_pointer_down(Vec2::new(50.0, 0.0));
        c.on_pointer_move(Vec2::new(60.0, 0.0));
        assert!((c.current_angle().yaw - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_release_takes_exactly_thirty_ticks() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(30.0, 12.0));
        c.on_pointer_up();
        assert_eq!(c.phase(), TiltPhase::Releasing);

        for step in 1..30 {
            assert!(c.tick());
            assert_eq!(c.phase(), TiltPhase::Releasing, "settled early at step {}", step);
        }
        assert!(c.tick());
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
        assert!(!c.tick());
    }

    #[test]
    fn test_release_decays_linearly() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0));
        let start = c.current_angle();
        c.on_pointer_up();

        for _ in 0..15 {
            c.tick();
        }
        assert!((c.current_angle().yaw - start.yaw * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_release_ends_exactly_at_zero_for_awkward_angles() {
        for (dx, dy) in [(1.0, 3.0), (-7.3, 2.9), (33.3, -11.1), (1e6, -1e6)] {
            let mut c = TiltController::new();
            drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(dx, dy));
            c.on_pointer_up();
            while c.tick() {}
            assert_eq!(c.current_angle(), TiltAngle::ZERO);
        }
    }

    #[test]
    fn test_advance_over_full_duration_settles() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 10.0));
        c.on_pointer_up();

        let mut steps = 0;
        for _ in 0..30 {
            steps += c.advance(1.0 / 60.0);
        }
        assert_eq!(steps, 30);
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
    }

    #[test]
    fn test_advance_large_dt_does_not_overshoot() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 10.0));
        c.on_pointer_up();
        assert_eq!(c.advance(10.0), 30);
        assert_eq!(c.advance(10.0), 0);
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
    }

    #[test]
    fn test_advance_ignores_invalid_dt() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        c.on_pointer_up();
        let before = c.current_angle();
        assert_eq!(c.advance(-1.0), 0);
        assert_eq!(c.advance(f32::NAN), 0);
        assert_eq!(c.current_angle(), before);
    }

    #[test]
    fn test_advance_does_nothing_while_dragging() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        let before = c.current_angle();
        assert_eq!(c.advance(1.0), 0);
        assert_eq!(c.current_angle(), before);
    }

    #[test]
    fn test_new_drag_interrupts_release() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        c.on_pointer_up();
        c.tick();
        c.tick();

        c.on_pointer_down(Vec2::new(0.0, 0.0));
        assert_eq!(c.phase(), TiltPhase::Dragging);
        let held = c.current_angle();

        // The old release must not keep stepping
        assert!(!c.tick());
        assert_eq!(c.advance(1.0), 0);
        assert_eq!(c.current_angle(), held);

        // The new drag continues from where the release left off
        c.on_pointer_move(Vec2::new(10.0, 0.0));
        assert!((c.current_angle().yaw - (held.yaw + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_stops_release_and_is_idempotent() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0));
        c.on_pointer_up();
        c.tick();
        let held = c.current_angle();

        c.cancel();
        c.cancel();
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert!(!c.tick());
        assert_eq!(c.advance(1.0), 0);
        assert_eq!(c.current_angle(), held);
    }

    #[test]
    fn test_reset_snaps_to_rest() {
        let mut c = TiltController::new();
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(40.0, 20.0));
        c.reset();
        assert_eq!(c.phase(), TiltPhase::Idle);
        assert_eq!(c.current_angle(), TiltAngle::ZERO);
    }

    #[test]
    fn test_custom_settings_apply() {
        let settings = TiltSettings::default()
            .with_limits(0.05, 0.1)
            .with_sensitivity(0.001)
            .with_release(0.1, 2);
        let mut c = TiltController::with_settings(settings);
        drag_to(&mut c, Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0));
        let a = c.current_angle();
        assert!((a.yaw - 0.05).abs() < 1e-6);
        assert_eq!(a.pitch, 0.05);

        c.on_pointer_up();
        assert!(c.tick());
        assert!(c.tick());
        assert_eq!(c.phase(), TiltPhase::Idle);
    }
}
