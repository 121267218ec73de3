//! Tilt angle and controller settings

use std::f32::consts::PI;
use serde::{Serialize, Deserialize};

/// Default pitch limit in radians (π/13)
pub const DEFAULT_PITCH_LIMIT: f32 = PI / 13.0;
/// Default yaw limit in radians (π/5)
pub const DEFAULT_YAW_LIMIT: f32 = PI / 5.0;
/// Default radians of tilt per pixel of pointer movement
pub const DEFAULT_SENSITIVITY: f32 = 0.01;
/// Default release animation length in seconds
pub const DEFAULT_RELEASE_DURATION: f32 = 0.5;
/// Default number of discrete release steps
pub const DEFAULT_RELEASE_STEPS: u32 = 30;

/// The card's orientation offset from rest, in radians
///
/// Pitch rotates about the X axis (vertical drag), yaw about the Y axis
/// (horizontal drag).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltAngle {
    pub pitch: f32,
    pub yaw: f32,
}

impl TiltAngle {
    /// The resting orientation
    pub const ZERO: Self = Self { pitch: 0.0, yaw: 0.0 };

    /// Create a new tilt angle
    #[inline]
    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Scale both axes by the same factor
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.pitch * factor, self.yaw * factor)
    }

    /// True when exactly at rest
    #[inline]
    pub fn is_zero(self) -> bool {
        self.pitch == 0.0 && self.yaw == 0.0
    }
}

/// Tunables for [`TiltController`](crate::TiltController)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltSettings {
    /// Maximum absolute pitch in radians
    pub pitch_limit: f32,
    /// Maximum absolute yaw in radians
    pub yaw_limit: f32,
    /// Radians of tilt per pixel of pointer movement
    pub sensitivity: f32,
    /// Release animation length in seconds
    pub release_duration: f32,
    /// Number of discrete release steps
    pub release_steps: u32,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            pitch_limit: DEFAULT_PITCH_LIMIT,
            yaw_limit: DEFAULT_YAW_LIMIT,
            sensitivity: DEFAULT_SENSITIVITY,
            release_duration: DEFAULT_RELEASE_DURATION,
            release_steps: DEFAULT_RELEASE_STEPS,
        }
    }
}

impl TiltSettings {
    /// Replace values the controller cannot work with.
    ///
    /// Limits become absolute values. Sensitivity and duration must be
    /// finite and positive, otherwise they fall back to the defaults. Zero
    /// steps becomes one.
    pub fn sanitized(self) -> Self {
        let limit = |value: f32, default: f32| {
            if value.is_finite() { value.abs() } else { default }
        };
        let positive = |value: f32, default: f32| {
            if value.is_finite() && value > 0.0 { value } else { default }
        };

        Self {
            pitch_limit: limit(self.pitch_limit, DEFAULT_PITCH_LIMIT),
            yaw_limit: limit(self.yaw_limit, DEFAULT_YAW_LIMIT),
            sensitivity: positive(self.sensitivity, DEFAULT_SENSITIVITY),
            release_duration: positive(self.release_duration, DEFAULT_RELEASE_DURATION),
            release_steps: self.release_steps.max(1),
        }
    }

    /// Seconds between two release steps
    pub fn step_interval(&self) -> f32 {
        self.release_duration / self.release_steps.max(1) as f32
    }

    /// Clamp an angle into the configured limits
    #[inline]
    pub fn clamp(&self, angle: TiltAngle) -> TiltAngle {
        TiltAngle::new(
            angle.pitch.clamp(-self.pitch_limit, self.pitch_limit),
            angle.yaw.clamp(-self.yaw_limit, self.yaw_limit),
        )
    }

    /// Builder: set both angular limits
    pub fn with_limits(mut self, pitch_limit: f32, yaw_limit: f32) -> Self {
        self.pitch_limit = pitch_limit;
        self.yaw_limit = yaw_limit;
        self
    }

    /// Builder: set drag sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: set release duration and step count
    pub fn with_release(mut self, duration: f32, steps: u32) -> Self {
        self.release_duration = duration;
        self.release_steps = steps;
        self
    }
}
