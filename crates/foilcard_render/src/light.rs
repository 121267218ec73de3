//! Light follow rule
//!
//! The directional light sweeps with the tilt so the highlight slides across
//! the card like a foil sheen. Yaw moves the light sideways, pitch moves it
//! vertically and also pushes it back so steep tilts never graze.

use bytemuck::{Pod, Zeroable};
use foilcard_input::TiltAngle;
use foilcard_math::Vec3;

/// Default sideways/vertical travel per radian of tilt
pub const DEFAULT_LIGHT_RANGE: f32 = 2.0;
/// Default distance of the light from the card plane at rest
pub const DEFAULT_NEUTRAL_DISTANCE: f32 = 2.0;
/// Default directional light intensity
pub const DEFAULT_LIGHT_INTENSITY: f32 = 0.2;

/// Ambient light intensity
pub const AMBIENT_INTENSITY: f32 = 1.5;
/// Hemisphere light intensity
pub const HEMISPHERE_INTENSITY: f32 = 0.8;
/// Hemisphere sky colour (#ffffff)
pub const SKY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// Hemisphere ground colour (#aaaaaa)
pub const GROUND_COLOR: [f32; 3] = [0xaa as f32 / 255.0; 3];
/// Clear colour behind the card
pub const BACKGROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Fixed lights and background of the card scene, set up once
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLighting {
    pub ambient_intensity: f32,
    pub hemisphere_intensity: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub background: [f32; 3],
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            ambient_intensity: AMBIENT_INTENSITY,
            hemisphere_intensity: HEMISPHERE_INTENSITY,
            sky_color: SKY_COLOR,
            ground_color: GROUND_COLOR,
            background: BACKGROUND_COLOR,
        }
    }
}

/// Where the light sits and what it points at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl LightPose {
    /// Unit vector from the light toward its target
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalized()
    }
}

/// Derives a [`LightPose`] from a tilt angle.
///
/// Holds configuration only; [`derive`](Self::derive) is a pure function of
/// its input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightFollower {
    /// Travel per radian of tilt
    pub range: f32,
    /// Distance from the card plane at rest
    pub neutral_distance: f32,
}

impl Default for LightFollower {
    fn default() -> Self {
        Self {
            range: DEFAULT_LIGHT_RANGE,
            neutral_distance: DEFAULT_NEUTRAL_DISTANCE,
        }
    }
}

impl LightFollower {
    /// Create a follower with the given range and neutral distance
    pub fn new(range: f32, neutral_distance: f32) -> Self {
        Self { range, neutral_distance }
    }

    /// Light pose for `angle`. Always aims at the card origin.
    #[inline]
    pub fn derive(&self, angle: TiltAngle) -> LightPose {
        LightPose {
            position: Vec3::new(
                angle.yaw * self.range,
                angle.pitch * self.range,
                self.neutral_distance + angle.pitch.abs(),
            ),
            target: Vec3::ZERO,
        }
    }
}

/// GPU uniform block for a directional light
///
/// Layout matches a WGSL struct of two `vec4<f32>`: position + intensity,
/// then direction + padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// Light position
    pub position: [f32; 3],
    /// Light intensity
    pub intensity: f32,
    /// Normalized direction from the light to its target
    pub direction: [f32; 3],
    /// Padding to align to 16 bytes
    pub _padding: f32,
}

impl LightUniform {
    /// Pack a pose for upload
    pub fn from_pose(pose: &LightPose, intensity: f32) -> Self {
        Self {
            position: pose.position.to_array(),
            intensity,
            direction: pose.direction().to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_scene_lighting_defaults() {
        let lighting = SceneLighting::default();
        assert_eq!(lighting.ambient_intensity, 1.5);
        assert_eq!(lighting.hemisphere_intensity, 0.8);
        assert_eq!(lighting.sky_color, [1.0; 3]);
        assert!((lighting.ground_color[0] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(lighting.background, [1.0; 3]);
    }

    #[test]
    fn test_neutral_pose() {
        let pose = LightFollower::default().derive(TiltAngle::ZERO);
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(pose.target, Vec3::ZERO);
        assert_eq!(pose.direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_light_follows_tilt() {
        let pose = LightFollower::default().derive(TiltAngle::new(-0.2, 0.5));
        assert_eq!(pose.position.x, 1.0);
        assert_eq!(pose.position.y, -0.4);
        assert!((pose.position.z - 2.2).abs() < 1e-6);
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let follower = LightFollower::default();
        let angle = TiltAngle::new(PI / 17.0, -PI / 7.0);
        let a = follower.derive(angle);
        let b = follower.derive(angle);
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
        assert_eq!(a.position.z.to_bits(), b.position.z.to_bits());
        assert_eq!(a.target, b.target);
    }

    #[test]
    fn test_z_non_decreasing_in_abs_pitch() {
        let follower = LightFollower::default();
        let limit = PI / 13.0;
        let mut previous = f32::NEG_INFINITY;
        for i in 0..=100 {
            let pitch = limit * i as f32 / 100.0;
            let up = follower.derive(TiltAngle::new(pitch, 0.3)).position.z;
            let down = follower.derive(TiltAngle::new(-pitch, -0.3)).position.z;
            assert_eq!(up, down);
            assert!(up >= previous);
            previous = up;
        }
    }

    #[test]
    fn test_custom_range_and_distance() {
        let pose = LightFollower::new(4.0, 3.0).derive(TiltAngle::new(0.1, 0.25));
        assert_eq!(pose.position.x, 1.0);
        assert!((pose.position.y - 0.4).abs() < 1e-6);
        assert!((pose.position.z - 3.1).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_packing() {
        let pose = LightFollower::default().derive(TiltAngle::ZERO);
        let uniform = LightUniform::from_pose(&pose, DEFAULT_LIGHT_INTENSITY);
        assert_eq!(uniform.position, [0.0, 0.0, 2.0]);
        assert_eq!(uniform.direction, [0.0, 0.0, -1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 32);
    }
}
