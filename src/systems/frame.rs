//! Frame timing system
//!
//! Measures frame time and runs one card frame:
//! - Delta time calculation (capped)
//! - Release animation step-through
//! - Scene writes (card rotation, light pose, face materials)

use std::time::Instant;
use foilcard_render::{CardRig, LightPose, SceneHost};

/// Longest frame the release animation will see, in seconds
const MAX_FRAME_DT: f32 = 0.25;

/// Drives a [`CardRig`] once per rendered frame
pub struct FrameSystem {
    last_frame: Instant,
}

impl FrameSystem {
    /// Create a new frame system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds since the previous call, capped so a stall (first frame,
    /// window drag, focus change) cannot skip the whole release at once
    pub fn tick_dt(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        raw_dt.min(MAX_FRAME_DT)
    }

    /// Run one frame of `rig` against `scene`
    pub fn update<H, S>(&mut self, rig: &mut CardRig<H>, scene: &mut S) -> LightPose
    where
        S: SceneHost<H>,
    {
        let dt = self.tick_dt();
        rig.frame(dt, scene)
    }
}

impl Default for FrameSystem {
    fn default() -> Self {
        Self::new()
    }
}
