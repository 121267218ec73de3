//! Host scene graph interface

use foilcard_input::TiltAngle;
use foilcard_math::Vec3;
use crate::{CameraSetup, CardFace, FaceMaterial, LightPose, SceneLighting};

/// Trait for the scene graph a [`CardRig`](crate::CardRig) writes into
///
/// Allows the rig to drive any renderer: implement it over real scene nodes,
/// or over plain fields for tests and headless runs. `H` is the host's
/// texture handle type.
pub trait SceneHost<H> {
    /// Set up the fixed lights and background (first frame only)
    fn set_scene_lighting(&mut self, lighting: &SceneLighting);

    /// Position a face mesh inside the card: `offset_z` along the card
    /// normal, then `base_yaw` about Y (first frame only)
    fn place_face(&mut self, face: CardFace, offset_z: f32, base_yaw: f32);

    /// Scale the card mesh (first frame and after every resize)
    fn set_card_scale(&mut self, scale: Vec3);

    /// Frame the card (first frame and after every resize)
    fn set_camera(&mut self, camera: &CameraSetup);

    /// Orient the card mesh (rotation about X by pitch, about Y by yaw)
    fn set_card_rotation(&mut self, angle: TiltAngle);

    /// Place the directional light and its target
    fn set_light_pose(&mut self, pose: &LightPose);

    /// Assign (or clear, with `None`) the material of one face
    fn set_face_material(&mut self, face: CardFace, material: Option<FaceMaterial<'_, H>>);
}
