//! In-memory card scene
//!
//! The scene-graph side of the desktop host: keeps the lighting, camera,
//! card transform, light pose and face materials the rig wrote, ready for a
//! renderer to pick up (as a [`LightUniform`] for the light) or for the
//! window title readout.

use foilcard_render::{
    CameraSetup, CardFace, FaceMaterial, LightPose, LightUniform, SceneHost, SceneLighting,
    TiltAngle, Vec3,
};
use foilcard_render::light::DEFAULT_LIGHT_INTENSITY;
use crate::loader::TextureData;

/// What is currently shown on one face
#[derive(Debug, Clone, PartialEq)]
pub enum FaceState {
    /// No texture yet; the face draws nothing
    Empty,
    /// Textured face
    Textured {
        /// Source of the colour texture
        source: String,
        /// Source of the sheen texture, if any
        sheen: Option<String>,
        /// Whether the colour texture doubles as alpha mask
        masked: bool,
    },
}

impl FaceState {
    fn from_material(material: Option<FaceMaterial<'_, TextureData>>) -> Self {
        match material {
            None => FaceState::Empty,
            Some(m) => FaceState::Textured {
                source: m.map.source.clone(),
                sheen: m.sheen_map.map(|t| t.source.clone()),
                masked: m.alpha_map.is_some(),
            },
        }
    }
}

/// Where a face mesh sits inside the card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlacement {
    pub offset_z: f32,
    pub base_yaw: f32,
}

/// Scene state written by the card rig each frame
pub struct CardScene {
    lighting: Option<SceneLighting>,
    camera: Option<CameraSetup>,
    scale: Vec3,
    placements: [Option<FacePlacement>; 2],
    rotation: TiltAngle,
    light: Option<LightPose>,
    light_intensity: f32,
    front: FaceState,
    back: FaceState,
    frames: u64,
}

impl Default for CardScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CardScene {
    /// Empty scene with the default light intensity
    pub fn new() -> Self {
        Self::with_light_intensity(DEFAULT_LIGHT_INTENSITY)
    }

    /// Empty scene with a custom light intensity
    pub fn with_light_intensity(intensity: f32) -> Self {
        Self {
            lighting: None,
            camera: None,
            scale: Vec3::new(1.0, 1.0, 1.0),
            placements: [None; 2],
            rotation: TiltAngle::ZERO,
            light: None,
            light_intensity: intensity,
            front: FaceState::Empty,
            back: FaceState::Empty,
            frames: 0,
        }
    }

    /// Fixed lights and background, once the first frame has run
    pub fn lighting(&self) -> Option<&SceneLighting> {
        self.lighting.as_ref()
    }

    /// Camera framing, once the first frame has run
    pub fn camera(&self) -> Option<&CameraSetup> {
        self.camera.as_ref()
    }

    /// Card mesh scale
    pub fn card_scale(&self) -> Vec3 {
        self.scale
    }

    /// Placement of one face mesh, once the first frame has run
    pub fn placement(&self, face: CardFace) -> Option<FacePlacement> {
        self.placements[face_index(face)]
    }

    /// Card mesh rotation
    pub fn rotation(&self) -> TiltAngle {
        self.rotation
    }

    /// Light pose, once a frame has run
    pub fn light_pose(&self) -> Option<LightPose> {
        self.light
    }

    /// Light packed for GPU upload, once a frame has run
    pub fn light_uniform(&self) -> Option<LightUniform> {
        self.light
            .as_ref()
            .map(|pose| LightUniform::from_pose(pose, self.light_intensity))
    }

    /// State of one face
    pub fn face(&self, face: CardFace) -> &FaceState {
        match face {
            CardFace::Front => &self.front,
            CardFace::Back => &self.back,
        }
    }

    /// Number of frames written
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One-line readout for the window title
    pub fn summary(&self) -> String {
        let faces = [&self.front, &self.back]
            .iter()
            .filter(|f| ***f != FaceState::Empty)
            .count();
        match self.light {
            Some(pose) => format!(
                "pitch {:+.3} yaw {:+.3} | light ({:+.2}, {:+.2}, {:.2}) | faces {}/2",
                self.rotation.pitch,
                self.rotation.yaw,
                pose.position.x,
                pose.position.y,
                pose.position.z,
                faces
            ),
            None => format!(
                "pitch {:+.3} yaw {:+.3} | faces {}/2",
                self.rotation.pitch, self.rotation.yaw, faces
            ),
        }
    }
}

fn face_index(face: CardFace) -> usize {
    match face {
        CardFace::Front => 0,
        CardFace::Back => 1,
    }
}

impl SceneHost<TextureData> for CardScene {
    fn set_scene_lighting(&mut self, lighting: &SceneLighting) {
        self.lighting = Some(*lighting);
    }

    fn place_face(&mut self, face: CardFace, offset_z: f32, base_yaw: f32) {
        self.placements[face_index(face)] = Some(FacePlacement { offset_z, base_yaw });
    }

    fn set_card_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn set_camera(&mut self, camera: &CameraSetup) {
        log::debug!(
            "Camera at z {:.3}, fov {}, aspect {:.3}",
            camera.position.z,
            camera.fov_degrees,
            camera.aspect
        );
        self.camera = Some(*camera);
    }

    fn set_card_rotation(&mut self, angle: TiltAngle) {
        self.rotation = angle;
        self.frames += 1;
    }

    fn set_light_pose(&mut self, pose: &LightPose) {
        self.light = Some(*pose);
    }

    fn set_face_material(
        &mut self,
        face: CardFace,
        material: Option<FaceMaterial<'_, TextureData>>,
    ) {
        let state = FaceState::from_material(material);
        log::debug!("{:?} face now {:?}", face, state);
        match face {
            CardFace::Front => self.front = state,
            CardFace::Back => self.back = state,
        }
    }
}
