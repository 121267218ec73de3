//! Foil Card Rendering Glue
//!
//! Everything between the tilt controller and a host scene graph. This crate
//! does no drawing itself; the host renders whatever it is told.
//!
//! ## Key Components
//!
//! - [`light::LightFollower`] - maps a tilt angle to a light pose
//! - [`textures::TextureSlots`] - front/back/foil textures, filled as they arrive
//! - [`card::CardLayout`] - card geometry, responsive scale, camera framing, hit region
//! - [`host::SceneHost`] - what a host scene graph must accept every frame
//! - [`rig::CardRig`] - the per-frame driver tying it all together

pub mod light;
pub mod textures;
pub mod card;
pub mod host;
pub mod rig;

pub use light::{LightFollower, LightPose, LightUniform, SceneLighting};
pub use textures::{
    TextureSlot, TextureSlots, TextureLoader, TextureSink, TextureMessage, TextureError,
};
pub use card::{CameraSetup, CardLayout, CardFace, FaceMaterial, CardMaterials, ScreenRect};
pub use host::SceneHost;
pub use rig::{CardRig, CardSources};

// Re-export input types hosts need alongside the rig
pub use foilcard_input::{TiltAngle, TiltSettings, TiltPhase, PointerHub, PointerEvent};
pub use foilcard_math::{Vec2, Vec3};
