//! Card geometry, framing and face materials
//!
//! The card is a 3 × 4.5 plane with a face on each side. It is scaled with
//! the viewport and framed by a perspective camera placed so the unscaled
//! card height exactly fills the view.

use std::f32::consts::PI;
use foilcard_math::{Vec2, Vec3};
use crate::{TextureSlot, TextureSlots};

/// Card width in scene units
pub const CARD_WIDTH: f32 = 3.0;
/// Card height in scene units
pub const CARD_HEIGHT: f32 = 4.5;
/// Distance of each face from the card's mid-plane
pub const FACE_OFFSET: f32 = 0.01;
/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;
/// Face material metalness
pub const FACE_METALNESS: f32 = 0.6;
/// Face material roughness
pub const FACE_ROUGHNESS: f32 = 0.3;

/// Viewport divisor pair and base size of the responsive scale rule
const SCALE_WIDTH_DIVISOR: f32 = 4.0;
const SCALE_HEIGHT_DIVISOR: f32 = 6.0;
const SCALE_BASE: f32 = 200.0;

/// One side of the card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardFace {
    Front,
    Back,
}

impl CardFace {
    /// Both faces, front first
    pub const ALL: [CardFace; 2] = [CardFace::Front, CardFace::Back];

    /// Z position of the face plane in card space
    pub fn offset_z(self) -> f32 {
        match self {
            CardFace::Front => FACE_OFFSET,
            CardFace::Back => -FACE_OFFSET,
        }
    }

    /// Fixed rotation about Y applied to the face mesh (the back faces away)
    pub fn base_yaw(self) -> f32 {
        match self {
            CardFace::Front => 0.0,
            CardFace::Back => PI,
        }
    }
}

/// Perspective camera framing the card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
}

/// Axis-aligned rectangle in screen pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    /// Inclusive containment test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Viewport-dependent card placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    /// Viewport width in pixels
    width: f32,
    /// Viewport height in pixels
    height: f32,
    /// Vertical field of view in degrees
    fov_degrees: f32,
}

impl CardLayout {
    /// Layout for a viewport of the given pixel size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            fov_degrees: DEFAULT_FOV_DEGREES,
        }
    }

    /// Builder: set the vertical field of view in degrees
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        if fov_degrees.is_finite() && fov_degrees > 0.0 && fov_degrees < 180.0 {
            self.fov_degrees = fov_degrees;
        } else {
            log::warn!("Ignoring invalid field of view {}", fov_degrees);
        }
        self
    }

    /// Update the viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Uniform X/Y scale applied to the card
    pub fn scale(&self) -> f32 {
        (self.width / SCALE_WIDTH_DIVISOR).min(self.height / SCALE_HEIGHT_DIVISOR) / SCALE_BASE
    }

    /// Camera aspect ratio (1.0 for a degenerate viewport)
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Camera distance along +Z at which `CARD_HEIGHT` fills the view
    pub fn camera_distance(&self) -> f32 {
        let half_fov = self.fov_degrees.to_radians() * 0.5;
        CARD_HEIGHT / (2.0 * half_fov.tan())
    }

    /// Camera position (looking down -Z at the card)
    pub fn camera_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_distance())
    }

    /// Everything a host needs to set up its perspective camera
    pub fn camera(&self) -> CameraSetup {
        CameraSetup {
            position: self.camera_position(),
            target: Vec3::ZERO,
            fov_degrees: self.fov_degrees,
            aspect: self.aspect(),
        }
    }

    /// Scale for the card mesh: responsive on X and Y, untouched on Z
    pub fn card_scale(&self) -> Vec3 {
        let s = self.scale();
        Vec3::new(s, s, 1.0)
    }

    /// Screen rectangle covered by the card at rest
    pub fn screen_rect(&self) -> ScreenRect {
        let card_h = self.scale() * self.height;
        let card_w = card_h * CARD_WIDTH / CARD_HEIGHT;
        let center = Vec2::new(self.width * 0.5, self.height * 0.5);
        let half = Vec2::new(card_w * 0.5, card_h * 0.5);
        ScreenRect {
            min: center - half,
            max: center + half,
        }
    }

    /// True if `p` (screen pixels) is over the resting card
    pub fn hit_test(&self, p: Vec2) -> bool {
        self.screen_rect().contains(p)
    }
}

/// What a host needs to shade one face
#[derive(Debug, PartialEq)]
pub struct FaceMaterial<'a, H> {
    /// Colour texture
    pub map: &'a H,
    /// Alpha mask texture
    pub alpha_map: Option<&'a H>,
    /// Foil sheen texture
    pub sheen_map: Option<&'a H>,
    pub metalness: f32,
    pub roughness: f32,
    pub transparent: bool,
}

// Holds only references to H, so copyable for any H
impl<H> Clone for FaceMaterial<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for FaceMaterial<'_, H> {}

/// Materials for both faces, derived from whatever textures have resolved
#[derive(Debug, PartialEq)]
pub struct CardMaterials<'a, H> {
    pub front: Option<FaceMaterial<'a, H>>,
    pub back: Option<FaceMaterial<'a, H>>,
}

impl<'a, H> CardMaterials<'a, H> {
    /// A face without its colour texture gets no material.
    ///
    /// The front uses the foil texture as sheen once available; the back uses
    /// its own texture as alpha mask.
    pub fn from_slots(slots: &'a TextureSlots<H>) -> Self {
        let front = slots.get(TextureSlot::Front).map(|map| FaceMaterial {
            map,
            alpha_map: None,
            sheen_map: slots.get(TextureSlot::Foil),
            metalness: FACE_METALNESS,
            roughness: FACE_ROUGHNESS,
            transparent: true,
        });
        let back = slots.get(TextureSlot::Back).map(|map| FaceMaterial {
            map,
            alpha_map: Some(map),
            sheen_map: None,
            metalness: FACE_METALNESS,
            roughness: FACE_ROUGHNESS,
            transparent: true,
        });
        Self { front, back }
    }

    /// Material for one face
    pub fn face(&self, face: CardFace) -> Option<FaceMaterial<'a, H>> {
        match face {
            CardFace::Front => self.front,
            CardFace::Back => self.back,
        }
    }
}

impl<H> Clone for CardMaterials<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for CardMaterials<'_, H> {}
