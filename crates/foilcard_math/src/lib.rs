//! Vector math for the foilcard crates
//!
//! Only what the card needs:
//!
//! - [`Vec2`] - screen-space pointer coordinates and deltas
//! - [`Vec3`] - scene-space positions (light pose, camera placement)

mod vec2;
mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;
