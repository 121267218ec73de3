//! Application systems
//!
//! Window management, frame timing and the in-memory card scene, kept out of
//! main.rs so they can be tested without an event loop.

mod frame;
mod scene;
mod window;

pub use frame::FrameSystem;
pub use scene::{CardScene, FacePlacement, FaceState};
pub use window::{WindowSystem, WindowError};
