//! Card Input Handling
//!
//! This crate turns pointer input into a bounded, animated card tilt.
//!
//! - [`TiltController`] - drag/release state machine owning the [`TiltAngle`]
//! - [`ReleaseAnimation`] - the fixed-step easing back to rest
//! - [`PointerHub`] - injected pointer event source with keyed subscriptions
//! - [`PointerBinding`] - scoped subscriptions wiring a hub to a controller

mod tilt;
mod release;
mod tilt_controller;
mod pointer;
mod binding;

pub use tilt::{TiltAngle, TiltSettings};
pub use tilt::{DEFAULT_PITCH_LIMIT, DEFAULT_YAW_LIMIT, DEFAULT_SENSITIVITY};
pub use tilt::{DEFAULT_RELEASE_DURATION, DEFAULT_RELEASE_STEPS};
pub use release::ReleaseAnimation;
pub use tilt_controller::{TiltController, TiltState, TiltPhase, DragSession};
pub use pointer::{PointerHub, PointerEvent, PointerKinds, SubscriptionKey};
pub use binding::PointerBinding;
