//! Foilcard - a draggable foil trading card
//!
//! Desktop host for the card rig: configuration, raw input mapping, texture
//! loading and the window/frame systems used by the binary.

pub mod config;
pub mod input;
pub mod loader;
pub mod systems;
