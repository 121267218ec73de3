//! Input handling module
//!
//! Maps window events to card pointer events and application actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
