//! Card texture slots
//!
//! The card has three named texture slots. Each is requested once from an
//! external [`TextureLoader`] and filled whenever (and if ever) the loader
//! answers. Loaders may answer from any thread and in any order; answers are
//! queued on a channel and applied on the render thread by
//! [`TextureSlots::apply`].
//!
//! An empty slot is a normal state, never an error.

use std::fmt;
use std::io;
use std::sync::mpsc::Sender;

/// One of the card's texture slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Front face artwork
    Front,
    /// Back face artwork (also its alpha mask)
    Back,
    /// Foil sheen overlay for the front face
    Foil,
}

impl TextureSlot {
    /// All slots, in request order
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Front, TextureSlot::Back, TextureSlot::Foil];

    fn index(self) -> usize {
        match self {
            TextureSlot::Front => 0,
            TextureSlot::Back => 1,
            TextureSlot::Foil => 2,
        }
    }

    /// Lowercase slot name
    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::Front => "front",
            TextureSlot::Back => "back",
            TextureSlot::Foil => "foil",
        }
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a loader could not produce a texture
#[derive(Debug)]
pub enum TextureError {
    /// IO error reading the source
    Io(io::Error),
    /// The loader cannot handle this kind of source
    Unsupported(String),
    /// Any other loader-specific failure
    Failed(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io(err) => write!(f, "Texture IO error: {}", err),
            TextureError::Unsupported(source) => {
                write!(f, "Unsupported texture source: {}", source)
            }
            TextureError::Failed(msg) => write!(f, "Texture load failed: {}", msg),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io(err) => Some(err),
            TextureError::Unsupported(_) => None,
            TextureError::Failed(_) => None,
        }
    }
}

impl From<io::Error> for TextureError {
    fn from(err: io::Error) -> Self {
        TextureError::Io(err)
    }
}

/// A loader's answer for one slot
#[derive(Debug)]
pub struct TextureMessage<H> {
    pub slot: TextureSlot,
    pub result: Result<H, TextureError>,
}

/// One-shot reply channel handed to a loader for a single slot
pub struct TextureSink<H> {
    slot: TextureSlot,
    sender: Sender<TextureMessage<H>>,
}

impl<H> TextureSink<H> {
    /// Create a sink that tags replies with `slot`
    pub fn new(slot: TextureSlot, sender: Sender<TextureMessage<H>>) -> Self {
        Self { slot, sender }
    }

    /// Slot this sink answers for
    pub fn slot(&self) -> TextureSlot {
        self.slot
    }

    /// Deliver the result. Ignored if the card is already gone.
    pub fn resolve(self, result: Result<H, TextureError>) {
        let _ = self.sender.send(TextureMessage { slot: self.slot, result });
    }
}

/// External texture loader
///
/// `load` must not block. The loader answers through `sink` when it is done,
/// from any thread; it may also never answer.
pub trait TextureLoader<H> {
    fn load(&mut self, source: &str, sink: TextureSink<H>);
}

/// Front/back/foil texture handles, each present once resolved
#[derive(Clone, Debug)]
pub struct TextureSlots<H> {
    slots: [Option<H>; 3],
}

impl<H> Default for TextureSlots<H> {
    fn default() -> Self {
        Self { slots: [None, None, None] }
    }
}

impl<H> TextureSlots<H> {
    /// All slots empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle in `slot`, if resolved
    pub fn get(&self, slot: TextureSlot) -> Option<&H> {
        self.slots[slot.index()].as_ref()
    }

    /// Store a handle, replacing any previous one
    pub fn set(&mut self, slot: TextureSlot, handle: H) {
        self.slots[slot.index()] = Some(handle);
    }

    /// Number of resolved slots (0 to 3)
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True once all three slots are filled
    pub fn is_complete(&self) -> bool {
        self.resolved_count() == TextureSlot::ALL.len()
    }

    /// Apply a loader answer. Returns `true` if a slot changed.
    ///
    /// Failures are logged and leave the slot as it was.
    pub fn apply(&mut self, message: TextureMessage<H>) -> bool {
        match message.result {
            Ok(handle) => {
                log::info!("Texture '{}' resolved", message.slot);
                self.set(message.slot, handle);
                true
            }
            Err(err) => {
                log::warn!("Texture '{}' unavailable: {}", message.slot, err);
                false
            }
        }
    }
}
