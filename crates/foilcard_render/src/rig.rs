//! Per-frame card driver
//!
//! [`CardRig`] owns the tilt controller, the light follower, the texture
//! slots and the pointer binding. The host calls [`CardRig::frame`] once per
//! rendered frame; everything else happens in response to pointer events.
//!
//! Teardown ([`CardRig::shutdown`] or drop) releases the pointer
//! subscriptions and cancels any running release, so nothing touches the
//! controller afterwards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use foilcard_input::{
    PointerBinding, PointerHub, TiltAngle, TiltController, TiltPhase, TiltSettings,
};
use crate::{
    CardFace, CardLayout, CardMaterials, LightFollower, LightPose, SceneHost, SceneLighting,
    TextureLoader, TextureMessage, TextureSink, TextureSlot, TextureSlots,
};

/// Source identifiers (paths or URLs) for the three texture slots
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardSources {
    pub front: String,
    pub back: String,
    pub foil: String,
}

impl CardSources {
    /// Source for one slot
    pub fn get(&self, slot: TextureSlot) -> &str {
        match slot {
            TextureSlot::Front => &self.front,
            TextureSlot::Back => &self.back,
            TextureSlot::Foil => &self.foil,
        }
    }
}

/// Interactive card: controller + light + textures, driven once per frame
pub struct CardRig<H> {
    controller: Rc<RefCell<TiltController>>,
    light: LightFollower,
    /// Shared with the hit-region closure so resizes apply immediately
    layout: Rc<Cell<CardLayout>>,
    textures: TextureSlots<H>,
    sender: Sender<TextureMessage<H>>,
    inbox: Receiver<TextureMessage<H>>,
    binding: Option<PointerBinding>,
    scene_built: bool,
    layout_dirty: bool,
    materials_dirty: bool,
}

impl<H> CardRig<H> {
    /// Create a rig at rest with no textures and no pointer binding
    pub fn new(settings: TiltSettings, light: LightFollower, layout: CardLayout) -> Self {
        let (sender, inbox) = mpsc::channel();
        Self {
            controller: Rc::new(RefCell::new(TiltController::with_settings(settings))),
            light,
            layout: Rc::new(Cell::new(layout)),
            textures: TextureSlots::new(),
            sender,
            inbox,
            binding: None,
            scene_built: false,
            layout_dirty: true,
            // First frame tells the host both faces start without material
            materials_dirty: true,
        }
    }

    /// Ask `loader` for all three textures. Answers are picked up by
    /// [`frame`](Self::frame) in whatever order they arrive.
    pub fn request_textures<L>(&mut self, loader: &mut L, sources: &CardSources)
    where
        L: TextureLoader<H> + ?Sized,
    {
        for slot in TextureSlot::ALL {
            let source = sources.get(slot);
            log::info!("Requesting {} texture from '{}'", slot, source);
            loader.load(source, TextureSink::new(slot, self.sender.clone()));
        }
    }

    /// Subscribe to `hub`, replacing any earlier binding
    pub fn attach(&mut self, hub: &PointerHub) {
        self.detach();
        let layout = Rc::clone(&self.layout);
        self.binding = Some(PointerBinding::attach(&self.controller, hub, move |p| {
            layout.get().hit_test(p)
        }));
    }

    /// Drop the pointer binding, if any
    pub fn detach(&mut self) {
        if let Some(mut binding) = self.binding.take() {
            binding.release();
        }
    }

    /// Check if pointer input is bound
    pub fn is_attached(&self) -> bool {
        self.binding.as_ref().map(|b| b.is_active()).unwrap_or(false)
    }

    /// Detach and cancel any drag or release. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.detach();
        self.controller.borrow_mut().cancel();
    }

    /// Update the viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        let mut layout = self.layout.get();
        layout.resize(width, height);
        self.layout.set(layout);
        self.layout_dirty = true;
    }

    /// Current layout
    pub fn layout(&self) -> CardLayout {
        self.layout.get()
    }

    /// Apply queued texture answers. Returns how many slots changed.
    pub fn poll_textures(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(message) = self.inbox.try_recv() {
            if self.textures.apply(message) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.materials_dirty = true;
        }
        changed
    }

    /// Run one frame: pick up textures, advance the release animation by
    /// `dt` seconds, then write card rotation, light pose and (when changed)
    /// face materials into `host`. The first frame also sets up lighting and
    /// face placement; scale and camera are written again after a resize.
    pub fn frame<S>(&mut self, dt: f32, host: &mut S) -> LightPose
    where
        S: SceneHost<H> + ?Sized,
    {
        self.poll_textures();

        if !self.scene_built {
            host.set_scene_lighting(&SceneLighting::default());
            for face in CardFace::ALL {
                host.place_face(face, face.offset_z(), face.base_yaw());
            }
            self.scene_built = true;
        }

        if self.layout_dirty {
            let layout = self.layout.get();
            host.set_card_scale(layout.card_scale());
            host.set_camera(&layout.camera());
            self.layout_dirty = false;
        }

        let angle = {
            let mut controller = self.controller.borrow_mut();
            controller.advance(dt);
            controller.current_angle()
        };

        host.set_card_rotation(angle);
        let pose = self.light.derive(angle);
        host.set_light_pose(&pose);

        if self.materials_dirty {
            let materials = CardMaterials::from_slots(&self.textures);
            host.set_face_material(CardFace::Front, materials.front);
            host.set_face_material(CardFace::Back, materials.back);
            self.materials_dirty = false;
        }

        pose
    }

    /// Current tilt
    pub fn current_angle(&self) -> TiltAngle {
        self.controller.borrow().current_angle()
    }

    /// Current controller phase
    pub fn phase(&self) -> TiltPhase {
        self.controller.borrow().phase()
    }

    /// Light pose for the current tilt
    pub fn light_pose(&self) -> LightPose {
        self.light.derive(self.current_angle())
    }

    /// Resolved textures so far
    pub fn textures(&self) -> &TextureSlots<H> {
        &self.textures
    }

    /// Shared handle to the controller (for direct input or inspection)
    pub fn controller(&self) -> Rc<RefCell<TiltController>> {
        Rc::clone(&self.controller)
    }

    /// Cancel any motion and snap the card back to rest
    pub fn reset(&mut self) {
        self.controller.borrow_mut().reset();
    }
}

impl<H> Drop for CardRig<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
