//! Foilcard - a draggable foil trading card
//!
//! Drag the card to tilt it; let go and it eases back to rest while the light
//! follows the tilt.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use foilcard::config::AppConfig;
use foilcard::input::{InputAction, InputMapper};
use foilcard::loader::{FileTextureLoader, TextureData};
use foilcard::systems::{CardScene, FrameSystem, WindowSystem};
use foilcard_render::{CardLayout, CardRig, PointerHub, Vec2};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    hub: PointerHub,
    rig: CardRig<TextureData>,
    scene: CardScene,
    frames: FrameSystem,
    /// Last cursor position in window pixels
    cursor: Vec2,
    show_overlay: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let layout = CardLayout::new(config.window.width as f32, config.window.height as f32)
            .with_fov(config.camera.fov);
        let mut rig = CardRig::new(
            config.tilt.to_tilt_settings(),
            config.light.to_follower(),
            layout,
        );

        let mut loader = FileTextureLoader::new();
        rig.request_textures(&mut loader, &config.card.to_sources());

        let hub = PointerHub::new();
        rig.attach(&hub);

        Self {
            scene: CardScene::with_light_intensity(config.light.intensity),
            show_overlay: config.debug.show_overlay,
            config,
            window: None,
            hub,
            rig,
            frames: FrameSystem::new(),
            cursor: Vec2::ZERO,
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => {
                self.rig.shutdown();
                event_loop.exit();
            }
            InputAction::ResetCard => {
                self.rig.reset();
                log::info!("Card reset to rest");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleOverlay => {
                self.show_overlay = !self.show_overlay;
                log::info!("Overlay: {}", if self.show_overlay { "ON" } else { "OFF" });
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => {
                let (width, height) = window.inner_size();
                self.rig.resize(width, height);
                log::info!("Card scale {:.3} at {}x{}", self.rig.layout().scale(), width, height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.rig.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.rig.resize(size.width as f32, size.height as f32);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = InputMapper::map_cursor_moved(position.x, position.y);
                self.cursor = event.position();
                self.hub.dispatch(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = InputMapper::map_mouse_button(button, state, self.cursor) {
                    self.hub.dispatch(event);
                }
            }

            WindowEvent::RedrawRequested => {
                self.frames.update(&mut self.rig, &mut self.scene);

                if let Some(window) = &self.window {
                    let readout = self.show_overlay.then(|| self.scene.summary());
                    window.update_title(self.rig.phase(), readout.as_deref());
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.rig.shutdown();
        log::info!("Foilcard shut down after {} frames", self.scene.frames());
    }
}

fn main() {
    let config = AppConfig::load();

    // Config picks the default log level; RUST_LOG still wins
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Foilcard");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
