//! # Engine State Module
//!
//! The core engine module that coordinates the sandbox's subsystems.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container wiring input to gameplay to
//!   rendering
//! * `camera_state` - Camera pose, controller, and GPU uniform snapshot
//! * `interaction` - The block placement/removal raycast
//! * `session` - The GPU-free world/camera/pause state machine
//! * `voxels` - Block definitions and the world map
//! * `rendering` - The wgpu sky/block/UI passes
//!
//! ## Frame Flow
//!
//! Each frame the shell hands the engine a processed input snapshot, which
//! is translated into a [`PlayerAction`]; the session advances from it, the
//! camera uniform and instance buffer are refreshed as needed, and the
//! frame is drawn. Window-level effects (cursor capture, exit) are
//! reported back to the shell through [`EngineOutcome`].

use std::time::Duration;

use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::KeyCode;

use crate::application_state::{
    input_state::ProcessedInputState,
    settings::Settings,
};

pub mod camera_state;
pub mod interaction;
pub mod rendering;
pub mod session;
pub mod voxels;

use rendering::{AssetImages, RendererManager, ShaderSources};
use session::{GameSession, SessionMode};
use voxels::block::block_type::BlockType;

/// UI element name of the crosshair.
const UI_CROSSHAIR: &str = "crosshair";
/// UI element name of the pause menu backdrop.
const UI_MENU_FRAME: &str = "menu_frame";
/// UI element name of the Continue button.
const UI_CONTINUE_BUTTON: &str = "continue_button";
/// UI element name of the Exit button.
const UI_EXIT_BUTTON: &str = "exit_button";

/// Crosshair size in pixels (kept square on screen).
const CROSSHAIR_PIXELS: f32 = 32.0;

/// Menu button geometry in NDC.
const BUTTON_SIZE: (f32, f32) = (0.6, 0.2);
const CONTINUE_POSITION: (f32, f32) = (0.0, 0.25);
const EXIT_POSITION: (f32, f32) = (0.0, -0.25);

/// Menu colors: the backdrop dims the scene, buttons brighten on hover.
const MENU_BACKDROP_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.5,
};
const BUTTON_COLOR: wgpu::Color = wgpu::Color {
    r: 0.784,
    g: 0.784,
    b: 0.784,
    a: 1.0,
};
const BUTTON_HOVER_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Represents player actions derived from one frame of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerAction {
    /// Movement flags, true while the key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,

    /// Mouse look delta for this frame, if the mouse moved
    pub rotate_view: Option<(f64, f64)>,

    /// Place a block of the selected type this frame
    pub place_block: bool,
    /// Remove the targeted block this frame
    pub remove_block: bool,

    /// Change the selected block type
    pub select_block: Option<BlockType>,

    /// Toggle the pause menu
    pub toggle_menu: bool,
}

/// Window-level effects the shell must apply after a frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOutcome {
    /// The new session mode, when this frame switched it. The shell
    /// captures the cursor for `Active` and releases it for `Paused`.
    pub mode_changed: Option<SessionMode>,
    /// The Exit button was clicked.
    pub exit_requested: bool,
}

/// The main state container for the sandbox engine.
pub struct EngineState {
    /// The GPU-free gameplay state
    pub session: GameSession,
    /// All GPU resources and passes
    pub render_manager: RendererManager,
    /// Current player actions derived from input
    player_actions: PlayerAction,
    /// Exit latch set by the menu's Exit button
    exit_requested: bool,
    /// Hover state of (continue, exit), to recolor only on change
    menu_hover: [bool; 2],
}

impl EngineState {
    /// Creates the engine with all subsystems initialized: the renderer
    /// built from the loaded shaders and images, the session with its
    /// starting grid, and the crosshair on screen.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shaders: &ShaderSources,
        assets: &AssetImages,
        settings: &Settings,
    ) -> anyhow::Result<Self> {
        let width = surface_config.width;
        let height = surface_config.height;

        let mut render_manager =
            RendererManager::new(surface, surface_config, device, queue, shaders, assets)?;

        let session = GameSession::new(settings, width, height);

        render_manager.write_camera_uniform(&session.camera_state.camera_uniform);
        render_manager.sync_world(&session.world);

        let mut engine_state = Self {
            session,
            render_manager,
            player_actions: PlayerAction::default(),
            exit_requested: false,
            menu_hover: [false, false],
        };
        engine_state.rebuild_crosshair();

        Ok(engine_state)
    }

    /// Resizes the rendering surface and the projection when the window
    /// size changes.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(size);
        self.session.resize(size.width, size.height);
        self.render_manager
            .write_camera_uniform(&self.session.camera_state.camera_uniform);
        self.rebuild_crosshair();
    }

    /// Renders the current frame.
    pub fn render(&mut self) {
        self.render_manager.render();
    }

    /// Sets the player actions for the coming frame from the processed
    /// input snapshot.
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = self.translate_processed_input(input);
    }

    /// Advances the session by one frame and refreshes GPU-side state.
    ///
    /// # Arguments
    /// * `wait_duration` - The time elapsed since the last frame
    ///
    /// # Returns
    /// The window-level effects the shell must apply.
    pub fn process_input(&mut self, wait_duration: Duration) -> EngineOutcome {
        let actions = self.player_actions;
        let frame = self.session.advance_frame(&actions, wait_duration);
        self.player_actions = PlayerAction::default();

        if frame.camera_moved {
            self.render_manager
                .write_camera_uniform(&self.session.camera_state.camera_uniform);
        }
        self.render_manager.sync_world(&self.session.world);

        if frame.mode_changed {
            match frame.mode {
                SessionMode::Paused => self.show_menu(),
                SessionMode::Active => self.hide_menu(),
            }
        }

        EngineOutcome {
            mode_changed: frame.mode_changed.then_some(frame.mode),
            exit_requested: std::mem::take(&mut self.exit_requested),
        }
    }

    /// Translates the processed input state into player actions.
    ///
    /// While paused, movement and world clicks are not translated at all;
    /// instead a left click is hit-tested against the menu buttons, and
    /// hover highlighting is refreshed from the cursor position.
    fn translate_processed_input(&mut self, input: ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction::default();

        player_action.toggle_menu = input.get_key_state(KeyCode::Escape).is_just_pressed();

        // Selection keys work in either mode, like the menu toggle.
        for (key, slot) in [
            (KeyCode::Digit1, 1),
            (KeyCode::Digit2, 2),
            (KeyCode::Digit3, 3),
            (KeyCode::Digit4, 4),
        ] {
            if input.get_key_state(key).is_just_pressed() {
                player_action.select_block = BlockType::from_hotbar_slot(slot);
            }
        }

        if self.session.mode() == SessionMode::Paused {
            self.refresh_menu_hover(&input);

            if input
                .get_mouse_button_state(winit::event::MouseButton::Left)
                .is_just_pressed()
            {
                if let Some(point) = self.cursor_ndc(&input) {
                    let ui = &self.render_manager.ui_mesh_manager;
                    if ui.hit_test(UI_CONTINUE_BUTTON, point) {
                        player_action.toggle_menu = true;
                    } else if ui.hit_test(UI_EXIT_BUTTON, point) {
                        self.exit_requested = true;
                    }
                }
            }

            return player_action;
        }

        player_action.move_forward = input.get_key_state(KeyCode::KeyW).is_active();
        player_action.move_backward = input.get_key_state(KeyCode::KeyS).is_active();
        player_action.move_left = input.get_key_state(KeyCode::KeyA).is_active();
        player_action.move_right = input.get_key_state(KeyCode::KeyD).is_active();
        player_action.move_up = input.get_key_state(KeyCode::Space).is_active();
        player_action.move_down = input.get_key_state(KeyCode::ShiftLeft).is_active();

        player_action.rotate_view = input.get_mouse_delta();

        player_action.place_block = input
            .get_mouse_button_state(winit::event::MouseButton::Left)
            .is_just_pressed();
        player_action.remove_block = input
            .get_mouse_button_state(winit::event::MouseButton::Right)
            .is_just_pressed();

        player_action
    }

    /// Converts the cursor position from window pixels to NDC.
    fn cursor_ndc(&self, input: &ProcessedInputState) -> Option<(f32, f32)> {
        let (x, y) = input.cursor_position?;
        let (width, height) = self.render_manager.surface_size();
        if width == 0 || height == 0 {
            return None;
        }

        Some((
            (2.0 * x / width as f64 - 1.0) as f32,
            (1.0 - 2.0 * y / height as f64) as f32,
        ))
    }

    /// Recolors the menu buttons when the cursor enters or leaves them.
    fn refresh_menu_hover(&mut self, input: &ProcessedInputState) {
        let point = match self.cursor_ndc(input) {
            Some(point) => point,
            None => return,
        };

        let hover = [
            self.render_manager
                .ui_mesh_manager
                .hit_test(UI_CONTINUE_BUTTON, point),
            self.render_manager
                .ui_mesh_manager
                .hit_test(UI_EXIT_BUTTON, point),
        ];

        for (index, name) in [UI_CONTINUE_BUTTON, UI_EXIT_BUTTON].iter().enumerate() {
            if hover[index] != self.menu_hover[index] {
                let color = if hover[index] {
                    BUTTON_HOVER_COLOR
                } else {
                    BUTTON_COLOR
                };
                self.render_manager
                    .ui_mesh_manager
                    .update_element_color(name, color);
            }
        }

        self.menu_hover = hover;
    }

    /// Puts the pause menu on screen: backdrop first, then the buttons.
    fn show_menu(&mut self) {
        let ui = &mut self.render_manager.ui_mesh_manager;
        ui.add_centered_rectangle(UI_MENU_FRAME, (1.0, 1.0), MENU_BACKDROP_COLOR);
        ui.add_rectangle(UI_CONTINUE_BUTTON, CONTINUE_POSITION, BUTTON_SIZE, BUTTON_COLOR);
        ui.add_rectangle(UI_EXIT_BUTTON, EXIT_POSITION, BUTTON_SIZE, BUTTON_COLOR);
        self.menu_hover = [false, false];
    }

    /// Takes the pause menu off screen.
    fn hide_menu(&mut self) {
        let ui = &mut self.render_manager.ui_mesh_manager;
        ui.remove_element(UI_MENU_FRAME);
        ui.remove_element(UI_CONTINUE_BUTTON);
        ui.remove_element(UI_EXIT_BUTTON);
    }

    /// Rebuilds the crosshair so it stays a fixed pixel size regardless of
    /// the window dimensions.
    fn rebuild_crosshair(&mut self) {
        let (width, height) = self.render_manager.surface_size();
        if width == 0 || height == 0 {
            return;
        }

        let size = (
            2.0 * CROSSHAIR_PIXELS / width as f32,
            2.0 * CROSSHAIR_PIXELS / height as f32,
        );

        let ui = &mut self.render_manager.ui_mesh_manager;
        ui.remove_element(UI_CROSSHAIR);
        ui.add_textured_rectangle(UI_CROSSHAIR, (0.0, 0.0), size);
    }
}
