//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and graphics initialization
//! - Input handling
//! - Application lifecycle events
//! - Cursor capture following the pause state

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;
pub mod settings;

use std::sync::Arc;
use std::time::Instant;

use graphics_resources_builder::{Graphics, MaybeGraphics};
use input_manager::InputManager;
use settings::Settings;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::engine_state::{session::SessionMode, EngineState};

/// The main application state container that manages the application's
/// lifecycle.
///
/// Holds the graphics initialization state, the running engine, and the
/// startup settings. Implements `ApplicationHandler` to process window and
/// device events.
pub struct ApplicationState {
    /// The current graphics state: initializing, ready, or consumed
    pub graphics: MaybeGraphics,

    /// The initialized application state, once the engine has started
    pub state: Option<InitializedApplicationState>,

    /// Startup configuration, loaded before the event loop runs
    pub settings: Settings,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: Instant,
}

/// Grabs and hides the cursor for mouse-look gameplay.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grabbed {
        log::warn!("failed to grab the cursor: {}", err);
    }
    window.set_cursor_visible(false);
}

/// Releases the cursor for menu interaction.
fn release_cursor(window: &Window) {
    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        log::warn!("failed to release the cursor: {}", err);
    }
    window.set_cursor_visible(true);
}

impl ApplicationState {
    /// Transitions from the initialization phase to the running state by
    /// building the engine from the finished graphics resources.
    ///
    /// An engine construction failure (bad textures) is fatal and reported
    /// before exiting.
    fn initialize_application_state(&mut self) {
        if let MaybeGraphics::Graphics(gfx) = &mut self.graphics {
            let taken_gfx = std::mem::take(gfx);
            let window = taken_gfx.window.expect("Window is missing");
            let shaders = taken_gfx.shaders.expect("Shader sources are missing");
            let assets = taken_gfx.assets.expect("Asset images are missing");

            let engine_state = EngineState::new(
                taken_gfx.surface.expect("Surface is missing"),
                taken_gfx
                    .surface_config
                    .expect("Surface configuration is missing"),
                taken_gfx.device.expect("Device is missing"),
                taken_gfx.queue.expect("Queue is missing"),
                &shaders,
                &assets,
                &self.settings,
            );

            let engine_state = match engine_state {
                Ok(engine_state) => engine_state,
                Err(err) => {
                    log::error!("fatal startup error: {:#}", err);
                    std::process::exit(1);
                }
            };

            // Gameplay starts active, so the pointer starts captured.
            capture_cursor(&window);

            self.state = Some(InitializedApplicationState {
                engine_state,
                window,
                input_manager: InputManager::new(),
                last_wait_time: Instant::now(),
            });

            self.graphics = MaybeGraphics::Moved;
        }
    }
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Handles window-related events such as resize, focus changes, and
    /// input events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(state) = &mut self.state {
            let input_manager = &mut state.input_manager;
            let engine_state = &mut state.engine_state;

            input_manager.intake_input(&event);

            match event {
                WindowEvent::Resized(size) => {
                    engine_state.resize_surface(size);
                }
                WindowEvent::Focused(is_focused) => {
                    if !is_focused {
                        input_manager.reset_inputs();
                    }
                }
                WindowEvent::RedrawRequested => {
                    engine_state.render();
                }
                WindowEvent::CloseRequested => event_loop.exit(),
                _ => (),
            }
        } else if let WindowEvent::CloseRequested = event {
            event_loop.exit();
        }
    }

    /// Handles device-level input events such as raw mouse motion.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Called when the application is resumed; kicks off graphics
    /// initialization on the first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            builder.build_and_send(event_loop, &self.settings);
        }
    }

    /// Receives the finished graphics resources and starts the engine.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, graphics: Graphics) {
        self.graphics = MaybeGraphics::Graphics(graphics);
        self.initialize_application_state();
    }

    /// Called before the event loop goes to sleep: advances the frame and
    /// applies any window-level effects the engine reported.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = Instant::now();
            let wait_dt = now - state.last_wait_time;

            if let Some(processed_input) = state.input_manager.get_and_reset_processed_input() {
                state.engine_state.set_input_commands(processed_input);
            }

            let outcome = state.engine_state.process_input(wait_dt);

            state.last_wait_time = now;

            match outcome.mode_changed {
                Some(SessionMode::Paused) => release_cursor(&state.window),
                Some(SessionMode::Active) => capture_cursor(&state.window),
                None => (),
            }
            if outcome.exit_requested {
                event_loop.exit();
                return;
            }

            state.window.request_redraw();
        }
    }
}
