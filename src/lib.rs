#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A minimal first-person voxel sandbox built with Rust and WGPU: a fixed
//! grass-and-dirt grid, a fly camera, and raycast-driven block placement
//! and removal.
//!
//! ## Key Modules
//!
//! * `application_state` - Application lifecycle, window management, input,
//!   and startup configuration
//! * `engine_state` - The engine proper: gameplay session, camera, block
//!   interaction, and rendering
//!
//! ## Controls
//!
//! * `W`/`A`/`S`/`D` move, `Space`/`LeftShift` fly up/down
//! * Mouse look while the pointer is captured
//! * Left click places the selected block, right click removes one
//! * `1`-`4` select grass/dirt/sand/stone
//! * `Escape` toggles the pause menu
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     voxel_sandbox::run()
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use application_state::{
    graphics_resources_builder::{GraphicsBuilder, MaybeGraphics},
    settings::Settings,
    ApplicationState,
};

use winit::event_loop::EventLoop;

use log::info;

pub mod application_state;
pub mod engine_state;

/// The startup configuration file, read from the working directory.
const SETTINGS_PATH: &str = "settings.json";

/// Starts the sandbox: initializes logging, loads settings, and runs the
/// event loop until the user exits.
///
/// # Errors
/// A malformed settings file or an event loop failure. Asset and GPU
/// failures during initialization are reported and exit the process
/// directly.
pub fn run() -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let settings = Settings::load(Path::new(SETTINGS_PATH))?;

    let event_loop = EventLoop::with_user_event()
        .build()
        .context("failed to build the event loop")?;

    let mut state: ApplicationState = ApplicationState {
        graphics: MaybeGraphics::Builder(GraphicsBuilder::new(event_loop.create_proxy())),
        state: None,
        settings,
    };

    event_loop
        .run_app(&mut state)
        .context("event loop terminated abnormally")?;

    Ok(())
}
