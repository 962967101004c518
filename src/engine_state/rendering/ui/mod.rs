//! UI rendering system for the sandbox.
//!
//! This module contains components for rendering 2D user interface
//! elements on top of the 3D world: the crosshair and the pause menu.

mod manager;
mod primitives;
mod renderer;

pub use manager::UiMeshManager;
pub use primitives::{UiElement, UiRectangle, UiVertex};
pub use renderer::UiRenderer;
