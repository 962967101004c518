//! # Camera State Management
//!
//! This module handles camera-related functionality:
//! - Camera position and orientation tracking
//! - Player input processing for camera control
//! - View/projection matrix calculation for the renderer
//!
//! `CameraState` is deliberately free of GPU resources; the renderer reads
//! the [`camera::CameraUniform`] it produces and owns the buffer itself.
//! That keeps the whole movement model exercisable from plain tests.

use std::time::Duration;

use crate::engine_state::PlayerAction;

pub mod camera;

/// Owns the camera, its controller, and the uniform snapshot handed to the
/// renderer.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
    /// CPU-side copy of the camera data the shaders consume
    pub camera_uniform: camera::CameraUniform,
}

impl CameraState {
    /// Creates a new camera state.
    ///
    /// # Arguments
    /// * `camera` - The starting camera pose
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Mouse look swing factor
    /// * `projection` - The projection used for the initial uniform
    pub fn new(
        camera: camera::Camera,
        speed: f32,
        sensitivity: f32,
        projection: &camera::Projection,
    ) -> Self {
        let camera_controller = camera::CameraController::new(speed, sensitivity);

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, projection);

        CameraState {
            camera,
            camera_controller,
            camera_uniform,
        }
    }

    /// Arms the controller from this frame's player actions.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller input to the camera and refreshes the
    /// uniform snapshot.
    ///
    /// # Returns
    /// `true` when the camera moved and the renderer's uniform buffer needs
    /// rewriting.
    pub fn update(&mut self, dt: Duration, projection: &camera::Projection) -> bool {
        if !self.camera_controller.has_updates() {
            return false;
        }

        self.camera
            .apply_controller_and_reset(&mut self.camera_controller, dt);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, projection);
        true
    }

    /// Refreshes the uniform snapshot without moving the camera, used when
    /// the projection itself changed (window resize).
    pub fn refresh_uniform(&mut self, projection: &camera::Projection) {
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, projection);
    }
}
