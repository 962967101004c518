//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and transformations
//! - Projection matrix handling
//! - Camera controller for input processing
//! - GPU uniform data layout
//!
//! ## Coordinate System
//!
//! The world is Z-up: X runs east, Y runs north, Z runs up. Yaw 0 faces
//! north (+Y) and increases counter-clockwise, so rightward mouse movement
//! decreases it. Pitch raises the view toward +Z and is clamped short of
//! straight up/down to keep the view matrix well defined.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use crate::engine_state::PlayerAction;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// WGPU's NDC range is [-1, 1] in X and Y but [0, 1] in Z, so this matrix
/// scales Z from [-1, 1] to [-0.5, 0.5] and then shifts it to [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// The camera maintains its position and orientation in the world and
/// provides methods for view matrix calculation and movement. Position and
/// orientation are set directly each frame; there is no damping and no
/// acceleration.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Heading around the Z (up) axis, in radians. 0 faces north (+Y).
    pub yaw: Rad<f32>,
    /// Elevation toward +Z, in radians, clamped to just short of +/-90 degrees.
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position in world space
    /// * `yaw` - Initial heading. Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial elevation. Can be any type that converts to `Rad<f32>`.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// The direction the camera is looking, as a unit vector.
    pub fn view_dir(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(-yaw_sin * pitch_cos, yaw_cos * pitch_cos, pitch_sin).normalize()
    }

    /// The facing direction projected onto the horizontal plane, as a unit
    /// vector. "Forward" movement follows this regardless of pitch.
    pub fn horizontal_forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, yaw_cos, 0.0)
    }

    /// The rightward direction on the horizontal plane, as a unit vector.
    pub fn horizontal_right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, yaw_sin, 0.0)
    }

    /// Calculates the view matrix for this camera.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.view_dir(), Vector3::unit_z())
    }

    /// Applies the controller's accumulated movement and rotation to the
    /// camera, then resets the controller for the next frame.
    ///
    /// Horizontal movement is decomposed along the camera's current heading
    /// so "forward" always means "the way the camera faces" projected onto
    /// the horizontal plane; vertical movement is independent of
    /// orientation. Pitch is clamped after rotation.
    ///
    /// # Arguments
    /// * `controller` - The camera controller holding this frame's input
    /// * `dt` - Time elapsed since the last update
    pub fn apply_controller_and_reset(&mut self, controller: &mut CameraController, dt: Duration) {
        let dt = dt.as_secs_f32();
        let travel = controller.speed * dt;

        let forward = self.horizontal_forward();
        let right = self.horizontal_right();

        self.position += forward * (controller.amount_forward - controller.amount_backward) * travel;
        self.position += right * (controller.amount_right - controller.amount_left) * travel;
        self.position.z += (controller.amount_up - controller.amount_down) * travel;

        // Rightward mouse movement decreases yaw, downward decreases pitch.
        self.yaw -= Rad(controller.rotate_horizontal) * controller.sensitivity * dt;
        self.pitch -= Rad(controller.rotate_vertical) * controller.sensitivity * dt;

        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }

        controller.reset();
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let aspect = width as f32 / height as f32;
        let fovy: Rad<f32> = fovy.into();
        Self {
            aspect,
            fovy,
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Calculates the projection matrix, combining the perspective
    /// projection with the OpenGL-to-WGPU coordinate transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Handles camera movement and rotation based on user input.
///
/// Movement amounts are armed from the frame's player actions and consumed
/// (then reset) when applied to the camera.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts, 0 or 1 per direction this frame
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Rotation amounts in mouse counts this frame
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Mouse look swing factor, radians per mouse count
    ///   per second
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Arms the controller from this frame's player actions.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.amount_forward = actions.move_forward as u8 as f32;
        self.amount_backward = actions.move_backward as u8 as f32;
        self.amount_left = actions.move_left as u8 as f32;
        self.amount_right = actions.move_right as u8 as f32;
        self.amount_up = actions.move_up as u8 as f32;
        self.amount_down = actions.move_down as u8 as f32;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal = delta_x as f32;
            self.rotate_vertical = delta_y as f32;
        }
    }

    /// Checks whether there is any pending movement or rotation to apply.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    /// Clears all armed amounts.
    pub fn reset(&mut self) {
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
        self.amount_up = 0.0;
        self.amount_down = 0.0;
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// cgmath matrices can't be handed to bytemuck directly, so the matrices
/// are stored as plain 4x4 float arrays.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    view_proj_inverse: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with identity matrices and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
            view_proj_inverse: cgmath::Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Updates the view-projection matrix, its inverse, and the position
    /// from the current camera state. The inverse is what the sky pass
    /// uses to reconstruct per-pixel view rays.
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera, projection: &Projection) {
        let viewproj = projection.calc_matrix() * camera.calc_matrix();
        self.view_proj = viewproj.into();
        self.view_proj_inverse = viewproj
            .invert()
            .unwrap_or_else(cgmath::Matrix4::identity)
            .into();
        let pos3: [f32; 3] = camera.position.into();

        self.position = [pos3[0], pos3[1], pos3[2], 0.0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const DT: Duration = Duration::from_millis(100);

    fn assert_close(a: f32, b: f32, what: &str) {
        assert!((a - b).abs() < 1e-4, "{}: {} vs {}", what, a, b);
    }

    #[test]
    fn forward_at_yaw_zero_moves_north() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 3.0), Rad(0.0), Rad(0.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert_close(camera.position.x, 0.0, "x");
        assert_close(camera.position.y, 1.0, "y");
        assert_close(camera.position.z, 3.0, "z");
    }

    #[test]
    fn forward_follows_heading_on_the_horizontal_plane() {
        // Facing west (yaw 90 degrees): forward is -X.
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(90.0), Deg(0.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert_close(camera.position.x, -1.0, "x");
        assert_close(camera.position.y, 0.0, "y");
    }

    #[test]
    fn forward_ignores_pitch() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(-60.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert_close(camera.position.y, 1.0, "y");
        assert_close(camera.position.z, 0.0, "z stays level");
    }

    #[test]
    fn vertical_movement_is_orientation_independent() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(123.0), Deg(45.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            move_up: true,
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert_close(camera.position.x, 0.0, "x");
        assert_close(camera.position.y, 0.0, "y");
        assert_close(camera.position.z, 1.0, "z");
    }

    #[test]
    fn rightward_mouse_movement_decreases_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            rotate_view: Some((5.0, 0.0)),
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert!(camera.yaw.0 < 0.0);
        assert_close(camera.pitch.0, 0.0, "pitch untouched");
    }

    #[test]
    fn pitch_is_clamped_short_of_straight_up() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let mut controller = CameraController::new(10.0, 10.0);
        // A huge upward swing in one frame.
        controller.intake_actions(&PlayerAction {
            rotate_view: Some((0.0, -10_000.0)),
            ..PlayerAction::default()
        });

        camera.apply_controller_and_reset(&mut controller, DT);

        assert!(camera.pitch.0 <= SAFE_FRAC_PI_2);
        assert!(camera.pitch.0 > 0.0);
    }

    #[test]
    fn controller_resets_after_application() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let mut controller = CameraController::new(10.0, 10.0);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            rotate_view: Some((1.0, 1.0)),
            ..PlayerAction::default()
        });
        assert!(controller.has_updates());

        camera.apply_controller_and_reset(&mut controller, DT);
        assert!(!controller.has_updates());

        // A second application with no fresh input moves nothing.
        let before = camera.position;
        camera.apply_controller_and_reset(&mut controller, DT);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn view_dir_is_unit_length_and_tracks_pitch() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(30.0));
        let dir = camera.view_dir();
        assert_close(dir.magnitude(), 1.0, "unit length");
        assert!(dir.z > 0.0, "looking upward");
        assert!(dir.y > 0.0, "still facing north");
    }
}
