//! # Game Session
//!
//! The GPU-free heart of the sandbox: the world, the camera, the selected
//! block type, and the two-state pause machine, advanced once per frame
//! from the current player actions.
//!
//! Keeping this free of rendering resources means every gameplay rule —
//! movement, reach limits, placement offsets, pause freezing — can be
//! exercised from plain tests.

use std::time::Duration;

use cgmath::{Deg, Point3};

use crate::application_state::settings::Settings;

use super::{
    camera_state::{camera, CameraState},
    interaction::{placement_target, ray::Ray, removal_target},
    voxels::{block::block_type::BlockType, world::World},
    PlayerAction,
};

/// Near clipping plane distance.
const ZNEAR: f32 = 0.1;
/// Far clipping plane distance.
const ZFAR: f32 = 1000.0;

/// The camera's starting position, hovering just above the grass layer.
const CAMERA_START: (f32, f32, f32) = (0.0, 0.0, 3.0);

/// The two states of the pause machine.
///
/// **Active**: pointer captured, the per-frame update processes movement
/// and raycast actions. **Paused**: menu shown, pointer released, the
/// per-frame update is a no-op. No sub-states, no stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Active,
    Paused,
}

/// What a frame's update did, for the shell and renderer to react to.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutcome {
    /// The session mode after this frame.
    pub mode: SessionMode,
    /// Whether this frame switched the mode (cursor capture must change).
    pub mode_changed: bool,
    /// Whether the camera moved (the uniform buffer needs rewriting).
    pub camera_moved: bool,
}

/// The explicit application state advanced by the per-frame update.
pub struct GameSession {
    /// Every placed block.
    pub world: World,
    /// Camera pose, controller, and uniform snapshot.
    pub camera_state: CameraState,
    /// Projection shared by the camera uniform and the renderer.
    pub projection: camera::Projection,
    /// The block type the next placement will spawn.
    selected_block_type: BlockType,
    mode: SessionMode,
}

impl GameSession {
    /// Creates a session with the starting grid generated, the camera at
    /// its spawn pose, grass selected, and gameplay active.
    ///
    /// # Arguments
    /// * `settings` - Startup configuration (fov, speed, sensitivity)
    /// * `width` / `height` - Viewport size for the projection
    pub fn new(settings: &Settings, width: u32, height: u32) -> Self {
        let mut world = World::new();
        world.generate_terrain();

        let projection = camera::Projection::new(
            width,
            height,
            Deg(settings.camera.fov_degrees),
            ZNEAR,
            ZFAR,
        );

        let camera = camera::Camera::new(
            Point3::new(CAMERA_START.0, CAMERA_START.1, CAMERA_START.2),
            Deg(0.0),
            Deg(0.0),
        );
        let camera_state = CameraState::new(
            camera,
            settings.camera.move_speed,
            settings.camera.look_sensitivity,
            &projection,
        );

        GameSession {
            world,
            camera_state,
            projection,
            selected_block_type: BlockType::GRASS,
            mode: SessionMode::Active,
        }
    }

    /// The current pause state.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The block type the next placement will use.
    pub fn selected_block_type(&self) -> BlockType {
        self.selected_block_type
    }

    /// The ray from the camera along its view direction, i.e. through the
    /// crosshair.
    pub fn view_ray(&self) -> Ray {
        Ray::new(
            self.camera_state.camera.position,
            self.camera_state.camera.view_dir(),
        )
    }

    /// Updates the projection for a resized viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.camera_state.refresh_uniform(&self.projection);
    }

    /// Advances the session by one frame.
    ///
    /// The menu toggle and the block selection keys are honoured in either
    /// mode (selection is plain state, not a world update). While paused
    /// everything else — movement, mouse look, placement, removal — is a
    /// no-op, freezing the camera where it stands. While active:
    ///
    /// 1. held movement keys and the mouse delta move the camera;
    /// 2. a removal click deletes the nearest struck block within reach;
    /// 3. a placement click spawns the selected type one block width out
    ///    from the struck face, if that position is free.
    pub fn advance_frame(&mut self, actions: &PlayerAction, dt: Duration) -> FrameOutcome {
        let mut mode_changed = false;
        if actions.toggle_menu {
            self.mode = match self.mode {
                SessionMode::Active => SessionMode::Paused,
                SessionMode::Paused => SessionMode::Active,
            };
            mode_changed = true;
        }

        if let Some(block_type) = actions.select_block {
            self.selected_block_type = block_type;
        }

        if self.mode == SessionMode::Paused {
            return FrameOutcome {
                mode: self.mode,
                mode_changed,
                camera_moved: false,
            };
        }

        self.camera_state.intake_actions(actions);
        let camera_moved = self.camera_state.update(dt, &self.projection);

        if actions.remove_block {
            let ray = self.view_ray();
            if let Some(target) = removal_target(&ray, &self.world) {
                self.world.remove_block(target);
            }
        }

        if actions.place_block {
            let ray = self.view_ray();
            if let Some(target) = placement_target(&ray, &self.world) {
                self.world.place_block(target, self.selected_block_type);
            }
        }

        FrameOutcome {
            mode: self.mode,
            mode_changed,
            camera_moved,
        }
    }
}
