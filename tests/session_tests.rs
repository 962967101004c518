//! Session-level scenario tests.
//!
//! These drive the GPU-free `GameSession` the same way the frame loop
//! does: build a `PlayerAction`, advance one frame, and observe the world
//! and camera.

use std::time::Duration;

use cgmath::{Point3, Rad};

use voxel_sandbox::application_state::settings::Settings;
use voxel_sandbox::engine_state::session::{GameSession, SessionMode};
use voxel_sandbox::engine_state::voxels::block::block_type::BlockType;
use voxel_sandbox::engine_state::voxels::world::World;
use voxel_sandbox::engine_state::PlayerAction;

const DT: Duration = Duration::from_millis(100);

fn new_session() -> GameSession {
    GameSession::new(&Settings::default(), 1280, 720)
}

/// A session whose world holds a single block at the origin, with the
/// camera hovering `height` units above it looking straight down.
fn session_looking_down_at_origin_block(height: f32) -> GameSession {
    let mut session = new_session();
    session.world = World::new();
    session.world.place_block(Point3::new(0, 0, 0), BlockType::GRASS);

    let camera = &mut session.camera_state.camera;
    camera.position = Point3::new(0.0, 0.0, height);
    camera.yaw = Rad(0.0);
    camera.pitch = Rad(-std::f32::consts::FRAC_PI_2 + 1e-4);

    session
}

/// A session whose world holds a single block at the origin, with the
/// camera `distance` units south of it looking north. The block's centre
/// distance from the camera is exactly `distance`.
fn session_facing_origin_block(distance: f32) -> GameSession {
    let mut session = new_session();
    session.world = World::new();
    session.world.place_block(Point3::new(0, 0, 0), BlockType::GRASS);

    let camera = &mut session.camera_state.camera;
    camera.position = Point3::new(0.0, -distance, 0.0);
    camera.yaw = Rad(0.0);
    camera.pitch = Rad(0.0);

    session
}

fn place(session: &mut GameSession) {
    session.advance_frame(
        &PlayerAction {
            place_block: true,
            ..PlayerAction::default()
        },
        DT,
    );
}

fn remove(session: &mut GameSession) {
    session.advance_frame(
        &PlayerAction {
            remove_block: true,
            ..PlayerAction::default()
        },
        DT,
    );
}

#[test]
fn new_session_starts_active_with_the_full_grid_and_grass_selected() {
    let session = new_session();

    assert_eq!(session.mode(), SessionMode::Active);
    assert_eq!(session.world.len(), 4000);
    assert_eq!(session.selected_block_type(), BlockType::GRASS);
}

#[test]
fn clicks_into_empty_sky_change_nothing() {
    let mut session = new_session();
    // Look straight up: nothing above the camera.
    session.camera_state.camera.pitch = Rad(std::f32::consts::FRAC_PI_2 - 1e-4);

    place(&mut session);
    remove(&mut session);

    assert_eq!(session.world.len(), 4000);
}

#[test]
fn removal_reach_is_an_exclusive_12_unit_bound() {
    for (distance, expect_removed) in [(11.99, true), (12.0, false), (12.01, false)] {
        let mut session = session_facing_origin_block(distance);
        remove(&mut session);

        assert_eq!(
            session.world.block_at(Point3::new(0, 0, 0)).is_none(),
            expect_removed,
            "removal at centre distance {}",
            distance
        );
    }
}

#[test]
fn placement_reach_is_an_exclusive_14_unit_bound() {
    for (distance, expect_placed) in [(13.99, true), (14.0, false), (14.01, false)] {
        let mut session = session_facing_origin_block(distance);
        place(&mut session);

        assert_eq!(
            session.world.len() == 2,
            expect_placed,
            "placement at centre distance {}",
            distance
        );
    }
}

#[test]
fn placement_lands_one_block_width_out_from_the_struck_face() {
    // Facing north at the block's south face: the new block appears two
    // units toward the camera.
    let mut session = session_facing_origin_block(10.0);
    place(&mut session);

    let placed = session.world.block_at(Point3::new(0, -2, 0));
    assert!(placed.is_some());
}

#[test]
fn selected_type_is_used_and_retained_across_placements() {
    let mut session = session_facing_origin_block(10.0);

    // Select sand, then place twice with no further selection. The second
    // placement strikes the first placed block and stacks toward the
    // camera.
    session.advance_frame(
        &PlayerAction {
            select_block: Some(BlockType::SAND),
            ..PlayerAction::default()
        },
        DT,
    );
    place(&mut session);
    place(&mut session);

    let first = session.world.block_at(Point3::new(0, -2, 0)).unwrap();
    let second = session.world.block_at(Point3::new(0, -4, 0)).unwrap();
    assert_eq!(first.get_block_type(), BlockType::SAND);
    assert_eq!(second.get_block_type(), BlockType::SAND);
}

#[test]
fn spec_scenario_block_at_origin_hit_from_above_at_distance_10() {
    let mut session = session_looking_down_at_origin_block(10.0);
    session.advance_frame(
        &PlayerAction {
            select_block: Some(BlockType::STONE),
            ..PlayerAction::default()
        },
        DT,
    );

    // Placement spawns the selected type offset along the top face normal.
    place(&mut session);
    let placed = session.world.block_at(Point3::new(0, 0, 2)).unwrap();
    assert_eq!(placed.get_block_type(), BlockType::STONE);

    // Removal from the same starting state deletes the block at the
    // origin.
    let mut session = session_looking_down_at_origin_block(10.0);
    remove(&mut session);
    assert!(session.world.block_at(Point3::new(0, 0, 0)).is_none());
    assert!(session.world.is_empty());
}

#[test]
fn pausing_freezes_the_camera_until_resumed() {
    let mut session = new_session();

    let outcome = session.advance_frame(
        &PlayerAction {
            toggle_menu: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(outcome.mode, SessionMode::Paused);
    assert!(outcome.mode_changed);

    let frozen_position = session.camera_state.camera.position;
    let frozen_yaw = session.camera_state.camera.yaw;

    // Movement, look, and clicks do nothing while paused.
    let outcome = session.advance_frame(
        &PlayerAction {
            move_forward: true,
            move_up: true,
            rotate_view: Some((25.0, 10.0)),
            place_block: true,
            remove_block: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert!(!outcome.camera_moved);
    assert_eq!(session.camera_state.camera.position, frozen_position);
    assert_eq!(session.camera_state.camera.yaw, frozen_yaw);
    assert_eq!(session.world.len(), 4000);

    // Resume, and movement applies again.
    session.advance_frame(
        &PlayerAction {
            toggle_menu: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(session.mode(), SessionMode::Active);

    let outcome = session.advance_frame(
        &PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert!(outcome.camera_moved);
    assert!(session.camera_state.camera.position.y > frozen_position.y);
}

#[test]
fn toggling_twice_in_sequence_round_trips_the_mode() {
    let mut session = new_session();
    assert_eq!(session.mode(), SessionMode::Active);

    session.advance_frame(
        &PlayerAction {
            toggle_menu: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(session.mode(), SessionMode::Paused);

    session.advance_frame(
        &PlayerAction {
            toggle_menu: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(session.mode(), SessionMode::Active);
}

#[test]
fn block_selection_still_applies_while_paused() {
    // The selection keys are plain state changes, not part of the frozen
    // update; they keep working with the menu open.
    let mut session = new_session();
    session.advance_frame(
        &PlayerAction {
            toggle_menu: true,
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(session.mode(), SessionMode::Paused);

    session.advance_frame(
        &PlayerAction {
            select_block: Some(BlockType::STONE),
            ..PlayerAction::default()
        },
        DT,
    );
    assert_eq!(session.selected_block_type(), BlockType::STONE);
    assert_eq!(session.world.len(), 4000);
}
