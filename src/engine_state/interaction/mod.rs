//! # Interaction Module
//!
//! Block placement and removal via raycasting. This is the decision-making
//! heart of the sandbox: given the camera ray and the world, find the
//! nearest struck block and work out whether it is close enough to remove,
//! or where a new block would land next to it.
//!
//! Everything here is a pure function of (ray, world); the only state
//! involved is the world itself, mutated by the caller once a target has
//! been found.

use cgmath::{MetricSpace, Point3};

use super::voxels::{
    block::{block_side::BlockSide, Block, BLOCK_SIZE},
    world::World,
};

pub mod ray;

use ray::{ray_aabb_intersection, Aabb, Ray};

/// A block may be removed when its centre is closer than this to the ray
/// origin. Strict bound; exactly 12.0 is out of reach.
pub const REMOVAL_REACH: f32 = 12.0;

/// A block may be built against when its centre is closer than this to the
/// ray origin. Strict bound; exactly 14.0 is out of reach.
///
/// Deliberately larger than [`REMOVAL_REACH`]; both literals are preserved
/// from the reference behaviour rather than unified.
pub const PLACEMENT_REACH: f32 = 14.0;

/// The nearest block struck by a ray.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Position (centre) of the struck block.
    pub block_pos: Point3<i32>,
    /// The block record stored there.
    pub block: Block,
    /// The face the ray entered through.
    pub side: BlockSide,
    /// Distance along the ray to the entry point.
    pub entry_distance: f32,
    /// Distance from the ray origin to the block's centre. Reach checks
    /// use this, not the entry distance.
    pub center_distance: f32,
}

/// Casts a ray against every block's bounding box and returns the nearest
/// intersection.
///
/// Hits are ordered by ascending entry distance; equidistant hits (a ray
/// through a shared edge or corner) are broken by block position so the
/// result does not depend on map iteration order. A ray that intersects
/// nothing returns `None`.
pub fn nearest_block_hit(ray: &Ray, world: &World) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;

    for (&block_pos, &block) in world.iter() {
        let center = Point3::new(block_pos.x as f32, block_pos.y as f32, block_pos.z as f32);
        let Some(intersection) = ray_aabb_intersection(ray, &Aabb::block_at(center)) else {
            continue;
        };

        let candidate = RayHit {
            block_pos,
            block,
            side: intersection.side,
            entry_distance: intersection.t_enter,
            center_distance: ray.origin.distance(center),
        };

        let closer = match &nearest {
            None => true,
            Some(best) => {
                candidate.entry_distance < best.entry_distance
                    || (candidate.entry_distance == best.entry_distance
                        && (candidate.block_pos.x, candidate.block_pos.y, candidate.block_pos.z)
                            < (best.block_pos.x, best.block_pos.y, best.block_pos.z))
            }
        };

        if closer {
            nearest = Some(candidate);
        }
    }

    nearest
}

/// Finds the block a removal click would delete: the nearest struck block,
/// provided its centre is within [`REMOVAL_REACH`].
///
/// Returns `None` (a no-op for the caller) when nothing is struck or the
/// nearest hit is out of range.
pub fn removal_target(ray: &Ray, world: &World) -> Option<Point3<i32>> {
    let hit = nearest_block_hit(ray, world)?;
    if hit.center_distance < REMOVAL_REACH {
        Some(hit.block_pos)
    } else {
        None
    }
}

/// Finds the position a placement click would fill: one block width out
/// from the nearest struck block along the struck face's normal, provided
/// the struck block's centre is within [`PLACEMENT_REACH`].
///
/// Returns `None` (a no-op for the caller) when nothing is struck or the
/// nearest hit is out of range. The returned position may itself be
/// occupied; `World::place_block` resolves that.
pub fn placement_target(ray: &Ray, world: &World) -> Option<Point3<i32>> {
    let hit = nearest_block_hit(ray, world)?;
    if hit.center_distance >= PLACEMENT_REACH {
        return None;
    }

    let offset = hit.side.lattice_offset() * BLOCK_SIZE as i32;
    Some(hit.block_pos + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use cgmath::Vector3;

    /// A world with a single block whose centre sits `distance` units north
    /// of the origin, and a ray looking straight at it.
    fn world_with_block_at_distance(distance: f32) -> (World, Ray) {
        let mut world = World::new();
        // Block centres live on the integer lattice; steer the ray origin
        // instead so the centre distance is exact.
        world.place_block(Point3::new(0, 0, 0), BlockType::GRASS);
        let ray = Ray::new(
            Point3::new(0.0, -distance, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        (world, ray)
    }

    #[test]
    fn empty_world_yields_no_targets() {
        let world = World::new();
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

        assert!(nearest_block_hit(&ray, &world).is_none());
        assert!(removal_target(&ray, &world).is_none());
        assert!(placement_target(&ray, &world).is_none());
    }

    #[test]
    fn missing_ray_yields_no_targets() {
        let mut world = World::new();
        world.place_block(Point3::new(0, 0, 0), BlockType::DIRT);
        let ray = Ray::new(Point3::new(0.0, -10.0, 0.0), Vector3::new(0.0, -1.0, 0.0));

        assert!(removal_target(&ray, &world).is_none());
        assert!(placement_target(&ray, &world).is_none());
    }

    #[test]
    fn nearest_of_two_blocks_wins() {
        let mut world = World::new();
        world.place_block(Point3::new(0, 4, 0), BlockType::DIRT);
        world.place_block(Point3::new(0, 8, 0), BlockType::STONE);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));

        let hit = nearest_block_hit(&ray, &world).unwrap();
        assert_eq!(hit.block_pos, Point3::new(0, 4, 0));
        assert_eq!(hit.block.get_block_type(), BlockType::DIRT);
        assert_eq!(hit.side, BlockSide::SOUTH);
        assert!((hit.entry_distance - 3.0).abs() < 1e-5);
        assert!((hit.center_distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn reach_uses_center_distance_not_entry_distance() {
        // Centre at 11.5: entry point is at 10.5, centre distance 11.5.
        // Removal reach compares the latter.
        let (world, ray) = world_with_block_at_distance(11.5);
        assert!(removal_target(&ray, &world).is_some());

        let (world, ray) = world_with_block_at_distance(12.5);
        assert!(removal_target(&ray, &world).is_none());
    }

    #[test]
    fn removal_reach_bound_is_exclusive() {
        for (distance, expected) in [(11.99, true), (12.0, false), (12.01, false)] {
            let (world, ray) = world_with_block_at_distance(distance);
            assert_eq!(
                removal_target(&ray, &world).is_some(),
                expected,
                "removal at centre distance {}",
                distance
            );
        }
    }

    #[test]
    fn placement_reach_bound_is_exclusive() {
        for (distance, expected) in [(13.99, true), (14.0, false), (14.01, false)] {
            let (world, ray) = world_with_block_at_distance(distance);
            assert_eq!(
                placement_target(&ray, &world).is_some(),
                expected,
                "placement at centre distance {}",
                distance
            );
        }
    }

    #[test]
    fn placement_offsets_one_block_width_along_the_struck_face() {
        let (world, ray) = world_with_block_at_distance(10.0);
        // Ray flies north, strikes the south face; the new block lands one
        // block width south of the struck block.
        assert_eq!(
            placement_target(&ray, &world),
            Some(Point3::new(0, -2, 0))
        );
    }

    #[test]
    fn spec_scenario_top_face_placement_and_removal() {
        // Camera 10 above a block at the origin, looking straight down:
        // the top face is struck, placement lands at (0, 0, 2), removal
        // deletes the block at the origin.
        let mut world = World::new();
        world.place_block(Point3::new(0, 0, 0), BlockType::GRASS);
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = nearest_block_hit(&ray, &world).unwrap();
        assert_eq!(hit.side, BlockSide::TOP);
        assert!((hit.center_distance - 10.0).abs() < 1e-5);

        assert_eq!(placement_target(&ray, &world), Some(Point3::new(0, 0, 2)));
        assert_eq!(removal_target(&ray, &world), Some(Point3::new(0, 0, 0)));
    }
}
