//! # World Module
//!
//! This module provides the `World` struct which owns every block currently
//! placed in the sandbox. It serves as the single authority for block
//! lookup, placement, and removal.
//!
//! ## Architecture
//!
//! The world is an explicit mapping from block position (the centre of the
//! block's cube, always on the 2-unit lattice) to a block record. Block
//! lookup is O(1) using a hash map, which also gives placement a free
//! occupancy check: two blocks can never share a position.
//!
//! ## Startup Grid
//!
//! `generate_terrain` populates the fixed 20x20x10 starting lattice: a
//! grass layer on top with dirt beneath it. There is no chunking and no
//! procedural generation; the loop bounds are the whole story.

use cgmath::Point3;
use std::collections::HashMap;

use super::block::{block_type::BlockType, Block};

/// Blocks along the X axis of the starting grid.
pub const GRID_EXTENT_X: i32 = 20;
/// Blocks along the Y axis of the starting grid.
pub const GRID_EXTENT_Y: i32 = 20;
/// Downward layers of the starting grid.
pub const GRID_LAYERS: i32 = 10;

/// Maps a starting-grid index to the world position of the block centre.
///
/// For x and y in [0, 20) and layer z in [0, 10) the block lands at
/// (x*2 - 20, y*2 - 20, -z*2): a 40x40 unit square centred near the origin,
/// with layer 0 at Z = 0 and deeper layers below it.
pub fn grid_to_world(x: i32, y: i32, z: i32) -> Point3<i32> {
    Point3::new(x * 2 - 20, y * 2 - 20, -z * 2)
}

/// Owns all currently-placed blocks, keyed by the block centre position.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::world::World;
///
/// let mut world = World::new();
/// world.generate_terrain();
///
/// assert_eq!(world.len(), 4000);
/// assert!(world.block_at(Point3::new(0, 0, 0)).is_some());
/// ```
pub struct World {
    /// A mapping from block centre position to the block stored there.
    blocks: HashMap<Point3<i32>, Block>,
    /// Bumped on every mutation so the renderer can tell when its instance
    /// buffer went stale.
    revision: u64,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            blocks: HashMap::new(),
            revision: 0,
        }
    }

    /// Populates the fixed starting lattice.
    ///
    /// For z in [0,10), y in [0,20), x in [0,20): one block at
    /// `grid_to_world(x, y, z)`, grass when z = 0 and dirt below. 4000
    /// blocks in total.
    pub fn generate_terrain(&mut self) {
        for z in 0..GRID_LAYERS {
            for y in 0..GRID_EXTENT_Y {
                for x in 0..GRID_EXTENT_X {
                    let block_type = if z == 0 {
                        BlockType::GRASS
                    } else {
                        BlockType::DIRT
                    };
                    self.place_block(grid_to_world(x, y, z), block_type);
                }
            }
        }
    }

    /// Retrieves the block at the given position, if any.
    pub fn block_at(&self, pos: Point3<i32>) -> Option<Block> {
        self.blocks.get(&pos).copied()
    }

    /// Places a block of the given type at the given position.
    ///
    /// Placement on an occupied position is a no-op.
    ///
    /// # Returns
    /// `true` if the block was placed, `false` if the position was occupied.
    pub fn place_block(&mut self, pos: Point3<i32>, block_type: BlockType) -> bool {
        if self.blocks.contains_key(&pos) {
            return false;
        }

        self.blocks.insert(pos, Block::new(block_type));
        self.revision += 1;
        true
    }

    /// Removes and returns the block at the given position.
    ///
    /// Removing from an empty position is a no-op returning `None`.
    pub fn remove_block(&mut self, pos: Point3<i32>) -> Option<Block> {
        let removed = self.blocks.remove(&pos);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// The number of blocks currently placed.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all `(position, block)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point3<i32>, &Block)> {
        self.blocks.iter()
    }

    /// The current change counter. Any mutation bumps it.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_has_4000_blocks_split_by_layer() {
        let mut world = World::new();
        world.generate_terrain();

        assert_eq!(world.len(), 4000);

        let grass = world
            .iter()
            .filter(|(_, b)| b.get_block_type() == BlockType::GRASS)
            .count();
        let dirt = world
            .iter()
            .filter(|(_, b)| b.get_block_type() == BlockType::DIRT)
            .count();

        assert_eq!(grass, 400, "top layer should be entirely grass");
        assert_eq!(dirt, 3600, "all lower layers should be dirt");
    }

    #[test]
    fn terrain_follows_coordinate_formula() {
        let mut world = World::new();
        world.generate_terrain();

        // Grid corners of the top layer.
        assert_eq!(grid_to_world(0, 0, 0), Point3::new(-20, -20, 0));
        assert_eq!(grid_to_world(19, 19, 0), Point3::new(18, 18, 0));
        // Deepest layer sits at Z = -18.
        assert_eq!(grid_to_world(0, 0, 9), Point3::new(-20, -20, -18));

        for pos in [
            Point3::new(-20, -20, 0),
            Point3::new(18, 18, 0),
            Point3::new(-20, -20, -18),
            Point3::new(18, 18, -18),
        ] {
            assert!(world.block_at(pos).is_some(), "missing corner block {:?}", pos);
        }

        // Every top-layer block is grass, and only the top layer is.
        for (pos, block) in world.iter() {
            if pos.z == 0 {
                assert_eq!(block.get_block_type(), BlockType::GRASS);
            } else {
                assert_eq!(block.get_block_type(), BlockType::DIRT);
            }
        }
    }

    #[test]
    fn placement_on_occupied_position_is_a_no_op() {
        let mut world = World::new();
        let pos = Point3::new(0, 0, 0);

        assert!(world.place_block(pos, BlockType::SAND));
        let before = world.revision();

        assert!(!world.place_block(pos, BlockType::STONE));
        assert_eq!(world.revision(), before);
        assert_eq!(
            world.block_at(pos).unwrap().get_block_type(),
            BlockType::SAND
        );
    }

    #[test]
    fn removal_returns_the_block_and_empties_the_position() {
        let mut world = World::new();
        let pos = Point3::new(2, 4, -6);

        world.place_block(pos, BlockType::STONE);
        let removed = world.remove_block(pos);

        assert_eq!(removed.unwrap().get_block_type(), BlockType::STONE);
        assert!(world.block_at(pos).is_none());
        assert!(world.remove_block(pos).is_none());
    }

    #[test]
    fn revision_tracks_mutations_only() {
        let mut world = World::new();
        assert_eq!(world.revision(), 0);

        world.place_block(Point3::new(0, 0, 0), BlockType::GRASS);
        assert_eq!(world.revision(), 1);

        world.block_at(Point3::new(0, 0, 0));
        assert_eq!(world.revision(), 1);

        world.remove_block(Point3::new(0, 0, 0));
        assert_eq!(world.revision(), 2);

        world.remove_block(Point3::new(0, 0, 0));
        assert_eq!(world.revision(), 2);
    }
}
