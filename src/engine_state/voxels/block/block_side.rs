//! # Block Side Module
//!
//! This module defines the six faces of a block in the Z-up world and the
//! outward normals used to offset newly placed blocks away from the face a
//! ray struck.

use cgmath::Vector3;

/// Represents the six faces of a block.
///
/// The world is Z-up: X runs east, Y runs north, Z runs up. Each variant is
/// assigned a unique integer value matching the face ordering in the cube
/// mesh.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The east face (facing positive X)
    EAST = 0,

    /// The west face (facing negative X)
    WEST = 1,

    /// The north face (facing positive Y)
    NORTH = 2,

    /// The south face (facing negative Y)
    SOUTH = 3,

    /// The top face (facing positive Z)
    TOP = 4,

    /// The bottom face (facing negative Z)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [EAST, WEST, NORTH, SOUTH, TOP, BOTTOM]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::EAST,
            BlockSide::WEST,
            BlockSide::NORTH,
            BlockSide::SOUTH,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// The outward unit normal of this face.
    pub fn normal(&self) -> Vector3<f32> {
        match self {
            BlockSide::EAST => Vector3::new(1.0, 0.0, 0.0),
            BlockSide::WEST => Vector3::new(-1.0, 0.0, 0.0),
            BlockSide::NORTH => Vector3::new(0.0, 1.0, 0.0),
            BlockSide::SOUTH => Vector3::new(0.0, -1.0, 0.0),
            BlockSide::TOP => Vector3::new(0.0, 0.0, 1.0),
            BlockSide::BOTTOM => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// The integer lattice step from a block's position to the position of
    /// the neighbour sharing this face. One step is one block width.
    pub fn lattice_offset(&self) -> Vector3<i32> {
        match self {
            BlockSide::EAST => Vector3::new(1, 0, 0),
            BlockSide::WEST => Vector3::new(-1, 0, 0),
            BlockSide::NORTH => Vector3::new(0, 1, 0),
            BlockSide::SOUTH => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 0, 1),
            BlockSide::BOTTOM => Vector3::new(0, 0, -1),
        }
    }

    /// Picks the face for a given axis (0 = X, 1 = Y, 2 = Z) and direction.
    ///
    /// Used by the raycast to translate the entry axis of a slab test into
    /// the face that was struck.
    ///
    /// # Panics
    /// Panics on an axis outside 0..3.
    pub fn from_axis(axis: usize, positive: bool) -> BlockSide {
        match (axis, positive) {
            (0, true) => BlockSide::EAST,
            (0, false) => BlockSide::WEST,
            (1, true) => BlockSide::NORTH,
            (1, false) => BlockSide::SOUTH,
            (2, true) => BlockSide::TOP,
            (2, false) => BlockSide::BOTTOM,
            _ => unreachable!("invalid axis {}", axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn normals_are_unit_length() {
        for side in BlockSide::all() {
            let n = side.normal();
            assert!((n.magnitude() - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn lattice_offset_matches_normal_direction() {
        for side in BlockSide::all() {
            let n = side.normal();
            let o = side.lattice_offset();
            assert_eq!(o.x as f32, n.x);
            assert_eq!(o.y as f32, n.y);
            assert_eq!(o.z as f32, n.z);
        }
    }

    #[test]
    fn from_axis_round_trips_through_normal() {
        for (axis, positive, expected) in [
            (0, true, BlockSide::EAST),
            (0, false, BlockSide::WEST),
            (1, true, BlockSide::NORTH),
            (1, false, BlockSide::SOUTH),
            (2, true, BlockSide::TOP),
            (2, false, BlockSide::BOTTOM),
        ] {
            assert_eq!(BlockSide::from_axis(axis, positive), expected);
        }
    }
}
