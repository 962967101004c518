//! # Block Type Module
//!
//! This module defines the different types of blocks in the sandbox world.
//! It provides functionality for block type identification and conversion
//! from the numeric hotbar keys.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all placeable block types in the sandbox world.
///
/// Each variant represents a distinct type of block with its own texture.
/// The `FromPrimitive` derive allows conversion from integers, which is how
/// the numeric selection keys map onto block types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// A grass block, the top layer of the starting grid.
    GRASS,

    /// A dirt block, filling the starting grid below the grass layer.
    DIRT,

    /// A sand block, only available through placement.
    SAND,

    /// A stone block, only available through placement.
    STONE,
}

/// Number of distinct block types. Also the layer count of the block
/// texture array.
pub const BLOCK_TYPE_COUNT: usize = 4;

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// This is used when going from the compact storage format back to the
    /// rich enum type.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`.
    ///
    /// # Panics
    /// Panics if the input value doesn't correspond to a valid `BlockType`.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        let btype_option = num::FromPrimitive::from_u8(btype as BlockTypeSize);
        btype_option.unwrap()
    }

    /// Maps a numeric selection key (1 through 4) to its block type.
    ///
    /// Slot 1 is grass, 2 is dirt, 3 is sand, 4 is stone, matching the
    /// ordering of the selection keys.
    ///
    /// # Arguments
    /// * `slot` - The one-based hotbar slot
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` for out-of-range slots.
    pub fn from_hotbar_slot(slot: u8) -> Option<Self> {
        if slot == 0 {
            return None;
        }
        num::FromPrimitive::from_u8(slot - 1)
    }

    /// The texture array layer holding this block type's texture.
    pub fn texture_layer(&self) -> u32 {
        *self as BlockTypeSize as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotbar_slots_map_one_based() {
        assert_eq!(BlockType::from_hotbar_slot(1), Some(BlockType::GRASS));
        assert_eq!(BlockType::from_hotbar_slot(2), Some(BlockType::DIRT));
        assert_eq!(BlockType::from_hotbar_slot(3), Some(BlockType::SAND));
        assert_eq!(BlockType::from_hotbar_slot(4), Some(BlockType::STONE));
    }

    #[test]
    fn hotbar_slots_out_of_range_are_none() {
        assert_eq!(BlockType::from_hotbar_slot(0), None);
        assert_eq!(BlockType::from_hotbar_slot(5), None);
    }

    #[test]
    fn int_round_trip_matches_texture_layer() {
        for i in 0..BLOCK_TYPE_COUNT as u8 {
            let btype = BlockType::get_block_type_from_int(i);
            assert_eq!(btype.texture_layer(), i as u32);
        }
    }
}
