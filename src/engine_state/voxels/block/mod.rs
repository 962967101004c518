//! # Block Module
//!
//! This module provides the core block-related functionality for the
//! sandbox: block type definitions, block face handling, and the block
//! record stored in the world map.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for compact storage of block data.
pub type BlockTypeSize = u8;

/// The edge length of a block in world units. Block positions live on a
/// lattice with this spacing, and a placed block is offset from the struck
/// block by exactly this distance along the face normal.
pub const BLOCK_SIZE: f32 = 2.0;

/// Half the block edge length; the extent of a block's bounding box from
/// its centre on each axis.
pub const BLOCK_HALF_EXTENT: f32 = BLOCK_SIZE / 2.0;

/// Represents a single block record in the world.
///
/// This is a lightweight structure that stores only the essential block
/// data; position is the key of the world map entry that owns the record.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute ensures a consistent memory layout for GPU
/// interoperability. The block type is stored as a compact `BlockTypeSize`.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize`.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// The rich enum type of this block.
    pub fn get_block_type(&self) -> BlockType {
        BlockType::get_block_type_from_int(self.block_type)
    }
}
