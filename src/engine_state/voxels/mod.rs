//! # Voxels Module
//!
//! Block definitions and the world map that owns every placed block.

pub mod block;
pub mod world;
