//! Vertex and instance layouts for block rendering.
//!
//! Every block in the world is the same 2-unit cube, so the renderer keeps
//! one shared cube mesh and draws it once per block with a per-instance
//! translation and texture layer.

use cgmath::Point3;

use crate::engine_state::voxels::block::{Block, BLOCK_HALF_EXTENT};

/// A vertex of the shared cube mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Offset from the block centre
    position: [f32; 3],
    /// Outward face normal, used for directional shading
    normal: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    tex_coords: [f32; 2],
}

impl CubeVertex {
    const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        CubeVertex {
            position,
            normal,
            tex_coords,
        }
    }

    /// Returns the vertex buffer layout description for the block pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: tex_coords (vec2<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Per-block instance data: where the cube sits and which texture layer
/// its type uses.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstance {
    /// Block centre in world space
    translation: [f32; 3],
    /// Texture array layer for the block's type
    texture_layer: u32,
}

impl BlockInstance {
    /// Builds the instance record for a block at the given centre.
    pub fn new(pos: Point3<i32>, block: &Block) -> Self {
        BlockInstance {
            translation: [pos.x as f32, pos.y as f32, pos.z as f32],
            texture_layer: block.get_block_type().texture_layer(),
        }
    }

    /// Returns the instance buffer layout description for the block
    /// pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 3`: translation (vec3<f32>)
    /// - `location = 4`: texture_layer (u32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BlockInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

/// Half the cube edge, shortened for readability of the tables below.
const H: f32 = BLOCK_HALF_EXTENT;

/// The shared cube mesh: four vertices per face, six faces, in the
/// [EAST, WEST, NORTH, SOUTH, TOP, BOTTOM] face order.
pub const CUBE_VERTICES: [CubeVertex; 24] = [
    // East (+X)
    CubeVertex::new([H, -H, -H], [1.0, 0.0, 0.0], [0.0, 1.0]),
    CubeVertex::new([H, H, -H], [1.0, 0.0, 0.0], [1.0, 1.0]),
    CubeVertex::new([H, H, H], [1.0, 0.0, 0.0], [1.0, 0.0]),
    CubeVertex::new([H, -H, H], [1.0, 0.0, 0.0], [0.0, 0.0]),
    // West (-X)
    CubeVertex::new([-H, H, -H], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    CubeVertex::new([-H, -H, -H], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    CubeVertex::new([-H, -H, H], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    CubeVertex::new([-H, H, H], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    // North (+Y)
    CubeVertex::new([H, H, -H], [0.0, 1.0, 0.0], [0.0, 1.0]),
    CubeVertex::new([-H, H, -H], [0.0, 1.0, 0.0], [1.0, 1.0]),
    CubeVertex::new([-H, H, H], [0.0, 1.0, 0.0], [1.0, 0.0]),
    CubeVertex::new([H, H, H], [0.0, 1.0, 0.0], [0.0, 0.0]),
    // South (-Y)
    CubeVertex::new([-H, -H, -H], [0.0, -1.0, 0.0], [0.0, 1.0]),
    CubeVertex::new([H, -H, -H], [0.0, -1.0, 0.0], [1.0, 1.0]),
    CubeVertex::new([H, -H, H], [0.0, -1.0, 0.0], [1.0, 0.0]),
    CubeVertex::new([-H, -H, H], [0.0, -1.0, 0.0], [0.0, 0.0]),
    // Top (+Z)
    CubeVertex::new([-H, -H, H], [0.0, 0.0, 1.0], [0.0, 1.0]),
    CubeVertex::new([H, -H, H], [0.0, 0.0, 1.0], [1.0, 1.0]),
    CubeVertex::new([H, H, H], [0.0, 0.0, 1.0], [1.0, 0.0]),
    CubeVertex::new([-H, H, H], [0.0, 0.0, 1.0], [0.0, 0.0]),
    // Bottom (-Z)
    CubeVertex::new([-H, H, -H], [0.0, 0.0, -1.0], [0.0, 1.0]),
    CubeVertex::new([H, H, -H], [0.0, 0.0, -1.0], [1.0, 1.0]),
    CubeVertex::new([H, -H, -H], [0.0, 0.0, -1.0], [1.0, 0.0]),
    CubeVertex::new([-H, -H, -H], [0.0, 0.0, -1.0], [0.0, 0.0]),
];

/// Index list drawing each face as two counter-clockwise triangles.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // east
    4, 5, 6, 4, 6, 7, // west
    8, 9, 10, 8, 10, 11, // north
    12, 13, 14, 12, 14, 15, // south
    16, 17, 18, 16, 18, 19, // top
    20, 21, 22, 20, 22, 23, // bottom
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn cube_has_a_full_index_list() {
        assert_eq!(CUBE_VERTICES.len(), 24);
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
    }

    #[test]
    fn instances_carry_the_type_layer() {
        let instance = BlockInstance::new(Point3::new(2, -4, 0), &Block::new(BlockType::SAND));
        assert_eq!(instance.translation, [2.0, -4.0, 0.0]);
        assert_eq!(instance.texture_layer, BlockType::SAND.texture_layer());
    }
}
