//! UI primitive elements.
//!
//! This module defines the vertex format and element trait for the 2D
//! overlay, plus the rectangle primitive everything on screen is built
//! from.

mod rectangle;

pub use rectangle::UiRectangle;

/// A vertex of the UI overlay mesh.
///
/// Positions are in normalized device coordinates. `texture_weight`
/// selects between the flat vertex color (0.0) and the overlay texture
/// modulated by the color (1.0); the crosshair is the textured case.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position in NDC space
    pub position: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
    /// UV coordinates into the overlay texture
    pub tex_coords: [f32; 2],
    /// 0.0 = flat color, 1.0 = textured
    pub texture_weight: f32,
}

impl UiVertex {
    /// Returns the vertex buffer layout description for the UI pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: color (vec4<f32>)
    /// - `location = 2`: tex_coords (vec2<f32>)
    /// - `location = 3`: texture_weight (f32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<UiVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 7]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 9]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// A drawable element of the 2D overlay.
pub trait UiElement {
    /// The element's vertices in NDC space.
    fn get_vertices(&self) -> Vec<UiVertex>;

    /// The element's index list, offset by its position in the shared
    /// vertex buffer.
    fn get_indices(&self, base_vertex: u32) -> Vec<u32>;

    /// Number of vertices this element contributes.
    fn vertex_count(&self) -> u32;

    /// Number of indices this element contributes.
    fn index_count(&self) -> u32;

    /// Recolors the element, if it supports that.
    fn set_color(&mut self, _color: wgpu::Color) {}

    /// The element's NDC bounding box as (min, max) corners, used for
    /// cursor hit tests. Elements that are not clickable return `None`.
    fn bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        None
    }
}
