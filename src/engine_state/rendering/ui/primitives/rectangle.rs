//! Rectangle UI primitive element.
//!
//! A colored (or textured) rectangle positioned and sized in normalized
//! device coordinates. The crosshair, the pause overlay, and the menu
//! buttons are all rectangles.

use wgpu::Color;

use super::{UiElement, UiVertex};

/// A rectangle UI element.
///
/// Defined by its centre position (NDC, -1 to 1) and size (NDC, 0 to 2).
/// A textured rectangle samples the overlay texture across its area; a
/// plain one fills with its color.
pub struct UiRectangle {
    /// Centre position in normalized device coordinates (-1 to 1)
    pub position: (f32, f32),
    /// Size in normalized device coordinates (0 to 2)
    pub size: (f32, f32),
    /// Fill (or texture modulation) color
    pub color: Color,
    /// Whether the rectangle samples the overlay texture
    pub textured: bool,
}

impl UiRectangle {
    /// Creates a new flat-colored rectangle.
    ///
    /// # Arguments
    /// * `position` - Centre position in NDC (-1 to 1)
    /// * `size` - Size in NDC (0 to 2)
    /// * `color` - Fill color
    pub fn new(position: (f32, f32), size: (f32, f32), color: Color) -> Self {
        Self {
            position,
            size,
            color,
            textured: false,
        }
    }

    /// Creates a rectangle centered on screen with the specified relative
    /// size (a fraction of the screen, 0.0 to 1.0).
    pub fn centered(relative_size: (f32, f32), color: Color) -> Self {
        let size = (relative_size.0 * 2.0, relative_size.1 * 2.0);
        Self::new((0.0, 0.0), size, color)
    }

    /// Creates a rectangle that samples the overlay texture, modulated by
    /// `color` (white leaves the texture untouched).
    pub fn textured(position: (f32, f32), size: (f32, f32), color: Color) -> Self {
        Self {
            position,
            size,
            color,
            textured: true,
        }
    }

    fn color_array(&self) -> [f32; 4] {
        [
            self.color.r as f32,
            self.color.g as f32,
            self.color.b as f32,
            self.color.a as f32,
        ]
    }
}

impl UiElement for UiRectangle {
    fn get_vertices(&self) -> Vec<UiVertex> {
        let half_width = self.size.0 / 2.0;
        let half_height = self.size.1 / 2.0;

        let left = self.position.0 - half_width;
        let right = self.position.0 + half_width;
        let top = self.position.1 + half_height;
        let bottom = self.position.1 - half_height;

        let color = self.color_array();
        let texture_weight = if self.textured { 1.0 } else { 0.0 };

        vec![
            UiVertex {
                position: [left, top, 0.0],
                color,
                tex_coords: [0.0, 0.0],
                texture_weight,
            },
            UiVertex {
                position: [right, top, 0.0],
                color,
                tex_coords: [1.0, 0.0],
                texture_weight,
            },
            UiVertex {
                position: [right, bottom, 0.0],
                color,
                tex_coords: [1.0, 1.0],
                texture_weight,
            },
            UiVertex {
                position: [left, bottom, 0.0],
                color,
                tex_coords: [0.0, 1.0],
                texture_weight,
            },
        ]
    }

    fn get_indices(&self, base_vertex: u32) -> Vec<u32> {
        vec![
            base_vertex,
            base_vertex + 1,
            base_vertex + 2,
            base_vertex,
            base_vertex + 2,
            base_vertex + 3,
        ]
    }

    fn vertex_count(&self) -> u32 {
        4
    }

    fn index_count(&self) -> u32 {
        6
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        let half_width = self.size.0 / 2.0;
        let half_height = self.size.1 / 2.0;
        Some((
            [self.position.0 - half_width, self.position.1 - half_height],
            [self.position.0 + half_width, self.position.1 + half_height],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_span_the_rectangle() {
        let rect = UiRectangle::new((0.5, -0.5), (0.2, 0.4), Color::WHITE);
        let (min, max) = rect.bounds().unwrap();
        assert_eq!(min, [0.4, -0.7]);
        assert_eq!(max, [0.6, -0.3]);
    }

    #[test]
    fn centered_rectangle_scales_relative_size_to_ndc() {
        let rect = UiRectangle::centered((0.25, 0.25), Color::WHITE);
        let (min, max) = rect.bounds().unwrap();
        assert_eq!(min, [-0.25, -0.25]);
        assert_eq!(max, [0.25, 0.25]);
    }

    #[test]
    fn textured_rectangles_weight_the_texture_fully() {
        let rect = UiRectangle::textured((0.0, 0.0), (0.1, 0.1), Color::WHITE);
        assert!(rect.get_vertices().iter().all(|v| v.texture_weight == 1.0));

        let flat = UiRectangle::new((0.0, 0.0), (0.1, 0.1), Color::WHITE);
        assert!(flat.get_vertices().iter().all(|v| v.texture_weight == 0.0));
    }
}
