//! UI manager for named overlay elements.
//!
//! Holds the current set of UI elements in draw order and rebuilds the
//! shared vertex/index mesh whenever an element is added, removed, or
//! recolored. The renderer picks the rebuilt mesh up through the dirty
//! flag.

use wgpu::Color;

use super::primitives::{UiElement, UiRectangle, UiVertex};

/// Manages named UI elements and the overlay mesh built from them.
///
/// Elements draw in insertion order, so a fullscreen overlay added before
/// its buttons stays behind them.
pub struct UiMeshManager {
    /// Named elements in draw order
    elements: Vec<(String, Box<dyn UiElement>)>,
    /// Set when the mesh no longer matches the element set
    dirty: bool,
}

impl UiMeshManager {
    /// Creates a new, empty UI manager.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            dirty: false,
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|(n, _)| n == name)
    }

    /// Adds a UI element under the given name.
    ///
    /// # Returns
    /// `true` if the element was added, `false` if the name is taken.
    pub fn add_element(&mut self, name: &str, element: Box<dyn UiElement>) -> bool {
        if self.index_of(name).is_some() {
            return false;
        }

        self.elements.push((name.to_string(), element));
        self.dirty = true;
        true
    }

    /// Adds a flat-colored rectangle.
    pub fn add_rectangle(
        &mut self,
        name: &str,
        position: (f32, f32),
        size: (f32, f32),
        color: Color,
    ) -> bool {
        self.add_element(name, Box::new(UiRectangle::new(position, size, color)))
    }

    /// Adds a rectangle centered on screen with a size relative to the
    /// whole screen.
    pub fn add_centered_rectangle(
        &mut self,
        name: &str,
        relative_size: (f32, f32),
        color: Color,
    ) -> bool {
        self.add_element(name, Box::new(UiRectangle::centered(relative_size, color)))
    }

    /// Adds a rectangle that samples the overlay texture.
    pub fn add_textured_rectangle(
        &mut self,
        name: &str,
        position: (f32, f32),
        size: (f32, f32),
    ) -> bool {
        self.add_element(
            name,
            Box::new(UiRectangle::textured(position, size, Color::WHITE)),
        )
    }

    /// Removes the element with the given name.
    ///
    /// # Returns
    /// `true` if an element was removed.
    pub fn remove_element(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.elements.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Whether an element with the given name exists.
    pub fn has_element(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Recolors a named element. No-op for unknown names.
    pub fn update_element_color(&mut self, name: &str, color: Color) {
        if let Some(index) = self.index_of(name) {
            self.elements[index].1.set_color(color);
            self.dirty = true;
        }
    }

    /// The NDC bounding box of a named element, for cursor hit tests.
    pub fn element_bounds(&self, name: &str) -> Option<([f32; 2], [f32; 2])> {
        self.index_of(name)
            .and_then(|index| self.elements[index].1.bounds())
    }

    /// Whether an NDC point falls inside a named element.
    pub fn hit_test(&self, name: &str, point: (f32, f32)) -> bool {
        match self.element_bounds(name) {
            Some((min, max)) => {
                point.0 >= min[0] && point.0 <= max[0] && point.1 >= min[1] && point.1 <= max[1]
            }
            None => false,
        }
    }

    /// Clears the dirty flag, returning whether it was set. The renderer
    /// calls this once per frame to decide whether to re-upload the mesh.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Builds the combined overlay mesh in draw order.
    pub fn build_mesh(&self) -> (Vec<UiVertex>, Vec<u32>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (_, element) in &self.elements {
            let base_vertex = vertices.len() as u32;
            vertices.extend(element.get_vertices());
            indices.extend(element.get_indices(base_vertex));
        }

        (vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut manager = UiMeshManager::new();
        assert!(manager.add_rectangle("a", (0.0, 0.0), (0.1, 0.1), Color::WHITE));
        assert!(!manager.add_rectangle("a", (0.5, 0.5), (0.1, 0.1), Color::BLACK));
    }

    #[test]
    fn mesh_concatenates_elements_in_draw_order() {
        let mut manager = UiMeshManager::new();
        manager.add_rectangle("back", (0.0, 0.0), (2.0, 2.0), Color::BLACK);
        manager.add_rectangle("front", (0.0, 0.0), (0.5, 0.5), Color::WHITE);

        let (vertices, indices) = manager.build_mesh();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 12);
        // The second element's indices start past the first's vertices.
        assert!(indices[6..].iter().all(|&i| i >= 4));
    }

    #[test]
    fn dirty_flag_tracks_changes_and_clears_on_take() {
        let mut manager = UiMeshManager::new();
        assert!(!manager.take_dirty());

        manager.add_rectangle("a", (0.0, 0.0), (0.1, 0.1), Color::WHITE);
        assert!(manager.take_dirty());
        assert!(!manager.take_dirty());

        manager.update_element_color("a", Color::RED);
        assert!(manager.take_dirty());

        manager.remove_element("a");
        assert!(manager.take_dirty());
    }

    #[test]
    fn hit_test_uses_element_bounds() {
        let mut manager = UiMeshManager::new();
        manager.add_rectangle("button", (0.0, 0.25), (0.6, 0.2), Color::WHITE);

        assert!(manager.hit_test("button", (0.0, 0.25)));
        assert!(manager.hit_test("button", (0.29, 0.34)));
        assert!(!manager.hit_test("button", (0.0, 0.4)));
        assert!(!manager.hit_test("button", (0.31, 0.25)));
        assert!(!manager.hit_test("missing", (0.0, 0.0)));
    }
}
