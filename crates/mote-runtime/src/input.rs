//! Input signal tracking
//!
//! Pointer, scroll and resize events arrive from the host asynchronously to
//! the frame loop. Each handler overwrites the latest value; the next frame
//! reads whatever was written last.

use serde::Serialize;

/// Size of the element the field is drawn into, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1.0 for a degenerate (collapsed) element
    pub fn aspect_ratio(&self) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Position and size of the container on the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Latest pointer, scroll and viewport signals
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputState {
    /// Pointer offset from the container centre, each axis in [-1, 1], +y up
    pub pointer: [f32; 2],
    /// Page scroll progress in [0, 1]
    pub scroll_progress: f32,
    pub viewport: Viewport,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl InputState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer: [0.0, 0.0],
            scroll_progress: 0.0,
            viewport,
        }
    }

    /// Process a pointer move given in client coordinates
    pub fn process_pointer_move(&mut self, client_x: f32, client_y: f32, rect: ContainerRect) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let nx = (client_x - rect.left) / rect.width;
        let ny = (client_y - rect.top) / rect.height;
        self.pointer = [
            (nx * 2.0 - 1.0).clamp(-1.0, 1.0),
            -(ny * 2.0 - 1.0).clamp(-1.0, 1.0),
        ];
    }

    /// Pointer left the container: drift back to the neutral pose
    pub fn process_pointer_leave(&mut self) {
        self.pointer = [0.0, 0.0];
    }

    /// Process a scroll event
    pub fn process_scroll(&mut self, scroll_y: f32, document_height: f32, viewport_height: f32) {
        self.scroll_progress = scroll_progress(scroll_y, document_height, viewport_height);
    }

    /// Process a container resize
    pub fn process_resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }
}

/// Fraction of the scrollable distance covered so far.
///
/// A page without overflow has nothing to scroll through and reports 0.
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ContainerRect {
        ContainerRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn pointer_centre_is_neutral() {
        let mut input = InputState::default();
        input.process_pointer_move(200.0, 100.0, rect());
        assert!(input.pointer[0].abs() < 1e-6);
        assert!(input.pointer[1].abs() < 1e-6);
    }

    #[test]
    fn pointer_corners_map_to_unit_square() {
        let mut input = InputState::default();
        input.process_pointer_move(100.0, 50.0, rect());
        assert_eq!(input.pointer, [-1.0, 1.0]);
        input.process_pointer_move(300.0, 150.0, rect());
        assert_eq!(input.pointer, [1.0, -1.0]);
    }

    #[test]
    fn pointer_outside_rect_is_clamped() {
        let mut input = InputState::default();
        input.process_pointer_move(1000.0, -400.0, rect());
        assert_eq!(input.pointer, [1.0, 1.0]);
    }

    #[test]
    fn pointer_leave_resets() {
        let mut input = InputState::default();
        input.process_pointer_move(120.0, 60.0, rect());
        input.process_pointer_leave();
        assert_eq!(input.pointer, [0.0, 0.0]);
    }

    #[test]
    fn scroll_progress_range() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert!((scroll_progress(1000.0, 3000.0, 1000.0) - 0.5).abs() < 1e-6);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 1.0);
        // Overscroll bounce
        assert_eq!(scroll_progress(2300.0, 3000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(-40.0, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn scroll_progress_without_overflow_is_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut input = InputState::default();
        input.process_resize(800.0, 400.0);
        assert!((input.viewport.aspect_ratio() - 2.0).abs() < 1e-6);
        input.process_resize(0.0, 400.0);
        assert_eq!(input.viewport.aspect_ratio(), 1.0);
    }
}
