//! Pointer Coordinate Mapping
//!
//! Translates device pointer/touch coordinates into the engine's logical
//! 850×500 canvas space before they reach the selection commands. The engine
//! itself never sees device pixels; mouse and touch both arrive here as one
//! [`PointerEvent`] shape.

use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::game::session::Session;

/// Phase of a pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    /// Button press / touch start
    Down,
    /// Drag movement
    Moved,
    /// Button release / touch end (or pointer leaving the surface)
    Up,
}

/// A pointer event in device pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Gesture phase
    pub phase: PointerPhase,
    /// Device x, relative to the page/window
    pub device_x: f32,
    /// Device y, relative to the page/window
    pub device_y: f32,
}

/// The displayed rectangle of the game canvas in device pixels.
///
/// The canvas is drawn at `width × height` device pixels starting at
/// `(left, top)`; logical coordinates scale independently per axis, so a
/// non-uniformly stretched canvas still maps correctly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasViewport {
    /// Left edge of the displayed canvas, device pixels
    pub left: f32,
    /// Top edge of the displayed canvas, device pixels
    pub top: f32,
    /// Displayed width, device pixels
    pub width: f32,
    /// Displayed height, device pixels
    pub height: f32,
    /// Logical canvas width (usually [`crate::CANVAS_WIDTH`])
    pub logical_width: f32,
    /// Logical canvas height (usually [`crate::CANVAS_HEIGHT`])
    pub logical_height: f32,
}

impl CanvasViewport {
    /// Viewport for a canvas displayed at its logical size at the origin.
    pub fn unscaled(logical_width: f32, logical_height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: logical_width,
            height: logical_height,
            logical_width,
            logical_height,
        }
    }

    /// Map a device-pixel position into logical canvas coordinates.
    pub fn to_canvas(&self, device_x: f32, device_y: f32) -> Point {
        let scale_x = self.logical_width / self.width;
        let scale_y = self.logical_height / self.height;
        Point::new(
            (device_x - self.left) * scale_x,
            (device_y - self.top) * scale_y,
        )
    }
}

/// Map a pointer event into canvas space and drive the session's selection
/// lifecycle. Events outside `Playing` are silently ignored by the session.
pub fn apply_pointer(session: &mut Session, viewport: &CanvasViewport, event: PointerEvent) {
    let p = viewport.to_canvas(event.device_x, event.device_y);
    match event.phase {
        PointerPhase::Down => session.start_selection(p.x, p.y),
        PointerPhase::Moved => session.update_selection(p.x, p.y),
        PointerPhase::Up => {
            session.end_selection();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
