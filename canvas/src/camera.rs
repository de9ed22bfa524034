#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM, OVERVIEW_WORKFLOW_ID, OVERVIEW_ZOOM, ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the workflow canvas.
///
/// The whole canvas is drawn with `screen = world * zoom + pan`.
/// `pan_x` / `pan_y` are in CSS pixels, `zoom` is clamped to
/// [`ZOOM_MIN`, `ZOOM_MAX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: DEFAULT_ZOOM }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Change zoom while keeping the world point under `pivot` fixed on screen.
    ///
    /// `new_zoom` is clamped first. Returns `false` when the clamped zoom equals
    /// the current zoom and nothing changed.
    pub fn zoom_at(&mut self, pivot: Point, new_zoom: f64) -> bool {
        let new_zoom = clamp_zoom(new_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        let world = self.screen_to_world(pivot);
        self.pan_x = pivot.x - world.x * new_zoom;
        self.pan_y = pivot.y - world.y * new_zoom;
        self.zoom = new_zoom;
        true
    }

    /// Pan by a screen-space pointer delta.
    ///
    /// Pan lives in screen pixels, so the raw delta keeps the world point
    /// under the pointer under the pointer at every zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Restore the default view for the given workflow: its default zoom and zero pan.
    pub fn reset(&mut self, workflow_id: Option<&str>) {
        self.zoom = default_zoom_for(workflow_id);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

/// Clamp a zoom factor into the allowed range. Non-finite input maps to the default zoom.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(ZOOM_MIN, ZOOM_MAX)
    } else {
        DEFAULT_ZOOM
    }
}

/// Reset-view zoom for a workflow id.
#[must_use]
pub fn default_zoom_for(workflow_id: Option<&str>) -> f64 {
    if workflow_id == Some(OVERVIEW_WORKFLOW_ID) { OVERVIEW_ZOOM } else { DEFAULT_ZOOM }
}
