//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 5.0;

/// Zoom multiplier applied per wheel event.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Zoom multiplier applied per keyboard zoom shortcut.
pub const KEY_ZOOM_STEP: f64 = 1.2;

/// Reset-view zoom for ordinary workflows.
pub const DEFAULT_ZOOM: f64 = 0.35;

/// Reset-view zoom for the organization overview seed, which is much larger.
pub const OVERVIEW_ZOOM: f64 = 0.2;

/// Workflow id that resets to [`OVERVIEW_ZOOM`].
pub const OVERVIEW_WORKFLOW_ID: &str = "bitcoin-corp-org";

// ── Layout ──────────────────────────────────────────────────────

/// Grid pitch in world units used for snapping and the background grid.
pub const GRID_SIZE: f64 = 20.0;

/// Per-index diagonal offset applied to pasted nodes.
pub const PASTE_STAGGER: f64 = 20.0;

/// Node box width when the node carries no explicit width.
pub const NODE_WIDTH: f64 = 256.0;

/// Node box height when the node carries no explicit height.
pub const NODE_HEIGHT: f64 = 128.0;

/// Side of the square expand/collapse toggle in the top-right corner of team nodes.
pub const EXPAND_TOGGLE_SIZE: f64 = 28.0;

/// Screen-space distance a pointer must travel before a press counts as a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

// ── Defaults ────────────────────────────────────────────────────

/// Amount assigned to newly placed payment nodes.
pub const DEFAULT_PAYMENT_AMOUNT: f64 = 1000.0;
