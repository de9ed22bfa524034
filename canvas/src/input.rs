//! Input model: tools, modifier keys, mouse buttons, editor state, and the
//! gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `EditorState` is the transient per-workflow UI state (selection,
//! pending connection, clipboard, grid flags) that travels with the workflow.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{NodeId, WorkflowNode};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select and move nodes; dragging empty canvas pans.
    #[default]
    Select,
    /// Dragging anywhere pans.
    Pan,
    /// Click two nodes to wire them together.
    Connect,
    /// Clicking a node deletes it.
    Delete,
    /// Zoom cursor; zooming itself is driven by wheel and keyboard.
    Zoom,
}

impl Tool {
    /// Tool bound to a single-letter hotkey (case-insensitive).
    #[must_use]
    pub fn from_hotkey(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "v" => Some(Self::Select),
            "h" => Some(Self::Pan),
            "c" => Some(Self::Connect),
            "x" => Some(Self::Delete),
            _ => None,
        }
    }

    /// CSS cursor shown while this tool is idle over the canvas.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Pan => "grab",
            Self::Connect => "crosshair",
            Self::Delete => "not-allowed",
            Self::Zoom => "zoom-in",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a click with these modifiers toggles multi-selection.
    #[must_use]
    pub fn toggles_selection(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `" "`, `"v"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The space bar, reported as `" "` or `"Space"` depending on the source.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0.eq_ignore_ascii_case("space") || self.0 == "Spacebar"
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape" || self.0 == "Esc"
    }

    /// Case-insensitive comparison against a single-character key name.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(k), None) if k.eq_ignore_ascii_case(&c))
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    #[serde(default)]
    pub dy: f64,
}

/// Transient editor state carried by each workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    /// Single-selection track, set by plain clicks.
    pub selected_node: Option<NodeId>,
    /// Multi-selection track, ordered by selection time, no duplicates.
    pub selected_nodes: Vec<NodeId>,
    /// Node a pending connection starts from.
    pub is_connecting: Option<NodeId>,
    /// Node currently under a pointer drag.
    pub dragging: Option<NodeId>,
    pub current_tool: Tool,
    /// Snapshot of copied nodes.
    pub clipboard: Vec<WorkflowNode>,
    /// Draw node positions rounded to the grid.
    pub grid_snap: bool,
    pub show_grid: bool,
}

impl EditorState {
    /// Add `id` to the multi-selection, or remove it if already present.
    pub fn toggle_selected(&mut self, id: &str) {
        if let Some(idx) = self.selected_nodes.iter().position(|s| s == id) {
            self.selected_nodes.remove(idx);
        } else {
            self.selected_nodes.push(id.to_string());
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_nodes.iter().any(|s| s == id) || self.selected_node.as_deref() == Some(id)
    }

    /// Select `id` on both tracks, replacing any previous selection.
    pub fn select_only(&mut self, id: &str) {
        self.selected_node = Some(id.to_string());
        self.selected_nodes = vec![id.to_string()];
    }

    /// Clear both selection tracks.
    pub fn clear_selection(&mut self) {
        self.selected_node = None;
        self.selected_nodes.clear();
    }

    /// Drop every reference to `id` from selection, connect, and drag state.
    pub fn forget(&mut self, id: &str) {
        if self.selected_node.as_deref() == Some(id) {
            self.selected_node = None;
        }
        self.selected_nodes.retain(|s| s != id);
        if self.is_connecting.as_deref() == Some(id) {
            self.is_connecting = None;
        }
        if self.dragging.as_deref() == Some(id) {
            self.dragging = None;
        }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the press, used to tell clicks from drags.
        start_screen: Point,
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
        /// Whether the pointer moved past the drag threshold.
        moved: bool,
        /// A press on empty canvas in select mode that never moves is a click
        /// that clears the selection.
        clears_selection: bool,
    },
    /// The user is moving a node across the canvas.
    DraggingNode {
        /// Id of the node being dragged.
        id: NodeId,
        /// Screen-space position of the press.
        start_screen: Point,
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
        /// Whether the pointer moved past the drag threshold.
        moved: bool,
    },
}
