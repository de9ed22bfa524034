//! Command seam between the canvas and anything that drives it by name
//! rather than by pointer, such as the chat assistant.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::camera::Point;
use crate::doc::{ConnectionId, ConnectionKind, NodeId, NodeKind};
use crate::engine::EngineCore;

/// Vertical spacing between nodes added through the controller.
const ROW_SPACING: f64 = 120.0;

/// Operations a non-pointer client may perform on the active canvas.
pub trait CanvasController {
    /// Add a node of `kind` with placeholder text. Returns its id.
    fn add_node(&mut self, kind: NodeKind) -> Option<NodeId>;

    /// Delete a node and its connections. Returns whether it existed.
    fn remove_node(&mut self, id: &str) -> bool;

    /// Id of the first node whose name matches, ignoring case.
    fn find_node(&self, name: &str) -> Option<NodeId>;

    /// Connect two nodes with a `task` connection.
    fn connect(&mut self, from: &str, to: &str) -> Option<ConnectionId>;

    /// Node names in draw order.
    fn node_names(&self) -> Vec<String>;
}

impl CanvasController for EngineCore {
    fn add_node(&mut self, kind: NodeKind) -> Option<NodeId> {
        let rows = self.workflow()?.doc.len();
        let y = 100.0 + ROW_SPACING * f64::from(u32::try_from(rows).unwrap_or(u32::MAX));
        EngineCore::add_node(self, kind, Point::new(100.0, y)).map(|node| node.id)
    }

    fn remove_node(&mut self, id: &str) -> bool {
        !self.delete_node(id).is_empty()
    }

    fn find_node(&self, name: &str) -> Option<NodeId> {
        self.workflow()?.doc.node_by_name(name).map(|n| n.id.clone())
    }

    fn connect(&mut self, from: &str, to: &str) -> Option<ConnectionId> {
        if from == to {
            return None;
        }
        let wf = self.workflow.as_mut()?;
        let conn = wf.doc.add_connection(from, to, ConnectionKind::Task)?;
        wf.touch();
        tracing::debug!(connection_id = %conn.id, from, to, "connection added by controller");
        Some(conn.id)
    }

    fn node_names(&self) -> Vec<String> {
        self.workflow().map(|wf| wf.doc.nodes.iter().map(|n| n.name.clone()).collect()).unwrap_or_default()
    }
}
