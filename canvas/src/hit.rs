#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{EXPAND_TOGGLE_SIZE, GRID_SIZE, NODE_HEIGHT, NODE_WIDTH};
use crate::doc::{NodeId, NodeKind, WorkflowDoc, WorkflowNode};

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The expand/collapse toggle of a team node.
    ExpandToggle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub node_id: NodeId,
    pub part: HitPart,
}

/// Round a coordinate to the nearest grid line.
#[must_use]
pub fn snap(value: f64) -> f64 {
    (value / GRID_SIZE).round() * GRID_SIZE
}

/// Top-left corner a node is drawn at. Grid snapping only affects drawing;
/// the stored coordinates are left untouched.
#[must_use]
pub fn render_origin(node: &WorkflowNode, grid_snap: bool) -> Point {
    if grid_snap {
        Point::new(snap(node.x), snap(node.y))
    } else {
        Point::new(node.x, node.y)
    }
}

/// Width and height of a node's box in world units.
#[must_use]
pub fn node_size(node: &WorkflowNode) -> (f64, f64) {
    (node.width.unwrap_or(NODE_WIDTH), node.height.unwrap_or(NODE_HEIGHT))
}

/// World-space center of a node as drawn.
#[must_use]
pub fn render_center(node: &WorkflowNode, grid_snap: bool) -> Point {
    let origin = render_origin(node, grid_snap);
    let (w, h) = node_size(node);
    Point::new(origin.x + w * 0.5, origin.y + h * 0.5)
}

/// Test which node (if any) is under `world_pt`. Later nodes are drawn on
/// top, so they are tested first.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &WorkflowDoc, grid_snap: bool) -> Option<Hit> {
    doc.nodes.iter().rev().find_map(|node| hit_node(world_pt, node, grid_snap))
}

fn hit_node(pt: Point, node: &WorkflowNode, grid_snap: bool) -> Option<Hit> {
    let origin = render_origin(node, grid_snap);
    let (w, h) = node_size(node);
    let inside = pt.x >= origin.x && pt.x <= origin.x + w && pt.y >= origin.y && pt.y <= origin.y + h;
    if !inside {
        return None;
    }
    let part = if node.kind == NodeKind::Team
        && pt.x >= origin.x + w - EXPAND_TOGGLE_SIZE
        && pt.y <= origin.y + EXPAND_TOGGLE_SIZE
    {
        HitPart::ExpandToggle
    } else {
        HitPart::Body
    };
    Some(Hit { node_id: node.id.clone(), part })
}
