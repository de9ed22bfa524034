use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::catalog::{BusinessCategory, EntityDirectory, EntitySummary};
use crate::consts::{DRAG_THRESHOLD_PX, KEY_ZOOM_STEP, PASTE_STAGGER, WHEEL_ZOOM_STEP};
use crate::doc::{Connection, ConnectionId, ConnectionKind, EntityRef, NodeId, NodeKind, PartialWorkflowNode, WorkflowNode, new_id};
use crate::hit::{HitPart, hit_test, render_origin};
use crate::input::{Button, EditorState, InputState, Key, Modifiers, Tool, WheelDelta};
use crate::palette::placeholder_node;
use crate::workflow::WorkflowState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Action {
    NodeCreated(WorkflowNode),
    NodeUpdated { id: NodeId, fields: PartialWorkflowNode },
    NodeDeleted { id: NodeId },
    ConnectionCreated(Connection),
    ConnectionDeleted { id: ConnectionId },
    /// A connect gesture is waiting for its target node.
    ConnectionStarted { from: NodeId },
    ConnectionCancelled,
    #[serde(rename_all = "camelCase")]
    SelectionChanged { selected_node: Option<NodeId>, selected_nodes: Vec<NodeId> },
    ToolChanged(Tool),
    ClipboardChanged { count: usize },
    /// The host should show the entity picker for `category`.
    EntityPickRequested { kind: NodeKind, category: BusinessCategory, position: Point },
    #[serde(rename_all = "camelCase")]
    ViewChanged { zoom: f64, pan_x: f64, pan_y: f64 },
    SetCursor(String),
    RenderNeeded,
}

/// A business node waiting for the user to choose which entity it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPick {
    pub kind: NodeKind,
    pub category: BusinessCategory,
    /// World-space position the node will be placed at.
    pub position: Point,
}

/// Core engine state: the loaded workflow, camera, and gesture tracking.
///
/// Every operation is a silent no-op while no workflow is loaded.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub workflow: Option<WorkflowState>,
    pub camera: Camera,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Space bar held: pointer-down pans regardless of tool.
    pub space_held: bool,
    /// A text field has focus: canvas hotkeys are suppressed.
    pub text_focus: bool,
    pending_pick: Option<PendingPick>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            workflow: None,
            camera: Camera::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            space_held: false,
            text_focus: false,
            pending_pick: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Workflow lifecycle ---

    /// Make `workflow` the active canvas and reset the view for it.
    pub fn load_workflow(&mut self, mut workflow: WorkflowState) {
        workflow.editor.dragging = None;
        self.camera.reset(Some(&workflow.id));
        self.input = InputState::Idle;
        self.pending_pick = None;
        tracing::debug!(workflow_id = %workflow.id, nodes = workflow.doc.len(), "workflow loaded");
        self.workflow = Some(workflow);
    }

    /// Detach the active workflow, returning it.
    pub fn close_workflow(&mut self) -> Option<WorkflowState> {
        self.input = InputState::Idle;
        self.pending_pick = None;
        self.workflow.take()
    }

    #[must_use]
    pub fn workflow(&self) -> Option<&WorkflowState> {
        self.workflow.as_ref()
    }

    /// Update the viewport size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    // --- Tool ---

    /// Switch tools. Leaving the connect tool cancels a pending connection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        wf.editor.current_tool = tool;
        let mut actions = vec![Action::ToolChanged(tool)];
        if tool != Tool::Connect && wf.editor.is_connecting.take().is_some() {
            actions.push(Action::ConnectionCancelled);
        }
        tracing::debug!(tool = ?tool, "tool changed");
        actions.push(Action::SetCursor(tool.cursor().to_string()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Node operations ---

    /// Place a new node of `kind` at a world position with placeholder text.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Option<WorkflowNode> {
        let wf = self.workflow.as_mut()?;
        let node = placeholder_node(kind, position);
        tracing::debug!(node_id = %node.id, kind = kind.as_ref(), "node added");
        wf.doc.insert_node(node.clone());
        wf.touch();
        Some(node)
    }

    /// Handle a palette click: place at the canvas center.
    pub fn palette_click(&mut self, kind: NodeKind) -> Vec<Action> {
        let center = self.canvas_center_world();
        self.palette_drop(kind, center)
    }

    /// Handle a palette item dropped at a world position.
    ///
    /// Business kinds don't create a node yet; they request an entity pick and
    /// wait for [`EngineCore::complete_entity_pick`].
    pub fn palette_drop(&mut self, kind: NodeKind, position: Point) -> Vec<Action> {
        if self.workflow.is_none() {
            return Vec::new();
        }
        if let Some(category) = kind.business_category() {
            self.pending_pick = Some(PendingPick { kind, category, position });
            return vec![Action::EntityPickRequested { kind, category, position }];
        }
        match self.add_node(kind, position) {
            Some(node) => vec![Action::NodeCreated(node), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// The entity pick currently awaiting a choice, if any.
    #[must_use]
    pub fn pending_pick(&self) -> Option<PendingPick> {
        self.pending_pick
    }

    /// Candidates for the pending pick.
    #[must_use]
    pub fn pick_candidates(&self, directory: &dyn EntityDirectory) -> Vec<EntitySummary> {
        match self.pending_pick {
            Some(pick) => directory.entities(pick.category),
            None => Vec::new(),
        }
    }

    /// Create the pending business node, named after the chosen entity.
    pub fn complete_entity_pick(&mut self, entity: &EntitySummary) -> Vec<Action> {
        let Some(pick) = self.pending_pick.take() else {
            return Vec::new();
        };
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let mut node = placeholder_node(pick.kind, pick.position);
        node.name.clone_from(&entity.name);
        if let Some(ref description) = entity.description {
            node.description.clone_from(description);
        }
        node.entity_ref = Some(EntityRef { category: pick.category, id: entity.id.clone() });
        tracing::debug!(node_id = %node.id, entity_id = %entity.id, category = pick.category.as_ref(), "entity node added");
        wf.doc.insert_node(node.clone());
        wf.touch();
        vec![Action::NodeCreated(node), Action::RenderNeeded]
    }

    /// Discard the pending entity pick. Returns whether one was pending.
    pub fn cancel_entity_pick(&mut self) -> bool {
        self.pending_pick.take().is_some()
    }

    /// Apply a sparse field update to a node.
    pub fn update_node(&mut self, id: &str, fields: PartialWorkflowNode) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if !wf.doc.apply_partial(id, &fields) {
            return Vec::new();
        }
        wf.touch();
        tracing::debug!(node_id = %id, "node updated");
        vec![Action::NodeUpdated { id: id.to_string(), fields }, Action::RenderNeeded]
    }

    /// Delete one node and every connection touching it.
    pub fn delete_node(&mut self, id: &str) -> Vec<Action> {
        self.delete_nodes(&[id.to_string()])
    }

    /// Delete a set of nodes and every connection touching any of them.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let (nodes, connections) = wf.doc.remove_nodes(ids);
        if nodes.is_empty() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(nodes.len() + connections.len() + 2);
        for node in &nodes {
            wf.editor.forget(&node.id);
            tracing::debug!(node_id = %node.id, "node deleted");
            actions.push(Action::NodeDeleted { id: node.id.clone() });
        }
        actions.extend(connections.into_iter().map(|c| Action::ConnectionDeleted { id: c.id }));
        if let InputState::DraggingNode { id, .. } = &self.input
            && ids.contains(id)
        {
            self.input = InputState::Idle;
        }
        wf.touch();
        actions.push(selection_action(&wf.editor));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete every node in the multi-selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(wf) = self.workflow.as_ref() else {
            return Vec::new();
        };
        let ids = wf.editor.selected_nodes.clone();
        self.delete_nodes(&ids)
    }

    /// Snapshot nodes by value into the clipboard, in the order given.
    pub fn copy_nodes(&mut self, ids: &[NodeId]) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if ids.is_empty() {
            return Vec::new();
        }
        let copied: Vec<WorkflowNode> = ids.iter().filter_map(|id| wf.doc.node(id)).cloned().collect();
        let count = copied.len();
        wf.editor.clipboard = copied;
        tracing::debug!(count, "nodes copied");
        vec![Action::ClipboardChanged { count }]
    }

    /// Copy the multi-selection.
    pub fn copy_selected(&mut self) -> Vec<Action> {
        let Some(wf) = self.workflow.as_ref() else {
            return Vec::new();
        };
        let ids = wf.editor.selected_nodes.clone();
        self.copy_nodes(&ids)
    }

    /// Paste the clipboard at a world position.
    ///
    /// Node `i` lands at `at + (20 * i, 20 * i)` with a fresh id and no
    /// outgoing connections. The pasted nodes become the selection.
    pub fn paste_at(&mut self, at: Point) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if wf.editor.clipboard.is_empty() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(wf.editor.clipboard.len() + 2);
        let mut pasted = Vec::with_capacity(wf.editor.clipboard.len());
        let mut offset = 0.0;
        for source in &wf.editor.clipboard {
            let mut node = source.clone();
            refresh_ids(&mut node);
            node.x = at.x + offset;
            node.y = at.y + offset;
            node.connections.clear();
            offset += PASTE_STAGGER;
            pasted.push(node.id.clone());
            actions.push(Action::NodeCreated(node.clone()));
            wf.doc.insert_node(node);
        }
        tracing::debug!(count = pasted.len(), "nodes pasted");
        wf.editor.selected_node = pasted.last().cloned();
        wf.editor.selected_nodes = pasted;
        wf.touch();
        actions.push(selection_action(&wf.editor));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Paste the clipboard at the viewport center.
    pub fn paste(&mut self) -> Vec<Action> {
        let center = self.canvas_center_world();
        self.paste_at(center)
    }

    /// Flip `isExpanded` on a team node.
    pub fn toggle_expanded(&mut self, id: &str) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let Some(node) = wf.doc.node_mut(id) else {
            return Vec::new();
        };
        if node.kind != NodeKind::Team {
            return Vec::new();
        }
        let expanded = !node.is_expanded.unwrap_or(false);
        node.is_expanded = Some(expanded);
        wf.touch();
        let fields = PartialWorkflowNode { is_expanded: Some(expanded), ..Default::default() };
        vec![Action::NodeUpdated { id: id.to_string(), fields }, Action::RenderNeeded]
    }

    // --- Connections ---

    /// Begin a connection from `from`.
    pub fn start_connection(&mut self, from: &str) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if !wf.doc.contains_node(from) {
            return Vec::new();
        }
        wf.editor.is_connecting = Some(from.to_string());
        vec![Action::ConnectionStarted { from: from.to_string() }, Action::RenderNeeded]
    }

    /// Finish the pending connection at `to`.
    ///
    /// A target equal to the source, or a missing endpoint, cancels instead.
    pub fn complete_connection(&mut self, to: &str) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let Some(from) = wf.editor.is_connecting.take() else {
            return Vec::new();
        };
        if from == to {
            return vec![Action::ConnectionCancelled, Action::RenderNeeded];
        }
        match wf.doc.add_connection(&from, to, ConnectionKind::Task) {
            Some(conn) => {
                wf.touch();
                tracing::debug!(connection_id = %conn.id, from = %conn.from, to = %conn.to, "connection added");
                vec![Action::ConnectionCreated(conn), Action::RenderNeeded]
            }
            None => vec![Action::ConnectionCancelled, Action::RenderNeeded],
        }
    }

    /// Drop the pending connection, if any.
    pub fn cancel_connection(&mut self) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if wf.editor.is_connecting.take().is_none() {
            return Vec::new();
        }
        vec![Action::ConnectionCancelled, Action::RenderNeeded]
    }

    fn connect_click(&mut self, id: &str) -> Vec<Action> {
        let pending = self.workflow.as_ref().and_then(|wf| wf.editor.is_connecting.clone());
        match pending {
            None => self.start_connection(id),
            Some(_) => self.complete_connection(id),
        }
    }

    // --- Selection ---

    /// Replace the multi-selection with `ids` (missing ids are skipped).
    pub fn set_selection(&mut self, ids: &[NodeId]) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let mut selected: Vec<NodeId> = Vec::with_capacity(ids.len());
        for id in ids {
            if wf.doc.contains_node(id) && !selected.contains(id) {
                selected.push(id.clone());
            }
        }
        wf.editor.selected_nodes = selected;
        vec![selection_action(&wf.editor), Action::RenderNeeded]
    }

    /// Add or remove `id` from the multi-selection.
    pub fn toggle_selection(&mut self, id: &str) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if !wf.doc.contains_node(id) {
            return Vec::new();
        }
        wf.editor.toggle_selected(id);
        vec![selection_action(&wf.editor), Action::RenderNeeded]
    }

    /// Select a single node on both tracks.
    pub fn select_node(&mut self, id: &str) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        if !wf.doc.contains_node(id) {
            return Vec::new();
        }
        wf.editor.select_only(id);
        vec![selection_action(&wf.editor), Action::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        wf.editor.clear_selection();
        vec![selection_action(&wf.editor), Action::RenderNeeded]
    }

    // --- Viewport ---

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    /// Set the zoom directly, keeping the pan unchanged.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        if self.workflow.is_none() {
            return Vec::new();
        }
        self.camera.zoom = crate::camera::clamp_zoom(zoom);
        self.view_changed()
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.camera.pan_x, self.camera.pan_y)
    }

    pub fn set_pan(&mut self, pan: Point) -> Vec<Action> {
        if self.workflow.is_none() {
            return Vec::new();
        }
        self.camera.pan_x = pan.x;
        self.camera.pan_y = pan.y;
        self.view_changed()
    }

    /// Zoom to `scale` about the viewport center.
    pub fn zoom_to(&mut self, scale: f64) -> Vec<Action> {
        let center = self.viewport_center();
        self.zoom_about(center, scale)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_to(self.camera.zoom * KEY_ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_to(self.camera.zoom / KEY_ZOOM_STEP)
    }

    /// Restore the workflow's default zoom with zero pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        let Some(wf) = self.workflow.as_ref() else {
            return Vec::new();
        };
        self.camera.reset(Some(&wf.id));
        self.view_changed()
    }

    fn zoom_about(&mut self, pivot: Point, zoom: f64) -> Vec<Action> {
        if self.workflow.is_none() || !self.camera.zoom_at(pivot, zoom) {
            return Vec::new();
        }
        self.view_changed()
    }

    fn view_changed(&self) -> Vec<Action> {
        vec![
            Action::ViewChanged { zoom: self.camera.zoom, pan_x: self.camera.pan_x, pan_y: self.camera.pan_y },
            Action::RenderNeeded,
        ]
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// World-space point under the viewport center.
    #[must_use]
    pub fn canvas_center_world(&self) -> Point {
        self.camera.screen_to_world(self.viewport_center())
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let Some(wf) = self.workflow.as_ref() else {
            return Vec::new();
        };
        if button == Button::Secondary {
            return Vec::new();
        }
        let tool = wf.editor.current_tool;
        if button == Button::Middle || self.space_held || tool == Tool::Pan {
            return self.begin_pan(screen_pt, false);
        }

        let world = self.camera.screen_to_world(screen_pt);
        let hit = hit_test(world, &wf.doc, wf.editor.grid_snap);
        match (tool, hit) {
            (Tool::Select, Some(hit)) if hit.part == HitPart::ExpandToggle => self.toggle_expanded(&hit.node_id),
            (Tool::Select, Some(hit)) if modifiers.toggles_selection() => self.toggle_selection(&hit.node_id),
            (Tool::Select, Some(hit)) => {
                let mut actions = self.select_node(&hit.node_id);
                if let Some(wf) = self.workflow.as_mut() {
                    wf.editor.dragging = Some(hit.node_id.clone());
                }
                self.input = InputState::DraggingNode {
                    id: hit.node_id,
                    start_screen: screen_pt,
                    last_screen: screen_pt,
                    moved: false,
                };
                actions.push(Action::SetCursor("move".into()));
                actions
            }
            (Tool::Select, None) => self.begin_pan(screen_pt, !modifiers.toggles_selection()),
            (Tool::Connect, Some(hit)) => self.connect_click(&hit.node_id),
            (Tool::Connect, None) => self.cancel_connection(),
            (Tool::Delete, Some(hit)) => self.delete_node(&hit.node_id),
            (Tool::Zoom, _) => vec![Action::SetCursor(Tool::Zoom.cursor().into())],
            (Tool::Delete | Tool::Pan, _) => Vec::new(),
        }
    }

    fn begin_pan(&mut self, screen_pt: Point, clears_selection: bool) -> Vec<Action> {
        if let Some(wf) = self.workflow.as_mut() {
            wf.editor.dragging = None;
        }
        self.input = InputState::Panning {
            start_screen: screen_pt,
            last_screen: screen_pt,
            moved: false,
            clears_selection,
        };
        vec![Action::SetCursor("grabbing".into())]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { start_screen, last_screen, moved, .. } => {
                if !*moved && distance(*start_screen, screen_pt) > DRAG_THRESHOLD_PX {
                    *moved = true;
                }
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingNode { id, start_screen, last_screen, moved } => {
                let (delta, first_step) = if *moved {
                    (Point::new(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y), false)
                } else if distance(*start_screen, screen_pt) > DRAG_THRESHOLD_PX {
                    *moved = true;
                    (Point::new(screen_pt.x - start_screen.x, screen_pt.y - start_screen.y), true)
                } else {
                    return Vec::new();
                };
                *last_screen = screen_pt;
                let grid_snap = wf.editor.grid_snap;
                let Some(node) = wf.doc.node_mut(id) else {
                    return Vec::new();
                };
                // The drag continues from where the node is drawn.
                if first_step && grid_snap {
                    let origin = render_origin(node, true);
                    node.x = origin.x;
                    node.y = origin.y;
                }
                node.x += self.camera.screen_dist_to_world(delta.x);
                node.y += self.camera.screen_dist_to_world(delta.y);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let input = std::mem::take(&mut self.input);
        let Some(wf) = self.workflow.as_mut() else {
            return Vec::new();
        };
        let cursor = if self.space_held { "grab" } else { wf.editor.current_tool.cursor() };
        let cursor = Action::SetCursor(cursor.to_string());
        match input {
            InputState::Idle => Vec::new(),
            InputState::Panning { moved, clears_selection, .. } => {
                let mut actions = Vec::new();
                if !moved && clears_selection {
                    wf.editor.clear_selection();
                    actions.push(selection_action(&wf.editor));
                } else if moved {
                    actions.push(Action::ViewChanged {
                        zoom: self.camera.zoom,
                        pan_x: self.camera.pan_x,
                        pan_y: self.camera.pan_y,
                    });
                }
                actions.push(cursor);
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::DraggingNode { id, moved, .. } => {
                wf.editor.dragging = None;
                let mut actions = Vec::new();
                if moved && let Some(node) = wf.doc.node(&id) {
                    let fields = PartialWorkflowNode { x: Some(node.x), y: Some(node.y), ..Default::default() };
                    tracing::debug!(node_id = %id, x = node.x, y = node.y, "node moved");
                    actions.push(Action::NodeUpdated { id, fields });
                    wf.touch();
                }
                actions.push(cursor);
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Zoom about the pointer by one wheel step. Scrolling up zooms in.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }
        let factor = if delta.dy < 0.0 { WHEEL_ZOOM_STEP } else { 1.0 / WHEEL_ZOOM_STEP };
        self.zoom_about(screen_pt, self.camera.zoom * factor)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.workflow.is_none() || self.text_focus {
            return Vec::new();
        }
        if key.is_space() {
            if self.space_held {
                return Vec::new();
            }
            self.space_held = true;
            return vec![Action::SetCursor("grab".into())];
        }
        if modifiers.command() {
            return self.on_command_key(key);
        }
        if key.is_delete() {
            return self.delete_selected();
        }
        if key.is_escape() {
            let mut actions = self.cancel_connection();
            actions.extend(self.clear_selection());
            return actions;
        }
        if self.space_held {
            return Vec::new();
        }
        match Tool::from_hotkey(&key.0) {
            Some(tool) => self.set_tool(tool),
            None => Vec::new(),
        }
    }

    fn on_command_key(&mut self, key: &Key) -> Vec<Action> {
        if key.is_char('c') {
            self.copy_selected()
        } else if key.is_char('v') {
            self.paste()
        } else if key.is_char('=') || key.is_char('+') {
            self.zoom_in()
        } else if key.is_char('-') {
            self.zoom_out()
        } else if key.is_char('0') {
            self.reset_view()
        } else {
            Vec::new()
        }
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is_space() || !self.space_held {
            return Vec::new();
        }
        self.space_held = false;
        let Some(wf) = self.workflow.as_ref() else {
            return Vec::new();
        };
        vec![Action::SetCursor(wf.editor.current_tool.cursor().to_string())]
    }

    // --- Queries ---

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.workflow.as_ref()?.doc.node(id)
    }

    /// Where a node is drawn, with grid snapping applied.
    #[must_use]
    pub fn render_position(&self, id: &str) -> Option<Point> {
        let wf = self.workflow.as_ref()?;
        let node = wf.doc.node(id)?;
        Some(render_origin(node, wf.editor.grid_snap))
    }

    #[must_use]
    pub fn editor(&self) -> Option<&EditorState> {
        self.workflow.as_ref().map(|wf| &wf.editor)
    }

    /// The multi-selection, empty when no workflow is loaded.
    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        match self.editor() {
            Some(editor) => &editor.selected_nodes,
            None => &[],
        }
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }
}

/// Give `node` and every nested child a fresh id.
fn refresh_ids(node: &mut WorkflowNode) {
    node.id = new_id();
    for child in &mut node.child_nodes {
        refresh_ids(child);
    }
}

fn selection_action(editor: &EditorState) -> Action {
    Action::SelectionChanged {
        selected_node: editor.selected_node.clone(),
        selected_nodes: editor.selected_nodes.clone(),
    }
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
