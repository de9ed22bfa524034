#![allow(clippy::float_cmp)]

use super::*;
use crate::catalog::BusinessCategory;
use crate::doc::NodeStatus;

// =============================================================
// Helpers
// =============================================================

const EPS: f64 = 1e-9;

/// Engine with a loaded empty workflow, a 1000x800 viewport, and an identity camera.
fn loaded() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(1000.0, 800.0);
    core.load_workflow(WorkflowState::new("wf-1", "Test"));
    core.camera = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 };
    core
}

fn place(core: &mut EngineCore, kind: NodeKind, x: f64, y: f64) -> NodeId {
    core.add_node(kind, Point::new(x, y)).unwrap().id
}

fn wf(core: &EngineCore) -> &WorkflowState {
    core.workflow().unwrap()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn click(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    click_with(core, x, y, Modifiers::default())
}

fn click_with(core: &mut EngineCore, x: f64, y: f64, modifiers: Modifiers) -> Vec<Action> {
    let mut actions = core.on_pointer_down(pt(x, y), Button::Primary, modifiers);
    actions.extend(core.on_pointer_up(pt(x, y), Button::Primary, modifiers));
    actions
}

fn drag(core: &mut EngineCore, from: Point, to: Point, button: Button) -> Vec<Action> {
    let mut actions = core.on_pointer_down(from, button, Modifiers::default());
    actions.extend(core.on_pointer_move(to, Modifiers::default()));
    actions.extend(core.on_pointer_up(to, button, Modifiers::default()));
    actions
}

fn key(core: &mut EngineCore, name: &str, modifiers: Modifiers) -> Vec<Action> {
    core.on_key_down(&Key::new(name), modifiers)
}

fn count(actions: &[Action], pred: impl Fn(&Action) -> bool) -> usize {
    actions.iter().filter(|a| pred(a)).count()
}

// =============================================================
// No workflow loaded
// =============================================================

#[test]
fn every_operation_is_a_noop_without_workflow() {
    let mut core = EngineCore::new();
    assert!(core.add_node(NodeKind::Task, pt(0.0, 0.0)).is_none());
    assert!(core.palette_click(NodeKind::Payment).is_empty());
    assert!(core.palette_click(NodeKind::Organization).is_empty());
    assert!(core.pending_pick().is_none());
    assert!(core.delete_node("a").is_empty());
    assert!(core.delete_selected().is_empty());
    assert!(core.copy_selected().is_empty());
    assert!(core.paste().is_empty());
    assert!(core.set_tool(Tool::Pan).is_empty());
    assert!(core.start_connection("a").is_empty());
    assert!(core.zoom_in().is_empty());
    assert!(core.reset_view().is_empty());
    assert!(core.on_pointer_down(pt(1.0, 1.0), Button::Primary, Modifiers::default()).is_empty());
    assert!(core.on_pointer_move(pt(5.0, 5.0), Modifiers::default()).is_empty());
    assert!(core.on_wheel(pt(1.0, 1.0), WheelDelta { dx: 0.0, dy: -1.0 }, Modifiers::default()).is_empty());
    assert!(key(&mut core, "v", Modifiers::default()).is_empty());
    assert!(core.selection().is_empty());
    assert_eq!(core.camera().zoom, crate::consts::DEFAULT_ZOOM);
}

#[test]
fn close_workflow_returns_state_and_disables_engine() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    let closed = core.close_workflow().unwrap();
    assert_eq!(closed.doc.len(), 1);
    assert!(core.workflow().is_none());
    assert!(core.add_node(NodeKind::Task, pt(0.0, 0.0)).is_none());
}

// =============================================================
// Workflow lifecycle / viewport
// =============================================================

#[test]
fn load_workflow_resets_camera_per_workflow() {
    let mut core = EngineCore::new();
    core.camera = Camera { pan_x: 40.0, pan_y: -10.0, zoom: 3.0 };
    core.load_workflow(WorkflowState::new("bitcoin-corp-org", "Bitcoin Corp"));
    assert_eq!(core.camera(), Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.2 });
    core.load_workflow(WorkflowState::new("payroll-run", "Payroll"));
    assert_eq!(core.zoom(), 0.35);
}

#[test]
fn canvas_center_world_follows_camera() {
    let mut core = loaded();
    assert_eq!(core.canvas_center_world(), pt(500.0, 400.0));
    core.camera = Camera { pan_x: 100.0, pan_y: 0.0, zoom: 2.0 };
    assert_eq!(core.canvas_center_world(), pt(200.0, 200.0));
}

#[test]
fn set_zoom_clamps_and_keeps_pan() {
    let mut core = loaded();
    core.set_pan(pt(12.0, 34.0));
    let actions = core.set_zoom(50.0);
    assert_eq!(core.zoom(), 5.0);
    assert_eq!(core.pan(), pt(12.0, 34.0));
    assert!(matches!(actions[0], Action::ViewChanged { zoom, .. } if zoom == 5.0));
}

#[test]
fn zoom_to_pivots_on_viewport_center() {
    let mut core = loaded();
    let before = core.canvas_center_world();
    core.zoom_to(2.5);
    let after = core.canvas_center_world();
    assert_eq!(core.zoom(), 2.5);
    assert!((before.x - after.x).abs() < EPS);
    assert!((before.y - after.y).abs() < EPS);
}

#[test]
fn zoom_to_same_scale_emits_nothing() {
    let mut core = loaded();
    assert!(core.zoom_to(1.0).is_empty());
}

#[test]
fn reset_view_uses_workflow_default() {
    let mut core = loaded();
    core.zoom_to(3.0);
    core.set_pan(pt(90.0, 90.0));
    core.reset_view();
    assert_eq!(core.camera(), Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.35 });
}

// =============================================================
// Palette / entity pick
// =============================================================

#[test]
fn palette_click_places_at_canvas_center() {
    let mut core = loaded();
    let actions = core.palette_click(NodeKind::Payment);
    let Action::NodeCreated(node) = &actions[0] else {
        panic!("expected NodeCreated, got {actions:?}");
    };
    assert_eq!((node.x, node.y), (500.0, 400.0));
    assert_eq!(node.amount, Some(1000.0));
    assert_eq!(wf(&core).doc.len(), 1);
}

#[test]
fn business_kind_requests_entity_pick_without_creating() {
    let mut core = loaded();
    let actions = core.palette_drop(NodeKind::Wallets, pt(10.0, 20.0));
    assert_eq!(
        actions,
        vec![Action::EntityPickRequested {
            kind: NodeKind::Wallets,
            category: BusinessCategory::Wallet,
            position: pt(10.0, 20.0),
        }]
    );
    assert!(wf(&core).doc.is_empty());
    assert_eq!(core.pending_pick().map(|p| p.category), Some(BusinessCategory::Wallet));
}

#[test]
fn complete_entity_pick_names_node_after_entity() {
    let mut core = loaded();
    core.palette_drop(NodeKind::Organization, pt(10.0, 20.0));
    let entity = EntitySummary::new("org-1", "Bitcoin Corp").with_description("Parent company");
    let actions = core.complete_entity_pick(&entity);
    assert_eq!(count(&actions, |a| matches!(a, Action::NodeCreated(_))), 1);

    let node = &wf(&core).doc.nodes[0];
    assert_eq!(node.name, "Bitcoin Corp");
    assert_eq!(node.description, "Parent company");
    assert_eq!(node.kind, NodeKind::Organization);
    assert_eq!((node.x, node.y), (10.0, 20.0));
    assert_eq!(node.entity_ref, Some(EntityRef { category: BusinessCategory::Organization, id: "org-1".into() }));
    assert!(core.pending_pick().is_none());
}

#[test]
fn complete_entity_pick_without_pending_is_noop() {
    let mut core = loaded();
    assert!(core.complete_entity_pick(&EntitySummary::new("x", "X")).is_empty());
    assert!(wf(&core).doc.is_empty());
}

#[test]
fn cancel_entity_pick_discards_pending() {
    let mut core = loaded();
    core.palette_click(NodeKind::AiAgent);
    assert!(core.cancel_entity_pick());
    assert!(!core.cancel_entity_pick());
    assert!(core.complete_entity_pick(&EntitySummary::new("a", "Agent")).is_empty());
    assert!(wf(&core).doc.is_empty());
}

struct OneOfEach;

impl EntityDirectory for OneOfEach {
    fn entities(&self, category: BusinessCategory) -> Vec<EntitySummary> {
        vec![EntitySummary::new(format!("{}-1", category.as_ref()), "Only")]
    }
}

#[test]
fn pick_candidates_come_from_pending_category() {
    let mut core = loaded();
    assert!(core.pick_candidates(&OneOfEach).is_empty());
    core.palette_click(NodeKind::Contact);
    let candidates = core.pick_candidates(&OneOfEach);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, "contact-1");
}

// =============================================================
// Node updates
// =============================================================

#[test]
fn update_node_applies_partial_and_touches() {
    let mut core = loaded();
    let id = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.workflow.as_mut().unwrap().updated_at = 0;
    let fields = PartialWorkflowNode { status: Some(NodeStatus::Active), ..Default::default() };
    let actions = core.update_node(&id, fields.clone());
    assert_eq!(actions[0], Action::NodeUpdated { id: id.clone(), fields });
    assert_eq!(core.node(&id).unwrap().status, NodeStatus::Active);
    assert!(wf(&core).updated_at > 0);
}

#[test]
fn rejected_update_leaves_node_untouched() {
    let mut core = loaded();
    let id = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let before = core.node(&id).cloned();
    let fields = PartialWorkflowNode {
        name: Some("Renamed".into()),
        metadata: Some(serde_json::json!("not-an-object")),
        ..Default::default()
    };
    assert!(core.update_node(&id, fields).is_empty());
    assert_eq!(core.node(&id).cloned(), before);
}

#[test]
fn update_missing_node_is_noop() {
    let mut core = loaded();
    assert!(core.update_node("ghost", PartialWorkflowNode::default()).is_empty());
}

// =============================================================
// Select tool
// =============================================================

#[test]
fn plain_click_selects_on_both_tracks() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    click(&mut core, 50.0, 50.0);
    let editor = core.editor().unwrap();
    assert_eq!(editor.selected_node.as_deref(), Some(a.as_str()));
    assert_eq!(editor.selected_nodes, vec![a]);
    assert!(editor.dragging.is_none());
}

#[test]
fn modifier_click_twice_restores_selection() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 400.0, 0.0);
    click(&mut core, 50.0, 50.0);
    let before = core.selection().to_vec();

    click_with(&mut core, 450.0, 50.0, shift());
    assert_eq!(core.selection(), [a.clone(), b]);
    click_with(&mut core, 450.0, 50.0, shift());
    assert_eq!(core.selection(), before.as_slice());
    assert_eq!(core.editor().unwrap().selected_node.as_deref(), Some(a.as_str()));
}

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    click(&mut core, 50.0, 50.0);
    let actions = click(&mut core, 900.0, 700.0);
    assert!(core.selection().is_empty());
    assert!(core.editor().unwrap().selected_node.is_none());
    assert_eq!(count(&actions, |a| matches!(a, Action::SelectionChanged { .. })), 1);
}

#[test]
fn modifier_click_on_empty_canvas_keeps_selection() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 400.0, 0.0);
    core.set_selection(&[a.clone(), b.clone()]);
    let actions = click_with(&mut core, 900.0, 700.0, shift());
    assert_eq!(core.selection(), [a, b]);
    assert_eq!(count(&actions, |a| matches!(a, Action::SelectionChanged { .. })), 0);
}

#[test]
fn starting_a_pan_drops_stale_drag_target() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, Modifiers::default());
    assert!(core.editor().unwrap().dragging.is_some());
    core.on_pointer_down(pt(900.0, 700.0), Button::Middle, Modifiers::default());
    assert!(core.editor().unwrap().dragging.is_none());
    core.on_pointer_up(pt(900.0, 700.0), Button::Middle, Modifiers::default());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn dragging_empty_canvas_pans_and_keeps_selection() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    click(&mut core, 50.0, 50.0);
    drag(&mut core, pt(900.0, 700.0), pt(940.0, 680.0), Button::Primary);
    assert_eq!(core.pan(), pt(40.0, -20.0));
    assert_eq!(core.selection(), [a]);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn pan_follows_pointer_at_any_zoom() {
    let mut core = loaded();
    core.camera.zoom = 0.35;
    let grabbed = core.camera().screen_to_world(pt(900.0, 700.0));
    drag(&mut core, pt(900.0, 700.0), pt(910.0, 700.0), Button::Primary);
    let under = core.camera().world_to_screen(grabbed);
    assert!((under.x - 910.0).abs() < 1e-9, "x = {}", under.x);
    assert!((under.y - 700.0).abs() < 1e-9, "y = {}", under.y);
}

#[test]
fn drag_moves_only_the_dragged_node() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 600.0, 0.0);
    let actions = drag(&mut core, pt(50.0, 50.0), pt(100.0, 80.0), Button::Primary);

    assert_eq!((core.node(&a).unwrap().x, core.node(&a).unwrap().y), (50.0, 30.0));
    assert_eq!((core.node(&b).unwrap().x, core.node(&b).unwrap().y), (600.0, 0.0));
    let updates: Vec<&Action> = actions.iter().filter(|a| matches!(a, Action::NodeUpdated { .. })).collect();
    assert_eq!(
        updates,
        vec![&Action::NodeUpdated {
            id: a,
            fields: PartialWorkflowNode { x: Some(50.0), y: Some(30.0), ..Default::default() },
        }]
    );
    assert!(core.editor().unwrap().dragging.is_none());
}

#[test]
fn drag_delta_is_converted_to_world_units() {
    let mut core = loaded();
    core.camera.zoom = 2.0;
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.on_pointer_down(pt(20.0, 20.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(pt(60.0, 20.0), Modifiers::default());
    core.on_pointer_move(pt(100.0, 40.0), Modifiers::default());
    core.on_pointer_up(pt(100.0, 40.0), Button::Primary, Modifiers::default());
    let node = core.node(&a).unwrap();
    assert_eq!((node.x, node.y), (40.0, 10.0));
}

#[test]
fn small_jitter_does_not_move_node() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let actions = drag(&mut core, pt(50.0, 50.0), pt(51.0, 51.0), Button::Primary);
    assert_eq!(core.node(&a).unwrap().x, 0.0);
    assert_eq!(count(&actions, |a| matches!(a, Action::NodeUpdated { .. })), 0);
}

#[test]
fn grid_snap_drag_starts_from_rendered_position() {
    let mut core = loaded();
    core.workflow.as_mut().unwrap().editor.grid_snap = true;
    let a = place(&mut core, NodeKind::Task, 13.0, 7.0);
    assert_eq!(core.render_position(&a), Some(pt(20.0, 0.0)));
    assert_eq!(core.node(&a).unwrap().x, 13.0);

    drag(&mut core, pt(50.0, 50.0), pt(60.0, 50.0), Button::Primary);
    let node = core.node(&a).unwrap();
    assert_eq!((node.x, node.y), (30.0, 0.0));
}

#[test]
fn team_expand_toggle_flips_flag() {
    let mut core = loaded();
    let team = place(&mut core, NodeKind::Team, 0.0, 0.0);
    let actions = click(&mut core, 245.0, 10.0);
    assert_eq!(core.node(&team).unwrap().is_expanded, Some(true));
    assert!(actions.contains(&Action::NodeUpdated {
        id: team.clone(),
        fields: PartialWorkflowNode { is_expanded: Some(true), ..Default::default() },
    }));
    click(&mut core, 245.0, 10.0);
    assert_eq!(core.node(&team).unwrap().is_expanded, Some(false));
}

#[test]
fn toggle_expanded_ignores_non_team_nodes() {
    let mut core = loaded();
    let task = place(&mut core, NodeKind::Task, 0.0, 0.0);
    assert!(core.toggle_expanded(&task).is_empty());
}

#[test]
fn set_selection_skips_missing_and_duplicates() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_selection(&[a.clone(), "ghost".into(), a.clone()]);
    assert_eq!(core.selection(), [a]);
}

// =============================================================
// Pan tool / space / middle button
// =============================================================

#[test]
fn pan_tool_drags_over_nodes_without_moving_them() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Pan);
    drag(&mut core, pt(50.0, 50.0), pt(80.0, 50.0), Button::Primary);
    assert_eq!(core.pan(), pt(30.0, 0.0));
    assert_eq!(core.node(&a).unwrap().x, 0.0);
}

#[test]
fn space_forces_pan_regardless_of_tool() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Delete);
    assert_eq!(key(&mut core, " ", Modifiers::default()), vec![Action::SetCursor("grab".into())]);
    drag(&mut core, pt(50.0, 50.0), pt(50.0, 90.0), Button::Primary);
    assert!(core.node(&a).is_some());
    assert_eq!(core.pan(), pt(0.0, 40.0));

    let actions = core.on_key_up(&Key::new(" "), Modifiers::default());
    assert_eq!(actions, vec![Action::SetCursor("not-allowed".into())]);
    assert!(!core.space_held);
}

#[test]
fn middle_button_pans_in_connect_mode() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Connect);
    drag(&mut core, pt(50.0, 50.0), pt(10.0, 50.0), Button::Middle);
    assert_eq!(core.pan(), pt(-40.0, 0.0));
    assert!(core.editor().unwrap().is_connecting.is_none());
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    assert!(core.on_pointer_down(pt(50.0, 50.0), Button::Secondary, Modifiers::default()).is_empty());
    assert!(core.selection().is_empty());
}

// =============================================================
// Connect tool
// =============================================================

#[test]
fn connect_two_nodes_appends_one_task_connection() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 400.0, 0.0);
    core.set_tool(Tool::Connect);

    let first = click(&mut core, 50.0, 50.0);
    assert!(first.contains(&Action::ConnectionStarted { from: a.clone() }));
    assert_eq!(core.editor().unwrap().is_connecting.as_deref(), Some(a.as_str()));

    let second = click(&mut core, 450.0, 50.0);
    assert_eq!(count(&second, |a| matches!(a, Action::ConnectionCreated(_))), 1);

    let doc = &wf(&core).doc;
    assert_eq!(doc.connections.len(), 1);
    let conn = &doc.connections[0];
    assert_eq!((conn.from.as_str(), conn.to.as_str()), (a.as_str(), b.as_str()));
    assert_eq!(conn.kind, ConnectionKind::Task);
    assert_eq!(doc.node(&a).unwrap().connections, vec![conn.id.clone()]);
    assert!(core.editor().unwrap().is_connecting.is_none());
}

#[test]
fn connect_same_node_cancels() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Connect);
    click(&mut core, 50.0, 50.0);
    let actions = click(&mut core, 60.0, 60.0);
    assert!(actions.contains(&Action::ConnectionCancelled));
    assert!(wf(&core).doc.connections.is_empty());
    assert!(core.editor().unwrap().is_connecting.is_none());
}

#[test]
fn connect_click_on_empty_canvas_cancels() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Connect);
    click(&mut core, 50.0, 50.0);
    click(&mut core, 900.0, 700.0);
    assert!(core.editor().unwrap().is_connecting.is_none());
    assert!(wf(&core).doc.connections.is_empty());
}

#[test]
fn switching_tool_cancels_pending_connection() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Connect);
    click(&mut core, 50.0, 50.0);
    let actions = core.set_tool(Tool::Select);
    assert!(actions.contains(&Action::ConnectionCancelled));
    assert!(core.editor().unwrap().is_connecting.is_none());
}

#[test]
fn complete_connection_to_missing_node_cancels() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.start_connection(&a);
    let actions = core.complete_connection("ghost");
    assert_eq!(actions[0], Action::ConnectionCancelled);
    assert!(wf(&core).doc.connections.is_empty());
}

// =============================================================
// Delete / zoom tools
// =============================================================

#[test]
fn delete_tool_click_cascades() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 400.0, 0.0);
    core.start_connection(&a);
    core.complete_connection(&b);
    core.set_tool(Tool::Delete);

    let actions = click(&mut core, 50.0, 50.0);
    assert!(actions.contains(&Action::NodeDeleted { id: a.clone() }));
    assert_eq!(count(&actions, |a| matches!(a, Action::ConnectionDeleted { .. })), 1);
    assert!(core.node(&a).is_none());
    assert!(wf(&core).doc.connections.is_empty());
}

#[test]
fn delete_tool_on_empty_canvas_does_nothing() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Delete);
    assert!(click(&mut core, 900.0, 700.0).is_empty());
    assert_eq!(wf(&core).doc.len(), 1);
}

#[test]
fn zoom_tool_click_only_sets_cursor() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_tool(Tool::Zoom);
    let actions = core.on_pointer_down(pt(50.0, 50.0), Button::Primary, Modifiers::default());
    assert_eq!(actions, vec![Action::SetCursor("zoom-in".into())]);
    assert_eq!(core.zoom(), 1.0);
    assert!(core.selection().is_empty());
}

// =============================================================
// Bulk operations
// =============================================================

#[test]
fn delete_selected_removes_every_touching_connection() {
    let mut core = loaded();
    let hub = place(&mut core, NodeKind::Task, 0.0, 0.0);
    let a = place(&mut core, NodeKind::Task, 400.0, 0.0);
    let b = place(&mut core, NodeKind::Task, 800.0, 0.0);
    let c = place(&mut core, NodeKind::Task, 1200.0, 0.0);
    for (from, to) in [(&hub, &a), (&b, &hub), (&a, &b), (&b, &c)] {
        core.start_connection(from);
        core.complete_connection(to);
    }
    core.set_selection(&[hub.clone(), a.clone()]);

    let actions = key(&mut core, "Delete", Modifiers::default());
    assert_eq!(count(&actions, |a| matches!(a, Action::NodeDeleted { .. })), 2);
    assert_eq!(count(&actions, |a| matches!(a, Action::ConnectionDeleted { .. })), 3);

    let doc = &wf(&core).doc;
    assert_eq!(doc.len(), 2);
    assert!(doc.connections.iter().all(|c| c.from != hub && c.to != hub && c.from != a && c.to != a));
    assert_eq!(doc.connections.len(), 1);
    assert!(core.selection().is_empty());
}

#[test]
fn delete_with_empty_selection_is_noop() {
    let mut core = loaded();
    place(&mut core, NodeKind::Task, 0.0, 0.0);
    assert!(key(&mut core, "Backspace", Modifiers::default()).is_empty());
    assert_eq!(wf(&core).doc.len(), 1);
}

#[test]
fn paste_staggers_with_fresh_ids_and_no_connections() {
    let mut core = loaded();
    let ids = [
        place(&mut core, NodeKind::Task, 0.0, 0.0),
        place(&mut core, NodeKind::Payment, 400.0, 0.0),
        place(&mut core, NodeKind::Email, 800.0, 0.0),
    ];
    core.start_connection(&ids[0]);
    core.complete_connection(&ids[1]);
    core.set_selection(&ids);
    core.copy_selected();

    let actions = core.paste_at(pt(500.0, 300.0));
    let pasted: Vec<WorkflowNode> = actions
        .iter()
        .filter_map(|a| match a {
            Action::NodeCreated(n) => Some(n.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(pasted.len(), 3);
    for (i, node) in pasted.iter().enumerate() {
        let step = 20.0 * f64::from(u32::try_from(i).unwrap());
        assert_eq!((node.x, node.y), (500.0 + step, 300.0 + step));
        assert!(node.connections.is_empty());
        assert!(!ids.contains(&node.id));
    }
    assert_eq!(pasted[1].kind, NodeKind::Payment);
    assert_eq!(wf(&core).doc.len(), 6);

    let pasted_ids: Vec<NodeId> = pasted.iter().map(|n| n.id.clone()).collect();
    assert_eq!(core.selection(), pasted_ids.as_slice());
}

#[test]
fn pasted_team_children_get_fresh_ids() {
    let mut core = loaded();
    let team = place(&mut core, NodeKind::Team, 0.0, 0.0);
    let child = WorkflowNode::new(NodeKind::Employee, "Alice", 0.0, 0.0);
    let child_id = child.id.clone();
    core.workflow.as_mut().unwrap().doc.node_mut(&team).unwrap().child_nodes.push(child);
    core.copy_nodes(&[team.clone()]);

    core.paste_at(pt(300.0, 300.0));
    let copy = wf(&core).doc.nodes.iter().find(|n| n.id != team).unwrap();
    assert_eq!(copy.child_nodes.len(), 1);
    assert_eq!(copy.child_nodes[0].name, "Alice");
    assert_ne!(copy.child_nodes[0].id, child_id);
    assert_eq!(wf(&core).doc.node(&team).unwrap().child_nodes[0].id, child_id);
}

#[test]
fn clipboard_is_a_snapshot() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.copy_nodes(&[a.clone()]);
    core.update_node(&a, PartialWorkflowNode { name: Some("Renamed".into()), ..Default::default() });
    core.delete_node(&a);
    core.paste_at(pt(0.0, 0.0));
    assert_eq!(wf(&core).doc.nodes[0].name, "New Task");
}

#[test]
fn paste_with_empty_clipboard_is_noop() {
    let mut core = loaded();
    assert!(core.paste_at(pt(0.0, 0.0)).is_empty());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn tool_hotkeys_switch_tools() {
    let mut core = loaded();
    key(&mut core, "h", Modifiers::default());
    assert_eq!(core.editor().unwrap().current_tool, Tool::Pan);
    key(&mut core, "C", Modifiers::default());
    assert_eq!(core.editor().unwrap().current_tool, Tool::Connect);
    key(&mut core, "x", Modifiers::default());
    assert_eq!(core.editor().unwrap().current_tool, Tool::Delete);
    key(&mut core, "v", Modifiers::default());
    assert_eq!(core.editor().unwrap().current_tool, Tool::Select);
}

#[test]
fn ctrl_c_copies_instead_of_switching_tool() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_selection(&[a]);
    let actions = key(&mut core, "c", ctrl());
    assert_eq!(actions, vec![Action::ClipboardChanged { count: 1 }]);
    assert_eq!(core.editor().unwrap().current_tool, Tool::Select);
}

#[test]
fn ctrl_v_pastes_at_viewport_center() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_selection(&[a]);
    key(&mut core, "c", Modifiers { meta: true, ..Default::default() });
    key(&mut core, "v", ctrl());
    let pasted = &wf(&core).doc.nodes[1];
    assert_eq!((pasted.x, pasted.y), (500.0, 400.0));
    assert_eq!(core.editor().unwrap().current_tool, Tool::Select);
}

#[test]
fn hotkeys_suppressed_while_space_held() {
    let mut core = loaded();
    key(&mut core, " ", Modifiers::default());
    assert!(key(&mut core, "h", Modifiers::default()).is_empty());
    assert_eq!(core.editor().unwrap().current_tool, Tool::Select);
}

#[test]
fn text_focus_suppresses_canvas_keys() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_selection(&[a]);
    core.set_text_focus(true);
    assert!(key(&mut core, "Delete", Modifiers::default()).is_empty());
    assert!(key(&mut core, "x", Modifiers::default()).is_empty());
    assert!(key(&mut core, " ", Modifiers::default()).is_empty());
    assert_eq!(wf(&core).doc.len(), 1);
    assert!(!core.space_held);
}

#[test]
fn escape_cancels_connection_and_clears_selection() {
    let mut core = loaded();
    let a = place(&mut core, NodeKind::Task, 0.0, 0.0);
    core.set_selection(&[a.clone()]);
    core.start_connection(&a);
    let actions = key(&mut core, "Escape", Modifiers::default());
    assert!(actions.contains(&Action::ConnectionCancelled));
    assert!(core.selection().is_empty());
    assert!(core.editor().unwrap().is_connecting.is_none());
}

#[test]
fn ctrl_plus_minus_zero_drive_the_view() {
    let mut core = loaded();
    key(&mut core, "=", ctrl());
    assert!((core.zoom() - 1.2).abs() < EPS);
    key(&mut core, "-", ctrl());
    assert!((core.zoom() - 1.0).abs() < EPS);
    key(&mut core, "0", ctrl());
    assert_eq!(core.camera(), Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.35 });
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut core = loaded();
    let pivot = pt(200.0, 100.0);
    let before = core.camera().screen_to_world(pivot);
    core.on_wheel(pivot, WheelDelta { dx: 0.0, dy: -100.0 }, Modifiers::default());
    assert!((core.zoom() - 1.1).abs() < EPS);
    let after = core.camera().screen_to_world(pivot);
    assert!((before.x - after.x).abs() < EPS);
    assert!((before.y - after.y).abs() < EPS);
}

#[test]
fn wheel_in_then_out_restores_pan() {
    let mut core = loaded();
    core.set_pan(pt(37.0, -12.0));
    let pivot = pt(321.0, 123.0);
    core.on_wheel(pivot, WheelDelta { dx: 0.0, dy: -1.0 }, Modifiers::default());
    core.on_wheel(pivot, WheelDelta { dx: 0.0, dy: 1.0 }, Modifiers::default());
    assert!((core.zoom() - 1.0).abs() < EPS);
    assert!((core.pan().x - 37.0).abs() < 1e-6);
    assert!((core.pan().y + 12.0).abs() < 1e-6);
}

#[test]
fn wheel_at_zoom_limit_emits_nothing() {
    let mut core = loaded();
    core.set_zoom(5.0);
    assert!(core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1.0 }, Modifiers::default()).is_empty());
    assert!(core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 4.0, dy: 0.0 }, Modifiers::default()).is_empty());
}

// =============================================================
// Action wire shape
// =============================================================

#[test]
fn actions_serialize_adjacently_tagged() {
    let value = serde_json::to_value(Action::ToolChanged(Tool::Pan)).unwrap();
    assert_eq!(value, serde_json::json!({ "action": "toolChanged", "data": "pan" }));
    let value = serde_json::to_value(Action::SelectionChanged { selected_node: None, selected_nodes: vec!["a".into()] })
        .unwrap();
    assert_eq!(value["data"]["selectedNodes"], serde_json::json!(["a"]));
    let value = serde_json::to_value(Action::RenderNeeded).unwrap();
    assert_eq!(value["action"], "renderNeeded");
}

// =============================================================
// End to end
// =============================================================

#[test]
fn build_connect_and_delete_a_small_workflow() {
    let mut core = loaded();

    core.palette_drop(NodeKind::Payment, pt(100.0, 100.0));
    let doc = &wf(&core).doc;
    assert_eq!(doc.len(), 1);
    let payment = doc.nodes[0].clone();
    assert_eq!(payment.status, NodeStatus::Pending);
    assert_eq!(payment.amount, Some(1000.0));

    core.palette_drop(NodeKind::Task, pt(300.0, 100.0));
    let task = wf(&core).doc.nodes[1].clone();
    assert_eq!(task.kind, NodeKind::Task);

    key(&mut core, "c", Modifiers::default());
    click(&mut core, 150.0, 150.0);
    click(&mut core, 500.0, 150.0);
    let doc = &wf(&core).doc;
    assert_eq!(doc.connections.len(), 1);
    assert_eq!(doc.connections[0].from, payment.id);
    assert_eq!(doc.connections[0].to, task.id);
    assert_eq!(doc.connections[0].kind, ConnectionKind::Task);

    key(&mut core, "x", Modifiers::default());
    click(&mut core, 150.0, 150.0);
    let doc = &wf(&core).doc;
    assert_eq!(doc.len(), 1);
    assert!(doc.connections.is_empty());
    assert!(doc.nodes[0].connections.is_empty());
}
