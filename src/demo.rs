//! The end-to-end walkthrough: build a two-node payment flow on an empty
//! canvas with real pointer events, wire it up, then delete the payment.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use canvas::camera::Point;
use canvas::consts::{NODE_HEIGHT, NODE_WIDTH};
use canvas::doc::{NodeId, NodeKind};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, Modifiers, Tool};
use canvas::workflow::WorkflowState;
use serde::Serialize;

use crate::config::Config;
use crate::seed::{self, SeedError};

/// Snapshot taken after one walkthrough step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStep {
    pub title: &'static str,
    pub nodes: usize,
    pub connections: usize,
    pub workflow: WorkflowState,
}

/// Run the walkthrough against a fresh copy of the `empty` seed.
///
/// # Errors
///
/// Returns an error if the bundled seed fails to load.
pub fn run(config: &Config) -> Result<Vec<DemoStep>, SeedError> {
    let mut engine = config.open(seed::load("empty")?);
    let mut steps = Vec::new();

    let payment = created_id(&engine.palette_drop(NodeKind::Payment, Point::new(100.0, 100.0)));
    record(&engine, "add payment at (100, 100)", &mut steps);

    let task = created_id(&engine.palette_drop(NodeKind::Task, Point::new(300.0, 100.0)));
    record(&engine, "add task at (300, 100)", &mut steps);

    engine.set_tool(Tool::Connect);
    click_node(&mut engine, payment.as_deref());
    click_node(&mut engine, task.as_deref());
    record(&engine, "connect payment to task", &mut steps);

    engine.set_tool(Tool::Delete);
    click_node(&mut engine, payment.as_deref());
    record(&engine, "delete payment", &mut steps);

    Ok(steps)
}

fn record(engine: &EngineCore, title: &'static str, steps: &mut Vec<DemoStep>) {
    let Some(workflow) = engine.workflow() else {
        return;
    };
    tracing::info!(step = title, nodes = workflow.doc.len(), connections = workflow.doc.connections.len(), "demo step");
    steps.push(DemoStep {
        title,
        nodes: workflow.doc.len(),
        connections: workflow.doc.connections.len(),
        workflow: workflow.clone(),
    });
}

/// Id of the node a palette drop created.
fn created_id(actions: &[Action]) -> Option<NodeId> {
    actions.iter().find_map(|action| match action {
        Action::NodeCreated(node) => Some(node.id.clone()),
        _ => None,
    })
}

/// Press and release over the drawn center of node `id`.
fn click_node(engine: &mut EngineCore, id: Option<&str>) {
    let Some(origin) = id.and_then(|id| engine.render_position(id)) else {
        return;
    };
    let center = Point::new(origin.x + NODE_WIDTH / 2.0, origin.y + NODE_HEIGHT / 2.0);
    let screen = engine.camera().world_to_screen(center);
    engine.on_pointer_down(screen, Button::Primary, Modifiers::default());
    engine.on_pointer_up(screen, Button::Primary, Modifiers::default());
}
