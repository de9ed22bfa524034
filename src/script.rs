//! Scripted event replay.
//!
//! A script names a seed and lists input events in the same vocabulary the
//! canvas host would deliver: pointer, wheel, and key events plus the palette
//! and entity-picker interactions. Replaying one drives an [`EngineCore`]
//! exactly as a browser session would and collects every emitted [`Action`].

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::{Path, PathBuf};

use canvas::camera::Point;
use canvas::catalog::EntityDirectory;
use canvas::doc::NodeKind;
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, Key, Modifiers, Tool, WheelDelta};
use canvas::workflow::WorkflowState;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::seed::{self, SeedError};

/// Intermediate pointer moves emitted by a `drag` event when none is given.
const DEFAULT_DRAG_STEPS: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("event {index}: no entity `{id}` in the pending category")]
    UnknownEntity { index: usize, id: String },
    #[error("event {index}: no entity pick is pending")]
    NoPendingPick { index: usize },
}

/// A seed plus the events to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Seed workflow to start from.
    #[serde(default = "default_seed")]
    pub seed: String,
    pub events: Vec<ScriptEvent>,
}

fn default_seed() -> String {
    "empty".to_string()
}

/// One scripted input. Coordinates are screen-space CSS pixels unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScriptEvent {
    Viewport {
        width: f64,
        height: f64,
    },
    Tool {
        tool: Tool,
    },
    TextFocus {
        focused: bool,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Press and release at the same point.
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Press at `from`, move in even steps, release at `to`.
    Drag {
        from: Point,
        to: Point,
        #[serde(default)]
        steps: Option<u32>,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
    },
    /// Palette item clicked, or dropped at a world position when `at` is set.
    Palette {
        kind: NodeKind,
        #[serde(default)]
        at: Option<Point>,
    },
    /// Choose an entity for the pending business node.
    PickEntity {
        id: String,
    },
    CancelPick,
    ZoomTo {
        scale: f64,
    },
    ResetView,
}

/// Result of a replay: the final workflow, camera, and every action emitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub workflow: Option<WorkflowState>,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub actions: Vec<Action>,
}

impl Script {
    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't a valid script.
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ScriptError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text isn't a valid script.
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the seed and replay every event against a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed is unknown or an entity-pick event can't
    /// be satisfied.
    pub fn replay(&self, config: &Config, directory: &dyn EntityDirectory) -> Result<ReplayOutcome, ScriptError> {
        let workflow = seed::load(&self.seed)?;
        let mut engine = config.open(workflow);
        let mut actions = Vec::new();
        for (index, event) in self.events.iter().enumerate() {
            let emitted = apply(&mut engine, directory, index, event)?;
            tracing::debug!(index, emitted = emitted.len(), "script event applied");
            actions.extend(emitted);
        }
        let camera = engine.camera();
        tracing::info!(seed = %self.seed, events = self.events.len(), actions = actions.len(), "replay finished");
        Ok(ReplayOutcome {
            workflow: engine.close_workflow(),
            zoom: camera.zoom,
            pan_x: camera.pan_x,
            pan_y: camera.pan_y,
            actions,
        })
    }
}

/// Apply one event to `engine`, returning the actions it produced.
///
/// # Errors
///
/// Returns an error for a pick event with no pending pick or an unknown id.
pub fn apply(
    engine: &mut EngineCore,
    directory: &dyn EntityDirectory,
    index: usize,
    event: &ScriptEvent,
) -> Result<Vec<Action>, ScriptError> {
    let actions = match event {
        ScriptEvent::Viewport { width, height } => {
            engine.set_viewport(*width, *height);
            Vec::new()
        }
        ScriptEvent::Tool { tool } => engine.set_tool(*tool),
        ScriptEvent::TextFocus { focused } => {
            engine.set_text_focus(*focused);
            Vec::new()
        }
        ScriptEvent::PointerDown { x, y, button, modifiers } => {
            engine.on_pointer_down(Point::new(*x, *y), *button, *modifiers)
        }
        ScriptEvent::PointerMove { x, y, modifiers } => engine.on_pointer_move(Point::new(*x, *y), *modifiers),
        ScriptEvent::PointerUp { x, y, button, modifiers } => {
            engine.on_pointer_up(Point::new(*x, *y), *button, *modifiers)
        }
        ScriptEvent::Click { x, y, button, modifiers } => {
            let at = Point::new(*x, *y);
            let mut actions = engine.on_pointer_down(at, *button, *modifiers);
            actions.extend(engine.on_pointer_up(at, *button, *modifiers));
            actions
        }
        ScriptEvent::Drag { from, to, steps, modifiers } => {
            drag(engine, *from, *to, steps.unwrap_or(DEFAULT_DRAG_STEPS), *modifiers)
        }
        ScriptEvent::Wheel { x, y, dx, dy } => {
            engine.on_wheel(Point::new(*x, *y), WheelDelta { dx: *dx, dy: *dy }, Modifiers::default())
        }
        ScriptEvent::KeyDown { key, modifiers } => engine.on_key_down(key, *modifiers),
        ScriptEvent::KeyUp { key } => engine.on_key_up(key, Modifiers::default()),
        ScriptEvent::Palette { kind, at: Some(at) } => engine.palette_drop(*kind, *at),
        ScriptEvent::Palette { kind, at: None } => engine.palette_click(*kind),
        ScriptEvent::PickEntity { id } => {
            let Some(pick) = engine.pending_pick() else {
                return Err(ScriptError::NoPendingPick { index });
            };
            let entity = directory
                .find(pick.category, id)
                .ok_or_else(|| ScriptError::UnknownEntity { index, id: id.clone() })?;
            engine.complete_entity_pick(&entity)
        }
        ScriptEvent::CancelPick => {
            if !engine.cancel_entity_pick() {
                tracing::warn!(index, "cancelPick with no pending pick");
            }
            Vec::new()
        }
        ScriptEvent::ZoomTo { scale } => engine.zoom_to(*scale),
        ScriptEvent::ResetView => engine.reset_view(),
    };
    Ok(actions)
}

fn drag(engine: &mut EngineCore, from: Point, to: Point, steps: u32, modifiers: Modifiers) -> Vec<Action> {
    let steps = steps.max(1);
    let mut actions = engine.on_pointer_down(from, Button::Primary, modifiers);
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let at = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        actions.extend(engine.on_pointer_move(at, modifiers));
    }
    actions.extend(engine.on_pointer_up(to, Button::Primary, modifiers));
    actions
}
