//! Workflow: a named document plus its editor state and bookkeeping.

#[cfg(test)]
#[path = "workflow_test.rs"]
mod workflow_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::doc::WorkflowDoc;
use crate::input::EditorState;

/// Run status of a workflow as shown on its badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Running,
    Paused,
    Stopped,
}

/// A workflow with its nodes, connections, and transient editor state.
///
/// Serializes as one flat JSON object (`nodes`, `connections`,
/// `selectedNodes`, `currentTool`, ... side by side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub doc: WorkflowDoc,
    #[serde(flatten)]
    pub editor: EditorState,
    #[serde(default)]
    pub workflow_status: WorkflowStatus,
    #[serde(default)]
    pub auto_mode: bool,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Last mutation time, epoch milliseconds.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl WorkflowState {
    /// An empty workflow stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            doc: WorkflowDoc::new(),
            editor: EditorState::default(),
            workflow_status: WorkflowStatus::Running,
            auto_mode: false,
            created_at: now,
            updated_at: now,
            organization_id: None,
            folder: None,
        }
    }

    /// Record a mutation.
    pub fn touch(&mut self) {
        self.updated_at = now_ms().max(self.updated_at);
    }
}

/// Current wall-clock time in epoch milliseconds; 0 if the clock is before the epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(i64::MAX)
}
