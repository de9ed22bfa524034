//! Built-in seed workflows.
//!
//! Seeds are bundled JSON snapshots. Loading one rebuilds the document so
//! dangling connections are dropped and each node's outgoing list is
//! recomputed, then stamps fresh timestamps.

#[cfg(test)]
#[path = "seed_test.rs"]
mod seed_test;

use canvas::doc::WorkflowDoc;
use canvas::workflow::{WorkflowState, now_ms};

/// Seed names in listing order, paired with their JSON.
const SEEDS: &[(&str, &str)] = &[
    ("empty", include_str!("../seeds/empty.json")),
    ("bitcoin-corp-org", include_str!("../seeds/bitcoin-corp-org.json")),
    ("payroll-run", include_str!("../seeds/payroll-run.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("unknown seed `{0}` (try `cashboard seeds`)")]
    Unknown(String),
    #[error("seed `{name}` is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Names of every bundled seed.
#[must_use]
pub fn names() -> Vec<&'static str> {
    SEEDS.iter().map(|(name, _)| *name).collect()
}

/// Load the seed called `name`.
///
/// # Errors
///
/// Returns [`SeedError::Unknown`] for an unrecognized name.
pub fn load(name: &str) -> Result<WorkflowState, SeedError> {
    let (_, json) = SEEDS
        .iter()
        .find(|(seed, _)| *seed == name)
        .ok_or_else(|| SeedError::Unknown(name.to_string()))?;
    parse(name, json)
}

/// Parse a workflow snapshot, normalizing its connections.
///
/// # Errors
///
/// Returns [`SeedError::Malformed`] if the JSON doesn't describe a workflow.
pub fn parse(name: &str, json: &str) -> Result<WorkflowState, SeedError> {
    let mut workflow: WorkflowState =
        serde_json::from_str(json).map_err(|source| SeedError::Malformed { name: name.to_string(), source })?;
    let doc = std::mem::take(&mut workflow.doc);
    workflow.doc = WorkflowDoc::from_snapshot(doc.nodes, doc.connections);
    let now = now_ms();
    workflow.created_at = now;
    workflow.updated_at = now;
    tracing::debug!(
        seed = name,
        nodes = workflow.doc.nodes.len(),
        connections = workflow.doc.connections.len(),
        "seed loaded"
    );
    Ok(workflow)
}
