//! Document model: workflow nodes, connections, and the in-memory store.
//!
//! This module defines what is on the canvas (`WorkflowNode`, `NodeKind`,
//! `Connection`), a sparse-update type for incremental edits
//! (`PartialWorkflowNode`), and the store that owns all live nodes and
//! connections (`WorkflowDoc`).
//!
//! `WorkflowDoc` is responsible for the referential rules of the graph:
//! connections may only join existing nodes, and removing a node removes
//! every connection that touches it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

use crate::catalog::BusinessCategory;

/// Unique identifier for a node.
pub type NodeId = String;

/// Unique identifier for a connection.
pub type ConnectionId = String;

/// Generate a fresh identifier for a node or connection.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The kind of a workflow node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    // Basic
    Payment,
    Contract,
    Task,
    Decision,
    Milestone,
    Team,
    Kpi,
    Employee,
    Deliverable,
    Asset,
    Mint,
    Payroll,
    // Departments
    Production,
    Marketing,
    Sales,
    Legal,
    Finance,
    Hr,
    It,
    Operations,
    // Systems and flow control
    Api,
    Database,
    Loop,
    Condition,
    Trigger,
    Webhook,
    Email,
    Sms,
    Notification,
    Approval,
    Review,
    Timer,
    Counter,
    Calculator,
    Transformer,
    Validator,
    Aggregator,
    Filter,
    Sorter,
    Merger,
    Splitter,
    Gateway,
    Service,
    Function,
    Script,
    // Business entities
    Organization,
    Role,
    Member,
    Instrument,
    Integration,
    Switch,
    Router,
    Delay,
    Queue,
    Batch,
    Parallel,
    Sequence,
    Retry,
    AiAgent,
    // Social platforms
    Instagram,
    Snapchat,
    Threads,
    Twitter,
    Facebook,
    Linkedin,
    Tiktok,
    Youtube,
    Discord,
    Telegram,
    Whatsapp,
    Reddit,
    // AI services
    Voice,
    Elevenlabs,
    Midjourney,
    #[serde(rename = "veo3")]
    #[strum(serialize = "veo3")]
    Veo3,
    Openai,
    Anthropic,
    Stability,
    Runway,
    Replicate,
    Huggingface,
    Cohere,
    Perplexity,
    // Business software
    Salesforce,
    Hubspot,
    Pipedrive,
    Googlesheets,
    Excel,
    Airtable,
    Notion,
    Stripe,
    Paypal,
    Square,
    Slack,
    Teams,
    Zoom,
    Wallets,
    Workflow,
    Contact,
}

impl NodeKind {
    /// The business category this kind is bound to, if placing it requires
    /// picking a concrete entity first.
    #[must_use]
    pub fn business_category(self) -> Option<BusinessCategory> {
        match self {
            Self::Organization => Some(BusinessCategory::Organization),
            Self::Role => Some(BusinessCategory::Role),
            Self::Member => Some(BusinessCategory::Member),
            Self::Instrument => Some(BusinessCategory::Instrument),
            Self::Contract => Some(BusinessCategory::Contract),
            Self::Wallets => Some(BusinessCategory::Wallet),
            Self::Integration => Some(BusinessCategory::Integration),
            Self::Workflow => Some(BusinessCategory::Workflow),
            Self::Contact => Some(BusinessCategory::Contact),
            Self::AiAgent => Some(BusinessCategory::Agent),
            _ => None,
        }
    }
}

/// Lifecycle status of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Failed,
    Paused,
}

/// The kind of a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionKind {
    Success,
    Failure,
    Conditional,
    Payment,
    /// Default kind for edges drawn with the connect tool.
    #[default]
    Task,
    Data,
    Control,
    Trigger,
}

/// Reference from a node to a concrete business entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub category: BusinessCategory,
    pub id: String,
}

/// A workflow node as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Node type tag.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    /// Lifecycle status.
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    /// Ids of outgoing connections.
    #[serde(default)]
    pub connections: Vec<ConnectionId>,
    /// Open-ended metadata bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    /// Whether a team node shows its member list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    /// Nested member nodes shown by an expanded team node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_nodes: Vec<WorkflowNode>,
    /// Business entity this node stands for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl WorkflowNode {
    /// A bare node of the given kind at `(x, y)` with a fresh id.
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: new_id(),
            kind,
            name: name.into(),
            description: String::new(),
            x,
            y,
            status: NodeStatus::Pending,
            amount: None,
            deadline: None,
            assignees: Vec::new(),
            conditions: Vec::new(),
            connections: Vec::new(),
            metadata: None,
            is_expanded: None,
            child_nodes: Vec::new(),
            entity_ref: None,
            width: None,
            height: None,
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Amount label drawn at the edge midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Sparse update for a node. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialWorkflowNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    /// Metadata keys to merge or remove (null values delete keys).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
}

/// Parse a numeric text field, falling back to 0 on anything unparsable.
#[must_use]
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().map_or(0.0, |v| if v.is_finite() { v } else { 0.0 })
}

/// In-memory store of nodes and connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDoc {
    /// Nodes in draw order; later nodes are drawn on top.
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl WorkflowDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a snapshot, dropping connections whose endpoints
    /// are missing and rebuilding each node's outgoing connection list.
    #[must_use]
    pub fn from_snapshot(nodes: Vec<WorkflowNode>, connections: Vec<Connection>) -> Self {
        let mut doc = Self { nodes, connections: Vec::new() };
        for node in &mut doc.nodes {
            node.connections.clear();
        }
        for conn in connections {
            if doc.contains_node(&conn.from) && doc.contains_node(&conn.to) {
                if let Some(from) = doc.node_mut(&conn.from) {
                    from.connections.push(conn.id.clone());
                }
                doc.connections.push(conn);
            } else {
                tracing::warn!(connection_id = %conn.id, from = %conn.from, to = %conn.to, "dropping dangling connection");
            }
        }
        doc
    }

    /// Insert or replace a node. A node with the same id is overwritten in place.
    pub fn insert_node(&mut self, node: WorkflowNode) {
        if let Some(existing) = self.node_mut(&node.id) {
            *existing = node;
        } else {
            self.nodes.push(node);
        }
    }

    /// Return a reference to a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Return a mutable reference to a node by id.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Find the first node whose name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Return a reference to a connection by id.
    #[must_use]
    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Connections whose `from` or `to` is `id`.
    #[must_use]
    pub fn connections_touching(&self, id: &str) -> Vec<&Connection> {
        self.connections.iter().filter(|c| c.from == id || c.to == id).collect()
    }

    /// Append a connection between two existing nodes.
    ///
    /// Returns `None` when either endpoint is missing. The connection id is
    /// also recorded in the source node's outgoing list.
    pub fn add_connection(&mut self, from: &str, to: &str, kind: ConnectionKind) -> Option<Connection> {
        if !self.contains_node(to) {
            return None;
        }
        let conn = Connection {
            id: new_id(),
            from: from.to_string(),
            to: to.to_string(),
            kind,
            condition: None,
            amount: None,
        };
        let source = self.node_mut(from)?;
        source.connections.push(conn.id.clone());
        self.connections.push(conn.clone());
        Some(conn)
    }

    /// Remove a connection by id, returning it if it was present.
    pub fn remove_connection(&mut self, id: &str) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.id == id)?;
        let conn = self.connections.remove(idx);
        if let Some(source) = self.node_mut(&conn.from) {
            source.connections.retain(|c| c != id);
        }
        Some(conn)
    }

    /// Remove a node and every connection touching it.
    ///
    /// Returns the removed node and the removed connections, or `None` if the
    /// node doesn't exist.
    pub fn remove_node(&mut self, id: &str) -> Option<(WorkflowNode, Vec<Connection>)> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(idx);
        let removed = self.remove_connections_where(|c| c.from == id || c.to == id);
        Some((node, removed))
    }

    /// Remove a set of nodes and every connection touching any of them.
    ///
    /// Ids that don't exist are ignored.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> (Vec<WorkflowNode>, Vec<Connection>) {
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut removed_nodes = Vec::new();
        let mut kept = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.drain(..) {
            if doomed.contains(node.id.as_str()) {
                removed_nodes.push(node);
            } else {
                kept.push(node);
            }
        }
        self.nodes = kept;
        let removed_conns =
            self.remove_connections_where(|c| doomed.contains(c.from.as_str()) || doomed.contains(c.to.as_str()));
        (removed_nodes, removed_conns)
    }

    fn remove_connections_where<F>(&mut self, pred: F) -> Vec<Connection>
    where
        F: Fn(&Connection) -> bool,
    {
        let (removed, kept): (Vec<Connection>, Vec<Connection>) = self.connections.drain(..).partition(pred);
        self.connections = kept;
        if !removed.is_empty() {
            let gone: HashSet<&str> = removed.iter().map(|c| c.id.as_str()).collect();
            for node in &mut self.nodes {
                node.connections.retain(|c| !gone.contains(c.as_str()));
            }
        }
        removed
    }

    /// Apply a partial update to an existing node. Returns false, leaving the
    /// node untouched, if it doesn't exist or `metadata` is not a JSON object.
    pub fn apply_partial(&mut self, id: &str, partial: &PartialWorkflowNode) -> bool {
        let incoming = match partial.metadata {
            Some(ref metadata) => match metadata.as_object() {
                Some(object) => Some(object),
                None => return false,
            },
            None => None,
        };
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if let Some(ref name) = partial.name {
            node.name.clone_from(name);
        }
        if let Some(ref description) = partial.description {
            node.description.clone_from(description);
        }
        if let Some(x) = partial.x {
            node.x = x;
        }
        if let Some(y) = partial.y {
            node.y = y;
        }
        if let Some(status) = partial.status {
            node.status = status;
        }
        if let Some(amount) = partial.amount {
            node.amount = Some(amount);
        }
        if let Some(ref deadline) = partial.deadline {
            node.deadline = Some(deadline.clone());
        }
        if let Some(ref assignees) = partial.assignees {
            node.assignees.clone_from(assignees);
        }
        if let Some(ref conditions) = partial.conditions {
            node.conditions.clone_from(conditions);
        }
        if let Some(expanded) = partial.is_expanded {
            node.is_expanded = Some(expanded);
        }
        if let Some(incoming) = incoming {
            let existing = node.metadata.get_or_insert_with(serde_json::Map::new);
            for (k, v) in incoming {
                if v.is_null() {
                    existing.remove(k);
                } else {
                    existing.insert(k.clone(), v.clone());
                }
            }
        }
        true
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
