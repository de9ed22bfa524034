//! Visual identity of node kinds: label, icon, color, and palette group.
//!
//! Every lookup here is a single exhaustive `match`, so adding a `NodeKind`
//! variant fails to compile until its row is added. Colors are Tailwind
//! color tokens (`"yellow-400"`); icons are lucide icon names.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::Serialize;

use crate::camera::Point;
use crate::consts::DEFAULT_PAYMENT_AMOUNT;
use crate::doc::{ConnectionKind, NodeKind, NodeStatus, WorkflowNode};
use crate::workflow::WorkflowStatus;

/// Palette section a node kind is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteGroup {
    Basic,
    Business,
    Operations,
    Integration,
    Communication,
    Logic,
    Process,
    Social,
}

/// How a node kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub group: PaletteGroup,
}

const fn row(label: &'static str, icon: &'static str, color: &'static str, group: PaletteGroup) -> NodeStyle {
    NodeStyle { label, icon, color, group }
}

/// Style row for a node kind.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn node_style(kind: NodeKind) -> NodeStyle {
    use PaletteGroup::*;

    match kind {
        NodeKind::Payment => row("Payment", "dollar-sign", "yellow-400", Basic),
        NodeKind::Contract => row("Contract", "file-text", "blue-400", Basic),
        NodeKind::Task => row("Task", "target", "green-400", Basic),
        NodeKind::Decision => row("Decision", "alert-triangle", "purple-400", Basic),
        NodeKind::Milestone => row("Milestone", "check-circle", "indigo-400", Basic),
        NodeKind::Team => row("Team", "users", "pink-400", Basic),
        NodeKind::Kpi => row("KPI", "bar-chart-3", "sky-400", Operations),
        NodeKind::Employee => row("Employee", "user", "cyan-300", Operations),
        NodeKind::Deliverable => row("Deliverable", "package", "lime-400", Operations),
        NodeKind::Asset => row("Asset", "gem", "emerald-300", Operations),
        NodeKind::Mint => row("Mint", "coins", "amber-300", Operations),
        NodeKind::Payroll => row("Payroll", "banknote", "green-300", Operations),
        NodeKind::Production => row("Production", "factory", "stone-400", Operations),
        NodeKind::Marketing => row("Marketing", "megaphone", "rose-400", Operations),
        NodeKind::Sales => row("Sales", "trending-up", "orange-300", Operations),
        NodeKind::Legal => row("Legal", "scale", "slate-300", Operations),
        NodeKind::Finance => row("Finance", "landmark", "emerald-400", Operations),
        NodeKind::Hr => row("HR", "user-check", "fuchsia-300", Operations),
        NodeKind::It => row("IT", "monitor", "blue-300", Operations),
        NodeKind::Operations => row("Operations", "settings", "zinc-400", Operations),
        NodeKind::Api => row("API Call", "globe", "blue-500", Integration),
        NodeKind::Database => row("Database", "database", "gray-400", Integration),
        NodeKind::Loop => row("Loop", "refresh-cw", "blue-600", Logic),
        NodeKind::Condition => row("Condition", "git-branch", "purple-500", Logic),
        NodeKind::Trigger => row("Trigger", "zap", "yellow-500", Logic),
        NodeKind::Webhook => row("Webhook", "link", "teal-400", Integration),
        NodeKind::Email => row("Email", "mail", "red-400", Communication),
        NodeKind::Sms => row("SMS", "message-square", "green-500", Communication),
        NodeKind::Notification => row("Notification", "bell", "yellow-500", Communication),
        NodeKind::Approval => row("Approval", "check-square", "green-600", Process),
        NodeKind::Review => row("Review", "eye", "orange-500", Process),
        NodeKind::Timer => row("Timer", "clock", "slate-400", Process),
        NodeKind::Counter => row("Counter", "hash", "gray-300", Logic),
        NodeKind::Calculator => row("Calculator", "calculator", "gray-300", Logic),
        NodeKind::Transformer => row("Transformer", "shuffle", "violet-300", Logic),
        NodeKind::Validator => row("Validator", "shield-check", "green-300", Logic),
        NodeKind::Aggregator => row("Aggregator", "layers", "blue-300", Logic),
        NodeKind::Filter => row("Filter", "filter", "teal-300", Logic),
        NodeKind::Sorter => row("Sorter", "arrow-up-down", "indigo-300", Logic),
        NodeKind::Merger => row("Merger", "git-merge", "purple-300", Logic),
        NodeKind::Splitter => row("Splitter", "split", "amber-400", Logic),
        NodeKind::Gateway => row("Gateway", "door-open", "cyan-400", Integration),
        NodeKind::Service => row("Service", "server", "slate-400", Integration),
        NodeKind::Function => row("Function", "code", "violet-400", Integration),
        NodeKind::Script => row("Script", "terminal", "gray-400", Integration),
        NodeKind::Organization => row("Organizations", "building", "orange-400", Business),
        NodeKind::Role => row("Roles", "crown", "amber-400", Business),
        NodeKind::Member => row("People", "user-check", "cyan-400", Business),
        NodeKind::Instrument => row("Instruments", "banknote", "emerald-400", Business),
        NodeKind::Integration => row("Integrations", "plug", "violet-400", Business),
        NodeKind::Switch => row("Switch", "git-branch", "indigo-500", Logic),
        NodeKind::Router => row("Router", "router", "cyan-500", Logic),
        NodeKind::Delay => row("Delay", "clock", "amber-400", Logic),
        NodeKind::Queue => row("Queue", "layers", "gray-500", Logic),
        NodeKind::Batch => row("Batch", "package", "orange-400", Logic),
        NodeKind::Parallel => row("Parallel", "copy", "blue-400", Logic),
        NodeKind::Sequence => row("Sequence", "arrow-right", "green-400", Logic),
        NodeKind::Retry => row("Retry", "refresh-cw", "red-400", Logic),
        NodeKind::AiAgent => row("Agents", "bot", "blue-500", Business),
        NodeKind::Instagram => row("Instagram", "users", "pink-500", Social),
        NodeKind::Snapchat => row("Snapchat", "message-square", "yellow-400", Social),
        NodeKind::Threads => row("Threads", "message-square", "gray-800", Social),
        NodeKind::Twitter => row("Twitter/X", "message-square", "blue-400", Social),
        NodeKind::Facebook => row("Facebook", "users", "blue-600", Social),
        NodeKind::Linkedin => row("LinkedIn", "users", "blue-700", Social),
        NodeKind::Tiktok => row("TikTok", "play", "red-500", Social),
        NodeKind::Youtube => row("YouTube", "play", "red-500", Social),
        NodeKind::Discord => row("Discord", "message-square", "indigo-500", Social),
        NodeKind::Telegram => row("Telegram", "send", "blue-500", Social),
        NodeKind::Whatsapp => row("WhatsApp", "message-square", "green-500", Social),
        NodeKind::Reddit => row("Reddit", "message-square", "orange-600", Social),
        NodeKind::Voice => row("Voice Call", "play", "purple-500", Communication),
        NodeKind::Elevenlabs => row("ElevenLabs", "play", "purple-600", Integration),
        NodeKind::Midjourney => row("MidJourney", "palette", "blue-500", Integration),
        NodeKind::Veo3 => row("Veo3", "play-circle", "red-500", Integration),
        NodeKind::Openai => row("OpenAI", "bot", "green-600", Integration),
        NodeKind::Anthropic => row("Anthropic", "bot", "orange-500", Integration),
        NodeKind::Stability => row("Stability AI", "palette", "purple-400", Integration),
        NodeKind::Runway => row("Runway ML", "play-circle", "green-500", Integration),
        NodeKind::Replicate => row("Replicate", "refresh-cw", "blue-600", Integration),
        NodeKind::Huggingface => row("Hugging Face", "bot", "yellow-500", Integration),
        NodeKind::Cohere => row("Cohere", "bot", "teal-500", Integration),
        NodeKind::Perplexity => row("Perplexity", "bot", "indigo-600", Integration),
        NodeKind::Salesforce => row("Salesforce", "building", "blue-600", Integration),
        NodeKind::Hubspot => row("HubSpot", "trending-up", "orange-500", Integration),
        NodeKind::Pipedrive => row("Pipedrive", "target", "green-600", Integration),
        NodeKind::Googlesheets => row("Google Sheets", "grid", "green-500", Integration),
        NodeKind::Excel => row("Excel", "bar-chart-3", "green-700", Integration),
        NodeKind::Airtable => row("Airtable", "database", "yellow-600", Integration),
        NodeKind::Notion => row("Notion", "file-text", "gray-600", Integration),
        NodeKind::Stripe => row("Stripe", "credit-card", "purple-600", Integration),
        NodeKind::Paypal => row("PayPal", "dollar-sign", "blue-500", Integration),
        NodeKind::Square => row("Square", "credit-card", "gray-700", Integration),
        NodeKind::Slack => row("Slack", "message-square", "purple-500", Integration),
        NodeKind::Teams => row("Microsoft Teams", "users", "blue-500", Integration),
        NodeKind::Zoom => row("Zoom", "play-circle", "blue-400", Integration),
        NodeKind::Wallets => row("Wallets", "wallet", "green-500", Business),
        NodeKind::Workflow => row("Workflows", "target", "indigo-500", Business),
        NodeKind::Contact => row("Contact", "user", "blue-300", Business),
    }
}

/// Kinds offered in the node palette, in display order.
pub const PALETTE: &[NodeKind] = &[
    NodeKind::Task,
    NodeKind::Decision,
    NodeKind::Payment,
    NodeKind::Milestone,
    NodeKind::Contract,
    NodeKind::Team,
    NodeKind::Workflow,
    NodeKind::Organization,
    NodeKind::Role,
    NodeKind::AiAgent,
    NodeKind::Member,
    NodeKind::Instrument,
    NodeKind::Wallets,
    NodeKind::Integration,
    NodeKind::Contact,
    NodeKind::Api,
    NodeKind::Database,
    NodeKind::Webhook,
    NodeKind::Elevenlabs,
    NodeKind::Midjourney,
    NodeKind::Veo3,
    NodeKind::Openai,
    NodeKind::Anthropic,
    NodeKind::Stability,
    NodeKind::Runway,
    NodeKind::Replicate,
    NodeKind::Huggingface,
    NodeKind::Cohere,
    NodeKind::Perplexity,
    NodeKind::Email,
    NodeKind::Sms,
    NodeKind::Notification,
    NodeKind::Voice,
    NodeKind::Loop,
    NodeKind::Condition,
    NodeKind::Trigger,
    NodeKind::Switch,
    NodeKind::Router,
    NodeKind::Delay,
    NodeKind::Queue,
    NodeKind::Batch,
    NodeKind::Parallel,
    NodeKind::Sequence,
    NodeKind::Retry,
    NodeKind::Approval,
    NodeKind::Review,
    NodeKind::Timer,
    NodeKind::Instagram,
    NodeKind::Snapchat,
    NodeKind::Threads,
    NodeKind::Twitter,
    NodeKind::Facebook,
    NodeKind::Linkedin,
    NodeKind::Tiktok,
    NodeKind::Youtube,
    NodeKind::Discord,
    NodeKind::Telegram,
    NodeKind::Whatsapp,
    NodeKind::Reddit,
    NodeKind::Salesforce,
    NodeKind::Hubspot,
    NodeKind::Pipedrive,
    NodeKind::Googlesheets,
    NodeKind::Excel,
    NodeKind::Airtable,
    NodeKind::Notion,
    NodeKind::Stripe,
    NodeKind::Paypal,
    NodeKind::Square,
    NodeKind::Slack,
    NodeKind::Teams,
    NodeKind::Zoom,
];

/// Palette kinds belonging to `group`, in display order.
#[must_use]
pub fn palette_group(group: PaletteGroup) -> Vec<NodeKind> {
    PALETTE.iter().copied().filter(|k| node_style(*k).group == group).collect()
}

/// Indicator color for a node status.
#[must_use]
pub fn status_color(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Pending => "yellow-500",
        NodeStatus::Active => "green-500",
        NodeStatus::Completed => "blue-500",
        NodeStatus::Failed => "red-500",
        NodeStatus::Paused => "gray-500",
    }
}

/// Stroke color for a connection kind.
#[must_use]
pub fn connection_color(kind: ConnectionKind) -> &'static str {
    match kind {
        ConnectionKind::Success => "green-400",
        ConnectionKind::Failure => "red-400",
        ConnectionKind::Conditional => "purple-400",
        ConnectionKind::Payment => "yellow-400",
        ConnectionKind::Task => "blue-400",
        ConnectionKind::Data => "cyan-400",
        ConnectionKind::Control => "gray-400",
        ConnectionKind::Trigger => "orange-400",
    }
}

/// Badge color for a workflow run status.
#[must_use]
pub fn workflow_status_color(status: WorkflowStatus) -> &'static str {
    match status {
        WorkflowStatus::Running => "green-500",
        WorkflowStatus::Paused => "yellow-500",
        WorkflowStatus::Stopped => "gray-500",
    }
}

/// Style row for a node type string, as used by hosts that only have the wire tag.
#[must_use]
pub fn style_for_type(type_tag: &str) -> Option<NodeStyle> {
    match type_tag.parse::<NodeKind>() {
        Ok(kind) => Some(node_style(kind)),
        Err(_) => None,
    }
}

/// A freshly placed palette node with placeholder text.
///
/// Status starts `pending`; payment nodes carry the default amount and team
/// nodes start collapsed.
#[must_use]
pub fn placeholder_node(kind: NodeKind, at: Point) -> WorkflowNode {
    let style = node_style(kind);
    let mut node = WorkflowNode::new(kind, format!("New {}", style.label), at.x, at.y);
    node.description = format!("{} node", style.label);
    match kind {
        NodeKind::Payment => node.amount = Some(DEFAULT_PAYMENT_AMOUNT),
        NodeKind::Team => node.is_expanded = Some(false),
        _ => {}
    }
    node
}
