//! Keyword command assistant for the canvas chat panel.
//!
//! Understands a handful of imperative phrases and applies them through a
//! [`CanvasController`]. Anything it can't parse gets the help text. Each
//! reply waits a fixed "thinking" delay first.

#[cfg(test)]
#[path = "assistant_test.rs"]
mod assistant_test;

use std::time::Duration;

use canvas::controller::CanvasController;
use canvas::doc::NodeKind;
use canvas::palette::node_style;

pub const HELP: &str = "I can add nodes (\"add a payment node\"), delete them (\"delete Payroll\"), \
connect them (\"connect Approval to Payroll\"), or list what's on the canvas (\"list nodes\").";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NodeKind),
    Delete(String),
    Connect { from: String, to: String },
    List,
    Help,
}

/// Parse one chat message. Matching is case-insensitive; names keep the
/// user's casing.
#[must_use]
pub fn parse_command(message: &str) -> Command {
    let text = message.trim().trim_end_matches(['.', '!', '?']).trim();
    let lower = text.to_ascii_lowercase();

    if matches!(lower.as_str(), "list" | "list nodes" | "list all nodes" | "show nodes")
        || lower.starts_with("what's on the canvas")
        || lower.starts_with("what is on the canvas")
    {
        return Command::List;
    }

    let Some((verb, _)) = lower.split_once(' ') else {
        return Command::Help;
    };
    let rest = text[verb.len()..].trim();
    let rest_lower = rest.to_ascii_lowercase();

    match verb {
        "add" | "create" => parse_kind(&rest_lower).map_or(Command::Help, Command::Add),
        "delete" | "remove" => match unquote(rest) {
            "" => Command::Help,
            name => Command::Delete(name.to_string()),
        },
        "connect" => {
            let Some(split) = rest_lower.find(" to ") else {
                return Command::Help;
            };
            let (from, to) = (unquote(&rest[..split]), unquote(&rest[split + 4..]));
            if from.is_empty() || to.is_empty() {
                return Command::Help;
            }
            Command::Connect { from: from.to_string(), to: to.to_string() }
        }
        _ => Command::Help,
    }
}

/// "a new payment node" -> Payment, "ai agent" -> AiAgent.
fn parse_kind(words: &str) -> Option<NodeKind> {
    let words: Vec<&str> = words
        .split_whitespace()
        .filter(|w| !matches!(*w, "a" | "an" | "the" | "new" | "node"))
        .collect();
    if words.is_empty() {
        return None;
    }
    words.join("-").parse::<NodeKind>().or_else(|_| words.concat().parse()).ok()
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches(['"', '\'']).trim()
}

/// The chat assistant.
#[derive(Debug, Clone, Copy)]
pub struct Assistant {
    delay: Duration,
}

impl Assistant {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Reply to `message` after the thinking delay, applying any command.
    pub async fn reply<C: CanvasController + ?Sized>(&self, controller: &mut C, message: &str) -> String {
        tokio::time::sleep(self.delay).await;
        let command = parse_command(message);
        tracing::info!(?command, "assistant command");
        execute(controller, &command)
    }
}

/// Apply `command` and describe the outcome.
pub fn execute<C: CanvasController + ?Sized>(controller: &mut C, command: &Command) -> String {
    match command {
        Command::Add(kind) => {
            let label = node_style(*kind).label;
            match controller.add_node(*kind) {
                Some(_) => format!("Added a new {label} node."),
                None => "There's no workflow open.".to_string(),
            }
        }
        Command::Delete(name) => {
            if controller.find_node(name).is_some_and(|id| controller.remove_node(&id)) {
                format!("Deleted \"{name}\".")
            } else {
                format!("I couldn't find a node named \"{name}\".")
            }
        }
        Command::Connect { from, to } => {
            let Some(from_id) = controller.find_node(from) else {
                return format!("I couldn't find a node named \"{from}\".");
            };
            let Some(to_id) = controller.find_node(to) else {
                return format!("I couldn't find a node named \"{to}\".");
            };
            match controller.connect(&from_id, &to_id) {
                Some(_) => format!("Connected \"{from}\" to \"{to}\"."),
                None => format!("I can't connect \"{from}\" to itself."),
            }
        }
        Command::List => {
            let names = controller.node_names();
            if names.is_empty() {
                "The canvas is empty.".to_string()
            } else {
                format!("On the canvas ({}): {}.", names.len(), names.join(", "))
            }
        }
        Command::Help => HELP.to_string(),
    }
}
