mod assistant;
mod config;
mod demo;
mod directory;
mod script;
mod seed;

use std::path::PathBuf;
use std::time::Duration;

use canvas::catalog::{BusinessCategory, EntityDirectory};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use crate::assistant::Assistant;
use crate::config::{Config, ConfigError, Overrides};
use crate::directory::StaticDirectory;
use crate::script::{Script, ScriptError};
use crate::seed::SeedError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("unknown entity category `{0}`")]
    UnknownCategory(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cashboard", about = "Cashboard workflow canvas: seeds, replay, and chat")]
struct Cli {
    /// Viewport width in CSS pixels (overrides CASHBOARD_VIEWPORT_WIDTH).
    #[arg(long, global = true)]
    viewport_width: Option<f64>,

    /// Viewport height in CSS pixels (overrides CASHBOARD_VIEWPORT_HEIGHT).
    #[arg(long, global = true)]
    viewport_height: Option<f64>,

    /// Assistant thinking delay (overrides CASHBOARD_ASSISTANT_DELAY_MS).
    #[arg(long, global = true)]
    assistant_delay_ms: Option<u64>,

    /// Force grid snapping on.
    #[arg(long, global = true)]
    grid_snap: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List bundled seed workflows.
    Seeds,
    /// Print a seed workflow as JSON.
    Show { seed: String },
    /// Replay a JSON event script and print the resulting workflow.
    Replay {
        script: PathBuf,
        /// Include every emitted action in the output.
        #[arg(long)]
        actions: bool,
    },
    /// Run the end-to-end walkthrough and print each step.
    Demo,
    /// Send messages to the command assistant.
    Chat {
        seed: String,
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// List business entities available to the entity picker.
    Entities { category: Option<String> },
}

#[derive(Debug, Serialize)]
struct ChatTurn {
    message: String,
    reply: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(Overrides {
        viewport_width: cli.viewport_width,
        viewport_height: cli.viewport_height,
        assistant_delay_ms: cli.assistant_delay_ms,
        grid_snap: cli.grid_snap,
    })?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Seeds => run_seeds(),
        Command::Show { seed: name } => print_json(&serde_json::to_value(seed::load(&name)?)?),
        Command::Replay { script, actions } => run_replay(&config, &script, actions),
        Command::Demo => print_json(&serde_json::to_value(demo::run(&config)?)?),
        Command::Chat { seed: name, messages } => run_chat(&config, &name, &messages).await,
        Command::Entities { category } => run_entities(category.as_deref()),
    }
}

fn run_seeds() -> Result<(), CliError> {
    let mut rows = Vec::new();
    for name in seed::names() {
        let workflow = seed::load(name)?;
        rows.push(json!({
            "name": name,
            "title": workflow.name,
            "nodes": workflow.doc.len(),
            "connections": workflow.doc.connections.len(),
        }));
    }
    print_json(&Value::Array(rows))
}

fn run_replay(config: &Config, path: &std::path::Path, include_actions: bool) -> Result<(), CliError> {
    let script = Script::from_path(path)?;
    let outcome = script.replay(config, &StaticDirectory)?;
    let mut value = json!({
        "workflow": outcome.workflow,
        "zoom": outcome.zoom,
        "panX": outcome.pan_x,
        "panY": outcome.pan_y,
        "actionCount": outcome.actions.len(),
    });
    if include_actions && let Some(object) = value.as_object_mut() {
        object.insert("actions".into(), serde_json::to_value(&outcome.actions)?);
    }
    print_json(&value)
}

async fn run_chat(config: &Config, seed_name: &str, messages: &[String]) -> Result<(), CliError> {
    let mut engine = config.open(seed::load(seed_name)?);
    let assistant = Assistant::new(Duration::from_millis(config.assistant_delay_ms));
    let mut turns = Vec::with_capacity(messages.len());
    for message in messages {
        let reply = assistant.reply(&mut engine, message).await;
        turns.push(ChatTurn { message: message.clone(), reply });
    }
    print_json(&json!({ "turns": turns, "workflow": engine.close_workflow() }))
}

fn run_entities(category: Option<&str>) -> Result<(), CliError> {
    let categories: Vec<BusinessCategory> = match category {
        None => BusinessCategory::iter().collect(),
        Some(name) => {
            let found = BusinessCategory::iter().find(|c| c.as_ref().eq_ignore_ascii_case(name));
            vec![found.ok_or_else(|| CliError::UnknownCategory(name.to_string()))?]
        }
    };
    let mut out = Map::new();
    for category in categories {
        out.insert(category.as_ref().to_string(), serde_json::to_value(StaticDirectory.entities(category))?);
    }
    print_json(&Value::Object(out))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
