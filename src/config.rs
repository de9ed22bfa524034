//! Runtime configuration, loaded from `CASHBOARD_*` environment variables.
//!
//! Unset variables fall back to defaults. Set-but-unparsable values are
//! rejected so a typo in the environment doesn't silently change behavior.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use canvas::engine::EngineCore;
use canvas::workflow::WorkflowState;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
pub const DEFAULT_ASSISTANT_DELAY_MS: u64 = 600;

const VIEWPORT_WIDTH_VAR: &str = "CASHBOARD_VIEWPORT_WIDTH";
const VIEWPORT_HEIGHT_VAR: &str = "CASHBOARD_VIEWPORT_HEIGHT";
const ASSISTANT_DELAY_VAR: &str = "CASHBOARD_ASSISTANT_DELAY_MS";
const GRID_SNAP_VAR: &str = "CASHBOARD_GRID_SNAP";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got `{value}`")]
    Invalid { key: &'static str, value: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Viewport size in CSS pixels, used for canvas-center placement and keyboard zoom.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Fake "thinking" delay before each assistant reply.
    pub assistant_delay_ms: u64,
    /// Force grid snapping on for every opened workflow.
    pub grid_snap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            assistant_delay_ms: DEFAULT_ASSISTANT_DELAY_MS,
            grid_snap: false,
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub viewport_width: Option<f64>,
    pub viewport_height: Option<f64>,
    pub assistant_delay_ms: Option<u64>,
    pub grid_snap: bool,
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable or out-of-range value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable or out-of-range value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            viewport_width: parse_var(&lookup, VIEWPORT_WIDTH_VAR, DEFAULT_VIEWPORT_WIDTH, "a positive number")?,
            viewport_height: parse_var(&lookup, VIEWPORT_HEIGHT_VAR, DEFAULT_VIEWPORT_HEIGHT, "a positive number")?,
            assistant_delay_ms: parse_var(&lookup, ASSISTANT_DELAY_VAR, DEFAULT_ASSISTANT_DELAY_MS, "milliseconds")?,
            grid_snap: match lookup(GRID_SNAP_VAR) {
                Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                    key: GRID_SNAP_VAR,
                    value,
                    expected: "true/false",
                })?,
                None => false,
            },
        };
        config.validate()
    }

    /// Apply command-line overrides, then re-validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an override puts the viewport out of range.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(width) = overrides.viewport_width {
            self.viewport_width = width;
        }
        if let Some(height) = overrides.viewport_height {
            self.viewport_height = height;
        }
        if let Some(delay) = overrides.assistant_delay_ms {
            self.assistant_delay_ms = delay;
        }
        self.grid_snap |= overrides.grid_snap;
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        for (key, value) in [(VIEWPORT_WIDTH_VAR, self.viewport_width), (VIEWPORT_HEIGHT_VAR, self.viewport_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { key, value: value.to_string(), expected: "a positive number" });
            }
        }
        Ok(self)
    }

    /// An engine sized to this viewport with `workflow` loaded.
    #[must_use]
    pub fn open(&self, mut workflow: WorkflowState) -> EngineCore {
        if self.grid_snap {
            workflow.editor.grid_snap = true;
        }
        let mut engine = EngineCore::new();
        engine.set_viewport(self.viewport_width, self.viewport_height);
        engine.load_workflow(workflow);
        engine
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key, value, expected }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
