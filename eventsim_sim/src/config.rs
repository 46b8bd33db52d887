//! Configuration file loader.
//!
//! The file is a list of `key = value` lines:
//!
//! | Key                 | Required | Repeats        | Value                           |
//! |---------------------|----------|----------------|---------------------------------|
//! | `number_of_events`  | yes      | error          | unsigned integer > 0            |
//! | `modules`           | yes      | error          | one or more module names        |
//! | `initial_seed`      | no       | last one wins  | unsigned integer (default: clock) |
//! | `number_of_threads` | no       | last one wins  | unsigned integer (default: 0)   |
//!
//! Blank lines and lines starting with `#` are skipped. Unknown keys are
//! ignored with a warning.

use eventsim_core::SimulationConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Reasons a configuration file is not well-formed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Couldn't open configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The second token of a line was not `=`
    #[error("Unexpected token '{token}' on line {line}")]
    UnexpectedToken { line: usize, token: String },

    /// A key had nothing after the `=`
    #[error("Missing value for {key} on line {line}")]
    MissingValue { line: usize, key: String },

    /// A numeric key had a value that is not an unsigned integer
    #[error("Invalid numeric value '{value}' for {key}")]
    InvalidNumber { key: String, value: String },

    /// A key that may appear once appeared again
    #[error("{0} was defined multiple times")]
    Duplicate(&'static str),

    /// A required key is absent
    #[error("Missing required key {0}")]
    Missing(&'static str),

    /// `number_of_events` was zero
    #[error("number_of_events must be greater than zero")]
    ZeroEvents,
}

/// Reads and parses a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Parses configuration text.
pub fn parse_config(text: &str) -> Result<SimulationConfig, ConfigError> {
    let mut event_count: Option<u64> = None;
    let mut modules: Option<Vec<String>> = None;
    let mut seed: Option<u64> = None;
    let mut workers: usize = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let key = tokens.next().unwrap_or_default();
        match tokens.next() {
            Some("=") => {}
            other => {
                return Err(ConfigError::UnexpectedToken {
                    line: line_no,
                    token: other.unwrap_or_default().to_string(),
                })
            }
        }

        let values: Vec<&str> = tokens.collect();
        let first = values.first().copied().ok_or_else(|| ConfigError::MissingValue {
            line: line_no,
            key: key.to_string(),
        })?;

        match key {
            "number_of_events" => {
                if event_count.is_some() {
                    return Err(ConfigError::Duplicate("Number of events"));
                }
                event_count = Some(parse_number(key, first)?);
            }
            "modules" => {
                if modules.is_some() {
                    return Err(ConfigError::Duplicate("Modules"));
                }
                modules = Some(values.iter().map(|v| v.to_string()).collect());
            }
            "initial_seed" => seed = Some(parse_number(key, first)?),
            "number_of_threads" => workers = parse_number(key, first)?,
            _ => warn!("Ignoring unknown configuration key '{}' on line {}", key, line_no),
        }
    }

    let event_count = event_count.ok_or(ConfigError::Missing("number_of_events"))?;
    if event_count == 0 {
        return Err(ConfigError::ZeroEvents);
    }
    let modules = modules.ok_or(ConfigError::Missing("modules"))?;

    Ok(SimulationConfig {
        event_count,
        seed,
        workers,
        modules,
    })
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, ConfigError> {
    // FromStr accepts a leading '+'
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(key, value));
    }
    value.parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    }
}
