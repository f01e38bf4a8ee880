//! Runtime configuration for unix-file-picker

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{DialogError, Result};

pub const ENV_MAX_OUTPUT: &str = "FILE_PICKER_MAX_OUTPUT";
pub const ENV_TIMEOUT_SECS: &str = "FILE_PICKER_TIMEOUT_SECS";
pub const ENV_TOOL: &str = "FILE_PICKER_TOOL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Ceiling on captured stdout/stderr per stream (bytes)
    pub max_output_bytes: usize,
    /// Kill the picker after this many seconds (None = wait for the user)
    pub timeout_secs: Option<u64>,
    /// Adapter to try before the built-in priority order
    pub preferred_tool: Option<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            max_output_bytes: 10 * 1024 * 1024, // 10MB
            timeout_secs: None,
            preferred_tool: None,
        }
    }
}

impl DialogConfig {
    /// Defaults overlaid with `FILE_PICKER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_OUTPUT) {
            self.max_output_bytes = parse_var(ENV_MAX_OUTPUT, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = parse_var(ENV_TIMEOUT_SECS, &value)?;
            self.timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(value) = lookup(ENV_TOOL) {
            let value = value.trim();
            self.preferred_tool = (!value.is_empty()).then(|| value.to_string());
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DialogError::Validation(format!("{}={:?}: {}", key, value, e)))
}
