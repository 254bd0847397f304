//! CLI configuration file (YAML).
//!
//! ```yaml
//! log:
//!   level: info
//!   json: false
//!   components:
//!     chaincall-contract: debug
//! metrics: true
//! ```

use anyhow::{Context, Result};
use chaincall_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub log: LogConfig,
    /// Report call metrics to the global OpenTelemetry meter
    #[serde(default = "bool_true")]
    pub metrics: bool,
}

fn bool_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            metrics: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parse config file '{}'", path.display()))
    }
}
