//! Declarative configuration structs, loadable from TOML.

use serde::{Deserialize, Serialize};

/// Root of a yoot configuration file.
///
/// ```toml
/// [fallback]
/// missing-adapter = "error"
/// pass-through-hosts = ["localhost", "assets.internal"]
///
/// [logging]
/// level = "info"
/// format = "pretty"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    /// What happens when no registered adapter matches a URL
    pub fallback: FallbackConfig,

    /// Log output settings for the command-line tool
    pub logging: LoggingConfig,
}

/// Missing-adapter fallback settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FallbackConfig {
    /// Policy applied to every unmatched URL
    pub missing_adapter: MissingAdapterPolicy,

    /// Hosts served unchanged even under the `error` policy
    pub pass_through_hosts: Vec<String>,
}

/// Policy for URLs no registered adapter supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingAdapterPolicy {
    /// Fail resolution with `NoAdapterFound`
    #[default]
    Error,
    /// Fall back to the pass-through adapter
    PassThrough,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace
    pub level: String,

    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
