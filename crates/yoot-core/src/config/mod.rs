//! Configuration for adapter resolution.
//!
//! Configuration is in-process: a [`Config`] holds the hook consulted when no
//! registered adapter matches a URL. A [`ConfigFile`] can be loaded from TOML
//! to express the common fallback policies declaratively; loading is never
//! implicit.

mod types;
mod validate;

pub use types::*;

use crate::adapter::{pass_through_adapter, Adapter};
use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Called when no registered adapter supports a URL. Returning `None`
/// lets resolution fail with `NoAdapterFound`.
pub type MissingAdapterHook = Arc<dyn Fn(&Url) -> Option<Arc<dyn Adapter>> + Send + Sync>;

/// Resolution configuration.
#[derive(Clone, Default)]
pub struct Config {
    /// Fallback hook for unmatched URLs
    pub on_missing_adapter: Option<MissingAdapterHook>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-adapter hook.
    pub fn on_missing_adapter(
        mut self,
        hook: impl Fn(&Url) -> Option<Arc<dyn Adapter>> + Send + Sync + 'static,
    ) -> Self {
        self.on_missing_adapter = Some(Arc::new(hook));
        self
    }

    /// Shallow merge: fields set in `other` replace those in `self`.
    pub fn merge(&self, other: &Config) -> Config {
        Config {
            on_missing_adapter: other
                .on_missing_adapter
                .clone()
                .or_else(|| self.on_missing_adapter.clone()),
        }
    }

    /// Build the in-process configuration described by a config file.
    pub fn from_file(file: &ConfigFile) -> Self {
        let fallback = &file.fallback;
        match fallback.missing_adapter {
            MissingAdapterPolicy::PassThrough => {
                Self::new().on_missing_adapter(|_| Some(pass_through_adapter()))
            }
            MissingAdapterPolicy::Error if fallback.pass_through_hosts.is_empty() => Self::new(),
            MissingAdapterPolicy::Error => {
                let hosts: Vec<String> = fallback
                    .pass_through_hosts
                    .iter()
                    .map(|h| h.trim().to_ascii_lowercase())
                    .collect();
                Self::new().on_missing_adapter(move |url| {
                    let host = url.host_str()?;
                    hosts
                        .iter()
                        .any(|h| h == host)
                        .then(pass_through_adapter)
                })
            }
        }
    }

    /// Parse and validate a TOML configuration string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.validate()?;
        Ok(Self::from_file(&file))
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::from_file(&ConfigFile::load_from(path)?))
    }

    /// Load configuration from the default path, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::from_file(&ConfigFile::load()?))
    }
}

impl ConfigFile {
    /// Load from the default path if it exists, otherwise use defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading yoot config");
        let file: ConfigFile = toml::from_str(&content)?;
        file.validate()?;
        Ok(file)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/dev.yoot.yoot/config.toml
    /// - Linux: ~/.config/yoot/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\yoot\config\config.toml
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "yoot", "yoot")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".yoot").join("config.toml")
            })
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("on_missing_adapter", &self.on_missing_adapter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_default_config_has_no_hook() {
        assert!(Config::default().on_missing_adapter.is_none());
    }

    #[test]
    fn test_merge_keeps_existing_hook_when_other_unset() {
        let base = Config::new().on_missing_adapter(|_| Some(pass_through_adapter()));
        let merged = base.merge(&Config::new());
        assert!(merged.on_missing_adapter.is_some());
    }

    #[test]
    fn test_merge_replaces_hook() {
        let base = Config::new().on_missing_adapter(|_| Some(pass_through_adapter()));
        let merged = base.merge(&Config::new().on_missing_adapter(|_| None));
        let hook = merged.on_missing_adapter.unwrap();
        assert!(hook(&url("https://foo.com")).is_none());
    }

    #[test]
    fn test_from_toml_pass_through_policy() {
        let config = Config::from_toml_str(
            r#"
            [fallback]
            missing-adapter = "pass-through"
            "#,
        )
        .unwrap();
        let hook = config.on_missing_adapter.unwrap();
        let adapter = hook(&url("https://unknown.test/a.jpg")).unwrap();
        assert_eq!(adapter.name(), "pass-through");
    }

    #[test]
    fn test_from_toml_error_policy_with_hosts() {
        let config = Config::from_toml_str(
            r#"
            [fallback]
            missing-adapter = "error"
            pass-through-hosts = ["localhost"]
            "#,
        )
        .unwrap();
        let hook = config.on_missing_adapter.unwrap();
        assert!(hook(&url("http://localhost:3000/a.jpg")).is_some());
        assert!(hook(&url("https://elsewhere.test/a.jpg")).is_none());
    }

    #[test]
    fn test_from_toml_empty_is_error_policy() {
        let config = Config::from_toml_str("").unwrap();
        assert!(config.on_missing_adapter.is_none());
    }

    #[test]
    fn test_from_toml_rejects_unknown_policy() {
        let err = Config::from_toml_str(
            r#"
            [fallback]
            missing-adapter = "retry"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fallback]\nmissing-adapter = \"pass-through\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert!(config.on_missing_adapter.is_some());
    }

    #[test]
    fn test_config_file_toml_round_trip() {
        let file = ConfigFile {
            fallback: FallbackConfig {
                missing_adapter: MissingAdapterPolicy::PassThrough,
                pass_through_hosts: vec!["localhost".into()],
            },
            ..Default::default()
        };
        let toml = file.to_toml().unwrap();
        assert!(toml.contains("missing-adapter = \"pass-through\""));
        let parsed: ConfigFile = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_load_from_rejects_invalid_hosts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fallback]\npass-through-hosts = [\"\"]").unwrap();
        let err = ConfigFile::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        assert!(ConfigFile::default_path().ends_with("config.toml"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
