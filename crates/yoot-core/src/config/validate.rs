//! Configuration file validation.

use crate::error::ConfigError;

use super::ConfigFile;

impl ConfigFile {
    /// Validate configuration values.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for host in &self.fallback.pass_through_hosts {
            if host.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "fallback.pass-through-hosts must not contain empty entries".into(),
                ));
            }
            if host.contains('/') || host.contains(':') {
                return Err(ConfigError::ValidationError(format!(
                    "fallback.pass-through-hosts entry {host:?} must be a bare hostname"
                )));
            }
        }

        const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got {:?}",
                LEVELS.join(", "),
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_passes_validation() {
        assert!(ConfigFile::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut file = ConfigFile::default();
        file.fallback.pass_through_hosts = vec!["localhost".into(), "  ".into()];
        let err = file.validate().unwrap_err();
        assert!(err.to_string().contains("pass-through-hosts"));
    }

    #[test]
    fn test_validate_rejects_urls_as_hosts() {
        let mut file = ConfigFile::default();
        file.fallback.pass_through_hosts = vec!["https://localhost".into()];
        let err = file.validate().unwrap_err();
        assert!(err.to_string().contains("bare hostname"));
    }

    #[test]
    fn test_validate_logging() {
        let mut file = ConfigFile::default();
        file.logging.level = "verbose".into();
        assert!(file.validate().unwrap_err().to_string().contains("logging.level"));

        let mut file = ConfigFile::default();
        file.logging.format = "xml".into();
        assert!(file.validate().unwrap_err().to_string().contains("logging.format"));
    }
}
