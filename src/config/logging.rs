//! Logging configuration

use serde::Deserialize;

/// Output format of log lines
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Log filter and format
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info,fm_provisioner=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info,fm_provisioner=debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_logging_deserialization() {
        let json = r#"{"level": "warn", "format": "json"}"#;
        let config: LoggingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }
}
