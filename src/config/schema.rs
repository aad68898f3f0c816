//! Configuration schema types for `aimg.toml`

use serde::{Deserialize, Serialize};

use crate::models::DisplayOptions;

/// How rendered specs are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document per asset
    #[default]
    Json,
    /// Human-readable summary lines
    Text,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Json, pretty: false }
    }
}

/// Complete aimg.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimgConfig {
    /// Default display options for every render
    #[serde(default)]
    pub display: DisplayOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "display.zoom")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "aimg.toml: '{}' {}", self.field, self.message)
    }
}

impl AimgConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.display.checked_zoom().is_err() {
            errors.push(ConfigValidationError {
                field: "display.zoom".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: AimgConfig = toml::from_str("").unwrap();
        assert_eq!(config.display, DisplayOptions::default());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[display]
draggable = true
navigation = true
popup = true
zoom = 1.25
small = true
monospace = true

[output]
format = "text"
pretty = true
"#;
        let config: AimgConfig = toml::from_str(toml).unwrap();
        assert!(config.display.draggable);
        assert!(config.display.navigation);
        assert!(config.display.popup);
        assert_eq!(config.display.zoom, 1.25);
        assert!(config.display.small);
        assert!(config.display.monospace);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.pretty);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_zoom() {
        let config: AimgConfig = toml::from_str("[display]\nzoom = 0.0").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "display.zoom");
        assert_eq!(errors[0].to_string(), "aimg.toml: 'display.zoom' must be a positive number");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(toml::from_str::<AimgConfig>("[output]\nformat = \"xml\"").is_err());
    }
}
