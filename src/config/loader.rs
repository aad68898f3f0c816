//! Configuration loading and discovery for `aimg.toml`

use super::schema::{AimgConfig, OutputFormat};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up during discovery
pub const CONFIG_FILE: &str = "aimg.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse aimg.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub draggable: Option<bool>,
    pub navigation: Option<bool>,
    pub popup: Option<bool>,
    pub zoom: Option<f64>,
    pub small: Option<bool>,
    pub monospace: Option<bool>,
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

/// Find aimg.toml by walking up from the current directory, then in the
/// XDG config directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Checks XDG_CONFIG_HOME/assetimage/aimg.toml or ~/.config/assetimage/aimg.toml
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("assetimage").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find aimg.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered aimg.toml.
///
/// Without an explicit path and without a discoverable file the defaults are
/// returned. An explicit path that cannot be read is an error.
pub fn load_config(path: Option<&Path>) -> Result<AimgConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(AimgConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<AimgConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AimgConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration. CLI arguments win.
pub fn merge_cli_overrides(config: &mut AimgConfig, overrides: &CliOverrides) {
    let display = &mut config.display;
    if let Some(draggable) = overrides.draggable {
        display.draggable = draggable;
    }
    if let Some(navigation) = overrides.navigation {
        display.navigation = navigation;
    }
    if let Some(popup) = overrides.popup {
        display.popup = popup;
    }
    if let Some(zoom) = overrides.zoom {
        display.zoom = zoom;
    }
    if let Some(small) = overrides.small {
        display.small = small;
    }
    if let Some(monospace) = overrides.monospace {
        display.monospace = monospace;
    }

    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(pretty) = overrides.pretty {
        config.output.pretty = pretty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[display]\nzoom = 1.0");

        assert_eq!(find_config_from(temp.path().to_path_buf()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("catalog").join("wearables");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        assert_eq!(find_config_from(subdir), Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("assetimage");
        fs::create_dir_all(&dir).expect("should create config dir");
        let config_path = write_config(&dir, "");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r#"
[display]
zoom = 2.0
small = true

[output]
format = "text"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.display.zoom, 2.0);
        assert!(config.display.small);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "this is not valid toml {{{");
        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[display]\nzoom = -1.0");
        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("display.zoom"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides_display() {
        let mut config = AimgConfig::default();
        let overrides = CliOverrides {
            zoom: Some(3.0),
            small: Some(true),
            monospace: Some(true),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.display.zoom, 3.0);
        assert!(config.display.small);
        assert!(config.display.monospace);
        assert!(!config.display.draggable);
    }

    #[test]
    fn test_merge_cli_overrides_output() {
        let mut config = AimgConfig::default();
        let overrides =
            CliOverrides { format: Some(OutputFormat::Text), pretty: Some(true), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_merge_no_overrides_keeps_config() {
        let mut config = AimgConfig::default();
        config.display.popup = true;
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert!(config.display.popup);
        assert_eq!(config.display.zoom, 0.5);
    }
}
