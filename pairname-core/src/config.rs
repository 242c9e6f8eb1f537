use crate::executor::DEFAULT_MAX_SUFFIX;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".pairname";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", "json" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Append an execution log to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Highest " (k)" suffix tried before giving up on a name
    #[serde(default = "default_max_suffix")]
    pub max_suffix: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
            log_file: None,
            max_suffix: DEFAULT_MAX_SUFFIX,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_max_suffix() -> u32 {
    DEFAULT_MAX_SUFFIX
}

impl Config {
    /// Load config from .pairname/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.use_color, None);
        assert_eq!(config.defaults.log_file, None);
        assert_eq!(config.defaults.max_suffix, DEFAULT_MAX_SUFFIX);
    }

    #[test]
    fn test_load_config_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_DIR).join("config.toml");

        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(
            &config_path,
            r#"
[defaults]
preview_format = "summary"
use_color = false
log_file = "logs/pairname.log"
max_suffix = 50
"#,
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.defaults.preview_format, "summary");
        assert_eq!(loaded.defaults.use_color, Some(false));
        assert_eq!(
            loaded.defaults.log_file,
            Some(PathBuf::from("logs/pairname.log"))
        );
        assert_eq!(loaded.defaults.max_suffix, 50);
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
preview_format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.preview_format, "json");
        assert_eq!(config.defaults.max_suffix, DEFAULT_MAX_SUFFIX);
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[defaults\npreview_format = 1").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
