use blockmail_editor::{EditorConfig, Theme, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "blockmail.config.json";

/// Blockmail configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the template store
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Directory holding template JSON files
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Directory compiled HTML is written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Render with the dark theme
    #[serde(default)]
    pub dark_mode: bool,

    /// Maximum number of undo entries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_gateway_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_templates_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.templates_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    /// Theme from config, overridden by a `--dark` flag
    pub fn theme(&self, dark_flag: bool) -> Theme {
        Theme::from_dark_mode(self.dark_mode || dark_flag)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            templates_dir: default_templates_dir(),
            out_dir: default_out_dir(),
            dark_mode: false,
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "gatewayUrl": "https://mail.example.com",
            "templatesDir": "emails",
            "outDir": "build",
            "darkMode": true,
            "historyLimit": 20
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.gateway_url, "https://mail.example.com");
        assert_eq!(config.templates_dir, "emails");
        assert_eq!(config.out_dir, "build");
        assert!(config.dark_mode);
        assert_eq!(config.editor_config().history_limit, 20);
        assert_eq!(config.theme(false), Theme::Dark);
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.gateway_url, "http://localhost:5000");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.theme(false), Theme::Light);
        assert_eq!(config.theme(true), Theme::Dark);
    }
}
