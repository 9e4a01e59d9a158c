use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window sizes the transport refuses before calling the analyzer.
    pub rejected_minutes: Vec<i64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            rejected_minutes: vec![123],
        }
    }
}

impl WindowConfig {
    pub fn is_rejected(&self, minutes: i64) -> bool {
        self.rejected_minutes.contains(&minutes)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub server: ServerConfig,
    pub window: WindowConfig,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::read(path)?,
            _ => AnalyzerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn read(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config: {}", err))?;
        toml::from_str(&contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("ANALYZER_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("ANALYZER_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                self.server.port = value;
            }
        }
        if let Ok(rejected) = env::var("ANALYZER_REJECTED_WINDOWS") {
            if let Some(values) = parse_window_list(&rejected) {
                self.window.rejected_minutes = values;
            }
        }
    }
}

/// Parses a comma-separated list such as `"123, 456"`. An empty string
/// yields an empty list; any malformed entry rejects the whole value.
pub fn parse_window_list(value: &str) -> Option<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().ok())
        .collect()
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYZER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analyzer.toml")))
}
