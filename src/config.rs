use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback bind address for the HTTP server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Fallback port for the HTTP server
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    pub default_strategy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Create default config
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Read and parse one specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".smarttask").join("config.toml"))
    }

    /// Set the default scoring strategy
    pub fn set_default_strategy(&mut self, name: String) {
        self.scoring.default_strategy = Some(name);
    }

    /// Get the default scoring strategy name
    pub fn get_default_strategy(&self) -> Option<&str> {
        self.scoring.default_strategy.as_deref()
    }

    /// Clear the default scoring strategy
    pub fn clear_default_strategy(&mut self) {
        self.scoring.default_strategy = None;
    }

    /// Bind address for the HTTP server
    pub fn server_host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port for the HTTP server
    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring: ScoringConfig::default(),
            server: ServerConfig::default(),
        }
    }
}
