use crate::cli::Args;
use crate::harness::ServerSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_SERVER_COMMAND: &str = "node index.js";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct YamlConfig {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_command: String,
    pub server_args: Vec<String>,
    pub timeout_secs: u64,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> std::result::Result<Self, String> {
        let yaml_config = YamlConfig::load().unwrap_or_default();

        // Server command: CLI args > env var > YAML config > default
        let server_line = args
            .server
            .clone()
            .or_else(|| env::var("RALLY_SMOKE_SERVER").ok())
            .or(yaml_config.server)
            .unwrap_or_else(|| DEFAULT_SERVER_COMMAND.to_string());

        let mut parts = server_line.split_whitespace().map(str::to_string);
        let server_command = parts
            .next()
            .ok_or_else(|| "Server command must not be empty".to_string())?;
        let server_args: Vec<String> = parts.collect();

        // Timeout: CLI args > env var > YAML config > default
        let timeout_secs = args
            .timeout
            .or_else(|| {
                env::var("RALLY_SMOKE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
            })
            .or(yaml_config.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        // Verbose: CLI flag > env var > YAML config > default
        let verbose = if args.verbose {
            true
        } else {
            match env::var("RALLY_SMOKE_VERBOSE").ok() {
                Some(v) => matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"),
                None => yaml_config.verbose.unwrap_or(false),
            }
        };

        Ok(Config {
            server_command,
            server_args,
            timeout_secs,
            verbose,
        })
    }

    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            command: self.server_command.clone(),
            args: self.server_args.clone(),
            timeout_secs: self.timeout_secs,
            verbose: self.verbose,
        }
    }
}

impl YamlConfig {
    pub fn load() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                let config: YamlConfig = serde_yaml::from_str(&contents).with_context(|| {
                    format!("Failed to parse YAML config file: {}", path.display())
                })?;

                return Ok(config);
            }
        }

        // No config file found, return default
        Ok(YamlConfig::default())
    }

    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".rally-smoke.yaml"));
        paths.push(PathBuf::from(".rally-smoke.yml"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("rally-smoke");
            paths.push(config_dir.join("rally-smoke.yaml"));
            paths.push(config_dir.join("rally-smoke.yml"));
        }

        paths
    }
}
