mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::CrewError;
use defaults::*;

/// Environment variable consulted when the config carries no bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level crewbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write logs to `{data_dir}/logs/` with daily rotation.
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_to_file: true,
        }
    }
}

/// Where appointment submissions are kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory only; submissions are lost on restart.
    Memory,
    /// SQLite file at `db_path` (default).
    #[default]
    Sqlite,
}

/// Appointment store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackend,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            db_path: default_db_path(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. An empty Telegram
/// token is filled from `TELEGRAM_BOT_TOKEN`.
pub fn load(path: &str) -> Result<Config, CrewError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CrewError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        parse(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    apply_env_token(&mut config, std::env::var(TELEGRAM_TOKEN_ENV).ok());
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, CrewError> {
    toml::from_str(content).map_err(|e| CrewError::Config(format!("failed to parse config: {e}")))
}

/// Fill the Telegram token from the environment when the file leaves it empty.
///
/// A token in the environment with no `[channel.telegram]` section enables
/// Telegram with default settings.
fn apply_env_token(config: &mut Config, env_token: Option<String>) {
    let Some(token) = env_token.filter(|t| !t.trim().is_empty()) else {
        return;
    };
    match config.channel.telegram {
        Some(ref mut tg) if tg.bot_token.is_empty() => tg.bot_token = token,
        Some(_) => {}
        None => {
            config.channel.telegram = Some(TelegramConfig {
                enabled: true,
                bot_token: token,
                allowed_users: Vec::new(),
            });
        }
    }
}
