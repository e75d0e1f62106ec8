//! # Configuration Management
//!
//! Server settings for the relay, plus the name-addressable tree the status
//! projection walks.
//!
//! Keys are PascalCase so an existing `settings.json` loads unchanged. Every section
//! is optional in the file and falls back to its defaults.
//!
//! ## Configuration Sources
//! - JSON or TOML files via `from_file()` (chosen by extension)
//! - JSON or TOML strings via `from_json()` / `from_toml()`
//! - Environment overrides via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Settings Tree
//! [`SettingsTree`] is the settings converted to a `serde_json::Value` once at
//! startup. Lookups go one property name at a time, so a path like
//! `Server/MaxPlayers` resolves exactly as the keys appear in the file.

use crate::error::{constants, ProtocolError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, Level};
use uuid::Uuid;

/// Default relay port
pub const DEFAULT_PORT: u16 = 1027;

/// Default player limit
pub const DEFAULT_MAX_PLAYERS: u16 = 8;

/// Complete server settings
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub flip: FlipSettings,

    #[serde(default)]
    pub scenario: ScenarioSettings,

    #[serde(default)]
    pub ban_list: BanListSettings,

    #[serde(default)]
    pub discord: DiscordSettings,

    #[serde(default)]
    pub shines: ShineSettings,

    #[serde(default)]
    pub persist_shines: PersistShineSettings,

    #[serde(default)]
    pub json_api: JsonApiSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a file; `.json` files are parsed as JSON, anything else as TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        debug!(path = %path.display(), "Loading settings");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&contents),
            _ => Self::from_toml(&contents),
        }
    }

    /// Load settings from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse JSON: {e}")))
    }

    /// Load settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_env();
        Ok(settings)
    }

    /// Apply `ODYSSEY_*` environment overrides on top of the current values
    pub fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("ODYSSEY_SERVER_ADDRESS") {
            self.server.address = addr;
        }

        if let Ok(port) = std::env::var("ODYSSEY_SERVER_PORT") {
            if let Ok(val) = port.parse::<u16>() {
                self.server.port = val;
            }
        }

        if let Ok(max_players) = std::env::var("ODYSSEY_MAX_PLAYERS") {
            if let Ok(val) = max_players.parse::<u16>() {
                self.server.max_players = val;
            }
        }
    }

    /// Apply overrides to the default settings
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut settings = Self::default();
        mutator(&mut settings);
        settings
    }

    /// Example settings file content (TOML)
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save settings to a file, using the same extension rule as `from_file`
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::to_string_pretty(self)
                .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?,
            _ => toml::to_string_pretty(self)
                .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?,
        };

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate every section; an empty list means the settings are usable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        errors.extend(self.server.validate());
        errors.extend(self.flip.validate());
        errors.extend(self.ban_list.validate());
        errors.extend(self.discord.validate());
        errors.extend(self.shines.validate());
        errors.extend(self.persist_shines.validate());
        errors.extend(self.json_api.validate());
        errors.extend(self.logging.validate());

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Listener and capacity settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServerSettings {
    /// Bind address without port (e.g. "0.0.0.0")
    pub address: String,

    pub port: u16,

    /// Live clients allowed at once
    pub max_players: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: String::from("0.0.0.0"),
            port: DEFAULT_PORT,
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }
}

impl ServerSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.address.is_empty() {
            errors.push("Server address cannot be empty".to_string());
        } else if self.address.parse::<IpAddr>().is_err() {
            errors.push(format!(
                "Invalid server address: '{}' (expected an IP address such as '0.0.0.0')",
                self.address
            ));
        }

        if self.port == 0 {
            errors.push("Server port must be greater than 0".to_string());
        }

        if self.max_players == 0 {
            errors.push("Max players must be greater than 0".to_string());
        }

        errors
    }
}

/// Whose view is flipped for listed players
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum FlipPov {
    #[default]
    Both,
    #[serde(rename = "Self")]
    SelfOnly,
    Others,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FlipSettings {
    pub enabled: bool,
    pub players: Vec<Uuid>,
    pub pov: FlipPov,
}

impl Default for FlipSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            players: Vec::new(),
            pov: FlipPov::Both,
        }
    }
}

impl FlipSettings {
    pub fn validate(&self) -> Vec<String> {
        let unique: BTreeSet<&Uuid> = self.players.iter().collect();
        if unique.len() != self.players.len() {
            vec!["Flip player list contains duplicate ids".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScenarioSettings {
    pub merge_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct BanListSettings {
    pub enabled: bool,
    pub players: Vec<Uuid>,
    pub ip_addresses: Vec<String>,
    pub stages: Vec<String>,
}

impl BanListSettings {
    pub fn validate(&self) -> Vec<String> {
        self.ip_addresses
            .iter()
            .filter(|ip| ip.parse::<IpAddr>().is_err())
            .map(|ip| format!("Invalid banned IP address: '{ip}'"))
            .collect()
    }

    /// Whether `ip` is on the ban list while banning is enabled
    pub fn is_ip_banned(&self, ip: &IpAddr) -> bool {
        self.enabled
            && self
                .ip_addresses
                .iter()
                .any(|banned| banned.parse::<IpAddr>().ok().as_ref() == Some(ip))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DiscordSettings {
    pub token: Option<String>,
    pub prefix: String,
    pub log_channel: Option<String>,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            token: None,
            prefix: String::from("$"),
            log_channel: None,
        }
    }
}

impl DiscordSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.token.is_some() && self.prefix.is_empty() {
            errors.push("Discord prefix cannot be empty when a token is set".to_string());
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShineSettings {
    pub enabled: bool,
    pub filename: String,
    /// Moon ids never synced between players
    pub excluded: BTreeSet<i32>,
}

impl Default for ShineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: String::from("./moons.json"),
            excluded: BTreeSet::from([496]),
        }
    }
}

impl ShineSettings {
    pub fn validate(&self) -> Vec<String> {
        if self.enabled && self.filename.is_empty() {
            vec!["Shines filename cannot be empty when shines are enabled".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct PersistShineSettings {
    pub enabled: bool,
    pub filename: String,
}

impl Default for PersistShineSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            filename: String::from("./moons.json"),
        }
    }
}

impl PersistShineSettings {
    pub fn validate(&self) -> Vec<String> {
        if self.enabled && self.filename.is_empty() {
            vec!["PersistShines filename cannot be empty when persistence is enabled".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Status API access: each token maps to the permission paths it grants
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct JsonApiSettings {
    pub enabled: bool,
    pub tokens: BTreeMap<String, Vec<String>>,
}

impl JsonApiSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.enabled && self.tokens.is_empty() {
            errors.push("JsonApi is enabled but no tokens are configured".to_string());
        }

        for (token, permissions) in &self.tokens {
            if token.is_empty() {
                errors.push("JsonApi token cannot be empty".to_string());
            }
            for permission in permissions {
                if permission.is_empty() || permission.starts_with('/') || permission.ends_with('/') {
                    errors.push(format!("Invalid JsonApi permission path: '{permission}'"));
                }
            }
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoggingSettings {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            app_name: String::from("odyssey-sync"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Read-only settings addressed by property name, one level at a time
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsTree {
    root: Value,
}

impl SettingsTree {
    /// Snapshot typed settings into a tree
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_value(serde_json::to_value(settings)?)
    }

    /// Wrap an arbitrary JSON object
    ///
    /// # Errors
    /// Returns `ProtocolError::ConfigError` when `root` is not an object
    pub fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(ProtocolError::ConfigError(
                constants::ERR_SETTINGS_NOT_OBJECT.to_string(),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Named property of `node`, if `node` is an object holding it
    pub fn child<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
        node.as_object().and_then(|map| map.get(name))
    }

    /// Follow `segments` from the root
    pub fn lookup<'s, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'s str>,
    {
        segments
            .into_iter()
            .try_fold(&self.root, |node, name| Self::child(node, name))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
