//! Portal Configuration
//!
//! A TOML file (first hit among the user config dir, `/etc/mediculture`, and
//! the working directory) with `MEDICULTURE_*` variables layered on top.
//! Every section and key is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backend::BackendConfig;
use crate::session::{DoctorProfile, SessionLimits};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendSettings,

    /// Demo doctor handed out at login
    #[serde(default)]
    pub session: DoctorProfile,

    #[serde(default)]
    pub session_limits: SessionLimits,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Portal server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Clinic backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_health_timeout")]
    pub health_timeout_ms: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_backend_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_health_timeout() -> u64 {
    5_000
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            health_timeout_ms: default_health_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl BackendSettings {
    /// Client configuration for these settings
    pub fn client_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.url.clone(),
            health_timeout_ms: self.health_timeout_ms,
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// `tracing-subscriber` setup
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether logs should be emitted as JSON lines
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Parse one TOML file, without env overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus `MEDICULTURE_*` overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First readable config file, else `from_env`. A broken file is logged and skipped.
    pub fn load_default() -> Self {
        let candidates = [
            dirs::config_dir().map(|dir| dir.join("mediculture").join("config.toml")),
            Some(PathBuf::from("/etc/mediculture/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in candidates.iter().flatten().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded portal config");
                    return config;
                }
                Err(e) => tracing::warn!(path = %path.display(), "Skipping config file: {}", e),
            }
        }

        tracing::info!("No config file found, using defaults and environment");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("MEDICULTURE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("MEDICULTURE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(url) = var("MEDICULTURE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(ms) = var("MEDICULTURE_BACKEND_TIMEOUT_MS") {
            if let Ok(ms) = ms.parse() {
                self.backend.request_timeout_ms = ms;
            }
        }

        if let Some(minutes) = var("MEDICULTURE_SESSION_IDLE_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.session_limits.idle_timeout_minutes = minutes;
            }
        }
        if let Some(max) = var("MEDICULTURE_MAX_SESSIONS") {
            if let Ok(max) = max.parse() {
                self.session_limits.max_sessions = max;
            }
        }

        if let Some(level) = var("MEDICULTURE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MEDICULTURE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Commented config file matching `Config::default()`, written by `mediculture-cli config`
pub fn generate_default_config() -> String {
    r#"# Mediculture Doctor Portal Configuration
#
# Environment variables override these settings:
# - MEDICULTURE_HOST
# - MEDICULTURE_PORT
# - MEDICULTURE_BACKEND_URL
# - MEDICULTURE_BACKEND_TIMEOUT_MS
# - MEDICULTURE_SESSION_IDLE_MINUTES
# - MEDICULTURE_MAX_SESSIONS
# - MEDICULTURE_LOG_LEVEL
# - MEDICULTURE_LOG_FORMAT

[server]
# Portal server host
host = "0.0.0.0"

# Portal server port
port = 8082

[backend]
# Clinic backend base URL, including the /api prefix
url = "http://localhost:3000/api"

# Health check timeout (ms)
health_timeout_ms = 5000

# Timeout for all other backend calls (ms)
request_timeout_ms = 10000

[session]
# Demo doctor used for every login
id = "doc_001"
name = "Dr. Sarah Mitchell"
email = "sarah.mitchell@mediculture.com"
specialization = "Internal Medicine"
license = "MD12345"
experience = "8 years"
hospital = "Mediculture General Hospital"
firebase_uid = "doctor_demo_uid"

[session_limits]
# Logins expire after this long without a request
idle_timeout_minutes = 480

# Oldest idle session is evicted beyond this many
max_sessions = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
