use serde::Deserialize;

use crate::error::{AppError, Result};

/// Environment variable that overrides `security.signature_key`.
pub const SIGNATURE_KEY_ENV: &str = "SEALBOX_SIGNATURE_KEY";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http: HttpCfg,
    #[serde(default)]
    pub keys: KeyCfg,
    pub security: SecurityCfg,
    #[serde(default)]
    pub logging: LogCfg,
}

#[derive(Debug, Deserialize)]
pub struct HttpCfg {
    pub port: u16,
    /// Mounts the plaintext debug endpoints when enabled
    #[serde(default)]
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyCfg {
    pub private_key_path: String,
    pub public_key_path: String,
}

impl Default for KeyCfg {
    fn default() -> Self {
        Self {
            private_key_path: "keys/private_key.pem".to_string(),
            public_key_path: "keys/public_key.pem".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SecurityCfg {
    /// Shared HMAC signing secret. There is no compiled-in fallback:
    /// startup fails when it is missing or blank.
    #[serde(default)]
    pub signature_key: Option<String>,

    /// Tolerated clock drift for the replay guard
    #[serde(default = "default_replay_window")]
    pub replay_window_secs: i64,
}

fn default_replay_window() -> i64 {
    sealbox_core::replay::DEFAULT_WINDOW_SECS
}

#[derive(Debug, Deserialize)]
pub struct LogCfg {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. A `SEALBOX_SIGNATURE_KEY`
    /// environment variable overrides the file value, so deployments
    /// can keep the secret out of the config file entirely.
    pub fn load(config_path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(config_path)
            .map_err(|e| AppError::Config(format!("cannot read {config_path}: {e}")))?;
        let mut settings: Settings = toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("cannot parse {config_path}: {e}")))?;

        if let Ok(key) = std::env::var(SIGNATURE_KEY_ENV) {
            settings.security.signature_key = Some(key);
        }

        settings.ensure_signature_key()?;
        Ok(settings)
    }

    /// Fail closed when no signing secret was supplied.
    fn ensure_signature_key(&self) -> Result<()> {
        match self.security.signature_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(AppError::Config(format!(
                "security.signature_key must be set (or {SIGNATURE_KEY_ENV} exported); \
                 refusing to start without a signing secret"
            ))),
        }
    }

    /// The validated signing secret.
    pub fn signature_key(&self) -> &str {
        self.security.signature_key.as_deref().unwrap_or_default()
    }
}
