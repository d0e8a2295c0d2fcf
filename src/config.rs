//! Server configuration.
//!
//! Defaults are overridden by an optional YAML file (path in
//! `REQGUARD_CONFIG`), and the listen address by `LISTEN`.

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub limits: Limits,
    pub validation: ValidationPolicy,
}

/// Size limits enforced by the connection loop, outside of validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest request head (request line plus headers) accepted
    pub max_head_bytes: usize,
    /// Largest body the server will read for a single request
    pub max_body_bytes: u64,
}

/// Knobs that change what the validator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Refuse requests carrying several Content-Length headers with
    /// different values. When off, only the first one is consulted.
    pub reject_conflicting_content_length: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            limits: Limits::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_head_bytes: 64 * 1024,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            reject_conflicting_content_length: true,
        }
    }
}

impl Config {
    /// Loads the configuration from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("REQGUARD_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&raw).with_context(|| format!("Invalid config file {}", path))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }
}
