use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "inventory.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base of the web API; the inventory collection lives at `{api_url}/inventory`.
    pub api_url: String,
    /// Credential attached as a bearer token to every request.
    pub api_token: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            api_token: None,
        }
    }
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<ClientSettings> {
    let settings = read_settings_file(path)?;
    Ok(apply_env_overrides(settings, |key| std::env::var(key).ok()))
}

fn read_settings_file(path: &Path) -> anyhow::Result<ClientSettings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(ClientSettings::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read client config '{}'", path.display()));
        }
    };
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse client config '{}'", path.display()))
}

pub fn apply_env_overrides(
    mut settings: ClientSettings,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    if let Some(v) = env("INVENTORY_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("INVENTORY_API_TOKEN") {
        settings.api_token = Some(v);
    }
    if let Some(v) = env("APP__API_TOKEN") {
        settings.api_token = Some(v);
    }

    settings.api_token = settings.api_token.filter(|token| !token.trim().is_empty());
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
