use std::{collections::HashMap, fs};

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "inventory-server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    /// When set, every inventory request must carry `Authorization: Bearer <token>`.
    pub api_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            api_token: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        settings = apply_file_overrides(settings, &raw);
    }

    apply_env_overrides(settings, |key| std::env::var(key).ok())
}

fn apply_file_overrides(mut settings: Settings, raw: &str) -> Settings {
    match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("api_token") {
                settings.api_token = Some(v.clone());
            }
        }
        Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
    }
    settings
}

fn apply_env_overrides(mut settings: Settings, env: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
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
