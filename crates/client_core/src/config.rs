use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "items.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the config file (if readable), then environment overrides.
pub fn load_settings(config_path: Option<&Path>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        match apply_file_config(&mut settings, &raw) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded client config file"),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable config file: {err:#}")
            }
        }
    }

    if let Ok(v) = std::env::var("ITEMS_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings
}

fn apply_file_config(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw).context("invalid TOML")?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    Ok(())
}

/// Validates the base URL and strips trailing slashes so routes can be appended.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(ClientSettings::default().api_base_url);
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid api base url '{raw}'"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported scheme '{other}' in api base url '{raw}'"),
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        bail!("api base url '{raw}' must not carry a query or fragment");
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
