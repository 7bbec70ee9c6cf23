use std::{env, fs, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_API_HOST: &str = "https://www.omdbapi.com";
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub omdb_api_key: Option<String>,
    pub omdb_api_host: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            omdb_api_key: None,
            omdb_api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    omdb_api_key: Option<String>,
    omdb_api_host: Option<String>,
}

/// Startup configuration: optional `config.json` next to the binary, with the
/// `OMDB_API_KEY` environment variable taking precedence for the token.
/// A missing token is not an error here; the API rejects the request and its
/// message is shown like any other failed lookup.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_from(Path::new("config.json"));
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            cfg.omdb_api_key = Some(key);
        }
    }
    cfg
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if parsed.omdb_api_key.is_some() {
                    cfg.omdb_api_key = parsed.omdb_api_key;
                }
                if let Some(host) = parsed.omdb_api_host {
                    cfg.omdb_api_host = host.trim_end_matches('/').to_string();
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}
