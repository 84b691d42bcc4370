//! API endpoint configuration: env variables with an optional TOML override.
//!
//! This must complete before any request is issued; `main` constructs the
//! client only from a loaded `ApiConfig` (no module-load side effects).
//!
//! Variables:
//!   QUIZSMITH_API_BASE_URL : base URL of the generation API (required)
//!   QUIZSMITH_API_KEY      : optional bearer token
//!   QUIZSMITH_CONFIG_PATH  : optional path to a TOML file overriding both

use serde::Deserialize;
use tracing::{error, info};

/// Resolved endpoint identity/credentials for the generation service.
#[derive(Clone, Debug)]
pub struct ApiConfig {
  pub base_url: String,
  pub api_key: Option<String>,
}

/// Schema of the optional TOML override file.
#[derive(Clone, Debug, Deserialize, Default)]
struct FileConfig {
  #[serde(default)]
  base_url: Option<String>,
  #[serde(default)]
  api_key: Option<String>,
}

impl ApiConfig {
  /// Resolve configuration from env, then apply TOML overrides if a file is
  /// named. Returns None when no base URL can be found anywhere.
  pub fn load() -> Option<Self> {
    let mut base_url = std::env::var("QUIZSMITH_API_BASE_URL").ok();
    let mut api_key = std::env::var("QUIZSMITH_API_KEY").ok();

    if let Some(file) = load_file_config_from_env() {
      if file.base_url.is_some() {
        base_url = file.base_url;
      }
      if file.api_key.is_some() {
        api_key = file.api_key;
      }
    }

    let base_url = match base_url {
      Some(u) if !u.trim().is_empty() => u.trim_end_matches('/').to_string(),
      _ => {
        error!(target: "quizsmith", "No API base URL configured (QUIZSMITH_API_BASE_URL).");
        return None;
      }
    };

    info!(target: "quizsmith", %base_url, has_key = api_key.is_some(), "API configuration resolved");
    Some(Self { base_url, api_key })
  }
}

/// Attempt to load the override file from QUIZSMITH_CONFIG_PATH.
/// On any parsing/IO error, returns None.
fn load_file_config_from_env() -> Option<FileConfig> {
  let path = std::env::var("QUIZSMITH_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<FileConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizsmith", %path, "Loaded API config override (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizsmith", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizsmith", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_config_accepts_partial_overrides() {
    let cfg: FileConfig = toml::from_str(r#"base_url = "https://api.example.test/v1""#).expect("toml");
    assert_eq!(cfg.base_url.as_deref(), Some("https://api.example.test/v1"));
    assert_eq!(cfg.api_key, None);
  }
}
