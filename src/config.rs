//! Client configuration
//!
//! Values come from the command line, which falls back to environment variables (and a `.env` file).

use reqwest::Url;
use thiserror::Error;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
  #[error("Invalid base URL '{url}': {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  #[error("Unsupported scheme '{0}', expected http or https")]
  UnsupportedScheme(String),
}

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
  /// Root of the banking REST API, e.g. `http://127.0.0.1:5000/api`
  pub base_url: Url,

  /// Skip interactive confirmations
  pub assume_yes: bool,
}

impl ClientConfig {
  pub fn new(base_url: &str, assume_yes: bool) -> Result<Self, ConfigError> {
    let base_url = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
      url: base_url.to_string(),
      reason: err.to_string(),
    })?;

    match base_url.scheme() {
      "http" | "https" => Ok(Self {
        base_url,
        assume_yes,
      }),
      scheme => Err(ConfigError::UnsupportedScheme(scheme.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {

  use super::*;

  #[test]
  fn new_accepts_http_urls() {
    let config = ClientConfig::new("https://bank.example.com/api", true).unwrap();

    assert_eq!(config.base_url.as_str(), "https://bank.example.com/api");
    assert!(config.assume_yes);
  }

  #[test]
  fn new_rejects_invalid_urls() {
    let cases = vec![
      ("not a url", "InvalidBaseUrl"),
      ("ftp://bank.example.com/api", "UnsupportedScheme"),
    ];

    for (input, expected) in cases {
      let error = ClientConfig::new(input, false).unwrap_err();
      assert!(format!("{:?}", error).starts_with(expected));
    }
  }

  #[test]
  fn default_points_to_local_server() {
    let config = ClientConfig::new(DEFAULT_BASE_URL, false).unwrap();

    assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
    assert!(!config.assume_yes);
  }
}
