//! Client configuration.
//!
//! A [`Config`] is built once by the caller and handed to [`Gemini::from_config`](crate::Gemini::from_config);
//! nothing in the crate reads process-wide state after that.

use snafu::{ResultExt, Snafu};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("environment variable {name} is not set"))]
    MissingEnv {
        name: &'static str,
        source: std::env::VarError,
    },

    #[snafu(display("api key is empty"))]
    EmptyApiKey,

    #[snafu(display("failed to parse base url '{value}'"))]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Credentials, endpoint and request options for the summary client
#[derive(Clone)]
pub struct Config {
    pub(crate) api_key: String,
    /// Model resource name, e.g. `models/gemini-2.5-flash`
    pub model: String,
    /// API root; must end with a slash
    pub base_url: Url,
    /// How long to wait for a device position before giving up on it
    pub geolocation_timeout: Duration,
    /// Whether to enable the Google Maps grounding tool alongside search
    pub maps_grounding: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("geolocation_timeout", &self.geolocation_timeout)
            .field("maps_grounding", &self.maps_grounding)
            .finish()
    }
}

impl Config {
    /// Create a configuration with the default model and endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return EmptyApiKeySnafu.fail();
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            maps_grounding: true,
        })
    }

    /// Read the configuration from `GEMINI_API_KEY` and the optional
    /// `GEMINI_MODEL` / `GEMINI_BASE_URL` overrides
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV).context(MissingEnvSnafu { name: API_KEY_ENV })?;
        let mut config = Self::new(api_key)?;
        if let Ok(model) = std::env::var(MODEL_ENV) {
            config = config.with_model(model);
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        Ok(config)
    }

    /// Use a different model. A bare name such as `gemini-2.5-pro` gets the
    /// `models/` prefix added.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = if model.starts_with("models/") {
            model
        } else {
            format!("models/{model}")
        };
        self
    }

    /// Point the client at a different API root, e.g. a proxy or a test server
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    pub fn with_maps_grounding(mut self, enabled: bool) -> Self {
        self.maps_grounding = enabled;
        self
    }
}

fn parse_base_url(value: &str) -> Result<Url, Error> {
    // Url::join drops the last path segment unless the base ends in '/'
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    Url::parse(&normalized).context(InvalidBaseUrlSnafu { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("key").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.geolocation_timeout, Duration::from_secs(5));
        assert!(config.maps_grounding);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(Config::new("  "), Err(Error::EmptyApiKey)));
    }

    #[test]
    fn model_gets_prefixed() {
        let config = Config::new("key").unwrap().with_model("gemini-2.5-pro");
        assert_eq!(config.model, "models/gemini-2.5-pro");
        let config = config.with_model("models/gemini-2.5-flash");
        assert_eq!(config.model, "models/gemini-2.5-flash");
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = Config::new("key")
            .unwrap()
            .with_base_url("http://localhost:8080/v1beta")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/v1beta/");
    }

    #[test]
    fn invalid_base_url() {
        let err = Config::new("key").unwrap().with_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_hides_api_key() {
        let config = Config::new("super-secret").unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
