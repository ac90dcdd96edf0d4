use reqwest::Url;

use crate::config::ConfigError;

/// Station map client settings; both values are required at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix
    pub api_base_url: String,
    pub maps_api_key: String,
}

impl ClientConfig {
    /// Read the process environment; run [`crate::config::load_dotenv`] first
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let api_base_url = required("WEATHER_API_BASE_URL")?;
        if Url::parse(&api_base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "WEATHER_API_BASE_URL",
                expected: "URL",
                value: api_base_url,
            });
        }

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            maps_api_key: required("MAPS_API_KEY")?,
        })
    }
}
