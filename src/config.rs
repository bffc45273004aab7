//! Runtime configuration.
//!
//! Values come from environment variables so a deployment can pick its
//! backend and map keys without a rebuild:
//!
//! - `MILES_TO_MERCH_ENV` - `production` selects the hosted backend
//! - `MILES_TO_MERCH_API_URL` - explicit backend base URL (wins over the env)
//! - `MILES_TO_MERCH_WEATHER_URL` - weather archive endpoint
//! - `MAPTILER_API_KEY` / `STADIA_API_KEY` - tile provider keys

use crate::constants::{DEVELOPMENT_API_URL, PRODUCTION_API_URL, WEATHER_ARCHIVE_URL};
use crate::tiles::TileApiKeys;

/// Deployment environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    /// Backend base URL for this environment
    pub fn default_api_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_API_URL,
            Environment::Development => DEVELOPMENT_API_URL,
        }
    }
}

/// Configuration shared by the API client, weather lookup and tile registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    /// Backend base URL without trailing slash
    pub api_base_url: String,
    /// Historical weather archive endpoint
    pub weather_archive_url: String,
    pub tile_keys: TileApiKeys,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for the given environment, no overrides
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            api_base_url: environment.default_api_url().to_string(),
            weather_archive_url: WEATHER_ARCHIVE_URL.to_string(),
            tile_keys: TileApiKeys::default(),
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("MILES_TO_MERCH_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let api_base_url = get("MILES_TO_MERCH_API_URL")
            .unwrap_or_else(|| environment.default_api_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let weather_archive_url =
            get("MILES_TO_MERCH_WEATHER_URL").unwrap_or_else(|| WEATHER_ARCHIVE_URL.to_string());

        let tile_keys = TileApiKeys {
            maptiler: get("MAPTILER_API_KEY"),
            stadia: get("STADIA_API_KEY"),
        };

        Self {
            environment,
            api_base_url,
            weather_archive_url,
            tile_keys,
        }
    }
}
