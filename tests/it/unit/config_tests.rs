//! Configuration Unit Tests

use miles_to_merch::config::{AppConfig, Environment};
use miles_to_merch::constants::{DEVELOPMENT_API_URL, PRODUCTION_API_URL, WEATHER_ARCHIVE_URL};
use std::collections::HashMap;

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_to_development() {
    let config = config_from(&[]);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.api_base_url, DEVELOPMENT_API_URL);
    assert_eq!(config.weather_archive_url, WEATHER_ARCHIVE_URL);
    assert_eq!(config.tile_keys.maptiler, None);
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_production_environment() {
    let config = config_from(&[("MILES_TO_MERCH_ENV", "Production")]);
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.api_base_url, PRODUCTION_API_URL);
}

#[test]
fn test_explicit_api_url_wins() {
    let config = config_from(&[
        ("MILES_TO_MERCH_ENV", "production"),
        ("MILES_TO_MERCH_API_URL", "https://staging.example.com/"),
    ]);
    assert_eq!(config.api_base_url, "https://staging.example.com");
}

#[test]
fn test_empty_values_are_unset() {
    let config = config_from(&[("MILES_TO_MERCH_API_URL", "  "), ("MAPTILER_API_KEY", "")]);
    assert_eq!(config.api_base_url, DEVELOPMENT_API_URL);
    assert_eq!(config.tile_keys.maptiler, None);
}

#[test]
fn test_tile_keys_and_weather_override() {
    let config = config_from(&[
        ("MAPTILER_API_KEY", "mt-key"),
        ("STADIA_API_KEY", "st-key"),
        ("MILES_TO_MERCH_WEATHER_URL", "http://localhost:9000/archive"),
    ]);
    assert_eq!(config.tile_keys.maptiler.as_deref(), Some("mt-key"));
    assert_eq!(config.tile_keys.stadia.as_deref(), Some("st-key"));
    assert_eq!(config.weather_archive_url, "http://localhost:9000/archive");
}
