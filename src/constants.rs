//! Application-wide constants.
//!
//! Centralizes magic numbers, endpoint URLs and storage keys so the
//! modules that use them stay free of literals.

// ============================================================================
// Design Editor
// ============================================================================

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

/// View every editor session starts on
pub const DEFAULT_VIEW: &str = "front";

/// Offset applied to pasted elements so they don't cover the original
pub const PASTE_OFFSET: (f64, f64) = (20.0, 20.0);

/// Placeholder shown for metrics that have no value
pub const PLACEHOLDER: &str = "-";

// ============================================================================
// Backend
// ============================================================================

/// Backend used by production deployments
pub const PRODUCTION_API_URL: &str = "https://miles-to-merch-backend.onrender.com";

/// Backend used during local development
pub const DEVELOPMENT_API_URL: &str = "http://localhost:5000";

/// Path of the login-state endpoint, relative to the API base URL
pub const AUTH_STATUS_PATH: &str = "/auth/status";

// ============================================================================
// Weather
// ============================================================================

/// Open-Meteo historical weather archive
pub const WEATHER_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Hourly variables requested from the archive
pub const WEATHER_HOURLY_FIELDS: &str = "temperature_2m,weathercode";

// ============================================================================
// Persistence
// ============================================================================

/// Storage key holding the unit preference ("metric" or "imperial")
pub const UNITS_STORAGE_KEY: &str = "user-units";

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "miles-to-merch";

/// File backing the key/value settings storage
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

// ============================================================================
// Unit Conversion
// ============================================================================

/// Miles per meter
pub const MILES_PER_METER: f64 = 0.000621371;

/// Kilometers per mile, used to turn a per-km pace into a per-mile pace
pub const KM_PER_MILE: f64 = 1.60934;

/// Miles per hour for one meter per second
pub const MPH_PER_MPS: f64 = 2.23694;

/// Kilometers per hour for one meter per second
pub const KMH_PER_MPS: f64 = 3.6;

/// Feet per meter
pub const FEET_PER_METER: f64 = 3.28084;
