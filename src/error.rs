//! Error types for every fallible surface of the crate.
//!
//! Network failures inside the weather lookup and the auth mirror are
//! downgraded where they happen; the enums here are what the lower layers
//! report before that downgrade, and what the design manager returns for
//! calls that reference something that does not exist.

use thiserror::Error;

use crate::design::ElementKind;

/// Errors returned by the design manager
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    /// The element kind string is not one of the user-addable kinds
    #[error("Unknown element kind: {0}")]
    UnknownKind(String),

    /// No element of this kind and id exists in the current view
    #[error("No {kind} element with id {id} in the current view")]
    ElementNotFound { kind: ElementKind, id: String },

    /// No data field with this id exists in the current view
    #[error("No data field with id {0}")]
    FieldNotFound(String),

    /// An operation needed a selection but there is none
    #[error("Nothing is selected")]
    NothingSelected,

    /// Singleton elements can't be placed on the clipboard
    #[error("The selected element can't be copied")]
    NotCopyable,

    /// The map element is always present
    #[error("The map element can't be deleted")]
    NotDeletable,

    /// Paste requested with an empty clipboard
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// Imported design JSON was malformed
    #[error("Invalid design data: {0}")]
    InvalidData(String),
}

/// Result type alias for design operations
pub type DesignResult<T> = Result<T, DesignError>;

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        DesignError::InvalidData(err.to_string())
    }
}

/// Errors from the settings store
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Unit preference other than "metric" or "imperial"
    #[error("Invalid unit system: {0}")]
    InvalidUnits(String),

    /// IO error while reading or writing the storage file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage file could not be parsed or written as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform config directory is available
    #[error("No config directory available")]
    NoConfigDir,
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors from backend API calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport or decoding failure from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend responded with status {0}")]
    Status(u16),
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the weather lookup
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Activity has no usable start coordinates
    #[error("Activity has no start location")]
    MissingLocation,

    /// Activity start time could not be parsed
    #[error("Invalid activity start time: {0}")]
    InvalidTimestamp(String),

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Archive answered with a non-success status
    #[error("Weather archive responded with status {0}")]
    Status(u16),

    /// Hourly series was empty or inconsistent
    #[error("Weather data unavailable: {0}")]
    NoData(String),
}

/// Result type alias for weather operations
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Errors from route resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No route matches the requested path
    #[error("No route matches {0}")]
    NotFound(String),
}
