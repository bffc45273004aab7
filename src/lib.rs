//! Miles to Merch client core.
//!
//! Turns athletic activities into printable product designs. This crate
//! holds the state and rules behind the client; rendering, payments and the
//! authentication protocol live elsewhere.
//!
//! ## Module Structure
//!
//! - `design` - multi-view design editor with undo/redo
//! - `achievements` - activity rankings to selectable badges
//! - `format` - unit-aware activity metric formatting
//! - `settings` - persisted metric/imperial preference
//! - `weather` - historical weather at an activity's start
//! - `tiles` - map tile layer registry
//! - `api` / `auth` / `router` - backend client, login mirror, route guard
//! - `config` / `logging` / `error` / `constants` - ambient plumbing

pub mod achievements;
pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod format;
pub mod logging;
pub mod router;
pub mod settings;
pub mod tiles;
pub mod weather;

pub use config::AppConfig;
pub use design::{DesignManager, Designs};
pub use error::{ApiError, DesignError, DesignResult, RouterError, SettingsError, WeatherError};
pub use settings::UnitSystem;
