//! User preferences - currently the unit system.
//!
//! The store is loaded from a key/value storage backend, persisted on every
//! change and shared process-wide. Formatters and the weather display read
//! the current value at call time through [`current_units`].
//!
//! Initialization order: [`SettingsStore::load`] reads the persisted value,
//! [`install`] publishes the store, then subscribers are notified on each
//! [`SettingsStore::set_units`].

use crate::constants::{APP_DIR_NAME, STORAGE_FILE_NAME, UNITS_STORAGE_KEY};
use crate::error::{SettingsError, SettingsResult};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// Unit System
// ============================================================================

/// Measurement system used for every displayed metric
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(SettingsError::InvalidUnits(other.to_string())),
        }
    }
}

// ============================================================================
// Storage Backends
// ============================================================================

/// String key/value persistence, the equivalent of browser local storage
pub trait SettingsStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> SettingsResult<()>;
}

/// In-memory storage, used by tests and when no config dir exists
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.values.write().insert(key.to_string(), value.to_string());
        storage
    }
}

impl SettingsStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-object file storage.
///
/// Writes go through a temp file in the same directory and are renamed into
/// place, so a crash never leaves a truncated file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage file in the platform config directory
    pub fn default_location() -> SettingsResult<Self> {
        default_storage_path()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> SettingsResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> SettingsResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, values)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| SettingsError::Io(e.error))?;
        Ok(())
    }
}

impl SettingsStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        match self.read_all() {
            Ok(values) => values.get(key).cloned(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read settings storage: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking every future write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// Default path of the settings storage file
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(STORAGE_FILE_NAME))
}

// ============================================================================
// Settings Store
// ============================================================================

type UnitsListener = Arc<dyn Fn(UnitSystem) + Send + Sync>;

/// Reactive unit-preference store
pub struct SettingsStore {
    units: RwLock<UnitSystem>,
    storage: Box<dyn SettingsStorage>,
    listeners: Mutex<Vec<UnitsListener>>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("units", &*self.units.read())
            .field("listeners", &format!("<{} listeners>", self.listeners.lock().len()))
            .finish()
    }
}

impl SettingsStore {
    /// Create a store and load the persisted preference.
    ///
    /// Missing or unrecognized values leave the default (metric) in place.
    pub fn load(storage: impl SettingsStorage + 'static) -> Self {
        let units = match storage.get(UNITS_STORAGE_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %saved, "Ignoring unrecognized saved unit system");
                UnitSystem::default()
            }),
            None => UnitSystem::default(),
        };
        tracing::debug!(%units, "Loaded unit preference");

        Self {
            units: RwLock::new(units),
            storage: Box::new(storage),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Store backed by memory only
    pub fn in_memory() -> Self {
        Self::load(MemoryStorage::new())
    }

    pub fn units(&self) -> UnitSystem {
        *self.units.read()
    }

    /// Change the unit system, persist it and notify subscribers.
    ///
    /// The in-memory value changes even if persisting fails; the write error
    /// is returned so the caller can report it.
    pub fn set_units(&self, units: UnitSystem) -> SettingsResult<()> {
        *self.units.write() = units;
        let persisted = self.storage.set(UNITS_STORAGE_KEY, units.as_str());
        if let Err(e) = &persisted {
            tracing::warn!("Failed to persist unit preference: {}", e);
        }

        // Listeners may call back into the store, so run them unlocked
        let listeners = self.listeners.lock().clone();
        for listener in &listeners {
            listener(units);
        }
        persisted
    }

    /// Parse and apply a unit system name
    pub fn set_units_str(&self, units: &str) -> SettingsResult<()> {
        let units = units.parse()?;
        self.set_units(units)
    }

    /// Register a callback invoked after every change
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(UnitSystem) + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }
}

// ============================================================================
// Process-wide Access
// ============================================================================

static GLOBAL: OnceCell<SettingsStore> = OnceCell::new();

/// Publish `store` as the process-wide settings.
///
/// Returns the store back if one was already installed.
pub fn install(store: SettingsStore) -> Result<(), SettingsStore> {
    GLOBAL.set(store)
}

/// The process-wide settings store.
///
/// Falls back to the file in the platform config directory, or to memory if
/// there is none, when nothing was installed.
pub fn global() -> &'static SettingsStore {
    GLOBAL.get_or_init(|| match FileStorage::default_location() {
        Ok(storage) => SettingsStore::load(storage),
        Err(e) => {
            tracing::warn!("Settings will not persist: {}", e);
            SettingsStore::in_memory()
        }
    })
}

/// Unit system currently in effect
pub fn current_units() -> UnitSystem {
    global().units()
}
