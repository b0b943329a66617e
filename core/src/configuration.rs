//! Configuration manager
//!
//! Owns the live [`Settings`] for the process, loads and persists them as
//! pretty printed JSON and tells subscribers when they have been saved or
//! reset. Nothing here ever fails outward: problems are logged and reported
//! through [`ConformConfiguration::status`] and
//! [`ConformConfiguration::last_persist_error`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::settings::Settings;

const FOLDER_NAME: &str = "conform";
const SETTINGS_FILE_NAME: &str = "conform.settings";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const STATUS_READ_OK: &str = "Settings read successfully";
pub const STATUS_FIRST_USE: &str = "Settings set to defaults on first time use.";
pub const STATUS_CORRUPTED: &str = "Settings file corrupted, please reset to default values";
pub const STATUS_READ_FAILED: &str = "Exception reading settings, default values are in use.";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No per-user data directory is available")]
    NoDataDirectory,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Settings file is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Handle returned by [`ConformConfiguration::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Settings) + Send>;

pub struct ConformConfiguration {
    settings: Settings,
    path: Option<PathBuf>,
    status: String,
    last_persist_error: Option<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for ConformConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConformConfiguration")
            .field("path", &self.path)
            .field("status", &self.status)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Default settings file location: `<local app data>/conform/conform.settings`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(FOLDER_NAME).join(SETTINGS_FILE_NAME))
}

impl ConformConfiguration {
    /// Load settings from the per-user settings file
    pub fn new() -> Self {
        Self::load(default_settings_path())
    }

    /// Load settings from an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::load(Some(path.into()))
    }

    fn load(path: Option<PathBuf>) -> Self {
        let mut config = Self {
            settings: Settings::default(),
            path,
            status: String::new(),
            last_persist_error: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        debug!("Settings file: {:?}", config.path);

        match read_settings(config.path.as_deref()) {
            Ok(Some(settings)) => {
                debug!("Settings file read OK");
                config.settings = settings;
                config.status = STATUS_READ_OK.to_string();
            }
            Ok(None) => {
                debug!("Settings file does not exist, creating it");
                config.persist();
                config.status = STATUS_FIRST_USE.to_string();
            }
            Err(ConfigurationError::Parse(e)) => {
                warn!("Error parsing Conform settings file: {}", e);
                config.status = STATUS_CORRUPTED.to_string();
            }
            Err(e) => {
                warn!("Error reading Conform settings file: {}", e);
                config.status = STATUS_READ_FAILED.to_string();
            }
        }

        config
    }

    /// The live settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The live settings, for in-place edits ahead of [`save`](Self::save)
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Outcome of the last load, save or reset
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Why the last write of the settings file failed, if it did
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Empty when the settings are usable, otherwise the first problem found
    pub fn validate(&self) -> String {
        match self.settings.validate() {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// Persist the live settings and notify subscribers
    pub fn save(&mut self) {
        debug!("Persisting settings to settings file");
        self.persist();
        self.status = format!("Settings saved at {}.", timestamp());
        self.notify();
    }

    /// Replace the live settings with defaults, persist them and notify subscribers
    pub fn reset(&mut self) {
        debug!("Resetting settings file to default values");
        self.settings = Settings::default();
        self.persist();
        self.status = format!("Settings reset at {}.", timestamp());
        self.notify();
    }

    /// Register a callback run after every save or reset, in subscription order
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Settings) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        debug!("Calling {} configuration changed handler(s)", self.subscribers.len());
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.settings);
        }
        debug!("Returned from configuration changed handlers");
    }

    fn persist(&mut self) {
        match write_settings(self.path.as_deref(), &self.settings) {
            Ok(path) => {
                info!("Settings written to {}", path.display());
                self.last_persist_error = None;
            }
            Err(e) => {
                error!("Unable to persist settings: {}", e);
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

impl Default for ConformConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

fn read_settings(path: Option<&Path>) -> Result<Option<Settings>, ConfigurationError> {
    let path = path.ok_or(ConfigurationError::NoDataDirectory)?;
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigurationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    // Undecodable content counts as corruption, the same as malformed JSON
    let json = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    let mut settings: Settings = serde_json::from_slice(json)?;
    settings.upgrade_legacy_fields();
    Ok(Some(settings))
}

fn write_settings<'a>(path: Option<&'a Path>, settings: &Settings) -> Result<&'a Path, ConfigurationError> {
    let path = path.ok_or(ConfigurationError::NoDataDirectory)?;
    let io_error = |source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = serde_json::to_string_pretty(settings)?;
    if let Some(folder) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(folder).map_err(io_error)?;
    }
    fs::write(path, text).map_err(io_error)?;
    Ok(path)
}

/// Local time as `HH:MM:SS.f`
fn timestamp() -> String {
    let now = Local::now();
    let tenths = (now.nanosecond() / 100_000_000).min(9);
    format!("{}.{}", now.format("%H:%M:%S"), tenths)
}
