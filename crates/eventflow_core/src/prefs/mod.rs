//! Local theme preference.
//!
//! # Responsibility
//! - Persist the single dark-mode boolean under a known location.
//! - Decide the initial theme: stored value first, OS appearance second.
//!
//! # Invariants
//! - A missing or unreadable store never fails startup; it falls through to
//!   the appearance fallback.
//! - The stored value, once written, wins over the OS preference.

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Site color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Preference persistence failure.
#[derive(Debug)]
pub enum PrefsError {
    /// Platform config directory could not be resolved (missing `$HOME` or
    /// equivalent).
    DirectoriesNotFound,
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoriesNotFound => write!(f, "failed to resolve user config directory"),
            Self::Io(err) => write!(f, "preference file i/o failed: {err}"),
            Self::Format(err) => write!(f, "preference file is malformed: {err}"),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::DirectoriesNotFound => None,
        }
    }
}

impl From<std::io::Error> for PrefsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PrefsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(value)
    }
}

/// Storage contract for the persisted dark-mode flag.
pub trait PreferenceStore {
    /// Returns the stored flag, or `None` when nothing was saved yet.
    fn load_dark_mode(&self) -> Result<Option<bool>, PrefsError>;
    fn store_dark_mode(&self, dark: bool) -> Result<(), PrefsError>;
}

/// Host appearance probe used when no preference was stored.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> bool;
}

/// Fallback appearance for hosts without a probe: light.
///
/// Platform integrations implement [`SystemAppearance`] over their own
/// media-query or OS API and pass it to [`initial_theme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HostAppearance;

impl SystemAppearance for HostAppearance {
    fn prefers_dark(&self) -> bool {
        false
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    dark_mode: Option<bool>,
}

/// JSON-file preference store.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory.
    pub fn in_default_location() -> Result<Self, PrefsError> {
        let dirs = ProjectDirs::from("com", "eventflow", "eventflow")
            .ok_or(PrefsError::DirectoriesNotFound)?;
        Ok(Self::at(dirs.config_dir().join(PREFERENCES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoredPreferences, PrefsError> {
        if !self.path.exists() {
            return Ok(StoredPreferences::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, preferences: &StoredPreferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_dark_mode(&self) -> Result<Option<bool>, PrefsError> {
        Ok(self.read()?.dark_mode)
    }

    fn store_dark_mode(&self, dark: bool) -> Result<(), PrefsError> {
        let mut preferences = self.read().unwrap_or_default();
        preferences.dark_mode = Some(dark);
        self.write(&preferences)
    }
}

/// Decides the startup theme: stored flag first, OS appearance otherwise.
///
/// Read failures are logged and treated like an absent preference.
pub fn initial_theme(store: &dyn PreferenceStore, appearance: &dyn SystemAppearance) -> Theme {
    match store.load_dark_mode() {
        Ok(Some(dark)) => Theme::from_dark_flag(dark),
        Ok(None) => Theme::from_dark_flag(appearance.prefers_dark()),
        Err(err) => {
            warn!("event=preference_read module=prefs status=error reason={err}");
            Theme::from_dark_flag(appearance.prefers_dark())
        }
    }
}

/// Flips and persists the theme, returning the new value.
pub fn toggle_theme(store: &dyn PreferenceStore, current: Theme) -> Result<Theme, PrefsError> {
    let next = Theme::from_dark_flag(!current.is_dark());
    store.store_dark_mode(next.is_dark())?;
    Ok(next)
}
