//! Scanner settings, persisted as a JSON file.

pub mod models;

pub use models::*;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::types::errors::{AltarError, AltarResult};

pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Mutex<AltarSettings>,
}

impl SettingsStore {
    /// Load from `path`. A missing file yields defaults; the file is created
    /// on the first save.
    pub fn load(path: impl Into<PathBuf>) -> AltarResult<Self> {
        let path = path.into();
        let settings = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let settings: AltarSettings = serde_json::from_str(&content)?;
            settings.validate().map_err(AltarError::Settings)?;
            info!("[Settings] Loaded {}", path.display());
            settings
        } else {
            info!(
                "[Settings] {} not found, using defaults",
                path.display()
            );
            AltarSettings::default()
        };

        Ok(Self {
            path: Some(path),
            settings: Mutex::new(settings),
        })
    }

    /// Store without a backing file; saves only update memory.
    pub fn in_memory(settings: AltarSettings) -> Self {
        Self {
            path: None,
            settings: Mutex::new(settings),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn settings(&self) -> MutexGuard<'_, AltarSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_settings(&self) -> AltarSettings {
        self.settings().clone()
    }

    pub fn save_settings(&self, new_settings: AltarSettings) -> AltarResult<()> {
        new_settings.validate().map_err(AltarError::Settings)?;

        if let Some(path) = &self.path {
            write_atomic(path, &serde_json::to_string_pretty(&new_settings)?)?;
        }

        *self.settings() = new_settings;
        Ok(())
    }

    /// Read-modify-write under one lock.
    pub fn update<F>(&self, mutate: F) -> AltarResult<AltarSettings>
    where
        F: FnOnce(&mut AltarSettings),
    {
        let mut guard = self.settings();
        let mut next = guard.clone();
        mutate(&mut next);
        next.validate().map_err(AltarError::Settings)?;

        if let Some(path) = &self.path {
            write_atomic(path, &serde_json::to_string_pretty(&next)?)?;
        }

        *guard = next.clone();
        Ok(next)
    }
}

/// Write via a sibling temp file and rename, so readers never see a partial file.
fn write_atomic(path: &Path, content: &str) -> AltarResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        warn!("[Settings] Rename into {} failed: {}", path.display(), e);
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
