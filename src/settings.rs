use std::rc::Rc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::store::{BlobStore, StoreKey};

/// App-wide toggles shared by every profile. Consumers receive this as an
/// explicit value (e.g. the audio collaborator gets `sound_enabled`);
/// nothing reads the store ambiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub sound_enabled: bool,
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            dark_mode: false,
        }
    }
}

pub struct SettingsStore {
    store: Rc<dyn BlobStore>,
    settings: AppSettings,
}

impl SettingsStore {
    pub fn new(store: Rc<dyn BlobStore>) -> Self {
        let settings = match store.load(&StoreKey::Settings) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Corrupt settings blob, using defaults: {err}");
                AppSettings::default()
            }),
            Ok(None) => AppSettings::default(),
            Err(err) => {
                warn!("Failed to load settings, using defaults: {err:#}");
                AppSettings::default()
            }
        };
        Self { store, settings }
    }

    pub fn get(&self) -> AppSettings {
        self.settings
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.persist();
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.settings.dark_mode = enabled;
        self.persist();
    }

    pub fn update(&mut self, settings: AppSettings) {
        self.settings = settings;
        self.persist();
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.settings) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to serialize settings: {err}");
                return;
            }
        };
        if let Err(err) = self.store.save(&StoreKey::Settings, &raw) {
            warn!("Failed to persist settings: {err:#}");
        }
    }
}
