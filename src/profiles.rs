use std::rc::Rc;

use chrono::{Local, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Difficulty, DifficultySettings, Profile, ProfileId};
use crate::store::{BlobStore, StoreKey};

/// Persisted shape: the profile list and the active selection travel in
/// one blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RegistryBlob {
    profiles: Vec<Profile>,
    active_profile_id: Option<ProfileId>,
}

/// Fields a caller supplies when creating a profile; everything else is
/// defaulted or derived.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub language: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Owns the set of user profiles and the active selection. The engine
/// reacts to `select_profile` by swapping all per-profile state.
pub struct ProfileRegistry {
    store: Rc<dyn BlobStore>,
    profiles: Vec<Profile>,
    active_profile_id: Option<ProfileId>,
}

impl ProfileRegistry {
    pub fn new(store: Rc<dyn BlobStore>) -> Self {
        let blob = load_registry(store.as_ref());
        Self {
            store,
            profiles: blob.profiles,
            active_profile_id: blob.active_profile_id,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn active_profile_id(&self) -> Option<&str> {
        self.active_profile_id.as_deref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        let active = self.active_profile_id.as_deref()?;
        self.profiles.iter().find(|p| p.id == active)
    }

    pub fn get(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    /// Create and store a profile. Difficulty defaults to the age-based
    /// suggestion when the caller leaves it unset.
    pub fn add_profile(&mut self, new: NewProfile) -> ProfileId {
        let today = Local::now().date_naive();
        let age = new
            .dob
            .and_then(|dob| today.years_since(dob))
            .unwrap_or(0);
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            dob: new.dob,
            avatar: new.avatar.unwrap_or_else(|| "👦".to_string()),
            language: new.language.unwrap_or_else(|| "en".to_string()),
            difficulty: new
                .difficulty
                .unwrap_or_else(|| Difficulty::suggested_for_age(age)),
            created_at: Utc::now(),
        };
        let id = profile.id.clone();
        self.profiles.push(profile);
        self.persist();
        id
    }

    /// Apply edits to an existing profile. Returns false when the id is
    /// unknown.
    pub fn update_profile(
        &mut self,
        profile_id: &str,
        apply: impl FnOnce(&mut Profile),
    ) -> bool {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == profile_id) else {
            return false;
        };
        apply(profile);
        self.persist();
        true
    }

    /// Remove a profile. Deleting the active profile clears the selection.
    pub fn delete_profile(&mut self, profile_id: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != profile_id);
        if self.profiles.len() == before {
            return false;
        }
        if self.active_profile_id.as_deref() == Some(profile_id) {
            self.active_profile_id = None;
        }
        self.persist();
        true
    }

    /// Make an existing profile the active one. Returns false for unknown
    /// ids, leaving the current selection in place.
    pub fn select_profile(&mut self, profile_id: &str) -> bool {
        if !self.profiles.iter().any(|p| p.id == profile_id) {
            return false;
        }
        self.active_profile_id = Some(profile_id.to_string());
        self.persist();
        true
    }

    pub fn clear_active(&mut self) {
        if self.active_profile_id.take().is_some() {
            self.persist();
        }
    }

    /// Game tuning for the active profile, falling back to beginner when
    /// nothing is selected.
    pub fn active_difficulty_settings(&self) -> DifficultySettings {
        self.active_profile()
            .map(|p| p.difficulty)
            .unwrap_or_default()
            .settings()
    }

    fn persist(&self) {
        let blob = RegistryBlob {
            profiles: self.profiles.clone(),
            active_profile_id: self.active_profile_id.clone(),
        };
        let raw = match serde_json::to_string(&blob) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to serialize profile registry: {err}");
                return;
            }
        };
        if let Err(err) = self.store.save(&StoreKey::Profiles, &raw) {
            warn!("Failed to persist profile registry: {err:#}");
        }
    }
}

fn load_registry(store: &dyn BlobStore) -> RegistryBlob {
    match store.load(&StoreKey::Profiles) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Corrupt profile registry blob, starting empty: {err}");
            RegistryBlob::default()
        }),
        Ok(None) => RegistryBlob::default(),
        Err(err) => {
            warn!("Failed to load profile registry, starting empty: {err:#}");
            RegistryBlob::default()
        }
    }
}
