pub mod models;
pub mod profiles;
pub mod progress;
pub mod recommend;
pub mod rewards;
pub mod settings;
pub mod store;

use std::path::PathBuf;
use std::rc::Rc;

use log::warn;

use models::ProfileId;
use profiles::ProfileRegistry;
use progress::ProgressTracker;
use rewards::{BadgeStats, RewardsEvaluator};
use settings::SettingsStore;
use store::{BlobStore, MemoryStore, SqliteStore, StoreKey};

pub use models::{
    Difficulty, DifficultySettings, Profile, ProgressSnapshot, RewardsState, SessionRecord,
    StreakState,
};
pub use profiles::NewProfile;
pub use recommend::{generate_recommendations, Recommendation, RecommendationKind};
pub use rewards::{badge_by_id, BadgeDefinition, BADGE_CATALOG};
pub use settings::AppSettings;

/// One engine per process: the shared store plus the registry, tracker,
/// evaluator and settings it feeds. All calls come from the single UI
/// event thread.
pub struct Engine {
    store: Rc<dyn BlobStore>,
    registry: ProfileRegistry,
    tracker: ProgressTracker,
    rewards: RewardsEvaluator,
    settings: SettingsStore,
}

impl Engine {
    pub fn new(store: Rc<dyn BlobStore>) -> Self {
        let registry = ProfileRegistry::new(Rc::clone(&store));
        let active: Option<ProfileId> = registry.active_profile_id().map(str::to_string);
        let tracker = ProgressTracker::new(Rc::clone(&store), active.clone());
        let rewards = RewardsEvaluator::new(Rc::clone(&store), active);
        let settings = SettingsStore::new(Rc::clone(&store));
        Self {
            store,
            registry,
            tracker,
            rewards,
            settings,
        }
    }

    /// Engine over the durable SQLite store at `db_path`.
    pub fn open(db_path: PathBuf) -> anyhow::Result<Self> {
        let store = SqliteStore::open(db_path)?;
        Ok(Self::new(Rc::new(store)))
    }

    /// Engine over an in-memory store; nothing survives the process.
    pub fn ephemeral() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProfileRegistry {
        &mut self.registry
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    pub fn rewards(&self) -> &RewardsEvaluator {
        &self.rewards
    }

    pub fn rewards_mut(&mut self) -> &mut RewardsEvaluator {
        &mut self.rewards
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    /// Make `profile_id` the active profile and synchronously swap all
    /// per-profile state. A session pending under the previous profile is
    /// discarded, not credited to the new one. Returns false for unknown
    /// ids.
    pub fn select_profile(&mut self, profile_id: &str) -> bool {
        if !self.registry.select_profile(profile_id) {
            return false;
        }
        self.tracker.switch_profile(Some(profile_id.to_string()));
        self.rewards.switch_profile(Some(profile_id.to_string()));
        true
    }

    /// Drop the active selection (back to the profile picker).
    pub fn clear_active_profile(&mut self) {
        self.registry.clear_active();
        self.tracker.switch_profile(None);
        self.rewards.switch_profile(None);
    }

    /// Delete a profile together with its persisted progress and rewards
    /// blobs. Blob removal is best effort.
    pub fn delete_profile(&mut self, profile_id: &str) -> bool {
        if !self.registry.delete_profile(profile_id) {
            return false;
        }
        if self.registry.active_profile_id().is_none() && self.tracker.profile_id().is_some() {
            self.tracker.switch_profile(None);
            self.rewards.switch_profile(None);
        }
        for key in [
            StoreKey::Progress(profile_id.to_string()),
            StoreKey::Rewards(profile_id.to_string()),
        ] {
            if let Err(err) = self.store.delete(&key) {
                warn!("Failed to delete blob {key:?}: {err:#}");
            }
        }
        true
    }

    /// Badge pass over the active profile's own statistics; returns the
    /// newly earned badge ids.
    pub fn check_badges(&mut self) -> Vec<String> {
        let stats = BadgeStats::from_state(self.tracker.snapshot(), self.rewards.state());
        self.rewards.check_badges(&stats)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend::generate_recommendations(self.tracker.snapshot())
    }

    /// Parent-dashboard reset: wipe both the progress and rewards state of
    /// the active profile. Irreversible.
    pub fn reset_active_profile(&mut self) {
        self.tracker.reset_progress();
        self.rewards.reset_rewards();
    }
}
