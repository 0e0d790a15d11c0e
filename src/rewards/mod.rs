use std::rc::Rc;

use log::{info, warn};

use crate::models::{ProfileId, RewardsState};
use crate::store::{BlobStore, StoreKey};

mod badges;

pub use badges::{badge_by_id, BadgeDefinition, BadgeStats, BADGE_CATALOG};

/// Per-profile star currency, earned badges and misc game records. Badge
/// eligibility is only evaluated on explicit `check_badges` calls. With no
/// active profile the evaluator still works, but nothing is written to the
/// store.
pub struct RewardsEvaluator {
    store: Rc<dyn BlobStore>,
    profile_id: Option<ProfileId>,
    state: RewardsState,
}

impl RewardsEvaluator {
    pub fn new(store: Rc<dyn BlobStore>, profile_id: Option<ProfileId>) -> Self {
        let state = load_state(store.as_ref(), profile_id.as_deref());
        Self {
            store,
            profile_id,
            state,
        }
    }

    pub fn state(&self) -> &RewardsState {
        &self.state
    }

    pub fn switch_profile(&mut self, profile_id: Option<ProfileId>) {
        self.state = load_state(self.store.as_ref(), profile_id.as_deref());
        self.profile_id = profile_id;
    }

    pub fn add_stars(&mut self, amount: u64) {
        self.state.stars += amount;
        self.persist();
    }

    /// Evaluate every not-yet-earned badge against `stats`. Newly satisfied
    /// badges are added to the earned set and returned; already-earned
    /// badges are never re-reported, so repeated calls with the same stats
    /// settle to an empty result.
    pub fn check_badges(&mut self, stats: &BadgeStats) -> Vec<String> {
        let newly_earned: Vec<String> = BADGE_CATALOG
            .iter()
            .filter(|badge| !self.state.has_badge(badge.id) && (badge.condition)(stats))
            .map(|badge| badge.id.to_string())
            .collect();

        if !newly_earned.is_empty() {
            info!(
                "Profile {} earned badges: {}",
                self.profile_id.as_deref().unwrap_or("<none>"),
                newly_earned.join(", ")
            );
            self.state.earned_badges.extend(newly_earned.iter().cloned());
            self.state.new_badges = newly_earned.clone();
            self.persist();
        }

        newly_earned
    }

    /// Drop the "newly earned" notification list once the celebration has
    /// been shown. Earned badges are untouched.
    pub fn clear_new_badges(&mut self) {
        if self.state.new_badges.is_empty() {
            return;
        }
        self.state.new_badges.clear();
        self.persist();
    }

    pub fn track_letter_learned(&mut self, letter: char) {
        if self.state.has_learned(letter) {
            return;
        }
        self.state.letters_learned.push(letter);
        self.persist();
    }

    pub fn update_simon_score(&mut self, score: u32) {
        if score <= self.state.simon_high_score {
            return;
        }
        self.state.simon_high_score = score;
        self.persist();
    }

    /// Replace the active profile's rewards with the all-zero default.
    /// Irreversible.
    pub fn reset_rewards(&mut self) {
        self.state = RewardsState::default();
        self.persist();
    }

    fn persist(&self) {
        // With no active profile the state is session-local only.
        let Some(profile_id) = &self.profile_id else {
            return;
        };
        let key = StoreKey::Rewards(profile_id.clone());
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(err) => {
                warn!("Failed to serialize rewards for {profile_id}: {err}");
                return;
            }
        };
        if let Err(err) = self.store.save(&key, &blob) {
            warn!("Failed to persist rewards for {profile_id}: {err:#}");
        }
    }
}

fn load_state(store: &dyn BlobStore, profile_id: Option<&str>) -> RewardsState {
    let Some(profile_id) = profile_id else {
        return RewardsState::default();
    };
    match store.load(&StoreKey::Rewards(profile_id.to_string())) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Corrupt rewards blob for {profile_id}, using defaults: {err}");
            RewardsState::default()
        }),
        Ok(None) => RewardsState::default(),
        Err(err) => {
            warn!("Failed to load rewards for {profile_id}, using defaults: {err:#}");
            RewardsState::default()
        }
    }
}
