use serde::{Deserialize, Serialize};

/// Persisted rewards unit for one profile. `earned_badges` only grows
/// (badges are never revoked) except through an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardsState {
    pub stars: u64,
    /// Badge ids in the order they were earned.
    pub earned_badges: Vec<String>,
    /// Badges earned since the last `clear_new_badges`, for one-shot
    /// celebration UI.
    pub new_badges: Vec<String>,
    pub letters_learned: Vec<char>,
    pub simon_high_score: u32,
}

impl RewardsState {
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.earned_badges.iter().any(|id| id == badge_id)
    }

    pub fn has_learned(&self, letter: char) -> bool {
        self.letters_learned.contains(&letter)
    }
}
