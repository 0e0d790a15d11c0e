use std::collections::BTreeMap;

use crate::models::{ProgressSnapshot, RewardsState};

/// Caller-assembled statistics a badge predicate reads. Game screens build
/// this from whatever they track; `from_state` covers the common case.
#[derive(Debug, Clone, Default)]
pub struct BadgeStats {
    pub total_games: u64,
    pub longest_streak: u32,
    /// Completion count per game key ("memory", "numberline", ...).
    pub game_counts: BTreeMap<String, u64>,
    pub letters_learned: usize,
    pub simon_high_score: u32,
}

impl BadgeStats {
    pub fn from_state(progress: &ProgressSnapshot, rewards: &RewardsState) -> Self {
        Self {
            total_games: progress.total_exercises(),
            longest_streak: progress.streak.longest,
            game_counts: progress.exercises_completed.clone(),
            letters_learned: rewards.letters_learned.len(),
            simon_high_score: rewards.simon_high_score,
        }
    }

    fn game_count(&self, game: &str) -> u64 {
        self.game_counts.get(game).copied().unwrap_or(0)
    }
}

/// One achievement. Predicates are pure and deterministic; only earned ids
/// are persisted, so new entries can be appended without migrating stored
/// state.
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: fn(&BadgeStats) -> bool,
}

/// Fixed catalog in evaluation order.
pub const BADGE_CATALOG: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "firstGame",
        name: "First Steps",
        description: "Complete your first game",
        icon: "🌟",
        condition: |stats| stats.total_games >= 1,
    },
    BadgeDefinition {
        id: "fiveGames",
        name: "Getting Started",
        description: "Complete 5 games",
        icon: "⭐",
        condition: |stats| stats.total_games >= 5,
    },
    BadgeDefinition {
        id: "tenGames",
        name: "Game Master",
        description: "Complete 10 games",
        icon: "🏆",
        condition: |stats| stats.total_games >= 10,
    },
    BadgeDefinition {
        id: "twentyFiveGames",
        name: "Super Player",
        description: "Complete 25 games",
        icon: "👑",
        condition: |stats| stats.total_games >= 25,
    },
    BadgeDefinition {
        id: "streakThree",
        name: "Consistent",
        description: "3 day streak",
        icon: "🔥",
        condition: |stats| stats.longest_streak >= 3,
    },
    BadgeDefinition {
        id: "streakSeven",
        name: "Week Warrior",
        description: "7 day streak",
        icon: "🌈",
        condition: |stats| stats.longest_streak >= 7,
    },
    BadgeDefinition {
        id: "memoryMaster",
        name: "Memory Master",
        description: "Win 5 Memory Match games",
        icon: "🧠",
        condition: |stats| stats.game_count("memory") >= 5,
    },
    BadgeDefinition {
        id: "simonPro",
        name: "Simon Pro",
        description: "Reach level 5 in Simon Says",
        icon: "🎯",
        condition: |stats| stats.simon_high_score >= 5,
    },
    BadgeDefinition {
        id: "abcExplorer",
        name: "ABC Explorer",
        description: "Learn all 26 letters",
        icon: "📚",
        condition: |stats| stats.letters_learned >= 26,
    },
    BadgeDefinition {
        id: "numberNinja",
        name: "Number Ninja",
        description: "Complete Number Line 10 times",
        icon: "🔢",
        condition: |stats| stats.game_count("numberline") >= 10,
    },
    BadgeDefinition {
        id: "colorArtist",
        name: "Color Artist",
        description: "Color 5 pictures",
        icon: "🎨",
        condition: |stats| stats.game_count("colorclick") >= 5,
    },
    BadgeDefinition {
        id: "musicMaestro",
        name: "Music Maestro",
        description: "Complete 3 songs",
        icon: "🎹",
        condition: |stats| stats.game_count("music") >= 3,
    },
];

pub fn badge_by_id(id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_CATALOG.iter().find(|badge| badge.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, badge) in BADGE_CATALOG.iter().enumerate() {
            assert!(
                !BADGE_CATALOG[..i].iter().any(|other| other.id == badge.id),
                "duplicate badge id {}",
                badge.id
            );
        }
    }

    #[test]
    fn game_specific_badges_read_their_counter() {
        let mut stats = BadgeStats::default();
        stats.game_counts.insert("memory".into(), 5);
        let memory_master = badge_by_id("memoryMaster").unwrap();
        let number_ninja = badge_by_id("numberNinja").unwrap();
        assert!((memory_master.condition)(&stats));
        assert!(!(number_ninja.condition)(&stats));
    }
}
