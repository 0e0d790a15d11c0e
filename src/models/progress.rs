use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Built-in time-tracking categories. Games may also report free-form
/// activity keys; these are the ones the dashboard always shows.
pub const SKILL_MOUSE_MOVEMENT: &str = "mouseMovement";
pub const SKILL_MOUSE_CLICKING: &str = "mouseClicking";
pub const SKILL_MOUSE_DRAG_DROP: &str = "mouseDragDrop";
pub const SKILL_KEYBOARD_BASIC: &str = "keyboardBasic";
pub const SKILL_KEYBOARD_TYPING: &str = "keyboardTyping";

/// Accuracy history categories.
pub const ACCURACY_CLICKING: &str = "clicking";
pub const ACCURACY_DRAG_DROP: &str = "dragDrop";
pub const ACCURACY_KEYBOARD: &str = "keyboard";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
    pub last_practice_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub skill: String,
    pub duration_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// The full persisted progress unit for one profile. Created with empty
/// defaults the first time a profile is seen; every field survives a
/// round-trip through the blob store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSnapshot {
    /// Cumulative whole seconds per skill key.
    pub time_spent: BTreeMap<String, u64>,
    /// Completion count per exercise key.
    pub exercises_completed: BTreeMap<String, u64>,
    /// Recent accuracy percentages (0-100) per category, newest last.
    pub accuracy: BTreeMap<String, Vec<u8>>,
    pub streak: StreakState,
    /// Recent session log, newest last.
    pub sessions: Vec<SessionRecord>,
}

impl ProgressSnapshot {
    pub fn total_time_spent(&self) -> u64 {
        self.time_spent.values().sum()
    }

    pub fn total_exercises(&self) -> u64 {
        self.exercises_completed.values().sum()
    }

    pub fn time_spent_on(&self, skill: &str) -> u64 {
        self.time_spent.get(skill).copied().unwrap_or(0)
    }

    pub fn completions_of(&self, exercise: &str) -> u64 {
        self.exercises_completed.get(exercise).copied().unwrap_or(0)
    }

    /// Mean of the stored history for a category, rounded to the nearest
    /// integer, or 0 when the history is empty.
    pub fn average_accuracy(&self, category: &str) -> u8 {
        let values = match self.accuracy.get(category) {
            Some(values) if !values.is_empty() => values,
            _ => return 0,
        };
        let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
        let count = values.len() as u64;
        ((sum + count / 2) / count) as u8
    }
}
