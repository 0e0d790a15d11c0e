use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a user profile. All progress and rewards
/// state is partitioned by it.
pub type ProfileId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Age-based suggestion used when a profile is created without an
    /// explicit choice.
    pub fn suggested_for_age(age: u32) -> Self {
        if age <= 5 {
            Difficulty::Beginner
        } else if age <= 7 {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Beginner => DifficultySettings {
                target_size_px: 120,
                repetitions: 3,
                pass_accuracy: 50,
                time_limit: false,
                show_hints: true,
            },
            Difficulty::Intermediate => DifficultySettings {
                target_size_px: 80,
                repetitions: 5,
                pass_accuracy: 70,
                time_limit: false,
                show_hints: true,
            },
            Difficulty::Advanced => DifficultySettings {
                target_size_px: 50,
                repetitions: 7,
                pass_accuracy: 85,
                time_limit: true,
                show_hints: false,
            },
        }
    }
}

/// Tuning knobs the game screens read for the active profile's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultySettings {
    pub target_size_px: u32,
    pub repetitions: u32,
    /// Minimum accuracy percentage counted as a pass.
    pub pass_accuracy: u8,
    pub time_limit: bool,
    pub show_hints: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

fn default_avatar() -> String {
    "👦".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Profile {
    /// Whole years between the date of birth and `today`, or 0 when no
    /// date of birth was recorded.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        self.dob
            .and_then(|dob| today.years_since(dob))
            .unwrap_or(0)
    }
}
