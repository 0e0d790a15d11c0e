mod profile;
mod progress;
mod rewards;

pub use profile::{Difficulty, DifficultySettings, Profile, ProfileId};
pub use progress::{
    ProgressSnapshot, SessionRecord, StreakState, ACCURACY_CLICKING, ACCURACY_DRAG_DROP,
    ACCURACY_KEYBOARD, SKILL_KEYBOARD_BASIC, SKILL_KEYBOARD_TYPING, SKILL_MOUSE_CLICKING,
    SKILL_MOUSE_DRAG_DROP, SKILL_MOUSE_MOVEMENT,
};
pub use rewards::RewardsState;
