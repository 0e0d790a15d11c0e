use serde::Serialize;

use crate::models::{
    ProgressSnapshot, ACCURACY_CLICKING, SKILL_KEYBOARD_BASIC, SKILL_MOUSE_MOVEMENT,
};

/// Mouse-movement seconds before clicking games are suggested.
const MOVEMENT_SECONDS_FOR_CLICKING: u64 = 300;
/// Clicking completions and average accuracy before drag-and-drop is
/// suggested.
const CLICKS_FOR_DRAG_DROP: u64 = 5;
const ACCURACY_FOR_DRAG_DROP: u8 = 60;
/// Total seconds before keyboard learning is suggested, and the keyboard
/// time under which the suggestion still applies.
const TOTAL_SECONDS_FOR_KEYBOARD: u64 = 600;
const KEYBOARD_SECONDS_ALREADY_TRIED: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationKind {
    Ready,
    Reminder,
}

/// Derived output for the presentation layer; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub skill: &'static str,
    pub message: &'static str,
}

/// Derive "what to try next" suggestions from current progress. Rules are
/// independent; every matching rule fires, in declaration order.
pub fn generate_recommendations(progress: &ProgressSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if progress.time_spent_on(SKILL_MOUSE_MOVEMENT) > MOVEMENT_SECONDS_FOR_CLICKING
        && progress.completions_of("bubblePop") == 0
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Ready,
            skill: "clicking",
            message: "Ready to try clicking games!",
        });
    }

    if progress.completions_of("bubblePop") > CLICKS_FOR_DRAG_DROP
        && progress.average_accuracy(ACCURACY_CLICKING) > ACCURACY_FOR_DRAG_DROP
        && progress.completions_of("puzzle") == 0
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Ready,
            skill: "dragDrop",
            message: "Ready for drag and drop!",
        });
    }

    if progress.total_time_spent() > TOTAL_SECONDS_FOR_KEYBOARD
        && progress.time_spent_on(SKILL_KEYBOARD_BASIC) < KEYBOARD_SECONDS_ALREADY_TRIED
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Ready,
            skill: "keyboard",
            message: "Try keyboard learning!",
        });
    }

    if progress.streak.current == 0 && progress.total_time_spent() > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Reminder,
            skill: "general",
            message: "Come back to practice!",
        });
    }

    recommendations
}
