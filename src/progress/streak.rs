use chrono::NaiveDate;

use crate::models::StreakState;

/// Advance the streak for a session starting on `today` (local calendar
/// date of the session start). Practicing again on the same day is a
/// no-op, so calling this once per `start_session` cannot double-count.
pub fn advance(streak: &mut StreakState, today: NaiveDate) {
    if streak.last_practice_date == Some(today) {
        return;
    }

    let continues = match (streak.last_practice_date, today.pred_opt()) {
        (Some(last), Some(yesterday)) => last == yesterday,
        _ => false,
    };

    if continues {
        streak.current += 1;
    } else {
        // First practice ever, a gap of two or more days, or a recorded
        // date in the future from clock skew.
        streak.current = 1;
    }
    streak.longest = streak.longest.max(streak.current);
    streak.last_practice_date = Some(today);
}
