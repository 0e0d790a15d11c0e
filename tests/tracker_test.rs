#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use clickykids_core::models::{ACCURACY_CLICKING, SKILL_MOUSE_MOVEMENT};
    use clickykids_core::progress::ProgressTracker;
    use clickykids_core::store::MemoryStore;

    fn tracker() -> ProgressTracker {
        let _ = env_logger::builder().is_test(true).try_init();
        ProgressTracker::new(Rc::new(MemoryStore::new()), Some("kid-1".to_string()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sessions_accumulate_rounded_durations() {
        let mut tracker = tracker();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        // 90 s exactly, then 30.4 s which rounds down to 30.
        tracker.start_session_at("mouseMovement", start, date(2024, 1, 1));
        tracker.end_session_at(start + Duration::seconds(90));

        let second_start = start + Duration::minutes(10);
        tracker.start_session_at("mouseMovement", second_start, date(2024, 1, 1));
        tracker.end_session_at(second_start + Duration::milliseconds(30_400));

        assert_eq!(tracker.get_total_time_spent(), 120);
        assert_eq!(tracker.snapshot().time_spent_on(SKILL_MOUSE_MOVEMENT), 120);
        assert_eq!(tracker.snapshot().sessions.len(), 2);
        assert_eq!(tracker.snapshot().sessions[1].duration_seconds, 30);
    }

    #[test]
    fn half_second_rounds_up() {
        let mut tracker = tracker();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        tracker.start_session_at("catch", start, date(2024, 1, 1));
        tracker.end_session_at(start + Duration::milliseconds(1_500));
        assert_eq!(tracker.snapshot().time_spent_on("catch"), 2);
    }

    #[test]
    fn end_without_start_is_a_noop() {
        let mut tracker = tracker();
        tracker.end_session();
        assert_eq!(tracker.get_total_time_spent(), 0);
        assert!(tracker.snapshot().sessions.is_empty());
    }

    #[test]
    fn restart_discards_the_unfinished_session() {
        let mut tracker = tracker();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        tracker.start_session_at("catch", start, date(2024, 1, 1));
        // Navigation interrupted the first game; only the replacement
        // session gets credited.
        let restart = start + Duration::seconds(300);
        tracker.start_session_at("memory", restart, date(2024, 1, 1));
        tracker.end_session_at(restart + Duration::seconds(10));

        assert_eq!(tracker.snapshot().time_spent_on("catch"), 0);
        assert_eq!(tracker.snapshot().time_spent_on("memory"), 10);
        assert_eq!(tracker.snapshot().sessions.len(), 1);
    }

    #[test]
    fn session_log_keeps_the_most_recent_hundred() {
        let mut tracker = tracker();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        for i in 0..105i64 {
            let start = base + Duration::minutes(i);
            tracker.start_session_at(&format!("skill{i}"), start, date(2024, 1, 1));
            tracker.end_session_at(start + Duration::seconds(1));
        }
        let sessions = &tracker.snapshot().sessions;
        assert_eq!(sessions.len(), 100);
        assert_eq!(sessions[0].skill, "skill5");
        assert_eq!(sessions[99].skill, "skill104");
    }

    #[test]
    fn accuracy_history_caps_at_fifty() {
        let mut tracker = tracker();
        // 51 distinct values 0..=50; the initial 0 must fall out.
        for value in 0..=50i64 {
            tracker.record_accuracy("clicking", value);
        }
        let history = tracker.snapshot().accuracy.get(ACCURACY_CLICKING).unwrap();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0], 1);
        assert_eq!(history[49], 50);
        // Mean of 1..=50 is 25.5, rounded to 26.
        assert_eq!(tracker.get_average_accuracy(ACCURACY_CLICKING), 26);
    }

    #[test]
    fn out_of_range_accuracy_is_clamped() {
        let mut tracker = tracker();
        tracker.record_accuracy("keyboard", 150);
        tracker.record_accuracy("keyboard", -20);
        let history = tracker.snapshot().accuracy.get("keyboard").unwrap();
        assert_eq!(history.as_slice(), &[100u8, 0][..]);
    }

    #[test]
    fn completions_and_direct_time_create_keys_lazily() {
        let mut tracker = tracker();
        tracker.complete_exercise("bubblePop");
        tracker.complete_exercise("bubblePop");
        tracker.add_time_spent("storyTime", 42);

        assert_eq!(tracker.snapshot().completions_of("bubblePop"), 2);
        assert_eq!(tracker.get_total_exercises(), 2);
        assert_eq!(tracker.snapshot().time_spent_on("storyTime"), 42);
    }

    #[test]
    fn streak_is_per_start_not_per_session_count() {
        let mut tracker = tracker();
        let morning = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 2, 18, 0, 0).unwrap();

        tracker.start_session_at("catch", morning, date(2024, 1, 2));
        tracker.end_session_at(morning + Duration::seconds(5));
        tracker.start_session_at("memory", evening, date(2024, 1, 2));
        tracker.end_session_at(evening + Duration::seconds(5));
        assert_eq!(tracker.snapshot().streak.current, 1);

        let next_day = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        tracker.start_session_at("catch", next_day, date(2024, 1, 3));
        tracker.end_session_at(next_day + Duration::seconds(5));
        assert_eq!(tracker.snapshot().streak.current, 2);
        assert_eq!(tracker.snapshot().streak.longest, 2);
    }

    #[test]
    fn reset_restores_the_default_snapshot() {
        let mut tracker = tracker();
        tracker.add_time_spent("mouseMovement", 500);
        tracker.complete_exercise("bubblePop");
        tracker.record_accuracy("clicking", 80);

        tracker.reset_progress();

        assert_eq!(tracker.get_total_time_spent(), 0);
        assert_eq!(tracker.get_total_exercises(), 0);
        assert_eq!(tracker.get_average_accuracy("clicking"), 0);
        assert_eq!(tracker.snapshot().streak.current, 0);
    }
}
