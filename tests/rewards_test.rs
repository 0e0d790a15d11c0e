#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use clickykids_core::rewards::{BadgeStats, RewardsEvaluator, BADGE_CATALOG};
    use clickykids_core::store::MemoryStore;

    fn evaluator() -> RewardsEvaluator {
        let _ = env_logger::builder().is_test(true).try_init();
        RewardsEvaluator::new(Rc::new(MemoryStore::new()), Some("kid-1".to_string()))
    }

    #[test]
    fn first_game_earns_the_first_badge() {
        let mut rewards = evaluator();
        let stats = BadgeStats {
            total_games: 1,
            ..BadgeStats::default()
        };

        let newly = rewards.check_badges(&stats);
        assert_eq!(newly, vec!["firstGame".to_string()]);
        assert!(rewards.state().has_badge("firstGame"));
        assert_eq!(rewards.state().new_badges, vec!["firstGame".to_string()]);
    }

    #[test]
    fn rechecking_the_same_stats_reports_nothing() {
        let mut rewards = evaluator();
        let stats = BadgeStats {
            total_games: 10,
            longest_streak: 3,
            ..BadgeStats::default()
        };

        let first_pass = rewards.check_badges(&stats);
        assert_eq!(
            first_pass,
            vec!["firstGame", "fiveGames", "tenGames", "streakThree"]
        );

        let second_pass = rewards.check_badges(&stats);
        assert!(second_pass.is_empty());
        // The notification list from the first pass is still waiting for
        // the UI; a no-op check must not clear it.
        assert_eq!(rewards.state().new_badges.len(), 4);
        assert_eq!(rewards.state().earned_badges.len(), 4);
    }

    #[test]
    fn clear_new_badges_keeps_earned_set() {
        let mut rewards = evaluator();
        let stats = BadgeStats {
            total_games: 1,
            ..BadgeStats::default()
        };
        rewards.check_badges(&stats);

        rewards.clear_new_badges();
        assert!(rewards.state().new_badges.is_empty());
        assert!(rewards.state().has_badge("firstGame"));
    }

    #[test]
    fn badges_are_awarded_in_catalog_order() {
        let mut rewards = evaluator();
        let mut stats = BadgeStats {
            total_games: 30,
            longest_streak: 8,
            letters_learned: 26,
            simon_high_score: 6,
            ..BadgeStats::default()
        };
        stats.game_counts.insert("memory".into(), 5);
        stats.game_counts.insert("numberline".into(), 10);
        stats.game_counts.insert("colorclick".into(), 5);
        stats.game_counts.insert("music".into(), 3);

        let newly = rewards.check_badges(&stats);
        let catalog_ids: Vec<&str> = BADGE_CATALOG.iter().map(|b| b.id).collect();
        assert_eq!(newly, catalog_ids);
    }

    #[test]
    fn stars_accumulate_without_cap() {
        let mut rewards = evaluator();
        rewards.add_stars(10);
        rewards.add_stars(0);
        rewards.add_stars(5);
        assert_eq!(rewards.state().stars, 15);
    }

    #[test]
    fn letters_are_a_set() {
        let mut rewards = evaluator();
        rewards.track_letter_learned('a');
        rewards.track_letter_learned('b');
        rewards.track_letter_learned('a');
        assert_eq!(rewards.state().letters_learned, vec!['a', 'b']);
    }

    #[test]
    fn simon_score_only_moves_up() {
        let mut rewards = evaluator();
        rewards.update_simon_score(4);
        rewards.update_simon_score(2);
        assert_eq!(rewards.state().simon_high_score, 4);
        rewards.update_simon_score(7);
        assert_eq!(rewards.state().simon_high_score, 7);
    }

    #[test]
    fn reset_wipes_everything() {
        let mut rewards = evaluator();
        rewards.add_stars(3);
        rewards.track_letter_learned('z');
        rewards.update_simon_score(9);
        rewards.check_badges(&BadgeStats {
            total_games: 1,
            ..BadgeStats::default()
        });

        rewards.reset_rewards();

        assert_eq!(rewards.state().stars, 0);
        assert!(rewards.state().earned_badges.is_empty());
        assert!(rewards.state().letters_learned.is_empty());
        assert_eq!(rewards.state().simon_high_score, 0);
    }
}
