//! Integration tests for league input validation, suggestions and combination enumeration.

use pod_league::{
    binomial, check_league_inputs, generate_combinations, get_suggested_games_per_player,
    validate_league_inputs, LeagueError, PodSize, SchedulingPolicy, MAX_GAMES_PER_PLAYER,
    MAX_LEAGUE_PLAYERS,
};
use std::collections::HashSet;

#[test]
fn five_players_one_game_reports_slot_arithmetic() {
    let v = validate_league_inputs(5, 1);
    assert!(!v.is_valid);
    assert_eq!(
        v.error.as_deref(),
        Some("5 players × 1 games = 5 total slots. Need a multiple of 4.")
    );
}

#[test]
fn eight_players_two_games_is_valid() {
    let v = validate_league_inputs(8, 2);
    assert!(v.is_valid);
    assert_eq!(v.error, None);
}

#[test]
fn too_few_players_is_rejected_first() {
    let v = validate_league_inputs(2, 2);
    assert!(!v.is_valid);
    assert_eq!(v.error.as_deref(), Some("Need at least 4 players for a league"));
    assert_eq!(check_league_inputs(3, 4), Err(LeagueError::TooFewPlayers { min: 4 }));
}

#[test]
fn zero_games_per_player_is_rejected() {
    assert_eq!(check_league_inputs(8, 0), Err(LeagueError::InvalidGamesPerPlayer));
    assert!(!validate_league_inputs(8, 0).is_valid);
}

#[test]
fn valid_iff_slots_divide_by_four() {
    for players in 4..=40usize {
        for games in 1..=24u32 {
            let expected = (players * games as usize) % 4 == 0;
            assert_eq!(
                validate_league_inputs(players, games).is_valid,
                expected,
                "{players} players, {games} games"
            );
        }
    }
}

#[test]
fn suggestions_always_validate() {
    for players in 4..=60usize {
        let suggestions = get_suggested_games_per_player(players);
        assert!(!suggestions.is_empty(), "no suggestion for {players} players");
        assert!(suggestions.len() <= 5);
        assert!(suggestions.windows(2).all(|w| w[0] < w[1]));
        for g in suggestions {
            assert!(validate_league_inputs(players, g).is_valid);
        }
    }
}

#[test]
fn suggestions_for_common_roster_sizes() {
    assert_eq!(get_suggested_games_per_player(5), vec![4, 8, 12, 16, 20]);
    assert_eq!(get_suggested_games_per_player(6), vec![2, 4, 6, 8, 10]);
    assert_eq!(get_suggested_games_per_player(8), vec![1, 2, 3, 4, 5]);
    assert!(get_suggested_games_per_player(3).is_empty());
    // Deterministic
    assert_eq!(get_suggested_games_per_player(7), get_suggested_games_per_player(7));
}

#[test]
fn three_player_mode_checks_divisibility_by_three() {
    let policy = SchedulingPolicy::with_pod_size(PodSize::Three);
    assert!(policy.check(5, 3).is_ok());
    let v = policy.validate(5, 1);
    assert_eq!(
        v.error.as_deref(),
        Some("5 players × 1 games = 5 total slots. Need a multiple of 3.")
    );
    assert_eq!(policy.suggested_games_per_player(5), vec![3, 6, 9, 12, 15]);
}

#[test]
fn validation_serializes_without_error_when_valid() {
    let ok = serde_json::to_value(validate_league_inputs(8, 2)).unwrap();
    assert_eq!(ok, serde_json::json!({ "is_valid": true }));
    let bad = serde_json::to_value(validate_league_inputs(2, 1)).unwrap();
    assert_eq!(bad["is_valid"], false);
    assert_eq!(bad["error"], "Need at least 4 players for a league");
}

#[test]
fn five_players_choose_four() {
    let players = vec!["p1", "p2", "p3", "p4", "p5"];
    let combos = generate_combinations(&players, 4);
    assert_eq!(combos.len(), 5);
    assert!(combos.iter().all(|c| c.len() == 4));
    assert_eq!(combos[0], vec!["p1", "p2", "p3", "p4"]);
    assert_eq!(combos[4], vec!["p2", "p3", "p4", "p5"]);
}

#[test]
fn combination_count_matches_binomial() {
    for n in 0..=9usize {
        let items: Vec<usize> = (0..n).collect();
        for k in 0..=5usize {
            let combos = generate_combinations(&items, k);
            assert_eq!(combos.len(), binomial(n, k), "C({n}, {k})");
            let unique: HashSet<Vec<usize>> = combos.iter().cloned().collect();
            assert_eq!(unique.len(), combos.len());
            for c in &combos {
                assert_eq!(c.len(), k);
                assert!(c.iter().all(|x| *x < n));
                let distinct: HashSet<&usize> = c.iter().collect();
                assert_eq!(distinct.len(), k);
            }
        }
    }
}

#[test]
fn binomial_values() {
    assert_eq!(binomial(5, 4), 5);
    assert_eq!(binomial(10, 4), 210);
    assert_eq!(binomial(11, 3), 165);
    assert_eq!(binomial(3, 4), 0);
    assert_eq!(binomial(7, 0), 1);
}

#[test]
fn huge_player_counts_are_rejected_without_overflow() {
    assert_eq!(
        check_league_inputs(usize::MAX / 2, 4),
        Err(LeagueError::TooManyPlayers { max: MAX_LEAGUE_PLAYERS })
    );
    let v = validate_league_inputs(usize::MAX, u32::MAX);
    assert!(!v.is_valid);
    assert_eq!(v.error.as_deref(), Some("A league can have at most 200 players"));
    assert!(get_suggested_games_per_player(usize::MAX).is_empty());
    assert_eq!(check_league_inputs(MAX_LEAGUE_PLAYERS, 2), Ok(()));
}

#[test]
fn games_per_player_has_a_ceiling() {
    assert_eq!(check_league_inputs(8, MAX_GAMES_PER_PLAYER), Ok(()));
    assert_eq!(
        check_league_inputs(8, MAX_GAMES_PER_PLAYER + 1),
        Err(LeagueError::TooManyGamesPerPlayer { max: 100 })
    );
    let v = validate_league_inputs(8, u32::MAX);
    assert_eq!(v.error.as_deref(), Some("Games per player must be at most 100"));
}

#[test]
fn policy_bounds_only_tighten_the_hard_limits() {
    let loose = SchedulingPolicy {
        min_players: 0,
        max_players: usize::MAX,
        max_games_per_player: u32::MAX,
        ..SchedulingPolicy::default()
    };
    assert_eq!(loose.check(0, 4), Err(LeagueError::TooFewPlayers { min: 4 }));
    assert_eq!(loose.check(2, 2), Err(LeagueError::TooFewPlayers { min: 4 }));
    assert_eq!(loose.check(204, 1), Err(LeagueError::TooManyPlayers { max: 200 }));
    assert_eq!(loose.check(8, 104), Err(LeagueError::TooManyGamesPerPlayer { max: 100 }));
    assert!(loose.suggested_games_per_player(0).is_empty());

    let strict = SchedulingPolicy {
        min_players: 8,
        max_players: 16,
        max_games_per_player: 10,
        ..SchedulingPolicy::default()
    };
    assert_eq!(strict.check(4, 4), Err(LeagueError::TooFewPlayers { min: 8 }));
    assert_eq!(strict.check(20, 1), Err(LeagueError::TooManyPlayers { max: 16 }));
    assert_eq!(strict.check(8, 12), Err(LeagueError::TooManyGamesPerPlayer { max: 10 }));
    assert_eq!(strict.check(8, 10), Ok(()));
}
