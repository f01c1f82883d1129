//! League input validation: roster size, games per player, slot divisibility, and suggestions.

use crate::models::LeagueError;
use serde::{Deserialize, Serialize};

/// Smallest roster a league can be created with.
pub const MIN_LEAGUE_PLAYERS: usize = 4;

/// Largest roster a league can be created with.
pub const MAX_LEAGUE_PLAYERS: usize = 200;

/// Highest games-per-player target a league can be created with.
pub const MAX_GAMES_PER_PLAYER: u32 = 100;

/// Players per scheduled pod. Four is the league default; three is a separate, opt-in mode.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodSize {
    Three,
    #[default]
    Four,
}

impl PodSize {
    pub fn players(self) -> usize {
        match self {
            PodSize::Three => 3,
            PodSize::Four => 4,
        }
    }

    pub fn from_players(n: usize) -> Option<Self> {
        match n {
            3 => Some(PodSize::Three),
            4 => Some(PodSize::Four),
            _ => None,
        }
    }
}

/// Knobs for validation, suggestions and planning.
///
/// Roster and games bounds only tighten the hard limits: a `min_players` below
/// `MIN_LEAGUE_PLAYERS` is raised to it, and maxima above `MAX_LEAGUE_PLAYERS` or
/// `MAX_GAMES_PER_PLAYER` are lowered to them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    pub pod_size: PodSize,
    pub min_players: usize,
    pub max_players: usize,
    pub max_games_per_player: u32,
    /// Highest games-per-player value considered when suggesting.
    pub max_suggested_games: u32,
    /// Maximum number of suggestions returned.
    pub max_suggestions: usize,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            pod_size: PodSize::Four,
            min_players: MIN_LEAGUE_PLAYERS,
            max_players: MAX_LEAGUE_PLAYERS,
            max_games_per_player: MAX_GAMES_PER_PLAYER,
            max_suggested_games: 20,
            max_suggestions: 5,
        }
    }
}

/// Validation outcome in a form the UI can render directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    pub fn from_result(result: Result<(), LeagueError>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: None,
            },
            Err(e) => Self {
                is_valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

impl SchedulingPolicy {
    pub fn with_pod_size(pod_size: PodSize) -> Self {
        Self {
            pod_size,
            ..Self::default()
        }
    }

    /// Check that `player_count` players at `games_per_player` games each can be split into
    /// whole pods.
    pub fn check(&self, player_count: usize, games_per_player: u32) -> Result<(), LeagueError> {
        let min_players = self.min_players.max(MIN_LEAGUE_PLAYERS);
        if player_count < min_players {
            return Err(LeagueError::TooFewPlayers { min: min_players });
        }
        let max_players = self.max_players.min(MAX_LEAGUE_PLAYERS);
        if player_count > max_players {
            return Err(LeagueError::TooManyPlayers { max: max_players });
        }
        if games_per_player < 1 {
            return Err(LeagueError::InvalidGamesPerPlayer);
        }
        let max_games = self.max_games_per_player.clamp(1, MAX_GAMES_PER_PLAYER);
        if games_per_player > max_games {
            return Err(LeagueError::TooManyGamesPerPlayer { max: max_games });
        }
        // Both factors are bounded above, so the product fits.
        let pod_size = self.pod_size.players();
        let total_slots = player_count * games_per_player as usize;
        if total_slots % pod_size != 0 {
            return Err(LeagueError::SlotsNotDivisibleByPodSize {
                player_count,
                games_per_player,
                total_slots,
                pod_size,
            });
        }
        Ok(())
    }

    pub fn validate(&self, player_count: usize, games_per_player: u32) -> Validation {
        Validation::from_result(self.check(player_count, games_per_player))
    }

    /// Ascending games-per-player values that pass `check` for this roster size.
    pub fn suggested_games_per_player(&self, player_count: usize) -> Vec<u32> {
        (1..=self.max_suggested_games)
            .filter(|&g| self.check(player_count, g).is_ok())
            .take(self.max_suggestions)
            .collect()
    }
}

/// Result form of `validate_league_inputs`, using the default policy (pods of 4).
pub fn check_league_inputs(player_count: usize, games_per_player: u32) -> Result<(), LeagueError> {
    SchedulingPolicy::default().check(player_count, games_per_player)
}

/// Validate a proposed league configuration with the default policy (pods of 4).
pub fn validate_league_inputs(player_count: usize, games_per_player: u32) -> Validation {
    SchedulingPolicy::default().validate(player_count, games_per_player)
}

/// Suggested games-per-player values for a roster size, with the default policy.
/// Empty when the roster is too small for any league.
pub fn get_suggested_games_per_player(player_count: usize) -> Vec<u32> {
    SchedulingPolicy::default().suggested_games_per_player(player_count)
}
