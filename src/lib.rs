//! League pod scheduling: library with models, scheduling logic, storage and export.

pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use export::{schedule_csv, write_schedule_csv};
pub use logic::{
    binomial, check_groupings, check_league_inputs, complete_league, ensure_unique,
    find_matching_scheduled_pod, generate_combinations, generate_league,
    get_suggested_games_per_player, is_league_complete, league_progress, max_pair_repeats,
    on_game_reported, plan_pods, publish_league, report_game, sync_league_status,
    transition_league, validate_league_inputs, GeneratedLeague, LeagueProgress, NewLeague,
    PlanStrategy, PodSize, ScheduleStats, SchedulingPolicy, Validation,
    MAX_EVERY_COMBINATION_ROSTER, MAX_GAMES_PER_PLAYER, MAX_LEAGUE_PLAYERS, MIN_LEAGUE_PLAYERS,
};
pub use models::{
    GameId, GameResult, League, LeagueError, LeagueId, LeagueStatus, Participant, Player,
    PlayerId, ReportedGame, ScheduledPod, ScheduledPodId,
};
pub use store::{LeagueStore, MemoryStore};
