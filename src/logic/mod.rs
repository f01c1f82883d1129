//! League business logic: validation, pod planning, lifecycle, fulfillment matching.

mod combinations;
mod league;
mod lifecycle;
mod matcher;
mod planner;
mod validation;

pub use combinations::{binomial, generate_combinations};
pub use league::{
    complete_league, generate_league, league_progress, on_game_reported, publish_league,
    report_game, GeneratedLeague, NewLeague, ScheduleStats,
};
pub use lifecycle::{is_league_complete, sync_league_status, transition_league, LeagueProgress};
pub use matcher::find_matching_scheduled_pod;
pub use planner::{
    check_groupings, ensure_unique, max_pair_repeats, plan_pods, PlanStrategy,
    MAX_EVERY_COMBINATION_ROSTER,
};
pub use validation::{
    check_league_inputs, get_suggested_games_per_player, validate_league_inputs, PodSize,
    SchedulingPolicy, Validation, MAX_GAMES_PER_PLAYER, MAX_LEAGUE_PLAYERS, MIN_LEAGUE_PLAYERS,
};
