//! League orchestration: generate a league with its schedule, move it through its lifecycle,
//! and link reported games to the scheduled pods they fulfill.

use crate::logic::lifecycle::{self, LeagueProgress};
use crate::logic::matcher::find_matching_scheduled_pod;
use crate::logic::planner::{
    check_groupings, ensure_unique, max_pair_repeats, plan_pods, PlanStrategy,
};
use crate::logic::validation::SchedulingPolicy;
use crate::models::{
    GameId, League, LeagueError, LeagueId, LeagueStatus, PlayerId, ReportedGame, ScheduledPod,
};
use crate::store::LeagueStore;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Pod sizes accepted in caller-supplied groupings.
const EXPLICIT_POD_SIZES: [usize; 2] = [3, 4];

/// Request to create a league and its schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLeague {
    pub name: String,
    pub player_ids: Vec<PlayerId>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub games_per_player: u32,
    /// Explicit pod groupings; when absent the planner builds them.
    #[serde(default)]
    pub pods: Option<Vec<Vec<PlayerId>>>,
    #[serde(default)]
    pub strategy: PlanStrategy,
    /// Shuffle the roster with this seed before planning (stored roster order is unchanged).
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

/// Summary of a generated schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub player_count: usize,
    pub games_per_player: u32,
    /// Distinct pod sizes in the schedule, ascending. Only explicit groupings mix sizes.
    pub pod_sizes: Vec<usize>,
    pub total_slots: usize,
    pub total_pods: usize,
    /// Pods whose player set differs from every earlier pod.
    pub distinct_pods: usize,
    /// Most pods any two players share.
    pub max_pair_repeats: u32,
}

impl ScheduleStats {
    pub fn from_groupings(
        player_count: usize,
        games_per_player: u32,
        groupings: &[Vec<PlayerId>],
    ) -> Self {
        let distinct: HashSet<BTreeSet<PlayerId>> = groupings
            .iter()
            .map(|pod| pod.iter().copied().collect())
            .collect();
        let pod_sizes: BTreeSet<usize> = groupings.iter().map(Vec::len).collect();
        Self {
            player_count,
            games_per_player,
            pod_sizes: pod_sizes.into_iter().collect(),
            total_slots: groupings.iter().map(Vec::len).sum(),
            total_pods: groupings.len(),
            distinct_pods: distinct.len(),
            max_pair_repeats: max_pair_repeats(groupings),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedLeague {
    pub league: League,
    pub scheduled_pods: Vec<ScheduledPod>,
    pub stats: ScheduleStats,
}

/// Validate the request, build the pod groupings, and persist the league (Draft) with its pods
/// (pending).
pub fn generate_league<S: LeagueStore + ?Sized>(
    store: &mut S,
    request: NewLeague,
    policy: &SchedulingPolicy,
) -> Result<GeneratedLeague, LeagueError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(LeagueError::EmptyName);
    }
    if let Some(end) = request.end_date {
        if end < request.start_date {
            return Err(LeagueError::InvalidDateRange);
        }
    }
    policy.check(request.player_ids.len(), request.games_per_player)?;
    ensure_unique(&request.player_ids)?;

    let groupings = match request.pods {
        Some(pods) => {
            check_groupings(
                &request.player_ids,
                &pods,
                request.games_per_player,
                &EXPLICIT_POD_SIZES,
            )?;
            pods
        }
        None => {
            let mut roster = request.player_ids.clone();
            if let Some(seed) = request.shuffle_seed {
                roster.shuffle(&mut StdRng::seed_from_u64(seed));
            }
            plan_pods(&roster, request.games_per_player, policy, request.strategy)?
        }
    };

    let stats = ScheduleStats::from_groupings(
        request.player_ids.len(),
        request.games_per_player,
        &groupings,
    );
    let league = League::new(
        name,
        request.player_ids,
        request.games_per_player,
        request.start_date,
        request.end_date,
    );
    let league_id = league.id;
    store.insert_league(league.clone())?;
    let scheduled_pods = store.create_scheduled_pods(league_id, groupings)?;

    log::info!(
        "Generated league '{}' ({}): {} players, {} games each, {} pods",
        league.name,
        league_id,
        stats.player_count,
        stats.games_per_player,
        stats.total_pods
    );
    Ok(GeneratedLeague {
        league,
        scheduled_pods,
        stats,
    })
}

/// Draft -> Active.
pub fn publish_league<S: LeagueStore + ?Sized>(
    store: &mut S,
    league_id: LeagueId,
) -> Result<League, LeagueError> {
    set_status(store, league_id, LeagueStatus::Active)
}

/// Active -> Completed (admin action, regardless of pending pods).
pub fn complete_league<S: LeagueStore + ?Sized>(
    store: &mut S,
    league_id: LeagueId,
) -> Result<League, LeagueError> {
    set_status(store, league_id, LeagueStatus::Completed)
}

fn set_status<S: LeagueStore + ?Sized>(
    store: &mut S,
    league_id: LeagueId,
    to: LeagueStatus,
) -> Result<League, LeagueError> {
    let mut league = store
        .get_league(league_id)
        .ok_or(LeagueError::LeagueNotFound(league_id))?;
    lifecycle::transition_league(&mut league, to)?;
    store.update_league_status(league_id, league.status)?;
    log::info!("League '{}' is now {}", league.name, league.status);
    Ok(league)
}

pub fn league_progress<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: LeagueId,
) -> Result<LeagueProgress, LeagueError> {
    if store.get_league(league_id).is_none() {
        return Err(LeagueError::LeagueNotFound(league_id));
    }
    Ok(LeagueProgress::from_pods(&store.list_scheduled_pods(league_id)))
}

/// Link a reported game to the pending scheduled pod with exactly the same players.
///
/// With `league_id` only that league is searched; without it, every league. Either way only
/// active leagues take part. Returns `Ok(None)` when nothing matches. An active league whose last
/// pending pod is fulfilled here moves to Completed.
pub fn on_game_reported<S: LeagueStore + ?Sized>(
    store: &mut S,
    league_id: Option<LeagueId>,
    game_id: GameId,
    resolved_player_ids: &HashSet<PlayerId>,
) -> Result<Option<ScheduledPod>, LeagueError> {
    let candidates: Vec<ScheduledPod> = match league_id {
        Some(id) => {
            let league = store.get_league(id).ok_or(LeagueError::LeagueNotFound(id))?;
            if league.status == LeagueStatus::Active {
                store.list_scheduled_pods(id)
            } else {
                Vec::new()
            }
        }
        None => store
            .list_leagues()
            .into_iter()
            .filter(|l| l.status == LeagueStatus::Active)
            .flat_map(|l| store.list_scheduled_pods(l.id))
            .collect(),
    };

    let pod_id = match find_matching_scheduled_pod(&candidates, league_id, resolved_player_ids) {
        Some(pod) => pod.id,
        None => {
            log::debug!("Game {} matches no pending scheduled pod", game_id);
            return Ok(None);
        }
    };

    let completed = match store.mark_scheduled_pod_completed(pod_id, game_id) {
        Ok(pod) => pod,
        Err(e) => {
            log::warn!("Could not complete scheduled pod {}: {}", pod_id, e);
            return Err(e);
        }
    };
    log::info!("Game {} fulfills scheduled pod {}", game_id, completed.id);

    if let Some(mut league) = store.get_league(completed.league_id) {
        let pods = store.list_scheduled_pods(league.id);
        if lifecycle::sync_league_status(&mut league, &pods) {
            store.update_league_status(league.id, league.status)?;
            log::info!("League '{}' completed: every scheduled pod played", league.name);
        }
    }
    Ok(Some(completed))
}

/// `on_game_reported` for a full game record.
pub fn report_game<S: LeagueStore + ?Sized>(
    store: &mut S,
    league_id: Option<LeagueId>,
    game: &ReportedGame,
) -> Result<Option<ScheduledPod>, LeagueError> {
    on_game_reported(store, league_id, game.id, &game.player_ids())
}
