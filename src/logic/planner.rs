//! Pod assignment: turn a roster and a games-per-player target into pod groupings.

use crate::logic::combinations::{binomial, generate_combinations};
use crate::logic::validation::SchedulingPolicy;
use crate::models::{LeagueError, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Largest roster the every-combination schedule accepts.
pub const MAX_EVERY_COMBINATION_ROSTER: usize = 12;

/// How groupings are produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// Balanced assignment over a rotating queue of players who still need games.
    #[default]
    RoundRobin,
    /// Every possible pod exactly once (small rosters only).
    EveryCombination,
}

/// Produce pod groupings in which every roster player appears in exactly `games_per_player` pods.
///
/// Inputs are validated against `policy` first. Returns `InvalidConfiguration` instead of a
/// partial schedule when the strategy cannot meet the target exactly.
pub fn plan_pods(
    roster: &[PlayerId],
    games_per_player: u32,
    policy: &SchedulingPolicy,
    strategy: PlanStrategy,
) -> Result<Vec<Vec<PlayerId>>, LeagueError> {
    policy.check(roster.len(), games_per_player)?;
    ensure_unique(roster)?;
    let pod_size = policy.pod_size.players();

    let pods = match strategy {
        PlanStrategy::RoundRobin => round_robin(roster, games_per_player, pod_size)?,
        PlanStrategy::EveryCombination => every_combination(roster, games_per_player, pod_size)?,
    };

    // Never hand out a schedule that misses the target, whatever the strategy did.
    check_groupings(roster, &pods, games_per_player, &[pod_size]).map_err(|e| match e {
        LeagueError::InvalidGrouping(reason) => LeagueError::InvalidConfiguration(reason),
        other => other,
    })?;
    log::debug!(
        "Planned {} pods of {} for {} players at {} games each ({:?})",
        pods.len(),
        pod_size,
        roster.len(),
        games_per_player,
        strategy
    );
    Ok(pods)
}

/// Reject rosters that list the same player twice.
pub fn ensure_unique(roster: &[PlayerId]) -> Result<(), LeagueError> {
    let mut seen = HashSet::with_capacity(roster.len());
    for &id in roster {
        if !seen.insert(id) {
            return Err(LeagueError::DuplicatePlayer(id));
        }
    }
    Ok(())
}

/// Check that `groupings` is an exact schedule for `roster`: every pod has an allowed size,
/// distinct members, only roster players, and each player appears exactly `games_per_player` times.
pub fn check_groupings(
    roster: &[PlayerId],
    groupings: &[Vec<PlayerId>],
    games_per_player: u32,
    allowed_sizes: &[usize],
) -> Result<(), LeagueError> {
    let members: HashSet<PlayerId> = roster.iter().copied().collect();
    let mut counts: HashMap<PlayerId, u32> = HashMap::new();

    for (i, pod) in groupings.iter().enumerate() {
        let n = i + 1;
        if !allowed_sizes.contains(&pod.len()) {
            return Err(LeagueError::InvalidGrouping(format!(
                "pod {} has {} players",
                n,
                pod.len()
            )));
        }
        let distinct: HashSet<PlayerId> = pod.iter().copied().collect();
        if distinct.len() != pod.len() {
            return Err(LeagueError::InvalidGrouping(format!("pod {} lists a player twice", n)));
        }
        if !distinct.is_subset(&members) {
            return Err(LeagueError::InvalidGrouping(format!(
                "pod {} includes a player outside the roster",
                n
            )));
        }
        for &id in pod {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    for id in roster {
        let games = counts.get(id).copied().unwrap_or(0);
        if games != games_per_player {
            return Err(LeagueError::InvalidGrouping(format!(
                "a player is scheduled for {} games instead of {}",
                games, games_per_player
            )));
        }
    }
    Ok(())
}

/// Complete candidate pods examined per pod before settling for the best-ranked one.
const CANDIDATE_BUDGET: usize = 2000;

/// Balanced greedy assignment.
///
/// Invariant between pods: every player's remaining games is at most the number of pods
/// still to fill, and remaining games sum to `pods_left * pod_size`. Seating every player
/// whose remaining games equal `pods_left` first keeps it, so any filler choice is safe.
///
/// 1. Forced: players who must play in every remaining pod.
/// 2. Fillers come from players not yet seated this round while there are enough of them.
/// 3. Candidates are ranked by fewest earlier pods shared with those already seated, most
///    games remaining, longest since last seated. The best-ranked pod whose player set is new,
///    and does not force the next pod into a repeat, wins.
fn round_robin(
    roster: &[PlayerId],
    games_per_player: u32,
    pod_size: usize,
) -> Result<Vec<Vec<PlayerId>>, LeagueError> {
    let total_pods = roster.len() * games_per_player as usize / pod_size;
    let mut state = RoundRobin {
        pod_size,
        pods_per_round: (roster.len() / pod_size).max(1),
        total_pods,
        remaining: roster.iter().map(|&id| (id, games_per_player)).collect(),
        queue: roster.iter().copied().collect(),
        shared: HashMap::new(),
        seated_this_round: HashSet::new(),
        emitted: HashSet::new(),
    };
    let mut pods = Vec::with_capacity(total_pods);

    for pod_index in 0..total_pods {
        if pod_index % state.pods_per_round == 0 {
            state.seated_this_round.clear();
        }
        let pod = state.next_pod(pod_index)?;
        state.seat(&pod);
        pods.push(pod);
    }

    Ok(pods)
}

struct RoundRobin {
    pod_size: usize,
    pods_per_round: usize,
    total_pods: usize,
    remaining: HashMap<PlayerId, u32>,
    /// Least recently seated first.
    queue: VecDeque<PlayerId>,
    shared: HashMap<(PlayerId, PlayerId), u32>,
    seated_this_round: HashSet<PlayerId>,
    emitted: HashSet<BTreeSet<PlayerId>>,
}

/// Bookkeeping for one pod's candidate search.
struct Search {
    budget: usize,
    tried: HashSet<BTreeSet<PlayerId>>,
    first: Option<Vec<PlayerId>>,
}

impl RoundRobin {
    fn remaining(&self, id: PlayerId) -> u32 {
        self.remaining.get(&id).copied().unwrap_or(0)
    }

    fn next_pod(&self, pod_index: usize) -> Result<Vec<PlayerId>, LeagueError> {
        let pods_left = (self.total_pods - pod_index) as u32;

        let mut pod: Vec<PlayerId> = self
            .queue
            .iter()
            .copied()
            .filter(|&id| self.remaining(id) == pods_left)
            .collect();
        if pod.len() > self.pod_size {
            return Err(LeagueError::InvalidConfiguration(format!(
                "{} players must share each of the last {} pods",
                pod.len(),
                pods_left
            )));
        }

        let (fresh, seated): (Vec<PlayerId>, Vec<PlayerId>) = self
            .queue
            .iter()
            .copied()
            .filter(|&id| self.remaining(id) > 0 && !pod.contains(&id))
            .partition(|id| !self.seated_this_round.contains(id));
        let pool = if fresh.len() >= self.pod_size - pod.len() {
            fresh
        } else {
            pod.extend(fresh);
            seated
        };

        let position: HashMap<PlayerId, usize> =
            self.queue.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        let mut search = Search {
            budget: CANDIDATE_BUDGET,
            tried: HashSet::new(),
            first: None,
        };
        if let Some(found) = self.fill(&mut pod, &pool, &position, pod_index, &mut search) {
            return Ok(found);
        }
        search.first.ok_or_else(|| {
            LeagueError::InvalidConfiguration(
                "not enough players with games left to fill a pod".to_string(),
            )
        })
    }

    /// Depth-first over ranked fillers. Returns the first acceptable pod; the best-ranked
    /// complete pod is kept in `search.first` as the fallback.
    fn fill(
        &self,
        pod: &mut Vec<PlayerId>,
        pool: &[PlayerId],
        position: &HashMap<PlayerId, usize>,
        pod_index: usize,
        search: &mut Search,
    ) -> Option<Vec<PlayerId>> {
        if pod.len() == self.pod_size {
            let players: BTreeSet<PlayerId> = pod.iter().copied().collect();
            if !search.tried.insert(players.clone()) {
                return None;
            }
            search.budget = search.budget.saturating_sub(1);
            if search.first.is_none() {
                search.first = Some(pod.clone());
            }
            return self.is_acceptable(pod, &players, pod_index).then(|| pod.clone());
        }

        let mut candidates: Vec<PlayerId> =
            pool.iter().copied().filter(|id| !pod.contains(id)).collect();
        candidates.sort_by_key(|&id| {
            (
                times_shared(&self.shared, id, &pod[..]),
                Reverse(self.remaining(id)),
                position.get(&id).copied().unwrap_or(usize::MAX),
            )
        });
        for id in candidates {
            if search.budget == 0 {
                break;
            }
            pod.push(id);
            let found = self.fill(pod, pool, position, pod_index, search);
            pod.pop();
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn is_acceptable(
        &self,
        pod: &[PlayerId],
        players: &BTreeSet<PlayerId>,
        pod_index: usize,
    ) -> bool {
        if self.emitted.contains(players) {
            return false;
        }
        match self.determined_next(pod, pod_index) {
            Some(next) => next != *players && !self.emitted.contains(&next),
            None => true,
        }
    }

    /// The pod after `pod` when seating `pod` leaves no choice for it: either enough players
    /// become forced, or exactly the open seats' worth of fresh players remain.
    fn determined_next(&self, pod: &[PlayerId], pod_index: usize) -> Option<BTreeSet<PlayerId>> {
        let pods_left = self.total_pods - pod_index - 1;
        if pods_left == 0 {
            return None;
        }
        let after = |id: PlayerId| self.remaining(id) - u32::from(pod.contains(&id));

        let forced: Vec<PlayerId> = self
            .queue
            .iter()
            .copied()
            .filter(|&id| after(id) == pods_left as u32)
            .collect();
        if forced.len() >= self.pod_size {
            return Some(forced.into_iter().collect());
        }

        let new_round = (pod_index + 1) % self.pods_per_round == 0;
        let fresh: Vec<PlayerId> = self
            .queue
            .iter()
            .copied()
            .filter(|&id| after(id) > 0 && !forced.contains(&id))
            .filter(|id| new_round || !(self.seated_this_round.contains(id) || pod.contains(id)))
            .collect();
        if fresh.len() == self.pod_size - forced.len() {
            Some(forced.into_iter().chain(fresh).collect())
        } else {
            None
        }
    }

    fn seat(&mut self, pod: &[PlayerId]) {
        for (i, &a) in pod.iter().enumerate() {
            if let Some(r) = self.remaining.get_mut(&a) {
                *r -= 1;
            }
            self.seated_this_round.insert(a);
            for &b in &pod[i + 1..] {
                *self.shared.entry(pair_key(a, b)).or_insert(0) += 1;
            }
        }
        self.queue.retain(|id| !pod.contains(id));
        self.queue.extend(pod.iter().copied());
        self.emitted.insert(pod.iter().copied().collect());
    }
}

fn every_combination(
    roster: &[PlayerId],
    games_per_player: u32,
    pod_size: usize,
) -> Result<Vec<Vec<PlayerId>>, LeagueError> {
    if roster.len() > MAX_EVERY_COMBINATION_ROSTER {
        return Err(LeagueError::InvalidConfiguration(format!(
            "every-combination schedules are limited to {} players",
            MAX_EVERY_COMBINATION_ROSTER
        )));
    }
    let games_each = binomial(roster.len().saturating_sub(1), pod_size.saturating_sub(1));
    if roster.is_empty() || games_each != games_per_player as usize {
        return Err(LeagueError::InvalidConfiguration(format!(
            "every combination gives each player {} games, not {}",
            games_each, games_per_player
        )));
    }
    Ok(generate_combinations(roster, pod_size))
}

fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn times_shared(
    shared: &HashMap<(PlayerId, PlayerId), u32>,
    id: PlayerId,
    pod: &[PlayerId],
) -> u32 {
    pod.iter()
        .map(|&other| shared.get(&pair_key(id, other)).copied().unwrap_or(0))
        .sum()
}

/// Most times any two players share a pod in `groupings`.
pub fn max_pair_repeats(groupings: &[Vec<PlayerId>]) -> u32 {
    let mut shared: HashMap<(PlayerId, PlayerId), u32> = HashMap::new();
    for pod in groupings {
        for (i, &a) in pod.iter().enumerate() {
            for &b in &pod[i + 1..] {
                *shared.entry(pair_key(a, b)).or_insert(0) += 1;
            }
        }
    }
    shared.values().copied().max().unwrap_or(0)
}
