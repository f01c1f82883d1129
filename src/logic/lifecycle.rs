//! League status transitions (draft -> active -> completed) and pod completion bookkeeping.

use crate::models::{League, LeagueError, LeagueStatus, ScheduledPod};
use serde::{Deserialize, Serialize};

/// Move a league to `to` if the lifecycle allows it.
pub fn transition_league(league: &mut League, to: LeagueStatus) -> Result<(), LeagueError> {
    if !league.status.can_transition_to(to) {
        return Err(LeagueError::InvalidTransition {
            from: league.status,
            to,
        });
    }
    league.status = to;
    Ok(())
}

/// True iff every scheduled pod of the league has been fulfilled.
pub fn is_league_complete(pods: &[ScheduledPod]) -> bool {
    pods.iter().all(ScheduledPod::is_completed)
}

/// Complete an active league whose pods have all been fulfilled. Returns whether the status
/// changed.
pub fn sync_league_status(league: &mut League, pods: &[ScheduledPod]) -> bool {
    if league.status == LeagueStatus::Active && is_league_complete(pods) {
        league.status = LeagueStatus::Completed;
        return true;
    }
    false
}

/// Fulfillment counts for a league's schedule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueProgress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl LeagueProgress {
    pub fn from_pods(pods: &[ScheduledPod]) -> Self {
        let completed = pods.iter().filter(|p| p.is_completed()).count();
        Self {
            total: pods.len(),
            completed,
            pending: pods.len() - completed,
        }
    }
}
