//! ScheduledPod: a planned game within a league.

use crate::models::game::GameId;
use crate::models::league::{LeagueError, LeagueId};
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a scheduled pod.
pub type ScheduledPodId = Uuid;

/// A reserved grouping of 3 or 4 players, pending until a reported game fulfills it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPod {
    pub id: ScheduledPodId,
    pub league_id: LeagueId,
    pub player_ids: Vec<PlayerId>,
    /// Game that fulfilled this pod. None while pending.
    pub completed_pod_id: Option<GameId>,
}

impl ScheduledPod {
    pub fn new(league_id: LeagueId, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            player_ids,
            completed_pod_id: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.completed_pod_id.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_pod_id.is_some()
    }

    pub fn player_set(&self) -> HashSet<PlayerId> {
        self.player_ids.iter().copied().collect()
    }

    /// Link the pod to the game that fulfilled it. A completed pod is never relinked.
    pub fn mark_completed(&mut self, game_id: GameId) -> Result<(), LeagueError> {
        if self.is_completed() {
            return Err(LeagueError::PodAlreadyCompleted(self.id));
        }
        self.completed_pod_id = Some(game_id);
        Ok(())
    }
}
