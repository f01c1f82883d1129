//! Persistence capability the league logic depends on, plus an in-memory implementation.

use crate::models::{
    GameId, League, LeagueError, LeagueId, LeagueStatus, Player, PlayerId, ScheduledPod,
    ScheduledPodId,
};
use std::collections::HashMap;

/// Storage operations needed to generate leagues and record fulfilled pods.
///
/// `mark_scheduled_pod_completed` must be conditional on the pod still being pending, so two
/// concurrent reports can never link different games to the same pod.
pub trait LeagueStore {
    fn insert_player(&mut self, player: Player) -> Result<(), LeagueError>;
    fn list_players(&self) -> Vec<Player>;
    fn insert_league(&mut self, league: League) -> Result<(), LeagueError>;
    fn get_league(&self, id: LeagueId) -> Option<League>;
    fn list_leagues(&self) -> Vec<League>;
    fn update_league_status(
        &mut self,
        id: LeagueId,
        status: LeagueStatus,
    ) -> Result<(), LeagueError>;
    fn list_scheduled_pods(&self, league_id: LeagueId) -> Vec<ScheduledPod>;
    fn create_scheduled_pods(
        &mut self,
        league_id: LeagueId,
        groupings: Vec<Vec<PlayerId>>,
    ) -> Result<Vec<ScheduledPod>, LeagueError>;
    fn mark_scheduled_pod_completed(
        &mut self,
        pod_id: ScheduledPodId,
        game_id: GameId,
    ) -> Result<ScheduledPod, LeagueError>;
}

/// Leagues and their scheduled pods held in memory. Pass it explicitly; there is no global
/// instance.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    players: HashMap<PlayerId, Player>,
    leagues: HashMap<LeagueId, League>,
    /// Pods per league, in creation order.
    pods: HashMap<LeagueId, Vec<ScheduledPod>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueStore for MemoryStore {
    fn insert_player(&mut self, player: Player) -> Result<(), LeagueError> {
        self.players.insert(player.id, player);
        Ok(())
    }

    fn list_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    fn insert_league(&mut self, league: League) -> Result<(), LeagueError> {
        self.pods.entry(league.id).or_default();
        self.leagues.insert(league.id, league);
        Ok(())
    }

    fn get_league(&self, id: LeagueId) -> Option<League> {
        self.leagues.get(&id).cloned()
    }

    fn list_leagues(&self) -> Vec<League> {
        let mut leagues: Vec<League> = self.leagues.values().cloned().collect();
        leagues.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.name.cmp(&b.name)));
        leagues
    }

    fn update_league_status(
        &mut self,
        id: LeagueId,
        status: LeagueStatus,
    ) -> Result<(), LeagueError> {
        let league = self
            .leagues
            .get_mut(&id)
            .ok_or(LeagueError::LeagueNotFound(id))?;
        league.status = status;
        Ok(())
    }

    fn list_scheduled_pods(&self, league_id: LeagueId) -> Vec<ScheduledPod> {
        self.pods.get(&league_id).cloned().unwrap_or_default()
    }

    fn create_scheduled_pods(
        &mut self,
        league_id: LeagueId,
        groupings: Vec<Vec<PlayerId>>,
    ) -> Result<Vec<ScheduledPod>, LeagueError> {
        if !self.leagues.contains_key(&league_id) {
            return Err(LeagueError::LeagueNotFound(league_id));
        }
        let created: Vec<ScheduledPod> = groupings
            .into_iter()
            .map(|players| ScheduledPod::new(league_id, players))
            .collect();
        self.pods
            .entry(league_id)
            .or_default()
            .extend(created.iter().cloned());
        Ok(created)
    }

    fn mark_scheduled_pod_completed(
        &mut self,
        pod_id: ScheduledPodId,
        game_id: GameId,
    ) -> Result<ScheduledPod, LeagueError> {
        let pod = self
            .pods
            .values_mut()
            .flat_map(|pods| pods.iter_mut())
            .find(|p| p.id == pod_id)
            .ok_or(LeagueError::ScheduledPodNotFound(pod_id))?;
        pod.mark_completed(game_id)?;
        Ok(pod.clone())
    }
}
