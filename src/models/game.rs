//! Reported game (a pod that was actually played). Owned externally; the core only reads its
//! participants.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a reported game.
pub type GameId = Uuid;

/// Outcome of a single participant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Win,
    Lose,
    Draw,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: PlayerId,
    pub result: GameResult,
    /// Commander / deck label the player used.
    pub commander: String,
}

/// A real game as reported after it was played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReportedGame {
    pub id: GameId,
    pub participants: Vec<Participant>,
}

impl ReportedGame {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants,
        }
    }

    /// The set of participating player ids (order and duplicates ignored).
    pub fn player_ids(&self) -> HashSet<PlayerId> {
        self.participants.iter().map(|p| p.player_id).collect()
    }
}
