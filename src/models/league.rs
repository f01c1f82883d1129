//! League, LeagueStatus and the crate-wide LeagueError.

use crate::models::player::PlayerId;
use crate::models::pod::ScheduledPodId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Roster is smaller than the minimum league size.
    TooFewPlayers { min: usize },
    /// Roster is larger than the maximum league size.
    TooManyPlayers { max: usize },
    /// Games per player below 1.
    InvalidGamesPerPlayer,
    /// Games per player above the allowed maximum.
    TooManyGamesPerPlayer { max: u32 },
    /// Total player slots cannot be split into whole pods.
    SlotsNotDivisibleByPodSize {
        player_count: usize,
        games_per_player: u32,
        total_slots: usize,
        pod_size: usize,
    },
    /// The same player id is listed twice in a roster.
    DuplicatePlayer(PlayerId),
    /// League name is blank.
    EmptyName,
    /// End date lies before the start date.
    InvalidDateRange,
    /// No exact assignment could be produced for inputs that passed validation.
    InvalidConfiguration(String),
    /// Caller-supplied pod groupings are not a valid schedule for the roster.
    InvalidGrouping(String),
    /// League status change not allowed by the lifecycle.
    InvalidTransition { from: LeagueStatus, to: LeagueStatus },
    LeagueNotFound(LeagueId),
    ScheduledPodNotFound(ScheduledPodId),
    /// Scheduled pod is already linked to a game.
    PodAlreadyCompleted(ScheduledPodId),
    /// Writing the schedule export failed.
    Export(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::TooFewPlayers { min } => {
                write!(f, "Need at least {} players for a league", min)
            }
            LeagueError::TooManyPlayers { max } => {
                write!(f, "A league can have at most {} players", max)
            }
            LeagueError::InvalidGamesPerPlayer => write!(f, "Games per player must be at least 1"),
            LeagueError::TooManyGamesPerPlayer { max } => {
                write!(f, "Games per player must be at most {}", max)
            }
            LeagueError::SlotsNotDivisibleByPodSize {
                player_count,
                games_per_player,
                total_slots,
                pod_size,
            } => write!(
                f,
                "{} players × {} games = {} total slots. Need a multiple of {}.",
                player_count, games_per_player, total_slots, pod_size
            ),
            LeagueError::DuplicatePlayer(_) => {
                write!(f, "A player is listed more than once in the roster")
            }
            LeagueError::EmptyName => write!(f, "League name must not be empty"),
            LeagueError::InvalidDateRange => write!(f, "End date must not be before start date"),
            LeagueError::InvalidConfiguration(reason) => write!(
                f,
                "Cannot generate this league ({}); adjust roster or games per player",
                reason
            ),
            LeagueError::InvalidGrouping(reason) => write!(f, "Invalid pod grouping: {}", reason),
            LeagueError::InvalidTransition { from, to } => {
                write!(f, "Cannot move a league from {} to {}", from, to)
            }
            LeagueError::LeagueNotFound(_) => write!(f, "League not found"),
            LeagueError::ScheduledPodNotFound(_) => write!(f, "Scheduled pod not found"),
            LeagueError::PodAlreadyCompleted(_) => write!(f, "Scheduled pod is already completed"),
            LeagueError::Export(reason) => write!(f, "Schedule export failed: {}", reason),
        }
    }
}

impl std::error::Error for LeagueError {}

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// Current phase of the league.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    /// Schedule generated, not yet live.
    #[default]
    Draft,
    /// Published; reported games fulfill scheduled pods.
    Active,
    /// Season over (all pods played, or closed by an admin).
    Completed,
}

impl LeagueStatus {
    /// Whether the lifecycle allows moving from `self` to `to`.
    pub fn can_transition_to(self, to: LeagueStatus) -> bool {
        matches!(
            (self, to),
            (LeagueStatus::Draft, LeagueStatus::Active)
                | (LeagueStatus::Active, LeagueStatus::Completed)
        )
    }
}

impl std::fmt::Display for LeagueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeagueStatus::Draft => "draft",
            LeagueStatus::Active => "active",
            LeagueStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A league: fixed roster, games-per-player target and status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    /// Participants in the order they were given. Fixed once pods exist.
    pub player_ids: Vec<PlayerId>,
    pub games_per_player: u32,
    pub status: LeagueStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl League {
    /// Create a new league in Draft status.
    pub fn new(
        name: impl Into<String>,
        player_ids: Vec<PlayerId>,
        games_per_player: u32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            player_ids,
            games_per_player,
            status: LeagueStatus::Draft,
            start_date,
            end_date,
        }
    }
}
