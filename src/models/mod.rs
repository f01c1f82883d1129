//! Data structures for leagues: players, leagues, scheduled pods, reported games.

mod game;
mod league;
mod player;
mod pod;

pub use game::{GameId, GameResult, Participant, ReportedGame};
pub use league::{League, LeagueError, LeagueId, LeagueStatus};
pub use player::{Player, PlayerId};
pub use pod::{ScheduledPod, ScheduledPodId};
