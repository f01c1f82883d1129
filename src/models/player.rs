//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in rosters, pods and lookups).
pub type PlayerId = Uuid;

/// A player who can take part in leagues. Owned by the persistence layer;
/// the scheduling core only ever handles `PlayerId`s.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Handle on an external service (e.g. a chat username), if linked.
    pub external_handle: Option<String>,
}

impl Player {
    /// Create a new player with the given display name and no external handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            external_handle: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.external_handle = Some(handle.into());
        self
    }
}
