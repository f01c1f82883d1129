//! Find the scheduled pod a reported game fulfills.

use crate::models::{LeagueId, PlayerId, ScheduledPod};
use std::collections::HashSet;

/// First pending pod whose player set equals `reported` exactly, order-independent.
///
/// With `league_id` only that league's pods are considered. Strict subsets and supersets
/// never match. `None` is a normal outcome (e.g. a casual, unscheduled game).
pub fn find_matching_scheduled_pod<'a>(
    pods: &'a [ScheduledPod],
    league_id: Option<LeagueId>,
    reported: &HashSet<PlayerId>,
) -> Option<&'a ScheduledPod> {
    pods.iter()
        .filter(|p| p.is_pending())
        .filter(|p| league_id.map_or(true, |id| p.league_id == id))
        .find(|p| p.player_ids.len() == reported.len() && p.player_set() == *reported)
}
