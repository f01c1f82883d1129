//! CSV export of a league schedule.

use crate::models::{League, LeagueError, Player, PlayerId, ScheduledPod};
use std::collections::HashMap;
use std::io::Write;

/// Write one row per scheduled pod: number, id, status, fulfilling game, then player names
/// (ids when a name is unknown). Pods of 3 leave the last player column empty.
pub fn write_schedule_csv<W: Write>(
    writer: W,
    league: &League,
    pods: &[ScheduledPod],
    players: &[Player],
) -> Result<(), LeagueError> {
    let names: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "league", "pod", "scheduled_pod_id", "status", "completed_pod_id", "player_1", "player_2",
        "player_3", "player_4",
    ])
    .map_err(export_error)?;

    for (i, pod) in pods.iter().enumerate() {
        let status = if pod.is_completed() { "completed" } else { "pending" };
        let mut record = vec![
            league.name.clone(),
            (i + 1).to_string(),
            pod.id.to_string(),
            status.to_string(),
            pod.completed_pod_id.map(|g| g.to_string()).unwrap_or_default(),
        ];
        for slot in 0..4 {
            let cell = match pod.player_ids.get(slot) {
                Some(id) => names
                    .get(id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| id.to_string()),
                None => String::new(),
            };
            record.push(cell);
        }
        wtr.write_record(&record).map_err(export_error)?;
    }
    wtr.flush().map_err(|e| LeagueError::Export(e.to_string()))?;
    Ok(())
}

/// Schedule as an in-memory CSV string.
pub fn schedule_csv(
    league: &League,
    pods: &[ScheduledPod],
    players: &[Player],
) -> Result<String, LeagueError> {
    let mut buf = Vec::new();
    write_schedule_csv(&mut buf, league, pods, players)?;
    String::from_utf8(buf).map_err(|e| LeagueError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> LeagueError {
    LeagueError::Export(e.to_string())
}
