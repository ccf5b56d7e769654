//! CSV ingestion and the (player, season) join
//!
//! The two tables are read once at startup and grouped by player id up
//! front; every consumer reuses that grouping instead of rescanning the
//! joined table per player.

use crate::{AwardRecord, HoopsError, PlayerId, Result, SeasonRecord, TeamGameRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load the per-player per-season statistics table
pub fn load_season_records<P: AsRef<Path>>(path: P) -> Result<Vec<SeasonRecord>> {
    load_from_reader(File::open(path.as_ref())?)
}

/// Load the per-player per-season awards table
pub fn load_award_records<P: AsRef<Path>>(path: P) -> Result<Vec<AwardRecord>> {
    load_from_reader(File::open(path.as_ref())?)
}

/// Load the team rebounding table
pub fn load_team_game_records<P: AsRef<Path>>(path: P) -> Result<Vec<TeamGameRecord>> {
    load_from_reader(File::open(path.as_ref())?)
}

fn load_from_reader<R: Read, T: serde::de::DeserializeOwned>(rdr: R) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// A season row joined with its award row, if any
#[derive(Debug, Clone)]
pub struct JoinedSeason {
    pub stats: SeasonRecord,
    pub award: Option<AwardRecord>,
}

impl JoinedSeason {
    pub fn season(&self) -> u16 {
        self.stats.season
    }
}

/// Season rows left-joined with awards and grouped by player id.
///
/// Rows within a player are kept in season order so "first occurrence"
/// semantics are deterministic.
pub struct PlayerSeasonIndex {
    seasons: HashMap<PlayerId, Vec<JoinedSeason>>,
}

impl PlayerSeasonIndex {
    /// Build the index from the two loaded tables
    pub fn new(stats: Vec<SeasonRecord>, awards: Vec<AwardRecord>) -> Self {
        let mut award_map: HashMap<(PlayerId, u16), AwardRecord> = HashMap::new();
        for award in awards {
            award_map.insert((award.player_id, award.season), award);
        }

        let mut seasons: HashMap<PlayerId, Vec<JoinedSeason>> = HashMap::new();
        for record in stats {
            let award = award_map.get(&(record.player_id, record.season)).cloned();
            seasons
                .entry(record.player_id)
                .or_default()
                .push(JoinedSeason {
                    stats: record,
                    award,
                });
        }

        for rows in seasons.values_mut() {
            rows.sort_by_key(|r| r.stats.season);
        }

        PlayerSeasonIndex { seasons }
    }

    /// All season rows for one player, in season order
    pub fn seasons(&self, player: PlayerId) -> &[JoinedSeason] {
        self.seasons.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over (player id, season rows)
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &[JoinedSeason])> {
        self.seasons.iter().map(|(id, rows)| (*id, rows.as_slice()))
    }

    /// Draft year for a player, from their first season row
    pub fn draft_year(&self, player: PlayerId) -> Option<u16> {
        self.seasons(player).first().map(|r| r.stats.draftyear)
    }

    /// Display name for a player, from their first season row
    pub fn player_name(&self, player: PlayerId) -> Option<&str> {
        self.seasons(player).first().map(|r| r.stats.player.as_str())
    }

    pub fn player_count(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Filter a team's game rows, sorted by game number
pub fn team_games<'a>(rows: &'a [TeamGameRecord], team: &str) -> Result<Vec<&'a TeamGameRecord>> {
    let mut games: Vec<&TeamGameRecord> = rows.iter().filter(|r| r.team == team).collect();
    if games.is_empty() {
        return Err(HoopsError::UnknownTeam(team.to_string()));
    }
    games.sort_by_key(|r| r.game_number);
    Ok(games)
}
