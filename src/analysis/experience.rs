//! Years of experience to a player's first All-League selection
//!
//! For players drafted in 2007 or later who eventually made an All-League
//! team, averages (first selection season - draft year) per selection season,
//! overall and split by First/Second/Third team. Averages run over the
//! player's season rows, so a longer career weighs its experience value
//! more heavily.

use crate::data::PlayerSeasonIndex;
use crate::{AwardRecord, PlayerId};
use std::collections::{HashMap, HashSet};

/// First season the report covers
const FIRST_SEASON: u16 = 2007;
/// Last season the report covers
const LAST_SEASON: u16 = 2021;
/// Earliest draft year considered
const DRAFT_FLOOR: u16 = 2007;

/// Per-season averages for one selection season
#[derive(Debug, Clone, Copy)]
pub struct ExperienceRow {
    pub season: u16,
    pub average: Option<f64>,
    pub first_team: Option<f64>,
    pub second_team: Option<f64>,
    pub third_team: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ExperienceReport {
    pub rows: Vec<ExperienceRow>,
    pub overall: f64,
    pub first_team: f64,
    pub second_team: f64,
    pub third_team: f64,
}

/// Career-level team membership: the player appears in any award row with
/// the given flag set
fn members(awards: &[AwardRecord], flag: impl Fn(&AwardRecord) -> bool) -> HashSet<PlayerId> {
    awards
        .iter()
        .filter(|a| flag(a))
        .map(|a| a.player_id)
        .collect()
}

/// Earliest All-League selection season per player
fn first_selection_years(awards: &[AwardRecord]) -> HashMap<PlayerId, u16> {
    let mut first: HashMap<PlayerId, u16> = HashMap::new();
    for award in awards.iter().filter(|a| a.all_league()) {
        first
            .entry(award.player_id)
            .and_modify(|year| *year = (*year).min(award.season))
            .or_insert(award.season);
    }
    first
}

/// Weighted mean over (value, weight) pairs
fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
    let total: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total == 0.0 {
        None
    } else {
        Some(pairs.iter().map(|(v, w)| v * w).sum::<f64>() / total)
    }
}

/// Mean over the seasons that have data
fn series_mean(rows: &[ExperienceRow], pick: impl Fn(&ExperienceRow) -> Option<f64>) -> f64 {
    let present: Vec<(f64, f64)> = rows.iter().filter_map(pick).map(|v| (v, 1.0)).collect();
    weighted_mean(&present).unwrap_or(0.0)
}

pub fn run(index: &PlayerSeasonIndex, awards: &[AwardRecord]) -> ExperienceReport {
    let first_years = first_selection_years(awards);
    let first_team = members(awards, AwardRecord::first_team);
    let second_team = members(awards, AwardRecord::second_team);
    let third_team = members(awards, AwardRecord::third_team);

    // (player, first selection season, experience, season-row count) for the
    // draft classes in scope. The row count is the player's weight, one
    // contribution per row of the stats table.
    let mut selections: Vec<(PlayerId, u16, f64, f64)> = Vec::new();
    for (&player, &year) in &first_years {
        let Some(draft_year) = index.draft_year(player) else {
            continue;
        };
        if draft_year >= DRAFT_FLOOR {
            selections.push((
                player,
                year,
                f64::from(year) - f64::from(draft_year),
                index.seasons(player).len() as f64,
            ));
        }
    }

    let mut rows = Vec::new();
    for season in FIRST_SEASON..=LAST_SEASON {
        let in_season: Vec<&(PlayerId, u16, f64, f64)> = selections
            .iter()
            .filter(|(_, y, _, _)| *y == season)
            .collect();
        let subset = |set: &HashSet<PlayerId>| {
            let pairs: Vec<(f64, f64)> = in_season
                .iter()
                .filter(|(p, _, _, _)| set.contains(p))
                .map(|(_, _, e, w)| (*e, *w))
                .collect();
            weighted_mean(&pairs)
        };
        let all: Vec<(f64, f64)> = in_season.iter().map(|(_, _, e, w)| (*e, *w)).collect();
        rows.push(ExperienceRow {
            season,
            average: weighted_mean(&all),
            first_team: subset(&first_team),
            second_team: subset(&second_team),
            third_team: subset(&third_team),
        });
    }

    ExperienceReport {
        overall: series_mean(&rows, |r| r.average),
        first_team: series_mean(&rows, |r| r.first_team),
        second_team: series_mean(&rows, |r| r.second_team),
        third_team: series_mean(&rows, |r| r.third_team),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SeasonRecord, PlayerId};

    fn season(id: i64, season: u16, draftyear: u16) -> SeasonRecord {
        SeasonRecord {
            player_id: PlayerId(id),
            player: format!("Player {}", id),
            season,
            draftyear,
            games: None,
            games_start: None,
            mins: None,
            fgm: None,
            fga: None,
            fgp: None,
            fgm3: None,
            fga3: None,
            fgp3: None,
            points: None,
        }
    }

    fn award(id: i64, year: u16, first: bool, second: bool) -> AwardRecord {
        AwardRecord {
            player_id: PlayerId(id),
            season: year,
            all_league_first: first.then_some(1.0),
            all_league_second: second.then_some(1.0),
            all_league_third: None,
            mvp_rank: None,
            dpoy_rank: None,
            all_star: None,
        }
    }

    #[test]
    fn test_first_selection_is_earliest_season() {
        let awards = vec![award(1, 2015, true, false), award(1, 2012, false, true)];
        let first = first_selection_years(&awards);
        assert_eq!(first[&PlayerId(1)], 2012);
    }

    #[test]
    fn test_experience_averaged_per_selection_season() {
        // Player 1: drafted 2007, first selection 2012 (5 years)
        // Player 2: drafted 2009, first selection 2012 (3 years)
        // Player 3: drafted 2005, excluded by the draft floor
        let stats = vec![
            season(1, 2008, 2007),
            season(2, 2010, 2009),
            season(3, 2006, 2005),
        ];
        let awards = vec![
            award(1, 2012, true, false),
            award(2, 2012, false, true),
            award(3, 2012, true, false),
        ];
        let index = PlayerSeasonIndex::new(stats, vec![]);
        let report = run(&index, &awards);

        let row_2012 = report
            .rows
            .iter()
            .find(|r| r.season == 2012)
            .copied()
            .unwrap();
        assert_eq!(row_2012.average, Some(4.0));
        assert_eq!(row_2012.first_team, Some(5.0));
        assert_eq!(row_2012.second_team, Some(3.0));
        assert_eq!(row_2012.third_team, None);
    }

    #[test]
    fn test_longer_careers_weigh_more_in_season_averages() {
        // Player 1: 10 season rows, 5 years to first selection
        // Player 2: 2 season rows, 3 years to first selection
        let mut stats: Vec<SeasonRecord> = (2008..2018).map(|y| season(1, y, 2007)).collect();
        stats.push(season(2, 2010, 2009));
        stats.push(season(2, 2011, 2009));
        let awards = vec![award(1, 2012, true, false), award(2, 2012, false, true)];
        let index = PlayerSeasonIndex::new(stats, vec![]);
        let report = run(&index, &awards);

        let row_2012 = report
            .rows
            .iter()
            .find(|r| r.season == 2012)
            .copied()
            .unwrap();
        // (10 * 5 + 2 * 3) / 12 rows
        assert!((row_2012.average.unwrap() - 56.0 / 12.0).abs() < 1e-9);
        assert_eq!(row_2012.first_team, Some(5.0));
        assert_eq!(row_2012.second_team, Some(3.0));
    }

    #[test]
    fn test_players_without_selection_are_ignored() {
        let stats = vec![season(1, 2010, 2008)];
        let index = PlayerSeasonIndex::new(stats, vec![]);
        let report = run(&index, &[]);
        assert!(report.rows.iter().all(|r| r.average.is_none()));
        assert_eq!(report.overall, 0.0);
    }
}
