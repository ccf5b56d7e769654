//! Average points per game for honor groups
//!
//! Per season 2007-2021, the average points per game of players who ever
//! made the All-Star game or an All-League team, computed as total points
//! over total games across the group's season rows.

use crate::{AwardRecord, PlayerId, SeasonRecord};
use std::collections::{BTreeMap, HashSet};

const FIRST_SEASON: u16 = 2007;
const LAST_SEASON: u16 = 2021;

/// One honor group's per-season averages
#[derive(Debug, Clone)]
pub struct GroupScoring {
    pub group: &'static str,
    /// (season, points per game), seasons with member rows only
    pub per_season: Vec<(u16, f64)>,
    /// Mean of the per-season averages
    pub overall: f64,
}

#[derive(Debug, Clone)]
pub struct ScoringReport {
    pub all_star: GroupScoring,
    pub first_team: GroupScoring,
    pub second_team: GroupScoring,
    pub third_team: GroupScoring,
}

impl ScoringReport {
    /// Groups in per-season listing order: All-Star first, then the
    /// All-League teams
    pub fn groups(&self) -> [&GroupScoring; 4] {
        [
            &self.all_star,
            &self.first_team,
            &self.second_team,
            &self.third_team,
        ]
    }

    /// Groups in totals order: the All-League teams, then All-Star
    pub fn totals(&self) -> [&GroupScoring; 4] {
        [
            &self.first_team,
            &self.second_team,
            &self.third_team,
            &self.all_star,
        ]
    }
}

fn group_members(awards: &[AwardRecord], flag: impl Fn(&AwardRecord) -> bool) -> HashSet<PlayerId> {
    awards
        .iter()
        .filter(|a| flag(a))
        .map(|a| a.player_id)
        .collect()
}

fn group_scoring(
    group: &'static str,
    stats: &[SeasonRecord],
    members: &HashSet<PlayerId>,
) -> GroupScoring {
    // (points, games) totals per season over member rows
    let mut totals: BTreeMap<u16, (f64, f64)> = BTreeMap::new();
    for row in stats {
        if row.season < FIRST_SEASON || row.season > LAST_SEASON {
            continue;
        }
        if !members.contains(&row.player_id) {
            continue;
        }
        let (Some(points), Some(games)) = (row.points, row.games) else {
            continue;
        };
        let entry = totals.entry(row.season).or_insert((0.0, 0.0));
        entry.0 += points;
        entry.1 += games;
    }

    let per_season: Vec<(u16, f64)> = totals
        .into_iter()
        .filter(|(_, (_, games))| *games > 0.0)
        .map(|(season, (points, games))| (season, points / games))
        .collect();

    let overall = if per_season.is_empty() {
        0.0
    } else {
        per_season.iter().map(|(_, ppg)| ppg).sum::<f64>() / per_season.len() as f64
    };

    GroupScoring {
        group,
        per_season,
        overall,
    }
}

pub fn run(stats: &[SeasonRecord], awards: &[AwardRecord]) -> ScoringReport {
    ScoringReport {
        all_star: group_scoring(
            "All-Star",
            stats,
            &group_members(awards, AwardRecord::all_star),
        ),
        first_team: group_scoring(
            "1st Team",
            stats,
            &group_members(awards, AwardRecord::first_team),
        ),
        second_team: group_scoring(
            "2nd Team",
            stats,
            &group_members(awards, AwardRecord::second_team),
        ),
        third_team: group_scoring(
            "3rd Team",
            stats,
            &group_members(awards, AwardRecord::third_team),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(id: i64, year: u16, points: f64, games: f64) -> SeasonRecord {
        SeasonRecord {
            player_id: PlayerId(id),
            player: format!("Player {}", id),
            season: year,
            draftyear: 2005,
            games: Some(games),
            games_start: None,
            mins: None,
            fgm: None,
            fga: None,
            fgp: None,
            fgm3: None,
            fga3: None,
            fgp3: None,
            points: Some(points),
        }
    }

    fn all_star_award(id: i64, year: u16) -> AwardRecord {
        AwardRecord {
            player_id: PlayerId(id),
            season: year,
            all_league_first: None,
            all_league_second: None,
            all_league_third: None,
            mvp_rank: None,
            dpoy_rank: None,
            all_star: Some(true),
        }
    }

    #[test]
    fn test_group_average_is_total_points_over_total_games() {
        // Two members in 2010: (2000 pts, 80 g) and (1000 pts, 40 g)
        let stats = vec![
            season(1, 2010, 2000.0, 80.0),
            season(2, 2010, 1000.0, 40.0),
            season(3, 2010, 500.0, 80.0), // not a member
        ];
        let awards = vec![all_star_award(1, 2010), all_star_award(2, 2011)];
        let report = run(&stats, &awards);
        assert_eq!(report.all_star.per_season, vec![(2010, 25.0)]);
        assert_eq!(report.all_star.overall, 25.0);
    }

    #[test]
    fn test_membership_is_career_level() {
        // Awarded in 2011, but 2010 rows still count toward the group
        let stats = vec![season(1, 2010, 1600.0, 80.0)];
        let awards = vec![all_star_award(1, 2011)];
        let report = run(&stats, &awards);
        assert_eq!(report.all_star.per_season, vec![(2010, 20.0)]);
    }

    #[test]
    fn test_seasons_outside_range_excluded() {
        let stats = vec![season(1, 2005, 1600.0, 80.0), season(1, 2022, 1600.0, 80.0)];
        let awards = vec![all_star_award(1, 2010)];
        let report = run(&stats, &awards);
        assert!(report.all_star.per_season.is_empty());
        assert_eq!(report.all_star.overall, 0.0);
    }

    #[test]
    fn test_group_output_orders() {
        let report = run(&[], &[]);
        let listing: Vec<&str> = report.groups().iter().map(|g| g.group).collect();
        assert_eq!(listing, ["All-Star", "1st Team", "2nd Team", "3rd Team"]);
        let totals: Vec<&str> = report.totals().iter().map(|g| g.group).collect();
        assert_eq!(totals, ["1st Team", "2nd Team", "3rd Team", "All-Star"]);
    }

    #[test]
    fn test_rows_with_missing_points_are_skipped() {
        let mut incomplete = season(1, 2010, 0.0, 0.0);
        incomplete.points = None;
        incomplete.games = None;
        let stats = vec![incomplete, season(1, 2011, 900.0, 60.0)];
        let awards = vec![all_star_award(1, 2010)];
        let report = run(&stats, &awards);
        assert_eq!(report.all_star.per_season, vec![(2011, 15.0)]);
    }
}
