//! Career outcome tallies for one draft class

use crate::data::PlayerSeasonIndex;
use crate::outcome::classify;
use crate::{CareerOutcome, OutcomeConfig, PlayerId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct OutcomeReport {
    pub draft_year: u16,
    /// Player count per tier, best tier first, zero counts included
    pub counts: Vec<(CareerOutcome, usize)>,
    /// Distinct player names per tier, sorted
    pub players: HashMap<CareerOutcome, Vec<String>>,
}

impl OutcomeReport {
    pub fn total_players(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Classify every player from one draft class over the configured window
pub fn run(index: &PlayerSeasonIndex, draft_year: u16, config: &OutcomeConfig) -> OutcomeReport {
    let mut class: Vec<PlayerId> = index
        .players()
        .filter(|(_, rows)| rows.first().is_some_and(|r| r.stats.draftyear == draft_year))
        .map(|(id, _)| id)
        .collect();
    class.sort();

    let mut players: HashMap<CareerOutcome, Vec<String>> = HashMap::new();
    for player in class {
        let outcome = classify(draft_year, index.seasons(player), config);
        let name = index
            .player_name(player)
            .unwrap_or_default()
            .to_string();
        players.entry(outcome).or_default().push(name);
    }
    for names in players.values_mut() {
        names.sort();
        names.dedup();
    }

    let counts = CareerOutcome::ALL
        .iter()
        .map(|&outcome| (outcome, players.get(&outcome).map_or(0, Vec::len)))
        .collect();

    OutcomeReport {
        draft_year,
        counts,
        players,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeasonRecord;

    fn season(id: i64, name: &str, year: u16, draftyear: u16, mins: f64) -> SeasonRecord {
        SeasonRecord {
            player_id: PlayerId(id),
            player: name.to_string(),
            season: year,
            draftyear,
            games: Some(70.0),
            games_start: Some(0.0),
            mins: Some(mins),
            fgm: None,
            fga: None,
            fgp: None,
            fgm3: None,
            fga3: None,
            fgp3: None,
            points: None,
        }
    }

    fn config() -> OutcomeConfig {
        OutcomeConfig {
            window_start: 2015,
            window_end: 2021,
            shortened_seasons: vec![2019, 2020],
        }
    }

    #[test]
    fn test_draft_class_tallies() {
        let stats = vec![
            // Rotation-grade player from the 2010 class
            season(1, "Rotation Guy", 2015, 2010, 1200.0),
            season(1, "Rotation Guy", 2016, 2010, 1200.0),
            // Out of the league: nothing after year four
            season(2, "Brief Career", 2011, 2010, 1200.0),
            // Different class, excluded
            season(3, "Other Class", 2015, 2011, 2400.0),
        ];
        let index = PlayerSeasonIndex::new(stats, vec![]);
        let report = run(&index, 2010, &config());

        assert_eq!(report.total_players(), 2);
        let count_of = |o: CareerOutcome| {
            report
                .counts
                .iter()
                .find(|(c, _)| *c == o)
                .map(|(_, n)| *n)
                .unwrap()
        };
        assert_eq!(count_of(CareerOutcome::Rotation), 1);
        assert_eq!(count_of(CareerOutcome::OutOfTheLeague), 1);
        assert_eq!(count_of(CareerOutcome::Elite), 0);
        assert_eq!(
            report.players[&CareerOutcome::Rotation],
            vec!["Rotation Guy".to_string()]
        );
    }

    #[test]
    fn test_counts_cover_every_tier_in_order() {
        let index = PlayerSeasonIndex::new(vec![], vec![]);
        let report = run(&index, 2010, &config());
        let tiers: Vec<CareerOutcome> = report.counts.iter().map(|(o, _)| *o).collect();
        assert_eq!(tiers, CareerOutcome::ALL.to_vec());
        assert_eq!(report.total_players(), 0);
    }
}
