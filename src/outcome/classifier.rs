//! Career outcome classification
//!
//! Maps a player's post-rookie-contract seasons to one of six ordinal
//! outcome tiers. The tiers form a priority-ordered cascade over the set of
//! qualifying seasons: the first matching tier wins.

use crate::data::JoinedSeason;
use crate::{CareerOutcome, OutcomeConfig};

/// Pro-rating factor from a 72-game schedule to the 82-game baseline
const SCHEDULE_FACTOR: f64 = 82.0 / 72.0;

/// Games-started threshold for a Starter season, on the 82-game baseline
const STARTER_GAMES: f64 = 41.0;
/// Minutes threshold for a Starter season
const STARTER_MINUTES: f64 = 2000.0;
/// Minutes threshold for a Rotation season
const ROTATION_MINUTES: f64 = 1000.0;

/// A threshold pro-rated to the 82-game baseline
fn prorated(base: f64) -> f64 {
    (base * SCHEDULE_FACTOR).round()
}

/// One qualifying season, with minutes and games-started already adjusted
/// for shortened schedules
#[derive(Debug, Clone, Copy)]
pub struct QualifyingSeason {
    pub season: u16,
    pub minutes: Option<f64>,
    pub games_started: Option<f64>,
    pub elite: bool,
    pub all_star: bool,
}

impl QualifyingSeason {
    fn from_joined(row: &JoinedSeason, config: &OutcomeConfig) -> Self {
        let shortened = config.shortened_seasons.contains(&row.stats.season);
        let adjust = |v: Option<f64>| {
            if shortened {
                v.map(|x| (x * SCHEDULE_FACTOR).round())
            } else {
                v
            }
        };
        QualifyingSeason {
            season: row.stats.season,
            minutes: adjust(row.stats.mins),
            games_started: adjust(row.stats.games_start),
            elite: row.award.as_ref().is_some_and(|a| a.elite()),
            all_star: row.award.as_ref().is_some_and(|a| a.all_star()),
        }
    }

    fn meets_starter_bar(&self) -> bool {
        self.games_started.is_some_and(|g| g >= prorated(STARTER_GAMES))
            || self.minutes.is_some_and(|m| m >= prorated(STARTER_MINUTES))
    }

    fn meets_rotation_bar(&self) -> bool {
        self.minutes.is_some_and(|m| m >= prorated(ROTATION_MINUTES))
    }
}

// Tier predicates. The Elite tier needs one qualifying season; every other
// tier needs at least two.

fn is_elite(seasons: &[QualifyingSeason]) -> bool {
    seasons.iter().any(|s| s.elite)
}

fn is_all_star(seasons: &[QualifyingSeason]) -> bool {
    seasons.iter().filter(|s| s.all_star).count() >= 2
}

fn is_starter(seasons: &[QualifyingSeason]) -> bool {
    seasons.iter().filter(|s| s.meets_starter_bar()).count() >= 2
}

fn is_rotation(seasons: &[QualifyingSeason]) -> bool {
    seasons.iter().filter(|s| s.meets_rotation_bar()).count() >= 2
}

fn is_roster(seasons: &[QualifyingSeason]) -> bool {
    seasons.len() >= 2
}

/// The cascade, best tier first
const TIERS: &[(CareerOutcome, fn(&[QualifyingSeason]) -> bool)] = &[
    (CareerOutcome::Elite, is_elite),
    (CareerOutcome::AllStar, is_all_star),
    (CareerOutcome::Starter, is_starter),
    (CareerOutcome::Rotation, is_rotation),
    (CareerOutcome::Roster, is_roster),
];

/// Qualifying seasons for a player: strictly after the fourth pro season and
/// inside the evaluation window, with shortened-season stats pro-rated
pub fn qualifying_seasons(
    draft_year: u16,
    seasons: &[JoinedSeason],
    config: &OutcomeConfig,
) -> Vec<QualifyingSeason> {
    seasons
        .iter()
        .filter(|row| {
            row.stats.season > draft_year + 3
                && row.stats.season >= config.window_start
                && row.stats.season <= config.window_end
        })
        .map(|row| QualifyingSeason::from_joined(row, config))
        .collect()
}

/// Classify one player's career outcome from their joined season rows
pub fn classify(draft_year: u16, seasons: &[JoinedSeason], config: &OutcomeConfig) -> CareerOutcome {
    let qualifying = qualifying_seasons(draft_year, seasons, config);
    TIERS
        .iter()
        .find(|(_, predicate)| predicate(&qualifying))
        .map(|(outcome, _)| *outcome)
        .unwrap_or(CareerOutcome::OutOfTheLeague)
}
