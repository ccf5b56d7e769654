//! NBA draft-class analytics
//!
//! Career outcome classification and prediction over per-season player
//! statistics and award records.

pub mod analysis;
pub mod data;
pub mod outcome;
pub mod pipeline;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// One player's statistics for one season, as read from the stats table.
///
/// Numeric stats are optional: an empty cell parses to `None` and is later
/// imputed or treated as not meeting a threshold, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRecord {
    #[serde(rename = "nbapersonid")]
    pub player_id: PlayerId,
    pub player: String,
    pub season: u16,
    pub draftyear: u16,
    pub games: Option<f64>,
    pub games_start: Option<f64>,
    pub mins: Option<f64>,
    pub fgm: Option<f64>,
    pub fga: Option<f64>,
    pub fgp: Option<f64>,
    pub fgm3: Option<f64>,
    pub fga3: Option<f64>,
    pub fgp3: Option<f64>,
    pub points: Option<f64>,
}

impl SeasonRecord {
    /// Years of experience at this season (0 in the draft season)
    pub fn experience(&self) -> i32 {
        self.season as i32 - self.draftyear as i32
    }
}

/// One player's honors for one season, as read from the awards table.
///
/// Left-joins onto [`SeasonRecord`] on (player id, season). A missing row is
/// equivalent to every flag unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRecord {
    #[serde(rename = "nbapersonid")]
    pub player_id: PlayerId,
    pub season: u16,
    #[serde(rename = "All NBA First Team")]
    pub all_league_first: Option<f64>,
    #[serde(rename = "All NBA Second Team")]
    pub all_league_second: Option<f64>,
    #[serde(rename = "All NBA Third Team")]
    pub all_league_third: Option<f64>,
    #[serde(rename = "Most Valuable Player_rk")]
    pub mvp_rank: Option<f64>,
    #[serde(rename = "Defensive Player Of The Year_rk")]
    pub dpoy_rank: Option<f64>,
    #[serde(rename = "all_star_game", deserialize_with = "de_flag", default)]
    pub all_star: Option<bool>,
}

/// Treat a cell as a boolean flag: TRUE/1 is set, anything else is not
fn de_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| matches!(s.trim().to_ascii_uppercase().as_str(), "TRUE" | "1")))
}

/// A cell counts as set when it holds any non-zero value
fn flag_set(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0)
}

impl AwardRecord {
    pub fn first_team(&self) -> bool {
        flag_set(self.all_league_first)
    }

    pub fn second_team(&self) -> bool {
        flag_set(self.all_league_second)
    }

    pub fn third_team(&self) -> bool {
        flag_set(self.all_league_third)
    }

    /// Any All-League team selection this season
    pub fn all_league(&self) -> bool {
        flag_set(self.all_league_first)
            || flag_set(self.all_league_second)
            || flag_set(self.all_league_third)
    }

    /// Meets the Elite criterion: any All-League team, any MVP rank, or
    /// Defensive Player of the Year (rank 1)
    pub fn elite(&self) -> bool {
        self.all_league() || flag_set(self.mvp_rank) || self.dpoy_rank == Some(1.0)
    }

    /// Selected to the All-Star game this season
    pub fn all_star(&self) -> bool {
        self.all_star == Some(true)
    }
}

/// One team's rebounding line for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamGameRecord {
    pub team: String,
    pub game_number: u32,
    pub offensive_rebounds: f64,
    pub off_rebound_chances: f64,
}

/// Career outcome tiers, in descending priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CareerOutcome {
    Elite,
    AllStar,
    Starter,
    Rotation,
    Roster,
    OutOfTheLeague,
}

impl CareerOutcome {
    /// All tiers, best first
    pub const ALL: [CareerOutcome; 6] = [
        CareerOutcome::Elite,
        CareerOutcome::AllStar,
        CareerOutcome::Starter,
        CareerOutcome::Rotation,
        CareerOutcome::Roster,
        CareerOutcome::OutOfTheLeague,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CareerOutcome::Elite => "Elite",
            CareerOutcome::AllStar => "All-Star",
            CareerOutcome::Starter => "Starter",
            CareerOutcome::Rotation => "Rotation",
            CareerOutcome::Roster => "Roster",
            CareerOutcome::OutOfTheLeague => "Out of the League",
        }
    }
}

impl fmt::Display for CareerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One scored player from the prediction pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub player_id: PlayerId,
    pub player: String,
    pub outcome: CareerOutcome,
    /// Probability per class seen at training time; sums to 1
    pub probabilities: Vec<(CareerOutcome, f32)>,
}

impl PredictionResult {
    /// Probability for one outcome; 0 when the class was absent at training
    pub fn probability(&self, outcome: CareerOutcome) -> f32 {
        self.probabilities
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("No rows available for {0}")]
    EmptyTable(String),

    #[error("Not enough labeled examples to train: have {have}, need {need}")]
    InsufficientData { have: usize, need: usize },
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub outcome: OutcomeConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub player_stats_path: String,
    pub awards_path: String,
    pub rebounding_path: String,
    pub predictions_html_path: String,
}

/// Evaluation window and season adjustments for outcome classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeConfig {
    /// First season of the evaluation window (inclusive)
    pub window_start: u16,
    /// Last season of the evaluation window (inclusive)
    pub window_end: u16,
    /// Seasons played on a 72-game schedule; stats are pro-rated to 82 games
    pub shortened_seasons: Vec<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Players drafted at or before this year form the labeled pool
    pub cutoff_draft_year: u16,
    /// First draft year of the pool to predict (inclusive)
    pub predict_draft_start: u16,
    /// Last draft year of the pool to predict (inclusive)
    pub predict_draft_end: u16,
    /// Fraction of labeled examples held out for validation
    pub holdout_fraction: f64,
    /// Seed for the train/validation shuffle and weight init
    pub seed: u64,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                player_stats_path: "data/player_stats.csv".to_string(),
                awards_path: "data/awards_data.csv".to_string(),
                rebounding_path: "data/team_rebounding_data_22.csv".to_string(),
                predictions_html_path: "predictions_table.html".to_string(),
            },
            outcome: OutcomeConfig {
                window_start: 2015,
                window_end: 2021,
                shortened_seasons: vec![2019, 2020],
            },
            training: TrainingConfig {
                cutoff_draft_year: 2015,
                predict_draft_start: 2018,
                predict_draft_end: 2021,
                holdout_fraction: 0.2,
                seed: 42,
                epochs: 500,
                learning_rate: 0.1,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_flags_missing_are_falsy() {
        let award = AwardRecord {
            player_id: PlayerId(1),
            season: 2018,
            all_league_first: None,
            all_league_second: None,
            all_league_third: None,
            mvp_rank: None,
            dpoy_rank: None,
            all_star: None,
        };
        assert!(!award.all_league());
        assert!(!award.elite());
        assert!(!award.all_star());
    }

    #[test]
    fn test_elite_criterion() {
        let mut award = AwardRecord {
            player_id: PlayerId(1),
            season: 2018,
            all_league_first: None,
            all_league_second: None,
            all_league_third: Some(1.0),
            mvp_rank: None,
            dpoy_rank: None,
            all_star: None,
        };
        assert!(award.elite());

        // Any MVP rank counts, not only rank 1
        award.all_league_third = None;
        award.mvp_rank = Some(5.0);
        assert!(award.elite());

        // DPOY counts only at rank 1
        award.mvp_rank = None;
        award.dpoy_rank = Some(2.0);
        assert!(!award.elite());
        award.dpoy_rank = Some(1.0);
        assert!(award.elite());
    }

    #[test]
    fn test_outcome_ordering_best_first() {
        assert_eq!(CareerOutcome::ALL[0], CareerOutcome::Elite);
        assert_eq!(CareerOutcome::ALL[5], CareerOutcome::OutOfTheLeague);
        assert!(CareerOutcome::Elite < CareerOutcome::Roster);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.outcome.window_start, 2015);
        assert_eq!(parsed.training.cutoff_draft_year, 2015);
    }
}
