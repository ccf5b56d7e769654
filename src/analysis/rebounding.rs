//! Offensive rebounding prediction from cumulative prior games
//!
//! A team's predicted offensive-rebound percentage for its next game is its
//! cumulative percentage over all prior games: total rebounds over total
//! chances, not the mean of per-game percentages.

use crate::data::team_games;
use crate::{HoopsError, Result, TeamGameRecord};

#[derive(Debug, Clone)]
pub struct ReboundingReport {
    pub team: String,
    pub target_game: u32,
    pub games_used: usize,
    /// Cumulative offensive-rebound percentage over prior games (0-1),
    /// which is also the prediction for the target game
    pub predicted_pct: f64,
}

pub fn run(rows: &[TeamGameRecord], team: &str, target_game: u32) -> Result<ReboundingReport> {
    let games = team_games(rows, team)?;
    let prior: Vec<&&TeamGameRecord> = games
        .iter()
        .filter(|g| g.game_number < target_game)
        .collect();
    if prior.is_empty() {
        return Err(HoopsError::EmptyTable(format!(
            "{} games before game {}",
            team, target_game
        )));
    }

    let rebounds: f64 = prior.iter().map(|g| g.offensive_rebounds).sum();
    let chances: f64 = prior.iter().map(|g| g.off_rebound_chances).sum();
    if chances <= 0.0 {
        return Err(HoopsError::EmptyTable(format!(
            "{} rebound chances before game {}",
            team, target_game
        )));
    }

    Ok(ReboundingReport {
        team: team.to_string(),
        target_game,
        games_used: prior.len(),
        predicted_pct: rebounds / chances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(team: &str, number: u32, rebounds: f64, chances: f64) -> TeamGameRecord {
        TeamGameRecord {
            team: team.to_string(),
            game_number: number,
            offensive_rebounds: rebounds,
            off_rebound_chances: chances,
        }
    }

    #[test]
    fn test_cumulative_percentage_not_mean_of_percentages() {
        // Per-game percentages are 50% and 10%; cumulative is 14/60
        let rows = vec![game("OKC", 1, 10.0, 20.0), game("OKC", 2, 4.0, 40.0)];
        let report = run(&rows, "OKC", 3).unwrap();
        assert!((report.predicted_pct - 14.0 / 60.0).abs() < 1e-9);
        assert_eq!(report.games_used, 2);
    }

    #[test]
    fn test_only_prior_games_count() {
        let rows = vec![
            game("OKC", 1, 10.0, 40.0),
            game("OKC", 81, 40.0, 40.0),
            game("OKC", 82, 40.0, 40.0),
        ];
        let report = run(&rows, "OKC", 81).unwrap();
        assert_eq!(report.games_used, 1);
        assert!((report.predicted_pct - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_team_errors() {
        let rows = vec![game("OKC", 1, 10.0, 40.0)];
        assert!(matches!(
            run(&rows, "LAL", 81),
            Err(HoopsError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_no_prior_games_errors() {
        let rows = vec![game("OKC", 5, 10.0, 40.0)];
        assert!(matches!(run(&rows, "OKC", 3), Err(HoopsError::EmptyTable(_))));
    }
}
