//! Data loading and joining

pub mod tables;

pub use tables::{
    load_award_records, load_season_records, load_team_game_records, team_games, JoinedSeason,
    PlayerSeasonIndex,
};
