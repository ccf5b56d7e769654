//! Draft-class analytics CLI
//!
//! One subcommand per analytical question over the player stats and awards
//! tables.

use clap::{Parser, Subcommand};
use hoops::{Config, Result};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "NBA draft-class analytics and career outcome prediction", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average years of experience to a first All-League selection
    Experience,
    /// Average points per game for All-Star and All-League honor groups
    Scoring,
    /// Career outcome tallies for one draft class
    Outcomes {
        /// Draft class to classify
        #[arg(long, default_value = "2010")]
        draft_year: u16,
    },
    /// Train the outcome model and score the post-cutoff player pool
    Predict {
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Predict a team's next-game offensive rebound percentage
    Rebounding {
        /// Team code
        #[arg(long, default_value = "OKC")]
        team: String,
        /// Game to predict
        #[arg(long, default_value = "81")]
        game: u32,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Experience => commands::experience(&config),
        Commands::Scoring => commands::scoring(&config),
        Commands::Outcomes { draft_year } => commands::outcomes(&config, draft_year),
        Commands::Predict { format } => commands::predict(&config, format),
        Commands::Rebounding { team, game } => commands::rebounding(&config, &team, game),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use hoops::analysis::{experience, outcomes, rebounding, scoring};
    use hoops::data::{
        load_award_records, load_season_records, load_team_game_records, PlayerSeasonIndex,
    };
    use hoops::pipeline;
    use hoops::report::{html, ChartState, ConsoleSink, LabeledSeries, RenderSink};
    use hoops::CareerOutcome;
    use std::collections::HashSet;

    /// Players called out with full probability lines after a predict run
    const SAMPLE_PLAYERS: [&str; 4] = [
        "Shai Gilgeous-Alexander",
        "Zion Williamson",
        "James Wiseman",
        "Josh Giddey",
    ];

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Place player_stats.csv and awards_data.csv under data/");
        println!("  3. Run 'hoops outcomes' or 'hoops predict'");

        Ok(())
    }

    pub fn experience(config: &Config) -> Result<()> {
        let stats = load_season_records(&config.data.player_stats_path)?;
        let awards = load_award_records(&config.data.awards_path)?;
        log::info!("Loaded {} season rows, {} award rows", stats.len(), awards.len());

        let index = PlayerSeasonIndex::new(stats, awards.clone());
        let report = experience::run(&index, &awards);

        println!("Average number of years of experience to win first All-League selection:\n");
        for row in &report.rows {
            println!(
                "{}: Average: {:.2} | 1st Team: {:.2} | 2nd Team: {:.2} | 3rd Team: {:.2}",
                row.season,
                row.average.unwrap_or(0.0),
                row.first_team.unwrap_or(0.0),
                row.second_team.unwrap_or(0.0),
                row.third_team.unwrap_or(0.0),
            );
        }
        println!("\nOverall Average: {:.2}", report.overall);
        println!("Average years of experience for 1st Team: {:.2}", report.first_team);
        println!("Average years of experience for 2nd Team: {:.2}", report.second_team);
        println!("Average years of experience for 3rd Team: {:.2}", report.third_team);

        let mut chart = ChartState::new(
            "Average Years of Experience to First All-League Selection (2007-2021)",
            "Year",
            "Average Years of Experience",
        );
        let series = |label: &str, pick: fn(&experience::ExperienceRow) -> Option<f64>| {
            LabeledSeries::new(
                label,
                report
                    .rows
                    .iter()
                    .filter_map(|r| pick(r).map(|v| (f64::from(r.season), v)))
                    .collect(),
            )
        };
        chart.push_series(series("Average", |r| r.average));
        chart.push_series(series("1st Team", |r| r.first_team));
        chart.push_series(series("2nd Team", |r| r.second_team));
        chart.push_series(series("3rd Team", |r| r.third_team));
        ConsoleSink.render(&chart)?;

        Ok(())
    }

    pub fn scoring(config: &Config) -> Result<()> {
        let stats = load_season_records(&config.data.player_stats_path)?;
        let awards = load_award_records(&config.data.awards_path)?;
        let report = scoring::run(&stats, &awards);

        for group in report.groups() {
            println!("Average Points per Game for {} Players:", group.group);
            for (season, ppg) in &group.per_season {
                println!("Season {}: {:.2}", season, ppg);
            }
            println!();
        }
        for group in report.totals() {
            println!(
                "Total Average Points per Game for {}: {:.2}",
                group.group, group.overall
            );
        }

        let mut chart = ChartState::new(
            "Average Points per Game for All-Star and All-League Teams (2007-2021)",
            "Season",
            "Average Points per Game",
        );
        for group in report.groups() {
            chart.push_series(LabeledSeries::new(
                group.group,
                group
                    .per_season
                    .iter()
                    .map(|(s, v)| (f64::from(*s), *v))
                    .collect(),
            ));
        }
        ConsoleSink.render(&chart)?;

        Ok(())
    }

    pub fn outcomes(config: &Config, draft_year: u16) -> Result<()> {
        let stats = load_season_records(&config.data.player_stats_path)?;
        let awards = load_award_records(&config.data.awards_path)?;
        let index = PlayerSeasonIndex::new(stats, awards);
        let report = outcomes::run(&index, draft_year, &config.outcome);

        println!("Career Outcome Counts:");
        for (outcome, count) in &report.counts {
            println!("{}: {} players.", outcome, count);
        }
        log::info!(
            "{} players classified from the {} draft class",
            report.total_players(),
            draft_year
        );

        let mut chart = ChartState::new(
            format!(
                "{} Draft Players Best Career Outcome from {}-{}",
                draft_year, config.outcome.window_start, config.outcome.window_end
            ),
            "Career Outcome",
            "Number of Players",
        );
        chart.push_series(LabeledSeries::new(
            "Players",
            report
                .counts
                .iter()
                .enumerate()
                .map(|(i, (_, n))| (i as f64, *n as f64))
                .collect(),
        ));
        // Hovering a tier position lists its players
        for (i, (outcome, _)) in report.counts.iter().enumerate() {
            if let Some(names) = report.players.get(outcome) {
                chart.set_hover_note(i, names.join("\n"));
            }
        }
        ConsoleSink.render(&chart)?;

        Ok(())
    }

    pub fn predict(config: &Config, format: OutputFormat) -> Result<()> {
        use burn::backend::ndarray::NdArrayDevice;
        use burn::backend::{Autodiff, NdArray};

        type TrainBackend = Autodiff<NdArray<f32>>;

        let stats = load_season_records(&config.data.player_stats_path)?;
        let awards = load_award_records(&config.data.awards_path)?;
        log::info!("Loaded {} season rows, {} award rows", stats.len(), awards.len());
        let index = PlayerSeasonIndex::new(stats, awards);

        let examples = pipeline::training_examples(&index, &config.outcome, &config.training);

        println!("------- Career Outcomes -------\n");
        for outcome in CareerOutcome::ALL {
            let count = examples.iter().filter(|e| e.label == outcome).count();
            println!("{}: {}", outcome, count);
        }

        let device = NdArrayDevice::default();
        let pipeline = pipeline::fit::<TrainBackend>(&examples, &config.training, &device)?;
        println!("\nModel Accuracy: {:.2}%", pipeline.validation_accuracy * 100.0);

        let pool = pipeline::prediction_pool(&index, &config.training);
        let results = pipeline.predict_pool(&pool);
        log::info!("Scored {} players from the post-cutoff pool", results.len());

        if let OutputFormat::Json = format {
            println!("{}", serde_json::to_string_pretty(&results).unwrap());
            return Ok(());
        }

        let highlighted: HashSet<&str> = SAMPLE_PLAYERS.into_iter().collect();
        let table = html::predictions_table(&results, &highlighted);
        println!("Predictions table generated successfully.");

        html::append_fragment(&config.data.predictions_html_path, &table)?;
        println!("Predictions table saved successfully.");

        println!("\n------- Sample Outputs -------");
        for result in &results {
            if !highlighted.contains(result.player.as_str()) {
                continue;
            }
            let probs: Vec<String> = CareerOutcome::ALL
                .iter()
                .map(|&o| format!("{}: {:.2}%", o, result.probability(o) * 100.0))
                .collect();
            println!(
                "\n{}: Predicted Outcome - {}, Probabilities - [{}]",
                result.player,
                result.outcome,
                probs.join(", ")
            );
        }

        Ok(())
    }

    pub fn rebounding(config: &Config, team: &str, game: u32) -> Result<()> {
        let rows = load_team_game_records(&config.data.rebounding_path)?;
        let report = rebounding::run(&rows, team, game)?;

        println!(
            "Average Offensive Rebound Percent for {}: {:.1}%",
            report.team,
            report.predicted_pct * 100.0
        );
        println!(
            "Predicted Offensive Rebound Percent for Game {}: {:.1}%",
            report.target_game,
            report.predicted_pct * 100.0
        );
        log::debug!("Prediction used {} prior games", report.games_used);

        Ok(())
    }
}
