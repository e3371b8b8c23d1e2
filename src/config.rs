use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_PATH: &str = "team_passing_yards_2016_2024.csv";
pub const DEFAULT_TEAM_A: &str = "KC";
pub const DEFAULT_TEAM_B: &str = "BUF";

/// Animated rank progression of two NFL teams' passing yardage.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rank-race", version, about)]
pub struct Cli {
    /// Team statistics (.csv, .json or .parquet) with posteam, year and
    /// total_passing_yards columns
    #[arg(long, env = "RANK_RACE_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initially selected first team
    #[arg(long, env = "RANK_RACE_TEAM_A", default_value = DEFAULT_TEAM_A)]
    pub team_a: String,

    /// Initially selected second team
    #[arg(long, env = "RANK_RACE_TEAM_B", default_value = DEFAULT_TEAM_B)]
    pub team_b: String,

    /// Write the chart description as JSON to this file and exit without
    /// opening a window
    #[arg(long, value_name = "OUT.json")]
    pub export: Option<PathBuf>,
}

/// Resolved start-up settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub team_a: String,
    pub team_b: String,
    pub export: Option<PathBuf>,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            team_a: cli.team_a.trim().to_string(),
            team_b: cli.team_b.trim().to_string(),
            export: cli.export,
        }
    }
}
