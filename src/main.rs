mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod playback;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::RankRaceApp;
use chart::{build_chart, ChartConfig};
use config::{Cli, DashboardConfig};
use state::{AppState, TeamSelection};

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from(Cli::parse());

    // Without a dataset there is nothing to show.
    let dataset = data::load_dataset(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} has no rankable rows", config.data_path.display());
    }
    for team in [&config.team_a, &config.team_b] {
        if !dataset.contains_team(team) {
            log::warn!("Team '{team}' does not appear in {}", config.data_path.display());
        }
    }

    let chart_config = ChartConfig::default();

    if let Some(out) = &config.export {
        let chart = build_chart(&dataset, &config.team_a, &config.team_b, &chart_config);
        return export::write_chart_json(out, &chart);
    }

    let selection = TeamSelection {
        team_a: config.team_a,
        team_b: config.team_b,
    };
    let state = AppState::new(dataset, selection, chart_config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rank Race – NFL Passing Yards",
        options,
        Box::new(|_cc| Ok(Box::new(RankRaceApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
