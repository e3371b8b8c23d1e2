use crate::data::{Dataset, YearlyTeamRecord};

use super::spec::{
    Axis, Button, ButtonAction, ChartSpec, Frame, Layout, Legend, LegendAnchor, LineStyle, Margin,
    MarkerStyle, Orientation, PlaybackControls, Trace, TraceMode,
};

pub const HOVER_TEMPLATE: &str = "Year: %{x}<br>Rank: %{y}";

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Fixed presentation constants for the rank chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub first_year: i32,
    pub last_year: i32,
    /// Number of rank slots on the y-axis (teams in the league).
    pub max_rank: u32,
    pub frame_duration_ms: u64,
    pub line_width: f32,
    pub marker_size: f32,
    pub team_a_color: String,
    pub team_b_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            first_year: 2016,
            last_year: 2024,
            max_rank: 32,
            frame_duration_ms: 500,
            line_width: 3.0,
            marker_size: 10.0,
            team_a_color: "blue".to_string(),
            team_b_color: "red".to_string(),
        }
    }
}

impl ChartConfig {
    /// `"2016-2024"`.
    pub fn span_label(&self) -> String {
        format!("{}-{}", self.first_year, self.last_year)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the animated rank chart for two teams.
///
/// Frame `i` reveals the first `i` seasons of each team; the frame count is
/// the longer of the two series so neither side is truncated. Unknown teams
/// produce an empty series rather than an error.
pub fn build_chart(dataset: &Dataset, team_a: &str, team_b: &str, config: &ChartConfig) -> ChartSpec {
    let series_a = dataset.series(team_a);
    let series_b = dataset.series(team_b);
    let frame_count = series_a.len().max(series_b.len());

    log::debug!(
        "Building chart for {team_a} ({} seasons) vs {team_b} ({} seasons)",
        series_a.len(),
        series_b.len()
    );

    let traces_upto = |n: usize| {
        [
            trace(team_a, &series_a, n, &config.team_a_color, config),
            trace(team_b, &series_b, n, &config.team_b_color, config),
        ]
    };

    let frames: Vec<Frame> = (1..=frame_count)
        .map(|i| Frame {
            name: format!("Frame {i}"),
            data: traces_upto(i),
        })
        .collect();

    ChartSpec {
        title: format!(
            "Rank Progression for {team_a} and {team_b} ({})",
            config.span_label()
        ),
        data: traces_upto(1),
        frames,
        layout: layout(config),
    }
}

/// The first `n` points of a year-sorted series (fewer if the series is shorter).
fn trace(name: &str, series: &[&YearlyTeamRecord], n: usize, color: &str, config: &ChartConfig) -> Trace {
    let shown = &series[..n.min(series.len())];
    Trace {
        name: name.to_string(),
        x: shown.iter().map(|r| r.year).collect(),
        y: shown.iter().map(|r| r.rank).collect(),
        mode: TraceMode::LinesMarkers,
        line: LineStyle {
            width: config.line_width,
            color: color.to_string(),
        },
        marker: MarkerStyle {
            size: config.marker_size,
            color: color.to_string(),
        },
        hover_template: HOVER_TEMPLATE.to_string(),
    }
}

fn layout(config: &ChartConfig) -> Layout {
    let max_rank = config.max_rank as f64;
    Layout {
        x_axis: Axis {
            title: "Year".to_string(),
            // Half a year of padding so the first and last seasons are fully visible.
            range: [config.first_year as f64 - 0.5, config.last_year as f64 + 0.5],
            tick_values: (config.first_year..=config.last_year).map(f64::from).collect(),
            fixed_range: true,
            show_grid: false,
        },
        y_axis: Axis {
            title: "Rank".to_string(),
            range: [max_rank + 0.5, 0.5],
            tick_values: (1..=config.max_rank).map(f64::from).collect(),
            fixed_range: true,
            show_grid: false,
        },
        legend: Legend {
            title: "Teams".to_string(),
            orientation: Orientation::Horizontal,
            anchor: LegendAnchor::TopCenter,
        },
        margin: Margin {
            left: 60.0,
            right: 60.0,
            top: 120.0,
            bottom: 60.0,
        },
        controls: PlaybackControls {
            buttons: vec![
                Button {
                    label: "Play".to_string(),
                    action: ButtonAction::Play {
                        frame_duration_ms: config.frame_duration_ms,
                        redraw: true,
                        from_current: true,
                    },
                },
                Button {
                    label: "Pause".to_string(),
                    action: ButtonAction::Pause { redraw: true },
                },
            ],
        },
    }
}
