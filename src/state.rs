use std::time::Duration;

use crate::chart::{build_chart, ChartConfig, ChartSpec, Trace};
use crate::data::Dataset;
use crate::playback::Playback;

// ---------------------------------------------------------------------------
// Team selection
// ---------------------------------------------------------------------------

/// The two dropdown values. The same team may be chosen twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSelection {
    pub team_a: String,
    pub team_b: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared dataset; replaced wholesale by File → Open…, never mutated.
    pub dataset: Dataset,

    pub selection: TeamSelection,

    pub chart_config: ChartConfig,

    /// Chart for the current selection, rebuilt on every selection change.
    pub chart: ChartSpec,

    pub playback: Playback,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, selection: TeamSelection, chart_config: ChartConfig) -> Self {
        let chart = build_chart(&dataset, &selection.team_a, &selection.team_b, &chart_config);
        let interval = Duration::from_millis(
            chart
                .layout
                .controls
                .frame_duration_ms()
                .unwrap_or(chart_config.frame_duration_ms),
        );
        let playback = Playback::new(chart.frame_count(), interval);
        Self {
            dataset,
            selection,
            chart_config,
            chart,
            playback,
            status_message: None,
        }
    }

    /// Change one dropdown. Rebuilds the chart only when the value changed.
    pub fn select_team(&mut self, side: Side, team: &str) {
        let slot = match side {
            Side::A => &mut self.selection.team_a,
            Side::B => &mut self.selection.team_b,
        };
        if slot.as_str() == team {
            return;
        }
        *slot = team.to_string();
        self.rebuild_chart();
    }

    /// Ingest a newly loaded dataset, keeping the current selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.status_message = None;
        self.rebuild_chart();
    }

    fn rebuild_chart(&mut self) {
        self.chart = build_chart(
            &self.dataset,
            &self.selection.team_a,
            &self.selection.team_b,
            &self.chart_config,
        );
        self.playback.reset(self.chart.frame_count());
    }

    /// Traces for the frame currently shown.
    pub fn current_traces(&self) -> &[Trace; 2] {
        self.chart.traces_at(self.playback.frame())
    }
}
