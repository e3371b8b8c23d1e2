use serde::Serialize;

// ---------------------------------------------------------------------------
// ChartSpec – everything the renderer needs, independent of egui
// ---------------------------------------------------------------------------

/// A complete, serialisable chart description: the initial view, the
/// cumulative animation frames, static layout and playback controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    /// Initial view (frame 1, or empty traces when there is nothing to show).
    pub data: [Trace; 2],
    pub frames: Vec<Frame>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Traces to draw for a 1-based frame index; falls back to the initial view.
    pub fn traces_at(&self, frame: usize) -> &[Trace; 2] {
        frame
            .checked_sub(1)
            .and_then(|i| self.frames.get(i))
            .map(|f| &f.data)
            .unwrap_or(&self.data)
    }

    /// Selected teams that have no points at all.
    ///
    /// Trace names are the team identifiers, so a team selected twice is
    /// reported once.
    pub fn teams_without_data(&self) -> Vec<&str> {
        let full = self.frames.last().map(|f| &f.data).unwrap_or(&self.data);
        let mut missing: Vec<&str> = full
            .iter()
            .filter(|t| t.is_empty())
            .map(|t| t.name.as_str())
            .collect();
        missing.dedup();
        missing
    }
}

/// One cumulative animation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// `"Frame {i}"`, 1-based.
    pub name: String,
    pub data: [Trace; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// One team's (year, rank) series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub mode: TraceMode,
    pub line: LineStyle,
    pub marker: MarkerStyle,
    pub hover_template: String,
}

impl Trace {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(year, rank)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f32,
    /// CSS colour name, resolved by the renderer.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: f32,
    pub color: String,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Legend,
    pub margin: Margin,
    pub controls: PlaybackControls,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    /// `[start, end]`; `start > end` means the axis is drawn inverted.
    pub range: [f64; 2],
    pub tick_values: Vec<f64>,
    /// When set, the user cannot zoom or pan this axis.
    pub fixed_range: bool,
    pub show_grid: bool,
}

impl Axis {
    pub fn is_inverted(&self) -> bool {
        self.range[0] > self.range[1]
    }

    pub fn min(&self) -> f64 {
        self.range[0].min(self.range[1])
    }

    pub fn max(&self) -> f64 {
        self.range[0].max(self.range[1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendAnchor {
    /// Centred horizontally, just above the plot area.
    TopCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub orientation: Orientation,
    pub anchor: LegendAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

// ---------------------------------------------------------------------------
// Playback controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackControls {
    pub buttons: Vec<Button>,
}

impl PlaybackControls {
    /// Frame interval of the first Play button, if any.
    pub fn frame_duration_ms(&self) -> Option<u64> {
        self.buttons.iter().find_map(|b| match b.action {
            ButtonAction::Play {
                frame_duration_ms, ..
            } => Some(frame_duration_ms),
            ButtonAction::Pause { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Advance through the frames, one every `frame_duration_ms`.
    Play {
        frame_duration_ms: u64,
        redraw: bool,
        from_current: bool,
    },
    /// Stop immediately on the current frame.
    Pause { redraw: bool },
}

// ---------------------------------------------------------------------------
// Hover labels
// ---------------------------------------------------------------------------

/// Fill a plotly-style hover template: `%{x}` / `%{y}` are replaced by the
/// point's coordinates and `<br>` becomes a line break.
pub fn render_hover(template: &str, x: f64, y: f64) -> String {
    template
        .replace("%{x}", &format_number(x))
        .replace("%{y}", &format_number(y))
        .replace("<br>", "\n")
}

/// Integral values print without a fractional part (`2016`, `1.5`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_template_substitutes_coordinates() {
        let label = render_hover("Year: %{x}<br>Rank: %{y}", 2016.0, 1.5);
        assert_eq!(label, "Year: 2016\nRank: 1.5");
    }

    #[test]
    fn inverted_axis_bounds() {
        let axis = Axis {
            title: "Rank".into(),
            range: [32.5, 0.5],
            tick_values: vec![],
            fixed_range: true,
            show_grid: false,
        };
        assert!(axis.is_inverted());
        assert_eq!(axis.min(), 0.5);
        assert_eq!(axis.max(), 32.5);
    }

    #[test]
    fn button_action_serialises_with_method_tag() {
        let play = ButtonAction::Play {
            frame_duration_ms: 500,
            redraw: true,
            from_current: true,
        };
        let json = serde_json::to_value(play).unwrap();
        assert_eq!(json["method"], "play");
        assert_eq!(json["frame_duration_ms"], 500);

        assert_eq!(
            serde_json::to_value(TraceMode::LinesMarkers).unwrap(),
            "lines+markers"
        );
    }
}
