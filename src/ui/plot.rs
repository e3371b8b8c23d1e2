use std::ops::RangeInclusive;

use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, FontId, RichText, TextFormat, Ui};
use egui_plot::{
    GridInput, GridMark, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points,
};

use crate::chart::spec::{format_number, render_hover, Axis, ChartSpec, Trace};
use crate::color::{lighten, named_color};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rank plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current animation frame of the chart.
pub fn rank_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(legend_job(chart, ui.visuals().dark_mode));
    });

    let missing = chart.teams_without_data();
    if !missing.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("No data for {}", missing.join(", ")))
                    .color(Color32::YELLOW),
            );
        });
    }

    let x_axis = chart.layout.x_axis.clone();
    let y_axis = chart.layout.y_axis.clone();
    // egui_plot has no inverted axes: an inverted axis is drawn negated.
    let y_sign = if y_axis.is_inverted() { -1.0 } else { 1.0 };
    let x_sign = if x_axis.is_inverted() { -1.0 } else { 1.0 };

    let hover_template = state.current_traces()[0].hover_template.clone();

    let mut plot = Plot::new("rank_plot")
        .x_axis_label(x_axis.title.clone())
        .y_axis_label(y_axis.title.clone())
        .show_grid([x_axis.show_grid, y_axis.show_grid])
        .x_grid_spacer(tick_spacer(&x_axis, x_sign))
        .y_grid_spacer(tick_spacer(&y_axis, y_sign))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            format_number(mark.value * x_sign)
        })
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            format_number(mark.value * y_sign)
        })
        .label_formatter(move |name: &str, value: &PlotPoint| {
            if name.is_empty() {
                String::new()
            } else {
                let body = render_hover(&hover_template, value.x * x_sign, value.y * y_sign);
                format!("{name}\n{body}")
            }
        });

    if x_axis.fixed_range || y_axis.fixed_range {
        plot = plot
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false);
    }

    let bounds = PlotBounds::from_min_max(
        [signed_min(&x_axis, x_sign), signed_min(&y_axis, y_sign)],
        [signed_max(&x_axis, x_sign), signed_max(&y_axis, y_sign)],
    );

    plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(bounds);

        for trace in state.current_traces() {
            if trace.is_empty() {
                continue;
            }
            let color = named_color(&trace.line.color);
            let points: Vec<[f64; 2]> = trace
                .points()
                .map(|(year, rank)| [year as f64 * x_sign, rank * y_sign])
                .collect();

            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&trace.name)
                    .color(color)
                    .width(trace.line.width),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(&trace.name)
                    .color(named_color(&trace.marker.color))
                    // Marker size is a diameter.
                    .radius(trace.marker.size / 2.0),
            );
        }
    });
}

/// One grid mark per explicit tick value, in plot coordinates.
fn tick_spacer(axis: &Axis, sign: f64) -> impl Fn(GridInput) -> Vec<GridMark> + 'static {
    let ticks: Vec<f64> = axis.tick_values.iter().map(|v| v * sign).collect();
    move |_input: GridInput| {
        ticks
            .iter()
            .map(|&value| GridMark {
                value,
                step_size: 1.0,
            })
            .collect()
    }
}

fn signed_min(axis: &Axis, sign: f64) -> f64 {
    (axis.min() * sign).min(axis.max() * sign)
}

fn signed_max(axis: &Axis, sign: f64) -> f64 {
    (axis.min() * sign).max(axis.max() * sign)
}

/// `Teams  ● KC   ● BUF` with each entry in its series colour.
fn legend_job(chart: &ChartSpec, dark_mode: bool) -> LayoutJob {
    let font = FontId::proportional(15.0);
    let text_color = if dark_mode {
        Color32::LIGHT_GRAY
    } else {
        Color32::DARK_GRAY
    };

    let mut job = LayoutJob::default();
    job.append(
        &chart.layout.legend.title,
        0.0,
        TextFormat::simple(font.clone(), text_color),
    );
    for trace in &chart.data {
        job.append(
            &legend_entry(trace),
            16.0,
            TextFormat::simple(font.clone(), legend_color(trace, dark_mode)),
        );
    }
    job
}

fn legend_entry(trace: &Trace) -> String {
    format!("● {}", trace.name)
}

fn legend_color(trace: &Trace, dark_mode: bool) -> Color32 {
    let color = named_color(&trace.line.color);
    if dark_mode {
        lighten(color, 0.15)
    } else {
        color
    }
}
