use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::spec::ButtonAction;
use crate::state::{AppState, Side};

// ---------------------------------------------------------------------------
// Left side panel – team selection and playback
// ---------------------------------------------------------------------------

/// Render the left panel: the two team dropdowns and the Play/Pause controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!(
        "NFL Team Rank Progression ({})",
        state.chart_config.span_label()
    ));
    ui.separator();

    // Clone what we need so we can mutate state inside the combo boxes.
    let teams = state.dataset.teams().to_vec();

    team_dropdown(ui, state, &teams, Side::A, "Select Team 1:");
    ui.add_space(6.0);
    team_dropdown(ui, state, &teams, Side::B, "Select Team 2:");
    ui.separator();

    playback_controls(ui, state);
}

fn team_dropdown(ui: &mut Ui, state: &mut AppState, teams: &[String], side: Side, label: &str) {
    let current = match side {
        Side::A => state.selection.team_a.clone(),
        Side::B => state.selection.team_b.clone(),
    };
    let salt = match side {
        Side::A => "team_a",
        Side::B => "team_b",
    };

    ui.strong(label);
    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt(salt)
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for team in teams {
                if ui.selectable_label(current == *team, team).clicked() {
                    chosen = Some(team.clone());
                }
            }
        });

    if let Some(team) = chosen {
        log::debug!("Selected {team} for {side:?}");
        state.select_team(side, &team);
    }
}

fn playback_controls(ui: &mut Ui, state: &mut AppState) {
    let frame_count = state.playback.frame_count();
    let buttons = state.chart.layout.controls.buttons.clone();

    ui.horizontal(|ui: &mut Ui| {
        for button in &buttons {
            let enabled = match button.action {
                ButtonAction::Play { .. } => frame_count > 1 && !state.playback.is_playing(),
                ButtonAction::Pause { .. } => state.playback.is_playing(),
            };
            if ui
                .add_enabled(enabled, egui::Button::new(&button.label))
                .clicked()
            {
                match button.action {
                    ButtonAction::Play { .. } => state.playback.play(),
                    ButtonAction::Pause { .. } => state.playback.pause(),
                }
            }
        }
    });

    if frame_count > 0 {
        let mut frame = state.playback.frame();
        let slider = egui::Slider::new(&mut frame, 1..=frame_count).text("Frame");
        if ui.add_enabled(frame_count > 1, slider).changed() {
            state.playback.seek(frame);
        }
        let traces = state.current_traces();
        if let Some(year) = traces.iter().filter_map(|t| t.x.last()).max() {
            ui.label(format!("Through {year}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart JSON…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records, {} teams",
            state.dataset.len(),
            state.dataset.teams().len()
        ));
        if state.dataset.dropped_rows() > 0 {
            ui.label(format!("({} rows with a missing team or yardage skipped)", state.dataset.dropped_rows()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open team passing statistics")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::load_dataset(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                // The previous dataset stays in place.
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart description")
        .set_file_name("rank_chart.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::export::write_chart_json(&path, &state.chart) {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
