use std::time::Instant;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RankRaceApp {
    pub state: AppState,
    last_update: Option<Instant>,
}

impl RankRaceApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            last_update: None,
        }
    }

    /// Advance the animation by the wall time since the previous update.
    fn advance_playback(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_update
            .map(|prev| now.duration_since(prev))
            .unwrap_or_default();
        self.last_update = Some(now);
        self.state.playback.tick(dt);
    }
}

impl eframe::App for RankRaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_playback();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: team selection and playback ----
        egui::SidePanel::left("team_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::rank_plot(ui, &self.state);
        });

        if let Some(wait) = self.state.playback.until_next_frame() {
            ctx.request_repaint_after(wait);
        }
    }
}
