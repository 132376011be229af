use eframe::egui;
use isotope_dashboard::config::DashboardConfig;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IsotopeDashboardApp {
    pub state: AppState,
}

impl IsotopeDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for IsotopeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.separator();
            panels::tab_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                plot::empty_hint(ui);
                return;
            }
            match self.state.active_tab {
                Tab::Map => plot::map_tab(ui, &self.state),
                Tab::Comparison => plot::comparison_tab(ui, &self.state),
                Tab::Isotopes => plot::isotope_tab(ui, &self.state),
            }
        });
    }
}
