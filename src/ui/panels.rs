use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let countries = match &state.dataset {
        Some(ds) => ds.countries.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // ---- Minimum production ----
    ui.strong("Minimum Production (TBq)");
    let mut min_production = state.filter.min_production;
    let slider = egui::Slider::new(&mut min_production, 0.0..=state.slider_max)
        .step_by(1.0)
        .suffix(" TBq");
    if ui.add(slider).changed() {
        state.set_min_production(min_production);
    }
    ui.separator();

    // ---- Country selection ----
    let n_selected = state.filter.selected_countries.len();
    ui.strong(format!("Select Countries  ({n_selected}/{})", countries.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &countries {
                let mut text = RichText::new(country);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(country));
                }

                let mut checked = state.filter.is_selected(country);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_country(country);
                }
            }
        });
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
        });

        ui.separator();
        ui.strong("Global Isotope Production Dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.views.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Render the tab selector below the menu bar.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Map, "World Production Map");
        ui.selectable_value(&mut state.active_tab, Tab::Comparison, "Country Comparison");
        ui.selectable_value(&mut state.active_tab, Tab::Isotopes, "Isotope Analysis");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open isotope production data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
