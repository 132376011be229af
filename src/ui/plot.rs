use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::intensity_color;
use crate::state::AppState;

/// Pixel bounds for map bubbles.
const MIN_BUBBLE_PX: f32 = 5.0;
const MAX_BUBBLE_PX: f32 = 100.0;

const ROW_HEIGHT: f32 = 18.0;

/// Reference notes shown under the isotope charts.
const ISOTOPE_NOTES: &[(&str, &str, &str)] = &[
    ("Tc-99m", "Medical imaging", "Belgium, India, Chile"),
    ("I-131", "Thyroid treatment", "Belgium, Iran, Korea"),
    ("Ir-192", "Industrial radiography", "Australia, Japan, USA"),
    ("Mo-99", "Parent for Tc-99m", "Belgium, South Africa"),
    ("F-18", "PET scans", "Austria, Switzerland, Turkey"),
    ("Co-60", "Sterilization, cancer therapy", "India, Russia, Canada"),
];

pub fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a production table to begin  (File → Open…)");
    });
}

fn format_tbq(value: f64) -> String {
    format!("{value:.1} TBq")
}

// ---------------------------------------------------------------------------
// World Production Map tab
// ---------------------------------------------------------------------------

/// Bubble map of the filtered view plus the choropleth table.
pub fn map_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Global Isotope Production Map");
    ui.label(RichText::new("Bubble size represents production volume").weak());

    let views = &state.views;
    let center_lat = views.viewport.latitude;
    let center_lon = views.viewport.longitude;

    Plot::new("production_map")
        .legend(Legend::default())
        .height(ui.available_height() * 0.55)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(center_lon - 180.0)
        .include_x(center_lon + 180.0)
        .include_y(center_lat - 90.0)
        .include_y(center_lat + 90.0)
        .show(ui, |plot_ui| {
            for point in &views.map_points {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&point.country))
                    .unwrap_or(Color32::from_rgb(255, 200, 0));
                let radius = (point.radius as f32).clamp(MIN_BUBBLE_PX, MAX_BUBBLE_PX);
                let name = format!(
                    "{}: {}  [{}]",
                    point.country,
                    format_tbq(point.production_tbq),
                    point.isotopes
                );
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[point.longitude, point.latitude]]))
                        .name(name)
                        .color(color.gamma_multiply(0.7))
                        .radius(radius),
                );
            }
        });

    ui.separator();
    ui.strong("Production by Country");

    let max = views
        .choropleth
        .iter()
        .map(|row| row.production_tbq)
        .fold(0.0, f64::max);

    ui.push_id("choropleth_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(60.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::exact(160.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in ["ISO", "Country", "Production", "", "Major Isotopes"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in &views.choropleth {
                    let fraction = if max > 0.0 { row.production_tbq / max } else { 0.0 };
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.monospace(&row.iso_code);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.country);
                        });
                        table_row.col(|ui| {
                            ui.label(format_tbq(row.production_tbq));
                        });
                        table_row.col(|ui| {
                            ui.add(
                                egui::ProgressBar::new(fraction as f32)
                                    .fill(intensity_color(fraction)),
                            );
                        });
                        table_row.col(|ui| {
                            ui.label(&row.isotopes);
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Country Comparison tab
// ---------------------------------------------------------------------------

/// Top producers, production shares and the full detail table.
pub fn comparison_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Country Comparison");
    let views = &state.views;
    let chart_height = ui.available_height() * 0.45;

    ui.columns(2, |cols: &mut [Ui]| {
        // ---- Top producing countries ----
        cols[0].strong(format!("Top {} Isotope Producing Countries", state.config.top_countries));
        let n = views.top_countries.len();
        let bars: Vec<Bar> = views
            .top_countries
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&rec.country))
                    .unwrap_or(Color32::LIGHT_BLUE);
                // Largest producer at the top of the chart.
                Bar::new((n - i) as f64, rec.production_tbq)
                    .name(format!("{} ({})", rec.country, format_tbq(rec.production_tbq)))
                    .fill(color)
            })
            .collect();
        Plot::new("top_countries")
            .height(chart_height)
            .x_axis_label("Total Production (TBq)")
            .show_axes([true, false])
            .allow_drag(false)
            .allow_scroll(false)
            .show(&mut cols[0], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
            });

        // ---- Production distribution ----
        cols[1].strong("Share of Global Isotope Production");
        share_list(&mut cols[1], state, chart_height);
    });

    ui.separator();
    ui.strong("Detailed Production Data");
    ui.push_id("detail_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(220.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in ["Country", "Major Isotopes", "Total Production"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for rec in &views.detail {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&rec.country);
                        });
                        row.col(|ui| {
                            ui.label(rec.isotopes_label());
                        });
                        row.col(|ui| {
                            ui.label(format_tbq(rec.production_tbq));
                        });
                    });
                }
            });
    });
}

/// Share list drawn as labelled progress bars.
fn share_list(ui: &mut Ui, state: &AppState, height: f32) {
    egui::ScrollArea::vertical()
        .id_salt("shares")
        .max_height(height)
        .show(ui, |ui: &mut Ui| {
            if state.views.shares.is_empty() {
                ui.label("No countries match the current filters.");
            }
            for share in &state.views.shares {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&share.country))
                    .unwrap_or(Color32::LIGHT_BLUE);
                ui.add(
                    egui::ProgressBar::new(share.share as f32)
                        .fill(color)
                        .text(format!("{}  {:.1}%", share.country, share.share * 100.0)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Isotope Analysis tab
// ---------------------------------------------------------------------------

/// Isotope frequency chart and the isotope × country matrix.
pub fn isotope_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Isotope Analysis");
    let views = &state.views;
    let chart_height = ui.available_height() * 0.5;

    ui.columns(2, |cols: &mut [Ui]| {
        // ---- Most common isotopes (whole dataset) ----
        cols[0].strong(format!("Top {} Isotopes by Country Production", state.config.top_isotopes));
        let n = views.isotope_counts.len();
        let bars: Vec<Bar> = views
            .isotope_counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new((n - i) as f64, c.count as f64)
                    .name(format!("{} ({})", c.isotope, c.count))
            })
            .collect();
        Plot::new("isotope_counts")
            .height(chart_height)
            .x_axis_label("Count")
            .show_axes([true, false])
            .allow_drag(false)
            .allow_scroll(false)
            .show(&mut cols[0], |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .width(0.7)
                        .color(Color32::from_rgb(33, 147, 176)),
                );
            });

        // ---- Isotope × country matrix (filtered view) ----
        cols[1].strong("Isotope Production by Country");
        if views.matrix.is_empty() {
            cols[1].colored_label(
                Color32::YELLOW,
                "No isotope data available for selected countries",
            );
            return;
        }
        let max = views.matrix.iter().map(|e| e.production).fold(0.0, f64::max);
        cols[1].push_id("matrix_table", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(chart_height)
                .column(Column::auto().at_least(80.0))
                .column(Column::auto().at_least(140.0))
                .column(Column::remainder())
                .header(ROW_HEIGHT, |mut header| {
                    for title in ["Isotope", "Country", "Production"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for entry in &views.matrix {
                        let fraction = if max > 0.0 { entry.production / max } else { 0.0 };
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(&entry.isotope);
                            });
                            row.col(|ui| {
                                ui.label(&entry.country);
                            });
                            row.col(|ui| {
                                ui.label(
                                    RichText::new(format_tbq(entry.production))
                                        .color(intensity_color(fraction)),
                                );
                            });
                        });
                    }
                });
        });
    });

    ui.separator();
    ui.strong("Isotope Production Details");
    egui::Grid::new("isotope_notes")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            for title in ["Isotope", "Common Applications", "Top Producers"] {
                ui.strong(title);
            }
            ui.end_row();
            for (isotope, uses, producers) in ISOTOPE_NOTES {
                ui.label(RichText::new(*isotope).strong());
                ui.label(*uses);
                ui.label(*producers);
                ui.end_row();
            }
        });
}
