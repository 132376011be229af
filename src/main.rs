mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::IsotopeDashboardApp;
use eframe::egui;
use isotope_dashboard::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    // A path on the command line wins over the configured one.
    let data_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Global Isotope Production",
        options,
        Box::new(move |_cc| {
            let mut app = IsotopeDashboardApp::new(config);
            if let Some(path) = data_path {
                app.state.load_path(&path);
            }
            Ok(Box::new(app))
        }),
    )
}
