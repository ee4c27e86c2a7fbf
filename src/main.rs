mod config;
mod error;
mod habit;
mod logging;
mod presenter;
mod theme;
mod ui;

use anyhow::{Context, Result};
use gtk4::glib;
use libadwaita::prelude::*;
use libadwaita::Application;
use tracing::{info, warn};

use config::AppConfig;
use ui::HabitApp;

const APP_ID: &str = "com.example.habit-tracker";

fn main() -> glib::ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("habit-tracker: {e:#}");
            glib::ExitCode::FAILURE
        }
    }
}

fn run() -> Result<glib::ExitCode> {
    let config = AppConfig::from_env();
    logging::enable_logging(&config)?;

    for (key, value) in &config.ignored {
        warn!(%key, %value, "ignoring unrecognised setting");
    }

    libadwaita::init().context("failed to initialise libadwaita")?;

    let app = Application::builder()
        .application_id(APP_ID)
        .build();

    let initial_theme = config.initial_theme;
    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        info!(theme = ?initial_theme, "starting habit tracker");
        HabitApp::new(app, initial_theme).show();
    });

    Ok(app.run())
}
