use std::path::PathBuf;

use crate::theme::Theme;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub log_filter: String,
    pub log_dir: Option<PathBuf>,
    pub log_to_stdout: bool,
    pub initial_theme: Theme,
    /// `(variable, value)` pairs that could not be understood.
    pub ignored: Vec<(String, String)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
            log_to_stdout: false,
            initial_theme: Theme::Light,
            ignored: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup("HABIT_TRACKER_LOG").or_else(|| lookup("RUST_LOG")) {
            let filter = filter.trim();
            if !filter.is_empty() {
                config.log_filter = filter.to_string();
            }
        }
        if let Some(dir) = lookup("HABIT_TRACKER_LOG_DIR") {
            if !dir.trim().is_empty() {
                config.log_dir = Some(PathBuf::from(dir.trim()));
            }
        }
        if let Some(value) = config.flag(&lookup, "HABIT_TRACKER_LOG_STDOUT") {
            config.log_to_stdout = value;
        }
        if let Some(true) = config.flag(&lookup, "HABIT_TRACKER_DARK_MODE") {
            config.initial_theme = Theme::Dark;
        }

        config
    }

    fn flag(&mut self, lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
        let raw = lookup(key)?;
        match parse_flag(&raw) {
            Some(value) => Some(value),
            None => {
                self.ignored.push((key.to_string(), raw));
                None
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
