use log::{LevelFilter, debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::links::LinkPolicy;

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagelinks";

const SETTINGS_HEADER: &str = r#"# ============================================================================
# pagelinks settings
# ============================================================================
# max_cached_pages: leave empty for an unbounded link cache
# log_level: off, error, warn, info, debug or trace
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Page bound for the link cache; unbounded when absent
    #[serde(default)]
    pub max_cached_pages: Option<usize>,

    #[serde(default = "default_true")]
    pub allow_external_urls: bool,

    #[serde(default = "default_max_links_per_page")]
    pub max_links_per_page: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_max_links_per_page() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            max_cached_pages: None,
            allow_external_urls: true,
            max_links_per_page: default_max_links_per_page(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn link_policy(&self) -> LinkPolicy {
        LinkPolicy {
            allow_external_urls: self.allow_external_urls,
        }
    }

    /// Parsed log level, `Info` when the configured name is not recognised
    #[must_use]
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using info", self.log_level);
            LevelFilter::Info
        })
    }
}

pub fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// A missing file is created with defaults. Unreadable or malformed files are
/// logged and defaults are returned.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match preferred_config_path() {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using default settings");
                return Settings::default();
            }
        },
    };

    if !path.exists() {
        info!("Settings file not found, creating with defaults at {path:?}");
        let settings = Settings::default();
        save_settings_to_file(&settings, &path);
        return settings;
    }

    load_settings_from_path(&path)
}

pub fn load_settings_from_path(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
            Ok(mut settings) => {
                debug!("Loaded settings from {path:?}");

                if settings.version < CURRENT_VERSION {
                    migrate_settings(&mut settings);
                    save_settings_to_file(&settings, path);
                }
                settings
            }
            Err(e) => {
                error!("Failed to parse settings file {path:?}: {e}");
                Settings::default()
            }
        },
        Err(e) => {
            error!("Failed to read settings file {path:?}: {e}");
            Settings::default()
        }
    }
}

fn migrate_settings(settings: &mut Settings) {
    info!(
        "Migrating settings from v{} to v{}",
        settings.version, CURRENT_VERSION
    );

    settings.version = CURRENT_VERSION;
}

pub fn save_settings_to_file(settings: &Settings, path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory {parent:?}: {e}");
                return;
            }
        }
    }

    let body = match serde_yaml::to_string(settings) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize settings: {e}");
            return;
        }
    };

    match fs::write(path, format!("{SETTINGS_HEADER}{body}")) {
        Ok(()) => debug!("Saved settings to {path:?}"),
        Err(e) => error!("Failed to save settings to {path:?}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(format!("{} {}", record.level(), record.args()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    fn captured_logs() -> &'static CaptureLogger {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(LevelFilter::Trace);
        });
        &CAPTURE
    }

    fn logged(needle: &str) -> bool {
        captured_logs()
            .lines
            .lock()
            .map(|lines| lines.iter().any(|line| line.contains(needle)))
            .unwrap_or(false)
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILENAME);

        let settings = load_settings(Some(&path));

        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(load_settings_from_path(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, "max_cached_pages: 8\nallow_external_urls: false\n").unwrap();

        let settings = load_settings(Some(&path));

        assert_eq!(settings.max_cached_pages, Some(8));
        assert!(!settings.allow_external_urls);
        assert_eq!(settings.max_links_per_page, 100);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.link_policy().allow_external_urls);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, "max_cached_pages: [not, a, number]\n").unwrap();
        captured_logs();

        assert_eq!(load_settings_from_path(&path), Settings::default());
        assert!(logged("ERROR Failed to parse settings file"));
    }

    #[test]
    fn old_version_is_migrated_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, "version: 0\nmax_links_per_page: 5\n").unwrap();

        let settings = load_settings_from_path(&path);
        assert_eq!(settings.version, CURRENT_VERSION);
        assert_eq!(settings.max_links_per_page, 5);

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("# ===="));
        assert!(saved.contains(&format!("version: {CURRENT_VERSION}")));
    }

    #[test]
    fn log_level_parses_names() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_level_filter(), LevelFilter::Info);
        settings.log_level = "debug".into();
        assert_eq!(settings.log_level_filter(), LevelFilter::Debug);
        settings.log_level = "loud".into();
        assert_eq!(settings.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn unknown_log_level_is_reported() {
        captured_logs();
        let settings = Settings {
            log_level: "shouting".into(),
            ..Settings::default()
        };

        assert_eq!(settings.log_level_filter(), LevelFilter::Info);
        assert!(logged("WARN Unknown log level \"shouting\", using info"));
    }
}
