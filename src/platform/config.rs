// LogHealth - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. The settings file is optional; every value has
// a named default in util::constants.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogHealth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loghealth/ or %APPDATA%\LogHealth\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Bounded worker pool size (0 = one thread per source).
    pub worker_threads: Option<usize>,
    /// Read full content and reject empty files.
    pub strict_content_check: Option<bool>,
    /// Simulated delay lower bound in ms.
    pub min_delay_ms: Option<u64>,
    /// Simulated delay upper bound in ms.
    pub max_delay_ms: Option<u64>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Prefix report file names with YYMMDD_.
    pub date_prefix: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application settings derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Analysis --
    pub worker_threads: usize,
    pub strict_content_check: bool,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,

    // -- Export --
    pub date_prefix: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            worker_threads: constants::UNBOUNDED_WORKERS,
            strict_content_check: false,
            min_delay_ms: constants::DEFAULT_MIN_DELAY_MS,
            max_delay_ms: constants::DEFAULT_MAX_DELAY_MS,
            date_prefix: true,
            log_level: None,
        }
    }
}

/// Load and validate the settings file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings.
/// If the file is unreadable or unparseable, returns defaults with a warning.
///
/// Runs before logging is initialised, so warnings are returned rather than
/// logged; the caller logs them once tracing is up.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    match toml::from_str::<RawConfig>(&content) {
        Ok(raw) => {
            let config = validate(raw, &mut warnings);
            (config, warnings)
        }
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            (AppConfig::default(), warnings)
        }
    }
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Analysis: worker_threads --
    if let Some(workers) = raw.analysis.worker_threads {
        if workers <= constants::MAX_WORKER_THREADS {
            config.worker_threads = workers;
        } else {
            warnings.push(format!(
                "[analysis] worker_threads = {workers} is out of range (0-{}). \
                 Using default (0 = one thread per source).",
                constants::MAX_WORKER_THREADS,
            ));
        }
    }

    if let Some(strict) = raw.analysis.strict_content_check {
        config.strict_content_check = strict;
    }

    // -- Analysis: delay bounds (validated as a pair) --
    let min = raw.analysis.min_delay_ms.unwrap_or(config.min_delay_ms);
    let max = raw.analysis.max_delay_ms.unwrap_or(config.max_delay_ms);
    if min <= max && max <= constants::ABSOLUTE_MAX_DELAY_MS {
        config.min_delay_ms = min;
        config.max_delay_ms = max;
    } else {
        warnings.push(format!(
            "[analysis] delay range {min}-{max} ms is invalid (need min <= max <= {}). \
             Using default ({}-{} ms).",
            constants::ABSOLUTE_MAX_DELAY_MS,
            constants::DEFAULT_MIN_DELAY_MS,
            constants::DEFAULT_MAX_DELAY_MS,
        ));
    }

    // -- Export: date_prefix --
    if let Some(prefix) = raw.export.date_prefix {
        config.date_prefix = prefix;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    config
}
