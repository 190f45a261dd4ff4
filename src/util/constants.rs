// LogHealth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogHealth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogHealth";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Analysis
// =============================================================================

/// Source ID that triggers the placeholder corruption rule.
///
/// Any source configured with this ID is classified FAILED once it has passed
/// the accessibility checks. Stand-in for content-based detection; keep it
/// until a real detector replaces it.
pub const CORRUPTION_SENTINEL_ID: &str = "corrupted-log";

/// Lower bound (inclusive) of the simulated per-source processing delay.
pub const DEFAULT_MIN_DELAY_MS: u64 = 50;

/// Upper bound (inclusive) of the simulated per-source processing delay.
pub const DEFAULT_MAX_DELAY_MS: u64 = 200;

/// Hard cap on either delay bound accepted from config.toml.
pub const ABSOLUTE_MAX_DELAY_MS: u64 = 10_000;

/// Worker count meaning "one thread per source" (unbounded fan-out).
pub const UNBOUNDED_WORKERS: usize = 0;

/// Largest bounded worker pool accepted from config or CLI.
pub const MAX_WORKER_THREADS: usize = 256;

/// Prefix of every `error_details` string on a FAILED result.
pub const FAILED_DETAILS_PREFIX: &str = "FAILED - ";

// =============================================================================
// Export
// =============================================================================

/// chrono format string for the report filename date prefix (YYMMDD).
pub const REPORT_DATE_FORMAT: &str = "%y%m%d";

/// Suffix appended to the final report name for the in-flight temp file.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

// =============================================================================
// Configuration & logging
// =============================================================================

/// Settings file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default tracing filter when neither RUST_LOG nor a flag is given.
///
/// Kept at `warn` so stdout/stderr stay quiet for routine sweeps.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
