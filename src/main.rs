// LogHealth - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Settings (config.toml) loading and logging initialisation
// 3. Dispatch to `add-log` or `analyze`
//
// Exit code 0 means the run completed, even if some sources are FAILED.
// Exit code 1 means the run itself could not complete.

use clap::{Parser, Subcommand};
use loghealth::app::engine::{self, AnalysisOptions};
use loghealth::app::summary::render_summary;
use loghealth::core::export;
use loghealth::core::filter::filter_by_status;
use loghealth::core::model::LogSource;
use loghealth::platform::config::{self, AppConfig, PlatformPaths};
use loghealth::platform::sources;
use loghealth::util;
use loghealth::util::error::Result;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogHealth - concurrent health sweep over configured log files.
///
/// Checks that every configured log file exists and can be opened, then
/// prints a summary and optionally writes a JSON report.
#[derive(Parser, Debug)]
#[command(name = "loghealth", version, about)]
struct Cli {
    /// Show per-source detail and totals.
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Settings file to use instead of the platform config.toml.
    #[arg(long = "settings", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a log source to a sources file (created if missing).
    AddLog {
        /// Unique identifier of the log source.
        #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
        id: String,

        /// Path to the log file.
        #[arg(long)]
        path: PathBuf,

        /// Log type label (e.g. nginx-access, custom-app).
        #[arg(long = "type", value_parser = clap::builder::NonEmptyStringValueParser::new())]
        kind: String,

        /// Sources JSON file to modify.
        #[arg(long)]
        file: PathBuf,
    },

    /// Analyse every log source listed in a sources file.
    Analyze {
        /// Sources JSON file.
        #[arg(short = 'c', long = "config")]
        config: PathBuf,

        /// JSON report path (directories are created as needed).
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Only keep results with this status (OK or FAILED, any case).
        #[arg(long = "status")]
        status: Option<String>,

        /// Write the report under the exact name given, without YYMMDD_.
        #[arg(long = "no-date-prefix")]
        no_date_prefix: bool,

        /// Bounded worker pool size (0 = one thread per source).
        #[arg(long = "workers", value_parser = clap::value_parser!(u64).range(0..=256))]
        workers: Option<u64>,

        /// Also read each file and fail on empty content.
        #[arg(long = "strict")]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().settings_file());
    let (settings, warnings) = config::load_config(&settings_path);

    let level = match settings.log_level.as_deref() {
        None if cli.verbose => Some("info"),
        other => other,
    };
    util::logging::init(cli.debug, level);

    tracing::info!(
        version = util::constants::APP_VERSION,
        settings = %settings_path.display(),
        "LogHealth starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Settings warning");
    }

    match dispatch(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            // Each Display already carries its cause; one line is the full chain.
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli, settings: &AppConfig) -> Result<()> {
    match cli.command {
        Command::AddLog {
            id,
            path,
            kind,
            file,
        } => {
            let source = LogSource::new(id, path, kind);
            let summary = format!("{} ({})", source.id, source.path.display());
            sources::append(&file, source)?;
            println!("Entry added to {}: {summary}", file.display());
            Ok(())
        }
        Command::Analyze {
            config,
            output,
            status,
            no_date_prefix,
            workers,
            strict,
        } => {
            let mut options = AnalysisOptions::from_config(settings, cli.verbose);
            if let Some(n) = workers {
                options.worker_threads = n as usize;
            }
            options.strict_content_check |= strict;

            let sources = sources::load(&config)?;
            let mut results = engine::run_with(sources, &options);

            if let Some(ref wanted) = status {
                results = filter_by_status(results, wanted);
            }

            print!("{}", render_summary(&results, cli.verbose));

            if let Some(ref out) = output {
                let with_date_prefix = settings.date_prefix && !no_date_prefix;
                let final_path = export::export_json(&results, out, with_date_prefix)?;
                println!("\nReport written: {}", final_path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_log_requires_all_fields() {
        let result = Cli::try_parse_from(["loghealth", "add-log", "--id", "a", "--path", "/a.log"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_parses_flags() {
        let cli = Cli::try_parse_from([
            "loghealth", "-v", "analyze", "-c", "sources.json", "-o", "out/report.json",
            "--status", "failed", "--workers", "4", "--strict",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Analyze {
                config,
                output,
                status,
                workers,
                strict,
                no_date_prefix,
            } => {
                assert_eq!(config, PathBuf::from("sources.json"));
                assert_eq!(output, Some(PathBuf::from("out/report.json")));
                assert_eq!(status.as_deref(), Some("failed"));
                assert_eq!(workers, Some(4));
                assert!(strict);
                assert!(!no_date_prefix);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_workers_out_of_range_rejected() {
        let result =
            Cli::try_parse_from(["loghealth", "analyze", "-c", "s.json", "--workers", "999"]);
        assert!(result.is_err());
    }
}
