// LogHealth - app/engine.rs
//
// Concurrent analysis engine: fan-out one check per source, fan-in every
// result exactly once.
//
// Architecture:
//   - Default: one scoped thread per source (no cap). Each thread owns its
//     source and sends its single result over an mpsc channel. The
//     coordinator drains the channel until every sender is dropped, then the
//     scope joins the threads.
//   - Bounded: with `worker_threads > 0`, a rayon pool of that size maps the
//     sources to results; `collect` yields exactly one result per source.
//
// There is no cancellation and no per-source timeout; one hung filesystem
// call delays the whole batch. Result order is unspecified.

use crate::app::check::check_source;
use crate::core::filter::count_by_status;
use crate::core::model::{AnalysisResult, LogSource};
use crate::platform::config::AppConfig;
use crate::util::constants;
use rayon::prelude::*;
use std::sync::mpsc;
use std::time::Instant;

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Raises per-source logging from debug to info. Never changes outcomes.
    pub verbose: bool,

    /// 0 = one thread per source; otherwise the size of a bounded pool.
    pub worker_threads: usize,

    /// Read the full file and fail on zero length.
    pub strict_content_check: bool,

    /// Simulated processing delay range, inclusive.
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            worker_threads: constants::UNBOUNDED_WORKERS,
            strict_content_check: false,
            min_delay_ms: constants::DEFAULT_MIN_DELAY_MS,
            max_delay_ms: constants::DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl AnalysisOptions {
    /// Options from validated settings.
    pub fn from_config(config: &AppConfig, verbose: bool) -> Self {
        Self {
            verbose,
            worker_threads: config.worker_threads,
            strict_content_check: config.strict_content_check,
            min_delay_ms: config.min_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }
}

/// Analyse every source with default options.
pub fn run(sources: Vec<LogSource>, verbose: bool) -> Vec<AnalysisResult> {
    run_with(
        sources,
        &AnalysisOptions {
            verbose,
            ..Default::default()
        },
    )
}

/// Analyse every source concurrently and return one result per source.
///
/// Never fails as a whole: per-source problems are FAILED results.
pub fn run_with(sources: Vec<LogSource>, options: &AnalysisOptions) -> Vec<AnalysisResult> {
    let total = sources.len();
    if total == 0 {
        return Vec::new();
    }

    let start = Instant::now();
    tracing::debug!(
        sources = total,
        workers = options.worker_threads,
        strict = options.strict_content_check,
        "Analysis started"
    );

    let results = if options.worker_threads == constants::UNBOUNDED_WORKERS {
        fan_out(sources, options)
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.worker_threads)
            .thread_name(|i| format!("loghealth-worker-{i}"))
            .build()
        {
            Ok(pool) => pool.install(|| {
                sources
                    .par_iter()
                    .map(|source| check_and_log(source, options))
                    .collect::<Vec<_>>()
            }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    workers = options.worker_threads,
                    "Cannot build worker pool, falling back to one thread per source"
                );
                fan_out(sources, options)
            }
        }
    };

    debug_assert_eq!(results.len(), total);

    let counts = count_by_status(&results);
    tracing::info!(
        sources = total,
        ok = counts.ok,
        failed = counts.failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Analysis complete"
    );
    results
}

/// One scoped thread per source, results collected through a channel.
fn fan_out(sources: Vec<LogSource>, options: &AnalysisOptions) -> Vec<AnalysisResult> {
    let total = sources.len();
    let (tx, rx) = mpsc::channel::<AnalysisResult>();

    std::thread::scope(|scope| {
        for (idx, source) in sources.into_iter().enumerate() {
            let worker_tx = tx.clone();
            // Kept so a spawn failure can still produce this source's result.
            let fallback = source.clone();

            let spawned = std::thread::Builder::new()
                .name(format!("loghealth-check-{idx}"))
                .spawn_scoped(scope, move || {
                    // Send only fails if the coordinator is gone, which
                    // cannot happen inside the scope.
                    let _ = worker_tx.send(check_and_log(&source, options));
                });

            if let Err(e) = spawned {
                tracing::warn!(
                    id = %fallback.id,
                    error = %e,
                    "Cannot spawn check thread, running check inline"
                );
                let _ = tx.send(check_and_log(&fallback, options));
            }
        }

        // Drop the coordinator's sender so the drain ends when the last
        // worker finishes.
        drop(tx);

        let mut results = Vec::with_capacity(total);
        results.extend(rx.iter());
        results
    })
}

fn check_and_log(source: &LogSource, options: &AnalysisOptions) -> AnalysisResult {
    let result = check_source(source, options);
    if options.verbose {
        tracing::info!(
            id = %result.log_id,
            path = %result.file_path.display(),
            status = %result.status,
            message = %result.message,
            "Source checked"
        );
    } else {
        tracing::debug!(
            id = %result.log_id,
            status = %result.status,
            "Source checked"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Status;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fast() -> AnalysisOptions {
        AnalysisOptions {
            min_delay_ms: 0,
            max_delay_ms: 5,
            ..Default::default()
        }
    }

    /// `n` sources, the first `missing` of which point to absent files.
    fn make_sources(dir: &TempDir, n: usize, missing: usize) -> Vec<LogSource> {
        (0..n)
            .map(|i| {
                let path: PathBuf = if i < missing {
                    dir.path().join(format!("missing-{i}.log"))
                } else {
                    let p = dir.path().join(format!("present-{i}.log"));
                    std::fs::write(&p, format!("line {i}\n")).unwrap();
                    p
                };
                LogSource::new(format!("src-{i}"), path, "custom-app")
            })
            .collect()
    }

    fn assert_exactly_one_per_source(sources: &[LogSource], results: &[AnalysisResult]) {
        assert_eq!(results.len(), sources.len());
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for r in results {
            *seen.entry(r.log_id.as_str()).or_default() += 1;
        }
        for s in sources {
            assert_eq!(seen.get(s.id.as_str()), Some(&1), "source {} not seen once", s.id);
        }
    }

    fn count_missing(results: &[AnalysisResult]) -> usize {
        results
            .iter()
            .filter(|r| r.status == Status::Failed && r.message == "file not found")
            .count()
    }

    #[test]
    fn test_empty_input_returns_empty() {
        assert!(run(Vec::new(), false).is_empty());
    }

    #[test]
    fn test_cardinality_with_missing_files() {
        for (n, m) in [(1, 0), (1, 1), (10, 3), (1000, 250)] {
            let dir = TempDir::new().unwrap();
            let sources = make_sources(&dir, n, m);

            let results = run_with(sources.clone(), &fast());
            assert_exactly_one_per_source(&sources, &results);
            assert_eq!(count_missing(&results), m, "n={n}");
            assert_eq!(
                results.iter().filter(|r| r.is_ok()).count(),
                n - m,
                "n={n}"
            );
        }
    }

    #[test]
    fn test_default_delay_run_completes() {
        let dir = TempDir::new().unwrap();
        let sources = make_sources(&dir, 10, 2);
        let start = Instant::now();
        let results = run(sources.clone(), true);
        assert_exactly_one_per_source(&sources, &results);
        // Ten sleeps of up to 200 ms run side by side, not back to back.
        assert!(start.elapsed().as_millis() < 2000);
    }

    #[test]
    fn test_bounded_pool_keeps_every_result() {
        let dir = TempDir::new().unwrap();
        let sources = make_sources(&dir, 50, 7);
        let options = AnalysisOptions {
            worker_threads: 4,
            ..fast()
        };

        let results = run_with(sources.clone(), &options);
        assert_exactly_one_per_source(&sources, &results);
        assert_eq!(count_missing(&results), 7);
    }

    #[test]
    fn test_duplicate_sources_are_analysed_independently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "x").unwrap();
        let source = LogSource::new("dup", &path, "t");

        let results = run_with(vec![source.clone(), source.clone(), source], &fast());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.log_id == "dup" && r.is_ok()));
    }

    #[test]
    fn test_verbose_does_not_change_classification() {
        let dir = TempDir::new().unwrap();
        let mut sources = make_sources(&dir, 6, 2);
        let sentinel = dir.path().join("sentinel.log");
        std::fs::write(&sentinel, "x").unwrap();
        sources.push(LogSource::new(constants::CORRUPTION_SENTINEL_ID, sentinel, "t"));

        let sorted = |mut v: Vec<AnalysisResult>| {
            v.sort_by(|a, b| a.log_id.cmp(&b.log_id));
            v
        };
        let quiet = sorted(run_with(sources.clone(), &fast()));
        let loud = sorted(run_with(
            sources,
            &AnalysisOptions {
                verbose: true,
                ..fast()
            },
        ));
        assert_eq!(quiet, loud);
    }

    #[test]
    fn test_options_from_config() {
        let config = AppConfig {
            worker_threads: 3,
            strict_content_check: true,
            min_delay_ms: 1,
            max_delay_ms: 2,
            ..Default::default()
        };
        let options = AnalysisOptions::from_config(&config, true);
        assert_eq!(
            options,
            AnalysisOptions {
                verbose: true,
                worker_threads: 3,
                strict_content_check: true,
                min_delay_ms: 1,
                max_delay_ms: 2,
            }
        );
    }
}
