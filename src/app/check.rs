// LogHealth - app/check.rs
//
// Classification of a single log source.
//
// Runs on a worker thread. Every failure is turned into a FAILED result;
// nothing here returns an error or panics on I/O problems.
//
// Steps, in order:
//   1. metadata      -> "file not found" / "file inaccessible"
//   2. open          -> "cannot open file"
//   2b. strict mode  -> "cannot read file" / "empty file"
//   3. sentinel id   -> "corrupted file detected"
//   4. simulated processing delay
//   5. OK

use crate::app::engine::AnalysisOptions;
use crate::core::model::{AnalysisResult, LogSource};
use crate::platform::fs;
use crate::util::constants::CORRUPTION_SENTINEL_ID;
use crate::util::error::FileAccessError;
use rand::Rng;
use std::time::Duration;

pub const MSG_NOT_FOUND: &str = "file not found";
pub const MSG_INACCESSIBLE: &str = "file inaccessible";
pub const MSG_CANNOT_OPEN: &str = "cannot open file";
pub const MSG_CANNOT_READ: &str = "cannot read file";
pub const MSG_EMPTY: &str = "empty file";
pub const MSG_CORRUPTED: &str = "corrupted file detected";
pub const MSG_OK: &str = "analysis completed successfully";

const DETAILS_EMPTY: &str = "empty file";
const DETAILS_CORRUPTED: &str = "basic corruption detection triggered";

/// Check one source and classify the outcome.
pub fn check_source(source: &LogSource, options: &AnalysisOptions) -> AnalysisResult {
    let path = source.path.as_path();

    if let Err(e) = fs::stat(path) {
        let err = FileAccessError::new(path, e);
        let message = if err.is_not_found() {
            MSG_NOT_FOUND
        } else {
            MSG_INACCESSIBLE
        };
        return AnalysisResult::access_failed(source, message, &err);
    }

    if let Err(e) = fs::try_open(path) {
        return AnalysisResult::access_failed(
            source,
            MSG_CANNOT_OPEN,
            &FileAccessError::new(path, e),
        );
    }

    if options.strict_content_check {
        match fs::read_all_with_retry(path) {
            Ok(content) if content.is_empty() => {
                return AnalysisResult::failed(source, MSG_EMPTY, DETAILS_EMPTY);
            }
            Ok(_) => {}
            Err(e) => {
                return AnalysisResult::access_failed(
                    source,
                    MSG_CANNOT_READ,
                    &FileAccessError::new(path, e),
                );
            }
        }
    }

    // Placeholder for content-based corruption detection: the sentinel ID is
    // always reported as corrupted. Do not replace with a heuristic.
    if source.id == CORRUPTION_SENTINEL_ID {
        return AnalysisResult::failed(source, MSG_CORRUPTED, DETAILS_CORRUPTED);
    }

    simulate_processing(options);

    AnalysisResult::ok(source, MSG_OK)
}

/// Sleep for a uniformly drawn duration in the configured range.
///
/// Blocks only the calling worker.
fn simulate_processing(options: &AnalysisOptions) {
    let min = options.min_delay_ms;
    let max = options.max_delay_ms.max(min);
    let delay_ms = if min == max {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    };
    if delay_ms > 0 {
        std::thread::sleep(Duration::from_millis(delay_ms));
    }
}
