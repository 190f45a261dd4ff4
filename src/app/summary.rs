// LogHealth - app/summary.rs
//
// Plain-text rendering of a result set for the terminal.

use crate::core::filter::count_by_status;
use crate::core::model::AnalysisResult;
use std::fmt::Write;

/// Render the human-readable summary printed after an analysis run.
///
/// Verbose mode appends a totals line.
pub fn render_summary(results: &[AnalysisResult], verbose: bool) -> String {
    if results.is_empty() {
        return "No results to display.\n".to_string();
    }

    let mut out = String::from("\n--- Analysis summary ---\n");
    for r in results {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "[{}] {} - {} - {}",
            r.log_id,
            r.file_path.display(),
            r.status,
            r.message
        );
        if !r.error_details.is_empty() {
            let _ = writeln!(out, "  -> error: {}", r.error_details);
        }
    }

    if verbose {
        let counts = count_by_status(results);
        let _ = writeln!(
            out,
            "\n{} checked, {} OK, {} FAILED",
            counts.total(),
            counts.ok,
            counts.failed
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LogSource;

    #[test]
    fn test_empty_summary() {
        assert_eq!(render_summary(&[], true), "No results to display.\n");
    }

    #[test]
    fn test_summary_lines() {
        let ok = LogSource::new("web", "/logs/web.log", "nginx-access");
        let bad = LogSource::new("db", "/logs/db.log", "postgres");
        let results = vec![
            AnalysisResult::ok(&ok, "analysis completed successfully"),
            AnalysisResult::failed(&bad, "file not found", "file not found: gone"),
        ];

        let text = render_summary(&results, false);
        assert!(text.contains("[web] /logs/web.log - OK - analysis completed successfully\n"));
        assert!(text.contains("[db] /logs/db.log - FAILED - file not found\n"));
        assert!(text.contains("  -> error: FAILED - file not found: gone\n"));
        assert!(!text.contains("checked"));

        let verbose = render_summary(&results, true);
        assert!(verbose.ends_with("2 checked, 1 OK, 1 FAILED\n"));
    }
}
