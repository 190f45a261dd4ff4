// LogHealth - core/export.rs
//
// JSON report export.
//
// The report file is committed atomically: content goes to a sibling temp
// file which is then renamed onto the final path, so the final path never
// holds a partially written document. Concurrent exports to the same path are
// not coordinated; the last rename wins.

use crate::core::model::AnalysisResult;
use crate::util::constants::{REPORT_DATE_FORMAT, TEMP_FILE_SUFFIX};
use crate::util::error::ExportError;
use chrono::NaiveDate;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialise `results` as an indented JSON array to any writer.
///
/// `export_path` is only used for error context.
pub fn write_report<W: Write>(
    results: &[AnalysisResult],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, results).map_err(|e| {
        if e.is_io() {
            ExportError::Io {
                path: export_path.to_path_buf(),
                operation: "write report",
                source: io::Error::from(e),
            }
        } else {
            ExportError::Json {
                path: export_path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(results.len())
}

/// Resolve the final report path for `out_path`.
///
/// With a date the file name becomes `<YYMMDD>_<base>`; the directory part of
/// `out_path` is kept as is. Returns `None` when `out_path` has no file name.
pub fn report_path(out_path: &Path, date: Option<NaiveDate>) -> Option<PathBuf> {
    let base = out_path.file_name()?;
    let dir = out_path.parent().unwrap_or_else(|| Path::new(""));

    let file_name = match date {
        Some(d) => {
            let mut name = OsString::from(format!("{}_", d.format(REPORT_DATE_FORMAT)));
            name.push(base);
            name
        }
        None => base.to_os_string(),
    };
    Some(dir.join(file_name))
}

/// Sibling temp path used while the report is being written.
fn temp_path(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push(TEMP_FILE_SUFFIX);
    PathBuf::from(name)
}

/// Export `results` to `out_path` as JSON, optionally date-prefixing the name
/// with today's local date. Returns the final path written.
pub fn export_json(
    results: &[AnalysisResult],
    out_path: &Path,
    with_date_prefix: bool,
) -> Result<PathBuf, ExportError> {
    let date = with_date_prefix.then(|| chrono::Local::now().date_naive());
    export_json_dated(results, out_path, date)
}

/// Same as [`export_json`] with an explicit date for the prefix.
pub fn export_json_dated(
    results: &[AnalysisResult],
    out_path: &Path,
    date: Option<NaiveDate>,
) -> Result<PathBuf, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }

    let final_path = report_path(out_path, date).ok_or_else(|| ExportError::Io {
        path: out_path.to_path_buf(),
        operation: "resolve report name",
        source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
    })?;

    if let Some(dir) = final_path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
            path: dir.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let tmp = temp_path(&final_path);
    if let Err(e) = write_temp(results, &tmp, &final_path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    // Commit point.
    std::fs::rename(&tmp, &final_path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        ExportError::Io {
            path: final_path.clone(),
            operation: "rename",
            source: e,
        }
    })?;

    tracing::info!(
        path = %final_path.display(),
        entries = results.len(),
        "Report written"
    );
    Ok(final_path)
}

/// Write and fsync the full report into `tmp`.
fn write_temp(results: &[AnalysisResult], tmp: &Path, final_path: &Path) -> Result<(), ExportError> {
    let file = File::create(tmp).map_err(|e| temp_io_error(tmp, "create temp file", e))?;
    let mut writer = BufWriter::new(file);
    write_report(results, &mut writer, final_path)?;
    let file = writer
        .into_inner()
        .map_err(|e| temp_io_error(tmp, "write temp file", e.into_error()))?;
    file.sync_all()
        .map_err(|e| temp_io_error(tmp, "sync temp file", e))?;
    Ok(())
}

fn temp_io_error(tmp: &Path, operation: &'static str, source: io::Error) -> ExportError {
    ExportError::Io {
        path: tmp.to_path_buf(),
        operation,
        source,
    }
}
