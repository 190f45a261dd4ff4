// LogHealth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers, and their serde
// shape is the on-disk format of both the sources document and the report.

use crate::util::constants::FAILED_DETAILS_PREFIX;
use crate::util::error::FileAccessError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Log source (one configured descriptor)
// =============================================================================

/// One configured log source to check.
///
/// IDs are expected to be unique but this is not enforced; duplicates are
/// analysed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSource {
    pub id: String,

    /// Path to the log file. Not validated at load time.
    pub path: PathBuf,

    /// Free-form label such as "nginx-access". Opaque to the analyser.
    #[serde(rename = "type")]
    pub kind: String,
}

impl LogSource {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            kind: kind.into(),
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// Outcome classification of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Failed,
}

impl Status {
    /// Wire/display label, identical to the serialised form.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Failed => "FAILED",
        }
    }

    /// Case-insensitive comparison against a user-supplied label.
    ///
    /// Exact apart from case: surrounding whitespace does not match.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label().eq_ignore_ascii_case(label)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Analysis result
// =============================================================================

/// Outcome of checking one log source. Exactly one is produced per source.
///
/// `error_details` is a flat string rather than a nested error so the report
/// stays a plain array of string-valued objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub log_id: String,
    pub file_path: PathBuf,
    pub status: Status,
    pub message: String,

    /// Empty when OK, otherwise always starts with "FAILED - ".
    pub error_details: String,
}

impl AnalysisResult {
    /// Successful check of `source`.
    pub fn ok(source: &LogSource, message: &str) -> Self {
        Self {
            log_id: source.id.clone(),
            file_path: source.path.clone(),
            status: Status::Ok,
            message: message.to_string(),
            error_details: String::new(),
        }
    }

    /// Failed check with a fixed detail text (the prefix is added here).
    pub fn failed(source: &LogSource, message: &str, details: &str) -> Self {
        Self {
            log_id: source.id.clone(),
            file_path: source.path.clone(),
            status: Status::Failed,
            message: message.to_string(),
            error_details: format!("{FAILED_DETAILS_PREFIX}{details}"),
        }
    }

    /// Failed check caused by a filesystem error while checking the source.
    pub fn access_failed(source: &LogSource, message: &str, err: &FileAccessError) -> Self {
        Self::failed(source, message, &format!("{message}: {err}"))
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn source() -> LogSource {
        LogSource::new("nginx", "/var/log/nginx/access.log", "nginx-access")
    }

    #[test]
    fn test_source_uses_type_key_on_the_wire() {
        let json = serde_json::to_value(source()).unwrap();
        assert_eq!(json["type"], "nginx-access");
        assert_eq!(json["path"], "/var/log/nginx/access.log");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_status_serialises_uppercase() {
        assert_eq!(serde_json::to_string(&Status::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&Status::Failed).unwrap(), "\"FAILED\"");
        let parsed: Status = serde_json::from_str("\"FAILED\"").unwrap();
        assert_eq!(parsed, Status::Failed);
    }

    #[test]
    fn test_status_label_match_is_case_insensitive() {
        assert!(Status::Ok.matches_label("ok"));
        assert!(Status::Ok.matches_label("Ok"));
        assert!(Status::Failed.matches_label("failed"));
        assert!(!Status::Failed.matches_label("ok"));
        assert!(!Status::Ok.matches_label(""));
        assert!(!Status::Ok.matches_label(" ok "));
    }

    #[test]
    fn test_ok_result_has_empty_details() {
        let r = AnalysisResult::ok(&source(), "analysis completed successfully");
        assert!(r.is_ok());
        assert!(r.error_details.is_empty());
        assert_eq!(r.log_id, "nginx");
    }

    #[test]
    fn test_access_failed_details_are_prefixed() {
        let err = FileAccessError::new(
            "/var/log/nginx/access.log",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let r = AnalysisResult::access_failed(&source(), "file not found", &err);
        assert_eq!(r.status, Status::Failed);
        assert_eq!(
            r.error_details,
            "FAILED - file not found: '/var/log/nginx/access.log': no such file"
        );
    }

    #[test]
    fn test_result_field_names_on_the_wire() {
        let r = AnalysisResult::failed(&source(), "corrupted file detected", "x");
        let json = serde_json::to_value(&r).unwrap();
        for key in ["log_id", "file_path", "status", "message", "error_details"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["status"], "FAILED");
    }
}
