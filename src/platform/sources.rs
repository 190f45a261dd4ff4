// LogHealth - platform/sources.rs
//
// The sources document: a JSON array of `{id, path, type}` objects.
//
// `append` is a plain read-modify-write with an in-place overwrite. It is
// not safe against concurrent writers (last writer wins) and makes no
// atomicity promise; it is a low-frequency administrative operation.

use crate::core::model::LogSource;
use crate::util::error::ConfigError;
use serde_json::error::Category;
use std::io;
use std::path::Path;

/// Load every configured source from `path`, in document order.
pub fn load(path: &Path) -> Result<Vec<LogSource>, ConfigError> {
    let content = std::fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
                source: e,
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                operation: "read",
                source: e,
            }
        }
    })?;

    let sources: Vec<LogSource> =
        serde_json::from_slice(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            offset: error_offset(&content, &e),
            source: e,
        })?;

    tracing::debug!(path = %path.display(), sources = sources.len(), "Sources loaded");
    Ok(sources)
}

/// Append one source to the document at `path`, creating it when missing.
pub fn append(path: &Path, source: LogSource) -> Result<(), ConfigError> {
    let mut sources = match load(path) {
        Ok(existing) => existing,
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %path.display(), "Sources file missing, starting fresh");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    sources.push(source);

    let json = serde_json::to_string_pretty(&sources).map_err(|e| ConfigError::Serialise {
        path: path.to_path_buf(),
        source: e,
    })?;

    std::fs::write(path, json.as_bytes()).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })?;

    tracing::info!(path = %path.display(), sources = sources.len(), "Source appended");
    Ok(())
}

/// Byte offset of a syntax or end-of-input failure; 0 for shape errors.
///
/// serde_json reports a 1-based line and a byte column within that line, so
/// the offset is the length of all preceding lines plus the column.
fn error_offset(content: &[u8], err: &serde_json::Error) -> u64 {
    if !matches!(err.classify(), Category::Syntax | Category::Eof) || err.line() == 0 {
        return 0;
    }

    let preceding: usize = content
        .split_inclusive(|b| *b == b'\n')
        .take(err.line() - 1)
        .map(<[u8]>::len)
        .sum();
    (preceding + err.column()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_preserves_document_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "sources.json",
            r#"[
                {"id": "web", "path": "/var/log/nginx/access.log", "type": "nginx-access"},
                {"id": "app", "path": "/var/log/app.log", "type": "custom-app"},
                {"id": "web", "path": "/var/log/nginx/access.log", "type": "nginx-access"}
            ]"#,
        );

        let sources = load(&path).unwrap();
        let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["web", "app", "web"]);
        assert_eq!(sources[1].kind, "custom-app");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load(&dir.path().join("missing.json"));
        assert!(
            matches!(result, Err(ConfigError::NotFound { .. })),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load(dir.path());
        assert!(
            matches!(result, Err(ConfigError::Io { .. })),
            "expected Io, got {result:?}"
        );
    }

    #[test]
    fn test_load_object_instead_of_array_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sources.json", r#"{"not": "an array"}"#);
        let result = load(&path);
        assert!(
            matches!(result, Err(ConfigError::Parse { offset: 0, .. })),
            "expected Parse with offset 0, got {result:?}"
        );
    }

    #[test]
    fn test_load_truncated_json_is_parse_error_with_offset() {
        let dir = TempDir::new().unwrap();
        let content = r#"[{"id": "a", "path": "/a.log", "#;
        let path = write(&dir, "sources.json", content);
        match load(&path) {
            Err(ConfigError::Parse { offset, .. }) => {
                assert!(offset > 0 && offset <= content.len() as u64, "offset {offset}");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_offset_spans_lines() {
        let dir = TempDir::new().unwrap();
        // Error at the 'x' on the second line: 2 bytes before it + its column.
        let path = write(&dir, "sources.json", "[\n x]");
        match load(&path) {
            Err(ConfigError::Parse { offset, .. }) => assert_eq!(offset, 4),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sources.json");

        append(&path, LogSource::new("app", "/var/log/app.log", "custom-app")).unwrap();

        let sources = load(&path).unwrap();
        assert_eq!(sources, vec![LogSource::new("app", "/var/log/app.log", "custom-app")]);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  {"), "expected indented JSON, got {raw}");
        assert!(raw.contains("\"type\": \"custom-app\""));
    }

    #[test]
    fn test_append_to_existing_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sources.json");

        append(&path, LogSource::new("first", "/a.log", "t")).unwrap();
        append(&path, LogSource::new("second", "/b.log", "t")).unwrap();

        let ids: Vec<_> = load(&path).unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn test_append_propagates_parse_error_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sources.json", "not json");

        let result = append(&path, LogSource::new("x", "/x.log", "t"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
