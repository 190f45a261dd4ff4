// LogHealth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every variant carries the path and the underlying cause so fatal errors
// can be diagnosed from the message alone.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for operations that are fatal to an invocation.
///
/// Per-source check failures never appear here; the engine turns them into
/// FAILED results instead.
#[derive(Debug)]
pub enum LogHealthError {
    /// Sources document could not be loaded or updated.
    Config(ConfigError),

    /// Report could not be written.
    Export(ExportError),
}

impl fmt::Display for LogHealthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for LogHealthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (sources document) errors
// ---------------------------------------------------------------------------

/// Errors raised by the sources store (`platform::sources`).
#[derive(Debug)]
pub enum ConfigError {
    /// The sources document does not exist.
    NotFound { path: PathBuf, source: io::Error },

    /// Any other I/O failure reading or writing the document.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Content is not valid JSON or not an array of sources.
    ///
    /// `offset` is the byte offset of a syntax error, or 0 when the JSON was
    /// well-formed but had the wrong shape.
    Parse {
        path: PathBuf,
        offset: u64,
        source: serde_json::Error,
    },

    /// The updated source list could not be serialised.
    Serialise {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// True for the "document does not exist" case, which `append` recovers from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path, source } => {
                write!(f, "Sources file '{}' not found: {source}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Parse {
                path,
                offset,
                source,
            } => write!(
                f,
                "JSON parse error in '{}' (offset={offset}): {source}",
                path.display()
            ),
            Self::Serialise { path, source } => {
                write!(f, "Cannot serialise sources for '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialise { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogHealthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// File access errors
// ---------------------------------------------------------------------------

/// A filesystem failure while checking a log source.
///
/// Never propagated out of the engine: it is rendered into the
/// `error_details` string of a FAILED result.
#[derive(Debug)]
pub struct FileAccessError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl FileAccessError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.path.display(), self.source)
    }
}

impl std::error::Error for FileAccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to report export.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing to export; a report is never written with zero entries.
    Empty,

    /// I/O error creating the directory, writing the temp file, or renaming.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No results to export"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "Export I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Empty => None,
        }
    }
}

impl From<ExportError> for LogHealthError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogHealth results.
pub type Result<T> = std::result::Result<T, LogHealthError>;
