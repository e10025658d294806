use std::path::PathBuf;

use kanjideck_core::error::ErrorCode;
use kanjideck_core::SubjectId;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors returned while loading or reading a catalog or dictionary.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// File I/O error.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A subject id has no record in the catalog.
    #[error("subject {0} is not in the catalog")]
    MissingSubject(SubjectId),
}

impl CatalogError {
    /// Machine-readable code for CLI output.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::CatalogNotFound
            }
            Self::Io { .. } => ErrorCode::CatalogReadFailed,
            Self::Parse { .. } => ErrorCode::CatalogParseError,
            Self::MissingSubject(_) => ErrorCode::InternalUnexpected,
        }
    }
}
