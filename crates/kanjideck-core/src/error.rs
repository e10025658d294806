use std::fmt;

/// Machine-readable error codes surfaced by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    CatalogNotFound,
    CatalogParseError,
    DictionaryParseError,
    CatalogReadFailed,
    InvalidEnumValue,
    EmptyDeck,
    SourceReadFailed,
    OutputWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    pub const ALL: [Self; 10] = [
        Self::ConfigParseError,
        Self::CatalogNotFound,
        Self::CatalogParseError,
        Self::DictionaryParseError,
        Self::CatalogReadFailed,
        Self::InvalidEnumValue,
        Self::EmptyDeck,
        Self::SourceReadFailed,
        Self::OutputWriteFailed,
        Self::InternalUnexpected,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::CatalogNotFound => "E1002",
            Self::CatalogParseError => "E1003",
            Self::DictionaryParseError => "E1004",
            Self::CatalogReadFailed => "E1005",
            Self::InvalidEnumValue => "E2001",
            Self::EmptyDeck => "E2002",
            Self::SourceReadFailed => "E5001",
            Self::OutputWriteFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::CatalogNotFound => "Catalog not found",
            Self::CatalogParseError => "Catalog parse error",
            Self::DictionaryParseError => "Dictionary parse error",
            Self::CatalogReadFailed => "Catalog data unreadable",
            Self::InvalidEnumValue => "Invalid order/input/kind value",
            Self::EmptyDeck => "No studyable words in source",
            Self::SourceReadFailed => "Source read failed",
            Self::OutputWriteFailed => "Output write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint for the terminal.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .kanjideck/config.toml and retry."),
            Self::CatalogNotFound => {
                Some("Pass --catalog or set [catalog] path in .kanjideck/config.toml.")
            }
            Self::CatalogParseError => {
                Some("Check that the catalog is a character_lookup/subjects JSON index.")
            }
            Self::DictionaryParseError => {
                Some("Check that the dictionary maps queries to search responses.")
            }
            Self::CatalogReadFailed => {
                Some("Check that the catalog and dictionary paths are readable files.")
            }
            Self::InvalidEnumValue => Some("Use one of the documented values; see `kd --help`."),
            Self::EmptyDeck => Some("The source must contain kanji or katakana words."),
            Self::SourceReadFailed => Some("Check that the source file exists and is UTF-8."),
            Self::OutputWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
