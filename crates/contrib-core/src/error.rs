use std::fmt;

/// Machine-readable error codes for scripts consuming `--format json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidDateRange,
    PayloadDecodeFailed,
    SourceUnavailable,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidDateRange => "E2001",
            Self::PayloadDecodeFailed => "E3001",
            Self::SourceUnavailable => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidDateRange => "Invalid date range",
            Self::PayloadDecodeFailed => "Contributions payload could not be decoded",
            Self::SourceUnavailable => "Contributions source unavailable",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .contrib/config.toml and retry."),
            Self::InvalidDateRange => Some("Pass a --from date on or before the --to date."),
            Self::PayloadDecodeFailed => {
                Some("Provide JSON shaped as {\"data\": [...]} or a bare array of records.")
            }
            Self::SourceUnavailable => {
                Some("Check --input/--url, or pass --fallback to use sample records.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
