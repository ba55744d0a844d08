//! Console error types

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Invalid value format
    InvalidValue,
    /// E03: Missing required argument
    MissingArg,
    /// E04: Value out of allowed range
    OutOfRange,
    /// E05: Handler got the wrong number of arguments
    ArgCount,
    /// E06: Command table is full
    TableFull,
    /// E07: Input line exceeded the line buffer
    LineOverflow,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::ArgCount => "E05",
            Self::TableFull => "E06",
            Self::LineOverflow => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::ArgCount => "wrong argument count",
            Self::TableFull => "command table full",
            Self::LineOverflow => "line too long",
        }
    }

    /// Negative handler return code for this error (E01 is -1, E02 is -2, ...).
    pub fn as_code(&self) -> i8 {
        -(*self as i8 + 1)
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
