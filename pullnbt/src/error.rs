//! Contains the Error and Result type used by the parser and document reader.

/// Errors that can occur while decoding NBT.
///
/// Format and IO errors are fatal for the parse: the parser is left with no
/// remaining work and a fresh parser is needed to start again. Usage errors
/// are caller bugs, such as asking for a number when the last event was a
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input does not follow the NBT grammar: an unknown tag, a tag that
    /// is not allowed where it appeared, a negative size, invalid string
    /// data, or a configured limit being exceeded.
    Format,

    /// The API was used incorrectly, for example calling the wrong accessor
    /// for the current event or advancing a finished parser.
    Usage,

    /// The underlying reader failed, including running out of input part way
    /// through a value.
    Io,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_format(&self) -> bool {
        self.kind == ErrorKind::Format
    }

    pub fn is_usage(&self) -> bool {
        self.kind == ErrorKind::Usage
    }

    pub fn is_io(&self) -> bool {
        self.kind == ErrorKind::Io
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Format,
        }
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Usage,
        }
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self::format(format!("invalid nbt tag value: {}", tag))
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Self {
        Self::format(format!(
            "invalid nbt string: nonunicode: {}",
            String::from_utf8_lossy(data)
        ))
    }

    pub(crate) fn no_root_compound() -> Self {
        Self::format("invalid nbt: no root compound")
    }

    pub(crate) fn unexpected_event(expected: &str, found: impl std::fmt::Debug) -> Self {
        Self::format(format!("expected {}, found {:?}", expected, found))
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        let msg = match e.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                format!("eof: unexpectedly ran out of input: {}", e)
            }
            _ => format!("io error: {}", e),
        };

        Self {
            msg,
            kind: ErrorKind::Io,
        }
    }
}
