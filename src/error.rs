use std::io;

/// Result type returned by `NbtReader` and `NbtWriter`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the primitive codec.
///
/// None of these are recoverable within a single parse: once a read fails, the position in the
/// underlying transport no longer lines up with a field boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The encoded data is structurally invalid, e.g. a malformed length prefix or a string that
    /// is not well-formed UTF-8.
    #[error("invalid NBT data: {0}")]
    Format(String),

    /// A tag type byte was outside the range `0..=11`.
    #[error("invalid NBT data: unknown tag type {0}")]
    InvalidTagType(u8),

    /// The transport ran out of data before the requested number of bytes was obtained.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// The caller passed a value that cannot be encoded, such as a string longer than 65535
    /// bytes.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// The transport itself failed.
    #[error(transparent)]
    Io(io::Error),
}

impl Error {
    /// True for structurally invalid data (`Format` and `InvalidTagType`).
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::InvalidTagType(_))
    }

    /// True if the transport was exhausted early.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// True if the caller supplied an invalid argument.
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Self::EndOfStream,
            _ => Self::Io(e),
        }
    }
}
