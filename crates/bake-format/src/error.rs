//! Error types for container reading and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for container operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while reading or writing a baked model container.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file was not found at the given path.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that could not be opened.
        path: PathBuf,
    },

    /// The stream does not start with the container magic.
    #[error("not a baked model file (bad magic)")]
    BadMagic,

    /// The container uses a vertex layout this build does not understand.
    #[error("unsupported variant {found:?}, expected {expected:?}")]
    BadVariant {
        /// Variant string found in the file, control bytes stripped.
        found: String,
        /// Variant string this build understands.
        expected: String,
    },

    /// A length-prefixed string exceeds the size limit.
    #[error("string of {length} bytes exceeds the {limit} byte limit")]
    StringTooLong {
        /// Length declared or required, including the trailing NUL.
        length: u32,
        /// Maximum accepted length.
        limit: u32,
    },

    /// A string payload is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidString(#[from] std::string::FromUtf8Error),

    /// A table is too large for its u32 count field.
    #[error("{what} count {count} does not fit in 32 bits")]
    TooManyEntries {
        /// Which table overflowed.
        what: &'static str,
        /// Number of entries.
        count: usize,
    },

    /// A mesh's attribute arrays disagree on the vertex count.
    #[error("mesh {index} attribute arrays disagree on the vertex count")]
    InconsistentMesh {
        /// Index of the offending mesh.
        index: usize,
    },

    /// The stream ended inside a field.
    #[error("unexpected end of file while reading {what}")]
    UnexpectedEof {
        /// Field being read when the stream ended.
        what: &'static str,
    },

    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
