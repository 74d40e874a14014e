//! Error types for the archive crate.

use thiserror::Error;

/// Which fixed-format record a signature check was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// End of central directory record.
    EndOfCentralDirectory,
    /// Central directory file header.
    CentralDirectory,
    /// Local file header.
    LocalFileHeader,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Record::EndOfCentralDirectory => "end of central directory",
            Record::CentralDirectory => "central directory file header",
            Record::LocalFileHeader => "local file header",
        })
    }
}

/// Errors that can occur when working with ZIP archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while mapping an archive file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record ran past the end of the buffer.
    #[error("truncated archive: {0}")]
    Common(#[from] memzip_common::Error),

    /// No end of central directory signature in the scanned region.
    #[error("could not find end of central directory record")]
    EocdNotFound,

    /// A signature was missing at the position the directory points to.
    #[error("invalid {record} signature at offset {offset}: expected {expected:#010x}, got {actual:#010x}")]
    InvalidSignature {
        record: Record,
        offset: usize,
        expected: u32,
        actual: u32,
    },

    /// The compressed payload extends past the end of the buffer.
    #[error("payload of \"{name}\" ({len} bytes at offset {start}) is out of bounds")]
    PayloadOutOfBounds { name: String, start: usize, len: usize },

    /// Entry not found.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// The entry has the encryption bit set.
    #[error("entry \"{0}\" is encrypted")]
    Encrypted(String),

    /// Unsupported compression method.
    #[error("entry \"{name}\" uses unsupported compression method {method}")]
    UnsupportedCompression { name: String, method: u16 },

    /// Decompression error.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Decompressed content does not match the recorded CRC-32.
    #[error("CRC-32 mismatch for \"{name}\": expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },
}

impl Error {
    /// Whether this error describes a structurally invalid archive.
    ///
    /// Format errors only come out of construction; every other error is
    /// scoped to a single lookup or entry and leaves the archive usable.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::Common(_)
                | Error::EocdNotFound
                | Error::InvalidSignature { .. }
                | Error::PayloadOutOfBounds { .. }
        )
    }
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;
