//! Read-only random access to ZIP archives held in memory.
//!
//! The whole archive is one immutable byte buffer. Opening it parses the
//! end of central directory record and every central directory entry up
//! front, resolving each entry's local header to find the exact byte
//! range of its compressed payload. Supported:
//!
//! - Single-disk archives with trailing comments up to 65535 bytes
//! - UTF-8 and code page 437 names and comments
//! - Stored (method 0) and DEFLATE (method 8) entries
//! - Zero-copy access to raw payloads
//!
//! Encrypted entries are detected and rejected.
//!
//! # Example
//!
//! ```no_run
//! use memzip_archive::Archive;
//!
//! let archive = Archive::open_file("bundle.zip")?;
//!
//! for entry in archive.entries() {
//!     println!("{}: {} bytes", entry.name(), entry.uncompressed_size());
//! }
//!
//! // Read a specific file
//! let readme = archive.read_text("README.txt")?;
//! let first = archive.read(0)?;
//! # Ok::<(), memzip_archive::Error>(())
//! ```

mod archive;
mod datetime;
mod decompress;
mod entry;
mod error;
mod locate;
pub mod text;
pub mod zip;

#[cfg(test)]
mod testutil;

pub use archive::{Archive, EntryKey};
pub use datetime::DosDateTime;
pub use entry::Entry;
pub use error::{Error, Record, Result};
pub use locate::{locate, EndOfCentralDirectory};
