//! memzip - in-memory ZIP archive reading library.
//!
//! This crate provides a unified interface to the memzip crates.
//!
//! # Crates
//!
//! - [`memzip_common`] - Common utilities (little-endian binary reading)
//! - [`memzip_archive`] - ZIP container parsing and entry decompression
//!
//! # Example
//!
//! ```no_run
//! use memzip::prelude::*;
//!
//! let bytes = std::fs::read("bundle.zip")?;
//! let archive = Archive::open(bytes)?;
//!
//! if let Some(entry) = archive.find("docs/index.html") {
//!     println!("{} modified {}", entry.name(), entry.last_modified());
//!     let html = archive.read_text(entry.name())?;
//!     println!("{html}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use memzip_archive as archive;
pub use memzip_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use memzip_archive::{Archive, DosDateTime, Entry, EntryKey, Error};
    pub use memzip_common::BinaryReader;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
