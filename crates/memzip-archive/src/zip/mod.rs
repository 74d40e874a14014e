//! ZIP format structures.
//!
//! This module contains the fixed-size record layouts of the classic
//! (single-disk, non-ZIP64) ZIP format. Every layout starts right after the
//! record's 4-byte signature; all multi-byte fields are little-endian.

pub mod central_dir;
mod eocd;
mod local;

pub use central_dir::CentralDirectoryHeader;
pub use eocd::EocdRecord;
pub use local::LocalFileHeader;

/// General purpose bit flags.
pub mod flags {
    /// Bit 0: the entry is encrypted.
    pub const ENCRYPTED: u16 = 0x0001;
    /// Bit 11: name and comment are UTF-8 (language encoding flag).
    pub const UTF8: u16 = 0x0800;
}

/// Compression methods this reader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CompressionMethod {
    /// No compression (stored).
    Store = 0,
    /// DEFLATE compression.
    Deflate = 8,
}

impl TryFrom<u16> for CompressionMethod {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Store),
            8 => Ok(Self::Deflate),
            other => Err(other),
        }
    }
}
