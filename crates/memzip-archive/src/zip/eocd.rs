//! End of Central Directory (EOCD) structures.

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// End of Central Directory Record (without signature).
///
/// This is the standard ZIP EOCD record found at the end of the archive,
/// optionally followed by up to 65535 bytes of archive comment.
/// The 4-byte signature (0x06054b50) is read separately before this struct.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EocdRecord {
    /// Number of this disk
    pub disk_number: U16,
    /// Disk where central directory starts
    pub central_dir_disk: U16,
    /// Number of central directory records on this disk
    pub central_dir_count_disk: U16,
    /// Total number of central directory records
    pub central_dir_count_total: U16,
    /// Size of central directory (bytes)
    pub central_dir_size: U32,
    /// Offset of start of central directory
    pub central_dir_offset: U32,
    /// Comment length
    pub comment_length: U16,
}

impl EocdRecord {
    /// EOCD signature bytes.
    pub const MAGIC: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

    /// EOCD signature as u32.
    pub const SIGNATURE: u32 = 0x06054b50;

    /// Size of the record including its signature.
    pub const SIZE: usize = 4 + std::mem::size_of::<Self>();

    /// Largest comment the 16-bit length field can describe.
    pub const MAX_COMMENT_LENGTH: usize = u16::MAX as usize;
}
