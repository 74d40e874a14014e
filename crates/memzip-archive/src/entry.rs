//! ZIP archive entry.

use std::ops::Range;

use crate::datetime::DosDateTime;
use crate::zip::{flags, CompressionMethod};

/// An entry (file) within an archive.
///
/// This contains metadata parsed from the central directory, not the file
/// data itself. Use [`Archive::raw_data`](crate::Archive::raw_data) or
/// [`Archive::read`](crate::Archive::read) to get the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name/path within the archive.
    name: String,
    version_created: u16,
    version_needed: u16,
    /// General purpose bit flag.
    bitflag: u16,
    compression_method: u16,
    last_modified: DosDateTime,
    /// CRC32 checksum of uncompressed data.
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    disk_number: u16,
    internal_attributes: u16,
    external_attributes: u32,
    /// Raw extra field bytes as found in the central directory.
    extra_field: Vec<u8>,
    comment: String,
    /// Location of the compressed payload in the owning archive's buffer.
    data_range: Range<usize>,
}

/// Fields read from a central directory record, before the local header
/// has been resolved.
#[derive(Debug)]
pub(crate) struct EntryFields {
    pub name: String,
    pub version_created: u16,
    pub version_needed: u16,
    pub bitflag: u16,
    pub compression_method: u16,
    pub last_modified: DosDateTime,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub disk_number: u16,
    pub internal_attributes: u16,
    pub external_attributes: u32,
    pub extra_field: Vec<u8>,
    pub comment: String,
}

impl EntryFields {
    /// Attach the payload location found through the local header.
    pub(crate) fn with_data_range(self, data_range: Range<usize>) -> Entry {
        debug_assert_eq!(data_range.len(), self.compressed_size as usize);
        Entry {
            name: self.name,
            version_created: self.version_created,
            version_needed: self.version_needed,
            bitflag: self.bitflag,
            compression_method: self.compression_method,
            last_modified: self.last_modified,
            crc32: self.crc32,
            compressed_size: self.compressed_size,
            uncompressed_size: self.uncompressed_size,
            disk_number: self.disk_number,
            internal_attributes: self.internal_attributes,
            external_attributes: self.external_attributes,
            extra_field: self.extra_field,
            comment: self.comment,
            data_range,
        }
    }
}

impl Entry {
    /// Get the file name/path.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version of the software that created the entry ("version made by").
    #[inline]
    pub fn version_created(&self) -> u16 {
        self.version_created
    }

    /// Minimum version needed to extract.
    #[inline]
    pub fn version_needed(&self) -> u16 {
        self.version_needed
    }

    /// Get the general purpose bit flag.
    #[inline]
    pub fn bitflag(&self) -> u16 {
        self.bitflag
    }

    /// Get the raw compression method code.
    #[inline]
    pub fn compression_method(&self) -> u16 {
        self.compression_method
    }

    /// Get the compression method, or the unrecognized code.
    #[inline]
    pub fn method(&self) -> Result<CompressionMethod, u16> {
        CompressionMethod::try_from(self.compression_method)
    }

    /// Get the last modification time.
    #[inline]
    pub fn last_modified(&self) -> DosDateTime {
        self.last_modified
    }

    /// Get the CRC32 checksum.
    #[inline]
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Get the compressed size in bytes.
    #[inline]
    pub fn compressed_size(&self) -> u32 {
        self.compressed_size
    }

    /// Get the uncompressed size in bytes.
    #[inline]
    pub fn uncompressed_size(&self) -> u32 {
        self.uncompressed_size
    }

    /// Disk number where the entry starts.
    #[inline]
    pub fn disk_number(&self) -> u16 {
        self.disk_number
    }

    #[inline]
    pub fn internal_attributes(&self) -> u16 {
        self.internal_attributes
    }

    #[inline]
    pub fn external_attributes(&self) -> u32 {
        self.external_attributes
    }

    #[inline]
    pub fn extra_field(&self) -> &[u8] {
        &self.extra_field
    }

    /// Get the entry comment.
    #[inline]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Check if the entry is encrypted.
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.bitflag & flags::ENCRYPTED != 0
    }

    /// Check if name and comment were stored as UTF-8.
    #[inline]
    pub fn is_utf8(&self) -> bool {
        self.bitflag & flags::UTF8 != 0
    }

    /// Check if this entry represents a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/') || self.name.ends_with('\\')
    }

    /// Byte range of the compressed payload in the archive buffer.
    #[inline]
    pub(crate) fn data_range(&self) -> Range<usize> {
        self.data_range.clone()
    }
}
