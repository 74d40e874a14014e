//! In-memory ZIP archive reader.
//!
//! Construction locates the end of central directory record, walks the
//! central directory once and resolves every local header, so the entry
//! table is complete and immutable before [`Archive::open`] returns.
//! Lookups afterwards are pure reads; decompression is redone per call.

use std::fmt;
use std::fs::File;
use std::ops::Range;
use std::path::Path;

use memmap2::Mmap;
use memzip_common::BinaryReader;

use crate::datetime::DosDateTime;
use crate::decompress;
use crate::entry::{Entry, EntryFields};
use crate::error::Record;
use crate::locate::{self, EndOfCentralDirectory};
use crate::text;
use crate::zip::{flags, CentralDirectoryHeader, LocalFileHeader};
use crate::{Error, Result};

/// Selects an entry by position or by name.
///
/// Name lookup is exact and returns the first entry in central directory
/// order, so duplicate names resolve to the earliest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for EntryKey<'_> {
    fn from(index: usize) -> Self {
        EntryKey::Index(index)
    }
}

impl<'a> From<&'a str> for EntryKey<'a> {
    fn from(name: &'a str) -> Self {
        EntryKey::Name(name)
    }
}

impl<'a> From<&'a String> for EntryKey<'a> {
    fn from(name: &'a String) -> Self {
        EntryKey::Name(name)
    }
}

impl fmt::Display for EntryKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Index(index) => write!(f, "#{index}"),
            EntryKey::Name(name) => f.write_str(name),
        }
    }
}

/// A read-only ZIP archive over a byte buffer.
///
/// The buffer is never copied or modified; entry payloads are ranges into
/// it. Any `AsRef<[u8]>` works: `Vec<u8>`, `&[u8]`, `Arc<[u8]>` or a
/// memory map from [`Archive::open_file`].
pub struct Archive<B = Vec<u8>> {
    data: B,
    entries: Vec<Entry>,
    comment: Range<usize>,
}

impl Archive<Mmap> {
    /// Memory-map a file and open it as an archive.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the map is only read; callers must not truncate the file
        // while the archive is alive.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::open(mmap)
    }
}

impl<B: AsRef<[u8]>> Archive<B> {
    /// Parse the archive held in `data`.
    ///
    /// Fails with a format error (see [`Error::is_format`]) if any of the
    /// end of central directory, central directory or local header
    /// signatures is missing or a record is truncated. No partial archive
    /// is ever returned.
    pub fn open(data: B) -> Result<Self> {
        let bytes = data.as_ref();

        let eocd = locate::locate(bytes)?;
        log::debug!(
            "[ZIP] End of central directory at offset {} ({} entries, central directory at {}, comment {} bytes)",
            eocd.offset,
            eocd.entry_count,
            eocd.central_dir_offset,
            eocd.comment.len()
        );

        let entries = parse_central_directory(bytes, &eocd)?;
        log::debug!("[ZIP] Parsed {} central directory entries", entries.len());

        Ok(Self {
            data,
            entries,
            comment: eocd.comment,
        })
    }

    /// Get the underlying buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Give the buffer back.
    pub fn into_inner(self) -> B {
        self.data
    }

    /// Decode the archive comment.
    ///
    /// The archive has no bit flag of its own, so the caller picks the
    /// encoding: `legacy` selects code page 437, otherwise UTF-8.
    pub fn comment(&self, legacy: bool) -> String {
        text::decode(self.raw_comment(), legacy)
    }

    /// Get the undecoded archive comment.
    #[inline]
    pub fn raw_comment(&self) -> &[u8] {
        &self.as_bytes()[self.comment.clone()]
    }

    /// Get the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in central directory order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry names in central directory order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(Entry::name)
    }

    /// Get entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Find the first entry with exactly this name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Get an entry's metadata, failing if no entry matches.
    pub fn metadata<'k>(&self, key: impl Into<EntryKey<'k>>) -> Result<&Entry> {
        let key = key.into();
        let entry = match key {
            EntryKey::Index(index) => self.get(index),
            EntryKey::Name(name) => self.find(name),
        };
        entry.ok_or_else(|| Error::EntryNotFound(key.to_string()))
    }

    /// Get the compressed payload exactly as stored.
    ///
    /// Works for encrypted entries and unknown methods too.
    pub fn raw_data<'k>(&self, key: impl Into<EntryKey<'k>>) -> Result<&[u8]> {
        let entry = self.metadata(key)?;
        Ok(self.payload(entry))
    }

    /// Read entry contents, decompressing if needed.
    pub fn read<'k>(&self, key: impl Into<EntryKey<'k>>) -> Result<Vec<u8>> {
        let entry = self.metadata(key)?;
        decompress::resolve(entry, self.payload(entry))
    }

    /// Read entry contents and decode them as UTF-8.
    pub fn read_text<'k>(&self, key: impl Into<EntryKey<'k>>) -> Result<String> {
        self.read(key).map(text::into_utf8)
    }

    /// Decompress an entry and check it against its recorded CRC-32.
    pub fn verify<'k>(&self, key: impl Into<EntryKey<'k>>) -> Result<()> {
        let entry = self.metadata(key)?;
        let data = decompress::resolve(entry, self.payload(entry))?;

        let mut crc = flate2::Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32() {
            return Err(Error::ChecksumMismatch {
                name: entry.name().to_string(),
                expected: entry.crc32(),
                actual: crc.sum(),
            });
        }
        Ok(())
    }

    /// Parallel extraction of multiple entries.
    ///
    /// Results are in the order of `keys`; each fails independently.
    #[cfg(feature = "parallel")]
    pub fn read_many<'k, K>(&self, keys: &[K]) -> Vec<Result<Vec<u8>>>
    where
        B: Sync,
        K: Into<EntryKey<'k>> + Copy + Sync,
    {
        use rayon::prelude::*;

        keys.par_iter().map(|&key| self.read(key)).collect()
    }

    #[inline]
    fn payload(&self, entry: &Entry) -> &[u8] {
        &self.as_bytes()[entry.data_range()]
    }
}

impl<B: AsRef<[u8]>> fmt::Debug for Archive<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("len", &self.as_bytes().len())
            .field("entries", &self.entries.len())
            .field("comment", &self.comment.len())
            .finish()
    }
}

/// Read `entry_count` records starting at the central directory offset.
fn parse_central_directory(data: &[u8], eocd: &EndOfCentralDirectory) -> Result<Vec<Entry>> {
    let mut reader = BinaryReader::new_at(data, eocd.central_dir_offset as usize);
    let mut entries = Vec::with_capacity(eocd.entry_count as usize);

    for _ in 0..eocd.entry_count {
        let (fields, local_header_offset) = read_cd_entry(&mut reader)?;
        let data_range = resolve_local_header(&mut reader, local_header_offset, &fields)?;

        log::trace!(
            "[ZIP] {} (method {}, {} -> {} bytes, payload at {})",
            fields.name,
            fields.compression_method,
            fields.compressed_size,
            fields.uncompressed_size,
            data_range.start
        );

        entries.push(fields.with_data_range(data_range));
    }

    Ok(entries)
}

/// Read one central directory record, leaving the reader on the next one.
fn read_cd_entry(reader: &mut BinaryReader<'_>) -> Result<(EntryFields, usize)> {
    let offset = reader.position();
    let sig = reader.read_u32()?;
    if sig != CentralDirectoryHeader::SIGNATURE {
        return Err(Error::InvalidSignature {
            record: Record::CentralDirectory,
            offset,
            expected: CentralDirectoryHeader::SIGNATURE,
            actual: sig,
        });
    }

    let header: CentralDirectoryHeader = reader.read_struct()?;
    let bitflag = header.flags.get();
    let legacy = bitflag & flags::UTF8 == 0;

    let name = text::decode(reader.read_bytes(header.file_name_length.get() as usize)?, legacy);
    let extra_field = reader
        .read_bytes(header.extra_field_length.get() as usize)?
        .to_vec();
    let comment = text::decode(
        reader.read_bytes(header.file_comment_length.get() as usize)?,
        legacy,
    );

    let fields = EntryFields {
        name,
        version_created: header.version_made_by.get(),
        version_needed: header.version_needed.get(),
        bitflag,
        compression_method: header.compression_method.get(),
        last_modified: DosDateTime::from_raw(header.last_modified.get()),
        crc32: header.crc32.get(),
        compressed_size: header.compressed_size.get(),
        uncompressed_size: header.uncompressed_size.get(),
        disk_number: header.disk_number_start.get(),
        internal_attributes: header.internal_attrs.get(),
        external_attributes: header.external_attrs.get(),
        extra_field,
        comment,
    };

    Ok((fields, header.local_header_offset.get() as usize))
}

/// Find the payload that follows the local header at `offset`.
///
/// The reader is moved to the local header and put back where it was, so
/// central directory parsing continues with the next record.
fn resolve_local_header(
    reader: &mut BinaryReader<'_>,
    offset: usize,
    fields: &EntryFields,
) -> Result<Range<usize>> {
    let saved = reader.position();
    reader.seek(offset);
    let range = read_local_header(reader, offset, fields);
    reader.seek(saved);
    range
}

/// Only the local name and extra lengths are read, to skip over them; the
/// payload length is the central directory's compressed size.
fn read_local_header(
    reader: &mut BinaryReader<'_>,
    offset: usize,
    fields: &EntryFields,
) -> Result<Range<usize>> {
    let sig = reader.read_u32()?;
    if sig != LocalFileHeader::SIGNATURE {
        return Err(Error::InvalidSignature {
            record: Record::LocalFileHeader,
            offset,
            expected: LocalFileHeader::SIGNATURE,
            actual: sig,
        });
    }

    let local_header: LocalFileHeader = reader.read_struct()?;
    reader.advance(local_header.variable_data_size());
    let start = reader.position();
    let len = fields.compressed_size as usize;

    match start.checked_add(len) {
        Some(end) if end <= reader.buffer_len() => Ok(start..end),
        _ => Err(Error::PayloadOutOfBounds {
            name: fields.name.clone(),
            start,
            len,
        }),
    }
}
