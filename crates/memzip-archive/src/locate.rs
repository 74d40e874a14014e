//! End of central directory location.

use std::ops::Range;

use memzip_common::BinaryReader;

use crate::zip::EocdRecord;
use crate::{Error, Result};

/// What the archive needs from the end of central directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Offset of the record's signature.
    pub offset: usize,
    /// Number of central directory records on this disk.
    pub entry_count: u16,
    /// Offset of the first central directory record.
    pub central_dir_offset: u32,
    /// Archive comment bytes.
    pub comment: Range<usize>,
}

/// Find the EOCD record by scanning backward from the last offset where a
/// comment-less record could start.
///
/// The first signature found wins; the comment length is not checked against
/// the bytes actually remaining. The search window covers the largest
/// possible comment.
pub fn locate(data: &[u8]) -> Result<EndOfCentralDirectory> {
    let last_candidate = data
        .len()
        .checked_sub(EocdRecord::SIZE)
        .ok_or(Error::EocdNotFound)?;
    let search_start = last_candidate.saturating_sub(EocdRecord::MAX_COMMENT_LENGTH);
    let search_end = last_candidate + EocdRecord::MAGIC.len();

    // Use memchr for fast byte searching - it uses SIMD internally
    let offset = memchr::memmem::rfind(&data[search_start..search_end], &EocdRecord::MAGIC)
        .map(|pos| search_start + pos)
        .ok_or(Error::EocdNotFound)?;

    let mut reader = BinaryReader::new_at(data, offset + EocdRecord::MAGIC.len());
    let record: EocdRecord = reader.read_struct()?;

    let comment_start = reader.position();
    reader.read_bytes(record.comment_length.get() as usize)?;

    Ok(EndOfCentralDirectory {
        offset,
        entry_count: record.central_dir_count_disk.get(),
        central_dir_offset: record.central_dir_offset.get(),
        comment: comment_start..reader.position(),
    })
}
