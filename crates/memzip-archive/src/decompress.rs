//! Decompression dispatch for archive entries.

use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::entry::Entry;
use crate::zip::CompressionMethod;
use crate::{Error, Result};

/// Upper bound on how much DEFLATE can expand its input.
const MAX_DEFLATE_RATIO: usize = 1032;

/// Produce the decompressed content of `entry` from its raw payload.
///
/// The encryption bit is checked before the method, so encrypted entries
/// fail the same way whatever they claim to be compressed with. The result
/// is always a fresh buffer, independent of the archive's.
pub fn resolve(entry: &Entry, payload: &[u8]) -> Result<Vec<u8>> {
    if entry.is_encrypted() {
        return Err(Error::Encrypted(entry.name().to_string()));
    }

    match entry.method() {
        Ok(CompressionMethod::Store) => Ok(payload.to_vec()),
        Ok(CompressionMethod::Deflate) => {
            decompress_deflate_sized(payload, entry.uncompressed_size() as usize)
        }
        Err(method) => Err(Error::UnsupportedCompression {
            name: entry.name().to_string(),
            method,
        }),
    }
}

/// Decompress raw DEFLATE data (no zlib or gzip framing).
pub fn decompress_deflate(data: &[u8], output: &mut Vec<u8>) -> Result<()> {
    let mut decoder = DeflateDecoder::new(data);

    output.clear();
    decoder
        .read_to_end(output)
        .map_err(|e| Error::Decompression(e.to_string()))?;

    Ok(())
}

/// Decompress raw DEFLATE data with known output size.
///
/// `expected_size` comes from the central directory and is only a hint; the
/// preallocation never exceeds what `data` could inflate to.
pub fn decompress_deflate_sized(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let capacity = expected_size.min(data.len().saturating_mul(MAX_DEFLATE_RATIO));
    let mut output = Vec::with_capacity(capacity);
    decompress_deflate(data, &mut output)?;
    Ok(output)
}
