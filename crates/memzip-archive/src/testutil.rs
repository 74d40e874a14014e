//! In-memory archive assembly for tests.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::zip::{CentralDirectoryHeader, EocdRecord, LocalFileHeader};

/// Compress with raw DEFLATE.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data);
    crc.sum()
}

/// One member as it will be written.
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub name: Vec<u8>,
    pub payload: Vec<u8>,
    pub method: u16,
    pub bitflag: u16,
    pub crc32: u32,
    pub uncompressed_size: u32,
    pub dos_datetime: u32,
    pub extra: Vec<u8>,
    /// Name written to the local header instead of `name`.
    pub local_name: Option<Vec<u8>>,
    /// Extra field written to the local header only.
    pub local_extra: Vec<u8>,
    pub comment: Vec<u8>,
}

impl TestEntry {
    pub fn stored(name: &str, content: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            payload: content.to_vec(),
            method: 0,
            bitflag: 0,
            crc32: crc32(content),
            uncompressed_size: content.len() as u32,
            dos_datetime: 0,
            extra: Vec::new(),
            local_name: None,
            local_extra: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn deflated(name: &str, content: &[u8]) -> Self {
        Self {
            payload: deflate(content),
            method: 8,
            ..Self::stored(name, content)
        }
    }
}

/// Accumulates entries and lays out a complete single-disk archive.
#[derive(Debug, Default)]
pub struct ZipBuilder {
    entries: Vec<TestEntry>,
    comment: Vec<u8>,
    /// Bytes written before the first local header.
    prefix: Vec<u8>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: TestEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn prefix(mut self, prefix: &[u8]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = self.prefix.clone();
        let mut offsets = Vec::with_capacity(self.entries.len());

        for e in &self.entries {
            offsets.push(out.len() as u32);
            let local_name = e.local_name.as_deref().unwrap_or(&e.name);
            out.extend_from_slice(&LocalFileHeader::MAGIC);
            put16(&mut out, 20);
            put16(&mut out, e.bitflag);
            put16(&mut out, e.method);
            put32(&mut out, e.dos_datetime);
            put32(&mut out, e.crc32);
            put32(&mut out, e.payload.len() as u32);
            put32(&mut out, e.uncompressed_size);
            put16(&mut out, local_name.len() as u16);
            put16(&mut out, e.local_extra.len() as u16);
            out.extend_from_slice(local_name);
            out.extend_from_slice(&e.local_extra);
            out.extend_from_slice(&e.payload);
        }

        let cd_offset = out.len() as u32;
        for (e, offset) in self.entries.iter().zip(&offsets) {
            out.extend_from_slice(&CentralDirectoryHeader::MAGIC);
            put16(&mut out, 0x031E);
            put16(&mut out, 20);
            put16(&mut out, e.bitflag);
            put16(&mut out, e.method);
            put32(&mut out, e.dos_datetime);
            put32(&mut out, e.crc32);
            put32(&mut out, e.payload.len() as u32);
            put32(&mut out, e.uncompressed_size);
            put16(&mut out, e.name.len() as u16);
            put16(&mut out, e.extra.len() as u16);
            put16(&mut out, e.comment.len() as u16);
            put16(&mut out, 0);
            put16(&mut out, 1);
            put32(&mut out, 0o100644 << 16);
            put32(&mut out, *offset);
            out.extend_from_slice(&e.name);
            out.extend_from_slice(&e.extra);
            out.extend_from_slice(&e.comment);
        }
        let cd_size = out.len() as u32 - cd_offset;

        out.extend_from_slice(&EocdRecord::MAGIC);
        put16(&mut out, 0);
        put16(&mut out, 0);
        put16(&mut out, self.entries.len() as u16);
        put16(&mut out, self.entries.len() as u16);
        put32(&mut out, cd_size);
        put32(&mut out, cd_offset);
        put16(&mut out, self.comment.len() as u16);
        out.extend_from_slice(&self.comment);
        out
    }
}

fn put16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}
