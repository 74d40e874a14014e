//! Common utilities for memzip.
//!
//! This crate provides the foundational pieces shared by the memzip crates:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`Error`] - Errors raised while reading past the end of a buffer

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
