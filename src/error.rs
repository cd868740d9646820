// src/error.rs
use crate::types::Marker;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodestreamError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Truncated input at offset {offset}: expected {context}")]
    TruncatedInput { offset: u64, context: &'static str },

    #[error("Unknown marker 0x{code:04X} at offset {offset}")]
    UnknownMarker { code: u16, offset: u64 },

    #[error("Duplicate {marker} segment at offset {offset}")]
    DuplicateSegment { marker: Marker, offset: u64 },

    #[error("Missing or incomplete TLM marker segment: expected {expected} tile-part lengths, found {found}")]
    IncompleteLengthTable { expected: usize, found: usize },

    #[error("Invalid main header length: {length}")]
    InvalidMainHeaderLength { length: u64 },

    #[error("0xFFFF detected at offset {offset} (tile-part {tile_part})")]
    ForbiddenPatternFound { offset: u64, tile_part: usize },

    #[error("Invalid {marker} segment length {length} at offset {offset}")]
    InvalidSegmentLength { marker: Marker, offset: u64, length: u16 },
}

impl CodestreamError {
    /// Byte offset of the offending data, when the error points at one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            CodestreamError::TruncatedInput { offset, .. }
            | CodestreamError::UnknownMarker { offset, .. }
            | CodestreamError::DuplicateSegment { offset, .. }
            | CodestreamError::ForbiddenPatternFound { offset, .. }
            | CodestreamError::InvalidSegmentLength { offset, .. } => Some(*offset),
            CodestreamError::Io(_)
            | CodestreamError::IncompleteLengthTable { .. }
            | CodestreamError::InvalidMainHeaderLength { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodestreamError>;
