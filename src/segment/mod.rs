// src/segment/mod.rs
mod header;
mod tlm;

pub use header::MainHeader;
pub use tlm::{TilePartLengthTable, TlmLayout};

use crate::types::Marker;

/// One marker occurrence walked in the main header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub marker: Marker,
    /// Offset of the first byte of the marker code
    pub offset: u64,
    /// Value of the length field (includes its own 2 bytes), `None` for length-less markers
    pub length: Option<u16>,
}

impl Segment {
    /// Size of the payload following the length field
    pub fn payload_len(&self) -> u64 {
        self.length.map_or(0, |l| u64::from(l).saturating_sub(2))
    }

    /// Offset one past the last byte of the segment
    pub fn end(&self) -> u64 {
        let length_field = if self.length.is_some() { 2 } else { 0 };
        self.offset + 2 + length_field + self.payload_len()
    }
}

/// A tile-part's byte range in the real file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePartRegion {
    pub index: usize,
    pub offset: u64,
    pub length: u64,
}

impl TilePartRegion {
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}
