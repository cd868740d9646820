// src/segment/tlm.rs
use crate::error::{CodestreamError, Result};
use crate::types::Marker;
use byteorder::{BigEndian, ReadBytesExt};
use smallvec::SmallVec;
use std::io::Read;

/// Field widths selected by the TLM `Stlm` byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlmLayout {
    /// Width of the per-record tile index (`Ttlm`): 0, 1 or 2 bytes
    pub index_width: usize,
    /// Width of the per-record tile-part length (`Ptlm`): 2 or 4 bytes
    pub length_width: usize,
}

impl TlmLayout {
    /// Decode `Stlm`. Bits 4-5 are ST, bit 6 is SP.
    ///
    /// The reserved ST value 3 reads as "no index": records are bare lengths.
    pub fn from_stlm(stlm: u8) -> Self {
        let index_width = match (stlm & 0b0011_0000) >> 4 {
            1 => 1,
            2 => 2,
            _ => 0,
        };
        let length_width = if (stlm & 0b0100_0000) >> 6 == 0 { 2 } else { 4 };
        TlmLayout {
            index_width,
            length_width,
        }
    }

    pub fn record_size(&self) -> usize {
        self.index_width + self.length_width
    }

    fn read_record<R: Read>(&self, reader: &mut R) -> std::io::Result<u32> {
        match self.index_width {
            1 => {
                reader.read_u8()?;
            }
            2 => {
                reader.read_u16::<BigEndian>()?;
            }
            _ => {}
        }
        if self.length_width == 2 {
            Ok(u32::from(reader.read_u16::<BigEndian>()?))
        } else {
            reader.read_u32::<BigEndian>()
        }
    }
}

/// Decoded tile-part lengths from the TLM segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePartLengthTable {
    /// `Ztlm`, carried but not interpreted
    pub index: u8,
    pub layout: TlmLayout,
    /// Records present in the payload
    pub record_count: usize,
    lengths: SmallVec<[u32; 3]>,
}

impl TilePartLengthTable {
    /// Bytes before the first record: `Ztlm` and `Stlm`
    pub const PREAMBLE_SIZE: usize = 2;

    /// Decode a TLM payload (the bytes following the length field).
    ///
    /// Only the first `limit` records are decoded; `segment_offset` is the
    /// offset of the TLM marker and is used for error reporting. A record
    /// area that is not a whole number of records is `InvalidSegmentLength`.
    pub fn parse(payload: &[u8], segment_offset: u64, limit: usize) -> Result<Self> {
        if payload.len() < Self::PREAMBLE_SIZE {
            return Err(CodestreamError::InvalidSegmentLength {
                marker: Marker::Tlm,
                offset: segment_offset,
                length: (payload.len() + 2) as u16,
            });
        }

        let index = payload[0];
        let stlm = payload[1];
        let layout = TlmLayout::from_stlm(stlm);

        let records = &payload[Self::PREAMBLE_SIZE..];
        if records.len() % layout.record_size() != 0 {
            return Err(CodestreamError::InvalidSegmentLength {
                marker: Marker::Tlm,
                offset: segment_offset,
                length: (payload.len() + 2) as u16,
            });
        }
        let record_count = records.len() / layout.record_size();

        let mut reader = records;
        let mut lengths = SmallVec::new();
        for _ in 0..record_count.min(limit) {
            lengths.push(layout.read_record(&mut reader)?);
        }

        Ok(TilePartLengthTable {
            index,
            layout,
            record_count,
            lengths,
        })
    }

    pub fn lengths(&self) -> &[u32] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
