// src/reader/header_scanner.rs
use crate::error::{CodestreamError, Result};
use crate::segment::{MainHeader, Segment, TilePartLengthTable};
use crate::source::ByteSource;
use crate::types::Marker;
use byteorder::{BigEndian, ByteOrder};
use tracing::{debug, info};

/// Walks the main header from offset 0 up to the first SOT marker
pub struct HeaderScanner<S: ByteSource> {
    source: S,
    expected_tile_parts: usize,
    strict_entry_count: bool,
}

impl<S: ByteSource> HeaderScanner<S> {
    pub fn new(source: S, expected_tile_parts: usize) -> Self {
        HeaderScanner {
            source,
            expected_tile_parts,
            strict_entry_count: false,
        }
    }

    /// Reject TLM segments carrying more records than expected
    pub fn strict_entry_count(mut self, strict: bool) -> Self {
        self.strict_entry_count = strict;
        self
    }

    pub fn scan(mut self) -> Result<MainHeader> {
        let file_size = self.source.len()?;
        let mut position = 0u64;
        let mut segments = Vec::new();
        let mut table: Option<(u64, TilePartLengthTable)> = None;
        let mut main_header_len = None;

        while position < file_size {
            if file_size - position < 2 {
                return Err(CodestreamError::TruncatedInput {
                    offset: position,
                    context: "marker code",
                });
            }

            let code = self.read_u16(position)?;
            let marker = Marker::from_u16(code).ok_or(CodestreamError::UnknownMarker {
                code,
                offset: position,
            })?;

            if marker == Marker::Sot {
                main_header_len = Some(position);
                break;
            }

            if !marker.has_length_field() {
                debug!(marker = marker.mnemonic(), offset = position, "length-less marker");
                segments.push(Segment {
                    marker,
                    offset: position,
                    length: None,
                });
                position += 2;
                continue;
            }

            if file_size - position < 4 {
                return Err(CodestreamError::TruncatedInput {
                    offset: position + 2,
                    context: "segment length field",
                });
            }

            let length = self.read_u16(position + 2)?;
            if length < 2 {
                return Err(CodestreamError::InvalidSegmentLength {
                    marker,
                    offset: position,
                    length,
                });
            }

            let segment = Segment {
                marker,
                offset: position,
                length: Some(length),
            };
            let payload_start = position + 4;
            if marker == Marker::Tlm {
                info!("Found TLM marker segment at position 0x{:x}", position);

                // a second TLM is reported as such even when it is also cut short
                if table.is_some() {
                    return Err(CodestreamError::DuplicateSegment {
                        marker,
                        offset: position,
                    });
                }
            }

            if segment.end() > file_size {
                return Err(CodestreamError::TruncatedInput {
                    offset: payload_start,
                    context: "segment payload",
                });
            }
            debug!(marker = marker.mnemonic(), offset = position, length, "segment");

            if marker == Marker::Tlm {
                let mut payload = vec![0u8; segment.payload_len() as usize];
                self.source.read_at(payload_start, &mut payload)?;
                let decoded = TilePartLengthTable::parse(&payload, position, self.expected_tile_parts)?;
                table = Some((position, decoded));
            }

            segments.push(segment);
            position = segment.end();
        }

        let (tlm_offset, tile_part_lengths) = match table {
            Some((offset, decoded)) if self.is_complete(&decoded) => (offset, decoded),
            Some((_, decoded)) => {
                return Err(CodestreamError::IncompleteLengthTable {
                    expected: self.expected_tile_parts,
                    found: decoded.record_count,
                })
            }
            None => {
                return Err(CodestreamError::IncompleteLengthTable {
                    expected: self.expected_tile_parts,
                    found: 0,
                })
            }
        };

        let length = match main_header_len {
            Some(length) if length > 0 => length,
            other => {
                return Err(CodestreamError::InvalidMainHeaderLength {
                    length: other.unwrap_or(0),
                })
            }
        };

        Ok(MainHeader {
            length,
            tlm_offset,
            tile_part_lengths,
            segments,
        })
    }

    fn is_complete(&self, table: &TilePartLengthTable) -> bool {
        if self.strict_entry_count {
            table.record_count == self.expected_tile_parts
        } else {
            table.len() == self.expected_tile_parts
        }
    }

    fn read_u16(&mut self, offset: u64) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.source.read_at(offset, &mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }
}
