// tests/common/mod.rs
#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const SOC: u16 = 0xFF4F;
pub const SIZ: u16 = 0xFF51;
pub const COD: u16 = 0xFF52;
pub const TLM: u16 = 0xFF55;
pub const QCD: u16 = 0xFF5C;
pub const COM: u16 = 0xFF64;
pub const SOT: u16 = 0xFF90;

/// Assembles synthetic codestreams: main header segments followed by tile-parts
pub struct CodestreamBuilder {
    header: Vec<u8>,
    tile_parts: Vec<Vec<u8>>,
}

impl CodestreamBuilder {
    /// Starts with an SOC marker
    pub fn new() -> Self {
        CodestreamBuilder {
            header: SOC.to_be_bytes().to_vec(),
            tile_parts: Vec::new(),
        }
    }

    /// Empty builder, no SOC
    pub fn bare() -> Self {
        CodestreamBuilder {
            header: Vec::new(),
            tile_parts: Vec::new(),
        }
    }

    pub fn marker(mut self, code: u16) -> Self {
        self.header.extend_from_slice(&code.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.header.extend_from_slice(bytes);
        self
    }

    pub fn segment(mut self, code: u16, payload: &[u8]) -> Self {
        self.header.extend_from_slice(&code.to_be_bytes());
        self.header.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
        self.header.extend_from_slice(payload);
        self
    }

    /// TLM with no tile index and 2-byte lengths
    pub fn tlm(self, lengths: &[u16]) -> Self {
        let records: Vec<(u32, u32)> = lengths.iter().map(|&l| (0, u32::from(l))).collect();
        self.tlm_with(0x00, &records)
    }

    /// TLM with the given Stlm byte; records are `(tile index, length)`
    pub fn tlm_with(self, stlm: u8, records: &[(u32, u32)]) -> Self {
        let index_width = (stlm >> 4) & 0b11;
        let wide_length = (stlm >> 6) & 1 == 1;

        let mut payload = vec![0x00, stlm];
        for &(index, length) in records {
            match index_width {
                1 => payload.push(index as u8),
                2 => payload.extend_from_slice(&(index as u16).to_be_bytes()),
                _ => {}
            }
            if wide_length {
                payload.extend_from_slice(&length.to_be_bytes());
            } else {
                payload.extend_from_slice(&(length as u16).to_be_bytes());
            }
        }
        self.segment(TLM, &payload)
    }

    /// Append a COM segment so the main header is exactly `total` bytes long
    pub fn pad_header_to(self, total: usize) -> Self {
        let current = self.header.len();
        assert!(total >= current + 4, "header already {} bytes", current);
        let payload = vec![0u8; total - current - 4];
        self.segment(COM, &payload)
    }

    /// Tile-part of `length` bytes starting with an SOT marker code
    pub fn tile_part(mut self, length: usize) -> Self {
        let mut data = vec![0u8; length];
        if length >= 2 {
            data[..2].copy_from_slice(&SOT.to_be_bytes());
        }
        self.tile_parts.push(data);
        self
    }

    pub fn header_len(&self) -> usize {
        self.header.len()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header.clone();
        for tp in &self.tile_parts {
            out.extend_from_slice(tp);
        }
        out
    }
}

/// Standard three-tile-part layout: header padded to `header_len`, lengths from the TLM
pub fn three_tile_parts(header_len: usize, lengths: [u16; 3]) -> Vec<u8> {
    let mut builder = CodestreamBuilder::new()
        .segment(SIZ, &[0u8; 38])
        .tlm(&lengths)
        .pad_header_to(header_len);
    for l in lengths {
        builder = builder.tile_part(l as usize);
    }
    builder.build()
}

pub fn poke_ff_pair(bytes: &mut [u8], offset: usize) {
    bytes[offset] = 0xFF;
    bytes[offset + 1] = 0xFF;
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
