// src/segment/header.rs
use crate::segment::{Segment, TilePartLengthTable, TilePartRegion};

/// Result of walking the main header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainHeader {
    /// Offset of the first SOT marker, i.e. the byte length of the main header
    pub length: u64,
    /// Offset of the TLM marker code
    pub tlm_offset: u64,
    pub tile_part_lengths: TilePartLengthTable,
    /// Every segment walked before the first SOT, in file order
    pub segments: Vec<Segment>,
}

impl MainHeader {
    /// Tile-parts laid out back to back starting right after the main header
    pub fn tile_part_regions(&self) -> Vec<TilePartRegion> {
        let mut offset = self.length;
        self.tile_part_lengths
            .lengths()
            .iter()
            .enumerate()
            .map(|(index, &length)| {
                let region = TilePartRegion {
                    index,
                    offset,
                    length: u64::from(length),
                };
                offset += u64::from(length);
                region
            })
            .collect()
    }
}
