// src/reader/trigger.rs
//! Trigger positions for the forbidden-pattern check.
//!
//! Each tile-part is checked as if it directly followed the main header: the
//! bytes `[0, main_header_len)` and `[tile_offset, tile_offset + tile_length)`
//! form one virtual address space. Every virtual position `v` with
//! `v % 256 == 254` is a trigger; the pair `(v, v + 1)` is mapped back to real
//! file offsets independently, so a pair may straddle the header/tile-part
//! boundary.

/// Spacing between trigger positions in the virtual address space
pub const TRIGGER_PERIOD: u64 = 256;

/// First trigger position; all others are `TRIGGER_PHASE + k * TRIGGER_PERIOD`
pub const TRIGGER_PHASE: u64 = 254;

/// Map a virtual position to its real file offset
#[inline]
pub fn virtual_to_real(main_header_len: u64, tile_offset: u64, position: u64) -> u64 {
    if position < main_header_len {
        position
    } else {
        position - main_header_len + tile_offset
    }
}

/// One trigger: the virtual position and the real offsets of the byte pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerPair {
    pub position: u64,
    pub first: u64,
    pub second: u64,
}

/// Lazy, restartable sequence of trigger pairs for one tile-part
///
/// ```
/// use j2c_check::reader::TriggerPositions;
///
/// // 100-byte main header, 500-byte tile-part stored right after it
/// let pairs: Vec<_> = TriggerPositions::new(100, 100, 500).collect();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!((pairs[0].first, pairs[0].second), (254, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPositions {
    main_header_len: u64,
    tile_offset: u64,
    virtual_len: u64,
    next: u64,
}

impl TriggerPositions {
    pub fn new(main_header_len: u64, tile_offset: u64, tile_length: u64) -> Self {
        TriggerPositions {
            main_header_len,
            tile_offset,
            virtual_len: main_header_len.saturating_add(tile_length),
            next: TRIGGER_PHASE,
        }
    }

    /// Length of the virtual (header + tile-part) address space
    pub fn virtual_len(&self) -> u64 {
        self.virtual_len
    }

    pub fn to_real(&self, position: u64) -> u64 {
        virtual_to_real(self.main_header_len, self.tile_offset, position)
    }

    fn remaining(&self) -> u64 {
        if self.next >= self.virtual_len {
            0
        } else {
            (self.virtual_len - self.next).div_ceil(TRIGGER_PERIOD)
        }
    }
}

impl Iterator for TriggerPositions {
    type Item = TriggerPair;

    fn next(&mut self) -> Option<TriggerPair> {
        if self.next >= self.virtual_len {
            return None;
        }

        let position = self.next;
        self.next = self.next.saturating_add(TRIGGER_PERIOD);

        Some(TriggerPair {
            position,
            first: self.to_real(position),
            second: self.to_real(position + 1),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TriggerPositions {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trigger_inside_header() {
        let pairs: Vec<TriggerPair> = TriggerPositions::new(300, 300, 10).collect();
        assert_eq!(
            pairs,
            vec![TriggerPair { position: 254, first: 254, second: 255 }]
        );
    }

    #[test]
    fn test_trigger_inside_tile_part() {
        let pairs: Vec<TriggerPair> = TriggerPositions::new(100, 1000, 500).collect();
        let positions: Vec<u64> = pairs.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![254, 510]);
        assert_eq!((pairs[0].first, pairs[0].second), (1154, 1155));
        assert_eq!((pairs[1].first, pairs[1].second), (1410, 1411));
    }

    #[test]
    fn test_pair_straddles_header_boundary() {
        // v = 254 is the last header byte, v + 1 is the first tile-part byte
        let pairs: Vec<TriggerPair> = TriggerPositions::new(255, 4000, 10).collect();
        assert_eq!(
            pairs,
            vec![TriggerPair { position: 254, first: 254, second: 4000 }]
        );
    }

    #[test]
    fn test_short_virtual_space_has_no_triggers() {
        assert_eq!(TriggerPositions::new(100, 100, 154).count(), 0);
        assert_eq!(TriggerPositions::new(100, 100, 155).count(), 1);
        assert_eq!(TriggerPositions::new(0, 0, 0).count(), 0);
    }

    #[test]
    fn test_restartable_and_exact_size() {
        let triggers = TriggerPositions::new(1000, 1000, 10_000);
        assert_eq!(triggers.len(), 42);
        let first: Vec<_> = triggers.clone().collect();
        let second: Vec<_> = triggers.collect();
        assert_eq!(first, second);
    }
}
