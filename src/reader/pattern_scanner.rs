// src/reader/pattern_scanner.rs
use crate::error::{CodestreamError, Result};
use crate::reader::trigger::TriggerPositions;
use crate::segment::TilePartRegion;
use crate::source::ByteSource;
use tracing::debug;

/// Byte value that starts every marker code
pub const MARKER_PREFIX: u8 = 0xFF;

/// Check one tile-part for a `0xFF 0xFF` pair at any trigger position.
///
/// Stops at the first match. The byte at the second offset is only read when
/// the first one is `0xFF`, so the source running out there is
/// `TruncatedInput` only in that case.
pub fn check_tile_part<S: ByteSource>(
    source: &mut S,
    main_header_len: u64,
    region: &TilePartRegion,
) -> Result<()> {
    let file_size = source.len()?;
    let triggers = TriggerPositions::new(main_header_len, region.offset, region.length);
    let trigger_count = triggers.len();

    for pair in triggers {
        if pair.first >= file_size {
            return Err(CodestreamError::TruncatedInput {
                offset: pair.first,
                context: "tile-part data",
            });
        }
        if source.read_byte_at(pair.first)? != MARKER_PREFIX {
            continue;
        }
        if pair.second >= file_size {
            return Err(CodestreamError::TruncatedInput {
                offset: pair.second,
                context: "tile-part data",
            });
        }
        if source.read_byte_at(pair.second)? == MARKER_PREFIX {
            return Err(CodestreamError::ForbiddenPatternFound {
                offset: pair.first,
                tile_part: region.index,
            });
        }
    }

    debug!(
        tile_part = region.index,
        offset = region.offset,
        length = region.length,
        triggers = trigger_count,
        "tile-part clean"
    );
    Ok(())
}
