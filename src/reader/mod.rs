// src/reader/mod.rs
mod header_scanner;
mod pattern_scanner;
mod trigger;

pub use header_scanner::HeaderScanner;
pub use pattern_scanner::{check_tile_part, MARKER_PREFIX};
pub use trigger::{virtual_to_real, TriggerPair, TriggerPositions, TRIGGER_PERIOD, TRIGGER_PHASE};
