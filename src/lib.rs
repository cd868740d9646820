// src/lib.rs
//! # j2c-check
//!
//! A compliance checker for tiled JPEG 2000 codestreams carrying a TLM
//! (tile-part lengths) segment.
//!
//! ## What is checked
//!
//! - The main header is walked marker by marker up to the first SOT marker.
//!   Every marker must be one of the recognized codes, and exactly one TLM
//!   segment must be present, yielding the expected number of tile-part
//!   lengths (3 by default).
//! - Each tile-part is then checked as if it immediately followed the main
//!   header. Every 256 bytes of that virtual layout, starting at position 254,
//!   the byte pair is inspected; `0xFF 0xFF` there is a violation, since a
//!   consumer that resynchronizes on 256-byte blocks would see a marker.
//!
//! Pixel data is never decoded and nothing is repaired: the first violation
//! ends the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use j2c_check::*;
//!
//! fn main() -> Result<()> {
//!     let report = validate_file("image.j2c")?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ### Custom options
//!
//! ```rust,no_run
//! use j2c_check::*;
//!
//! fn main() -> Result<()> {
//!     let options = ValidationOptions::new()
//!         .with_tile_part_count(2)
//!         .with_parallel(true);
//!
//!     match Validator::new(options).validate_file("image.j2c") {
//!         Ok(report) => println!("Main header length: {}", report.main_header_len()),
//!         Err(CodestreamError::ForbiddenPatternFound { offset, .. }) => {
//!             eprintln!("0xFFFF at offset {}", offset)
//!         }
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod segment;
pub mod source;
pub mod reader;
pub mod validator;

pub use error::{CodestreamError, Result};

pub use types::Marker;

pub use segment::{
    MainHeader,
    Segment,
    TilePartLengthTable,
    TilePartRegion,
    TlmLayout,
};

pub use source::{ByteSource, MemorySource, SeekSource};

pub use reader::{
    check_tile_part,
    virtual_to_real,
    HeaderScanner,
    TriggerPair,
    TriggerPositions,
};

pub use validator::{
    ValidationOptions,
    ValidationReport,
    Validator,
    DEFAULT_TILE_PART_COUNT,
};

pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use j2c_check::prelude::*;
    //! ```

    pub use crate::error::{CodestreamError, Result};
    pub use crate::source::ByteSource;
    pub use crate::validator::{ValidationOptions, ValidationReport, Validator};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate a file with the default options
pub fn validate_file(path: impl AsRef<std::path::Path>) -> Result<ValidationReport> {
    Validator::default().validate_file(path)
}
