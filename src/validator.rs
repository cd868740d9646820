// src/validator.rs
use crate::error::{CodestreamError, Result};
use crate::reader::{check_tile_part, HeaderScanner};
use crate::segment::{MainHeader, TilePartRegion};
use crate::source::{ByteSource, MemorySource, SeekSource};
use std::fmt;
use std::path::Path;
use tracing::info;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Number of tile-parts per image in the supported profile
pub const DEFAULT_TILE_PART_COUNT: usize = 3;

/// Knobs for a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Exact number of tile-part lengths the TLM segment must yield
    pub expected_tile_part_count: usize,
    /// Also reject TLM segments carrying more records than expected
    pub strict_entry_count: bool,
    /// Scan tile-parts on worker threads over the source held in memory
    pub parallel: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            expected_tile_part_count: DEFAULT_TILE_PART_COUNT,
            strict_entry_count: false,
            parallel: false,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tile_part_count(mut self, count: usize) -> Self {
        self.expected_tile_part_count = count;
        self
    }

    pub fn with_strict_entry_count(mut self, strict: bool) -> Self {
        self.strict_entry_count = strict;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Summary of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub main_header: MainHeader,
    pub tile_parts: Vec<TilePartRegion>,
}

impl ValidationReport {
    pub fn main_header_len(&self) -> u64 {
        self.main_header.length
    }

    pub fn tile_part_lengths(&self) -> &[u32] {
        self.main_header.tile_part_lengths.lengths()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lengths: Vec<String> = self.tile_part_lengths().iter().map(|l| l.to_string()).collect();
        writeln!(f, "Found TLM marker segment at position 0x{:x}", self.main_header.tlm_offset)?;
        writeln!(f, "Tile-part lengths: {}", lengths.join(", "))?;
        writeln!(f, "Main header length: {}", self.main_header.length)?;
        write!(f, "No 0xFFFF pattern found in {} tile-parts", self.tile_parts.len())
    }
}

/// Runs the header scan followed by one pattern scan per tile-part
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Validator { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validate<S: ByteSource>(&self, source: &mut S) -> Result<ValidationReport> {
        let main_header = HeaderScanner::new(&mut *source, self.options.expected_tile_part_count)
            .strict_entry_count(self.options.strict_entry_count)
            .scan()?;

        info!(
            "Tile-part lengths: {}",
            main_header
                .tile_part_lengths
                .lengths()
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        info!("Main header length: {}", main_header.length);

        let tile_parts = main_header.tile_part_regions();

        if self.options.parallel {
            let memory = MemorySource::load(source)?;
            scan_parallel(&memory, main_header.length, &tile_parts)?;
        } else {
            for region in &tile_parts {
                check_tile_part(source, main_header.length, region)?;
            }
        }

        info!(tile_parts = tile_parts.len(), "codestream passed");
        Ok(ValidationReport {
            main_header,
            tile_parts,
        })
    }

    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationReport> {
        let mut source = SeekSource::open(path)?;
        self.validate(&mut source)
    }

    /// Validate through a read-only memory map of the file
    #[cfg(feature = "mmap")]
    pub fn validate_file_mmap(&self, path: impl AsRef<Path>) -> Result<ValidationReport> {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let mut source = MemorySource::new(bytes::Bytes::from_owner(mmap));
        self.validate(&mut source)
    }

    /// Run [`Validator::validate_file`] on the blocking thread pool
    #[cfg(feature = "async")]
    pub async fn validate_file_async(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ValidationReport> {
        let path = path.as_ref().to_path_buf();
        let validator = self.clone();
        tokio::task::spawn_blocking(move || validator.validate_file(path))
            .await
            .map_err(|e| CodestreamError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}

/// Scan every tile-part on its own thread.
///
/// All workers run to completion; the error reported is the one for the
/// lowest tile-part index, matching the sequential order.
fn scan_parallel(
    source: &MemorySource,
    main_header_len: u64,
    tile_parts: &[TilePartRegion],
) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded::<(usize, Result<()>)>();

    std::thread::scope(|scope| {
        for region in tile_parts.iter().copied() {
            let tx = tx.clone();
            let mut source = source.clone();
            scope.spawn(move || {
                let result = check_tile_part(&mut source, main_header_len, &region);
                tx.send((region.index, result)).ok();
            });
        }
    });
    drop(tx);

    let mut failures: Vec<(usize, CodestreamError)> = rx
        .iter()
        .filter_map(|(index, result)| result.err().map(|e| (index, e)))
        .collect();
    failures.sort_by_key(|(index, _)| *index);

    match failures.into_iter().next() {
        Some((_, error)) => Err(error),
        None => Ok(()),
    }
}
