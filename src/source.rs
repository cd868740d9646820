// src/source.rs
//! Position-addressable byte sources.
//!
//! Both scanning phases jump around the codestream, so the scanners work
//! against [`ByteSource`] (read N bytes at offset O) rather than a stream.

use crate::error::{CodestreamError, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Random-access, read-only view of a codestream
pub trait ByteSource {
    /// Total number of bytes available
    fn len(&mut self) -> Result<u64>;

    /// Fill `buf` with the bytes starting at `offset`.
    ///
    /// Fails with [`CodestreamError::TruncatedInput`] if the range runs past
    /// the end of the source.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()>;

    fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read_byte_at(&mut self, offset: u64) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_at(offset, &mut byte)?;
        Ok(byte[0])
    }

    /// The whole source as a shared buffer, if it already lives in memory
    fn as_bytes(&self) -> Option<Bytes> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn len(&mut self) -> Result<u64> {
        (**self).len()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_at(offset, buf)
    }

    fn as_bytes(&self) -> Option<Bytes> {
        (**self).as_bytes()
    }
}

fn check_range(offset: u64, wanted: usize, available: u64) -> Result<()> {
    match offset.checked_add(wanted as u64) {
        Some(end) if end <= available => Ok(()),
        _ => Err(CodestreamError::TruncatedInput {
            offset,
            context: "data",
        }),
    }
}

/// Adapter for anything `Read + Seek` (files, cursors)
pub struct SeekSource<R: Read + Seek> {
    inner: R,
    length: u64,
}

impl<R: Read + Seek> SeekSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let length = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(SeekSource { inner, length })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl SeekSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        SeekSource::new(BufReader::with_capacity(65536, file))
    }
}

impl<R: Read + Seek> ByteSource for SeekSource<R> {
    fn len(&mut self) -> Result<u64> {
        Ok(self.length)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_range(offset, buf.len(), self.length)?;
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }
}

/// In-memory source; cloning shares the underlying buffer
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        MemorySource { data: data.into() }
    }

    /// Bring the whole of another source into memory.
    ///
    /// A source that is already backed by [`Bytes`] is shared, not copied.
    pub fn load<S: ByteSource>(source: &mut S) -> Result<Self> {
        if let Some(data) = source.as_bytes() {
            return Ok(MemorySource { data });
        }
        let length = source.len()?;
        let mut data = vec![0u8; length as usize];
        source.read_at(0, &mut data)?;
        Ok(MemorySource::new(data))
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl ByteSource for MemorySource {
    fn len(&mut self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_range(offset, buf.len(), self.data.len() as u64)?;
        let start = offset as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }

    fn as_bytes(&self) -> Option<Bytes> {
        Some(self.data.clone())
    }
}
