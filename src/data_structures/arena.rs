//! Fixed-capacity, append-only byte arena.

use std::ops::Range;

use crate::error::{ArenaKind, EmberError, Result};

/// A byte region handed out by an [`Arena`]. Offsets are relative to the
/// start of the arena, which is also the start of the uploaded GPU buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaRange {
    pub offset: usize,
    pub len: usize,
}

impl ArenaRange {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn as_range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn overlaps(&self, other: &ArenaRange) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Zero-initialised storage plus a high-water mark. Regions are never moved,
/// shrunk or freed individually.
#[derive(Debug)]
pub struct Arena {
    kind: ArenaKind,
    data: Vec<u8>,
    used: usize,
}

impl Arena {
    pub fn new(kind: ArenaKind, capacity: usize) -> Self {
        Self {
            kind,
            data: vec![0; capacity],
            used: 0,
        }
    }

    pub fn kind(&self) -> ArenaKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    /// Fails without side effects when `len` bytes do not fit.
    pub fn check(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(EmberError::ArenaExhausted {
                arena: self.kind,
                requested: len,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Copies `bytes` to the high-water mark and advances it.
    pub fn push(&mut self, bytes: &[u8]) -> Result<ArenaRange> {
        self.check(bytes.len())?;
        let range = ArenaRange {
            offset: self.used,
            len: bytes.len(),
        };
        self.data[range.as_range()].copy_from_slice(bytes);
        self.used = range.end();
        Ok(range)
    }

    /// The written prefix, ready for upload.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.used]
    }

    /// Bytes of a region handed out by this arena. `None` when `range`
    /// reaches past the written prefix.
    pub fn slice(&self, range: ArenaRange) -> Option<&[u8]> {
        self.bytes().get(range.as_range())
    }
}
