//! Splitting a file into fixed-size byte ranges.

use std::num::NonZeroU64;
use std::ops::Range;

use kathalu_core::constants::CHUNK_SIZE_BYTES;

/// The fixed 1 MiB chunk size.
pub const DEFAULT_CHUNK_SIZE: NonZeroU64 = match NonZeroU64::new(CHUNK_SIZE_BYTES) {
    Some(size) => size,
    None => panic!("CHUNK_SIZE_BYTES must be non-zero"),
};

/// One contiguous byte range of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    /// Position in the file (0-indexed).
    pub index: u64,
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Range usable to slice an in-memory buffer.
    pub fn as_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// The chunk layout of one file.
///
/// `total_chunks` is `ceil(size_bytes / chunk_size)`, except that an empty file still has
/// one (empty) chunk so that it goes through the same upload-then-finalize path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    size_bytes: u64,
    chunk_size: u64,
    total_chunks: u64,
}

/// Plan the chunks of a file of `size_bytes` bytes.
pub fn split(size_bytes: u64, chunk_size: NonZeroU64) -> ChunkPlan {
    let chunk_size = chunk_size.get();
    ChunkPlan {
        size_bytes,
        chunk_size,
        total_chunks: size_bytes.div_ceil(chunk_size).max(1),
    }
}

impl ChunkPlan {
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    /// Iterate the ranges in order. Each call starts again from the first chunk.
    pub fn iter(&self) -> ChunkRanges {
        ChunkRanges {
            plan: *self,
            next: 0,
        }
    }
}

impl IntoIterator for &ChunkPlan {
    type Item = ChunkRange;
    type IntoIter = ChunkRanges;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the ranges of a [`ChunkPlan`].
#[derive(Debug, Clone)]
pub struct ChunkRanges {
    plan: ChunkPlan,
    next: u64,
}

impl Iterator for ChunkRanges {
    type Item = ChunkRange;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.plan.total_chunks {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let start = (index * self.plan.chunk_size).min(self.plan.size_bytes);
        let end = start
            .saturating_add(self.plan.chunk_size)
            .min(self.plan.size_bytes);
        Some(ChunkRange { index, start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.plan.total_chunks - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkRanges {}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    fn assert_covers(plan: &ChunkPlan) {
        let ranges: Vec<_> = plan.iter().collect();
        assert_eq!(ranges.len() as u64, plan.total_chunks());
        assert_eq!(ranges[0].start, 0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "ranges must be contiguous");
            assert_eq!(pair[0].index + 1, pair[1].index);
        }
        let total: u64 = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, plan.size_bytes());
        assert_eq!(ranges.last().unwrap().end, plan.size_bytes());
    }

    #[test]
    fn test_split_uneven() {
        let plan = split(100, nz(30));
        assert_eq!(plan.total_chunks(), 4);
        let ranges: Vec<_> = plan.iter().collect();
        assert_eq!(ranges[0].len(), 30);
        assert_eq!(ranges[3].len(), 10); // Last chunk is smaller
        assert_covers(&plan);
    }

    #[test]
    fn test_split_exact_multiple() {
        let plan = split(3 * 1024 * 1024, nz(1024 * 1024));
        assert_eq!(plan.total_chunks(), 3);
        assert!(plan.iter().all(|r| r.len() == 1024 * 1024));
        assert_covers(&plan);
    }

    #[test]
    fn test_split_empty_file_yields_one_empty_chunk() {
        let plan = split(0, nz(1024));
        assert_eq!(plan.total_chunks(), 1);
        let ranges: Vec<_> = plan.iter().collect();
        assert_eq!(ranges, vec![ChunkRange { index: 0, start: 0, end: 0 }]);
        assert!(ranges[0].is_empty());
    }

    #[test]
    fn test_split_smaller_than_chunk() {
        let plan = split(5, nz(1024));
        assert_eq!(plan.total_chunks(), 1);
        assert_covers(&plan);
    }

    #[test]
    fn test_split_property_over_sizes() {
        for chunk_size in [1u64, 2, 3, 7, 64] {
            for size in 0u64..200 {
                let plan = split(size, nz(chunk_size));
                let expected = size.div_ceil(chunk_size).max(1);
                assert_eq!(plan.total_chunks(), expected, "size={size} chunk={chunk_size}");
                assert_covers(&plan);
            }
        }
    }

    #[test]
    fn test_iteration_is_restartable() {
        let plan = split(10, nz(4));
        let first: Vec<_> = plan.iter().collect();
        let second: Vec<_> = (&plan).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(plan.iter().len(), 3);
    }
}
