//! World-block, chunk and region coordinate conversions.
//!
//! World coordinates are signed and span both sides of the origin, so every
//! conversion uses floor division (`div_euclid`): the quotient rounds toward
//! negative infinity. Truncating division would shift every negative-side
//! cell by one and make region scans miss structures.

/// Edge length of a chunk in blocks.
pub const BLOCKS_PER_CHUNK: i32 = 16;

/// Convert a block coordinate to the chunk coordinate containing it.
pub fn block_to_chunk(block: i32) -> i32 {
    block.div_euclid(BLOCKS_PER_CHUNK)
}

/// Convert a chunk coordinate to the region coordinate containing it, for a
/// structure kind whose regions are `region_size` chunks on a side.
pub fn chunk_to_region(chunk: i32, region_size: i32) -> i32 {
    chunk.div_euclid(region_size)
}

/// An axis-aligned rectangle in world-block coordinates, inclusive on all
/// sides. Callers uphold `min_x <= max_x` and `min_z <= max_z`; a violated
/// box simply contains nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl BoundingBox {
    pub fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}
