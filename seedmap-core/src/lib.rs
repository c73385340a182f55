//! Glue logic around an external procedural world generator: biome-map
//! previews and region-bounded structure search for a given world seed.
//!
//! The generator itself (biome and structure mathematics) lives behind the
//! [`GeneratorBinding`] trait; this crate owns the coordinate conversions,
//! the per-pixel sampling loop, the padded region scan and the bounded
//! result accumulation. Everything here is stateless per call: a binding is
//! passed in explicitly and a fresh session is opened for each operation.

use thiserror::Error;

use crate::catalog::{Dimension, McVersion, StructureKind};

pub mod catalog;
pub mod coords;
pub mod fallback;
pub mod render;
pub mod search;

pub use coords::BoundingBox;
pub use render::{PixelBuffer, render_biome_image};
pub use search::{SearchOutcome, StructureHit, find_structures};

/// Error from a core operation. Structure-type resolution failures are not
/// errors; unknown or inapplicable kinds are skipped during the search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// A structure position in world-block coordinates, as reported by the
/// generator's per-region placement algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPos {
    pub x: i32,
    pub z: i32,
}

/// Placement parameters for a structure kind: which dimension it generates
/// in, and the edge length (in chunks) of the grid cell its placement is
/// computed per.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSpec {
    pub dimension: Dimension,
    pub region_size: i32,
}

/// A generator instance bound to one (version, dimension, seed) triple.
///
/// Sessions are request-scoped: both core operations open one, use it for
/// the duration of the call and drop it. Methods take `&mut self` because
/// native generator state is mutated by queries.
pub trait GeneratorSession {
    /// Sample the biome id at a world coordinate and sampling scale.
    fn biome_at(&mut self, scale: i32, x: i32, y: i32, z: i32) -> i32;

    /// Whether a structure's canonical position survives the generator's
    /// environmental placement check.
    fn structure_viable(&mut self, kind: StructureKind, x: i32, z: i32) -> bool;
}

/// The contract the core consumes from the procedural-generation engine.
///
/// Implemented over the native cubiomes library for real queries, or by a
/// pure-Rust stand-in ([`fallback::FallbackBinding`], test doubles).
pub trait GeneratorBinding {
    /// Allocate a generator session for a ruleset version and bind it to a
    /// seed and dimension.
    fn open_session(
        &self,
        version: McVersion,
        dimension: Dimension,
        seed: u64,
    ) -> Box<dyn GeneratorSession + '_>;

    /// The 256-entry RGB color table indexed by biome id.
    fn biome_palette(&self) -> [[u8; 3]; 256];

    /// Resolve a structure kind's placement parameters for a version.
    /// `None` if the kind is unknown to or inapplicable for that version.
    fn structure_region_spec(&self, kind: StructureKind, version: McVersion) -> Option<RegionSpec>;

    /// The kind's canonical position within one placement region, or `None`
    /// if the region generates no attempt for it.
    fn structure_position(
        &self,
        kind: StructureKind,
        version: McVersion,
        seed: u64,
        region_x: i32,
        region_z: i32,
    ) -> Option<BlockPos>;
}
