//! Region-bounded structure search.
//!
//! Structure placement is computed per region (a kind-specific grid of
//! chunks), so enumerating a block-space bounding box means converting it to
//! the padded region range that could possibly anchor a hit, then filtering
//! each candidate back against the original box.

use serde::Serialize;

use crate::catalog::{Dimension, McVersion, StructureKind};
use crate::coords::{BoundingBox, block_to_chunk, chunk_to_region};
use crate::GeneratorBinding;

/// One found structure, in world-block coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StructureHit {
    #[serde(rename = "structure")]
    pub kind: StructureKind,
    pub x: i32,
    pub z: i32,
}

/// The result of a search: the hits found, and whether the scan stopped at
/// the capacity limit. A truncated outcome with `hits.len() == capacity`
/// cannot say how many more hits exist; retry with a larger capacity for
/// completeness.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub hits: Vec<StructureHit>,
    pub truncated: bool,
}

impl SearchOutcome {
    pub fn count(&self) -> usize {
        self.hits.len()
    }
}

/// Accumulates hits up to a hard capacity.
#[derive(Debug)]
struct HitCollector {
    hits: Vec<StructureHit>,
    capacity: usize,
}

impl HitCollector {
    fn new(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a hit; returns `false` once the collector is full and the
    /// scan must stop.
    fn push(&mut self, hit: StructureHit) -> bool {
        self.hits.push(hit);
        self.hits.len() < self.capacity
    }

    fn is_empty_capacity(&self) -> bool {
        self.capacity == 0
    }

    fn finish(self, truncated: bool) -> SearchOutcome {
        SearchOutcome {
            hits: self.hits,
            truncated,
        }
    }
}

/// Enumerate up to `capacity` structures of the requested kinds whose
/// canonical positions fall inside `bounds` and pass the generator's
/// viability check.
///
/// Each kind is searched independently: its region spec is resolved, the
/// bounding box is floored to chunk and then region coordinates, and the
/// region range is padded by one region on every side so structures anchored
/// near a region boundary are not missed. Kinds that do not resolve, belong
/// to another dimension, or report a non-positive region size are skipped,
/// never an error. An empty kind set or zero capacity yields an empty
/// outcome.
pub fn find_structures<B: GeneratorBinding + ?Sized>(
    binding: &B,
    seed: u64,
    version: McVersion,
    dimension: Dimension,
    bounds: BoundingBox,
    kinds: &[StructureKind],
    capacity: usize,
) -> SearchOutcome {
    let mut collector = HitCollector::new(capacity);
    if kinds.is_empty() || collector.is_empty_capacity() {
        return collector.finish(false);
    }

    let mut session = binding.open_session(version, dimension, seed);
    let chunk_min_x = block_to_chunk(bounds.min_x);
    let chunk_max_x = block_to_chunk(bounds.max_x);
    let chunk_min_z = block_to_chunk(bounds.min_z);
    let chunk_max_z = block_to_chunk(bounds.max_z);

    for &kind in kinds {
        let Some(spec) = binding.structure_region_spec(kind, version) else {
            log::debug!("skipping {kind}: not configured for this version");
            continue;
        };
        if spec.dimension != dimension || spec.region_size <= 0 {
            continue;
        }

        // Pad by one region per side: a region's placement attempt can land
        // in a neighboring region's chunk range, so the unpadded range would
        // miss hits near its own boundary.
        let region_min_x = chunk_to_region(chunk_min_x, spec.region_size) - 1;
        let region_max_x = chunk_to_region(chunk_max_x, spec.region_size) + 1;
        let region_min_z = chunk_to_region(chunk_min_z, spec.region_size) - 1;
        let region_max_z = chunk_to_region(chunk_max_z, spec.region_size) + 1;

        for region_z in region_min_z..=region_max_z {
            for region_x in region_min_x..=region_max_x {
                let Some(pos) = binding.structure_position(kind, version, seed, region_x, region_z)
                else {
                    continue;
                };
                if !bounds.contains(pos.x, pos.z) {
                    continue;
                }
                if !session.structure_viable(kind, pos.x, pos.z) {
                    continue;
                }
                if !collector.push(StructureHit {
                    kind,
                    x: pos.x,
                    z: pos.z,
                }) {
                    return collector.finish(true);
                }
            }
        }
    }
    collector.finish(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{BlockPos, GeneratorSession, RegionSpec};

    /// One structure per configured region, at a fixed position.
    struct GridBinding {
        specs: HashMap<StructureKind, RegionSpec>,
        positions: HashMap<(StructureKind, i32, i32), BlockPos>,
        rejected: Vec<BlockPos>,
    }

    impl GridBinding {
        fn new() -> Self {
            Self {
                specs: HashMap::new(),
                positions: HashMap::new(),
                rejected: Vec::new(),
            }
        }

        fn with_kind(mut self, kind: StructureKind, dimension: Dimension, region_size: i32) -> Self {
            self.specs.insert(
                kind,
                RegionSpec {
                    dimension,
                    region_size,
                },
            );
            self
        }

        fn with_position(mut self, kind: StructureKind, rx: i32, rz: i32, x: i32, z: i32) -> Self {
            self.positions.insert((kind, rx, rz), BlockPos { x, z });
            self
        }
    }

    struct GridSession<'a> {
        rejected: &'a [BlockPos],
    }

    impl GeneratorSession for GridSession<'_> {
        fn biome_at(&mut self, _scale: i32, _x: i32, _y: i32, _z: i32) -> i32 {
            0
        }

        fn structure_viable(&mut self, _kind: StructureKind, x: i32, z: i32) -> bool {
            !self.rejected.contains(&BlockPos { x, z })
        }
    }

    impl GeneratorBinding for GridBinding {
        fn open_session(
            &self,
            _version: McVersion,
            _dimension: Dimension,
            _seed: u64,
        ) -> Box<dyn GeneratorSession + '_> {
            Box::new(GridSession {
                rejected: &self.rejected,
            })
        }

        fn biome_palette(&self) -> [[u8; 3]; 256] {
            [[0; 3]; 256]
        }

        fn structure_region_spec(
            &self,
            kind: StructureKind,
            _version: McVersion,
        ) -> Option<RegionSpec> {
            self.specs.get(&kind).copied()
        }

        fn structure_position(
            &self,
            kind: StructureKind,
            _version: McVersion,
            _seed: u64,
            region_x: i32,
            region_z: i32,
        ) -> Option<BlockPos> {
            self.positions.get(&(kind, region_x, region_z)).copied()
        }
    }

    fn search(binding: &GridBinding, bounds: BoundingBox, kinds: &[StructureKind], capacity: usize) -> SearchOutcome {
        find_structures(
            binding,
            1,
            McVersion::V1_21,
            Dimension::Overworld,
            bounds,
            kinds,
            capacity,
        )
    }

    #[test]
    fn test_empty_request_returns_no_hits() {
        let binding = GridBinding::new()
            .with_kind(StructureKind::Village, Dimension::Overworld, 32)
            .with_position(StructureKind::Village, 0, 0, 100, 100);
        let bounds = BoundingBox::new(0, 0, 500, 500);

        let outcome = search(&binding, bounds, &[], 10);
        assert_eq!(outcome.count(), 0);
        assert!(!outcome.truncated);

        let outcome = search(&binding, bounds, &[StructureKind::Village], 0);
        assert_eq!(outcome.count(), 0);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_finds_structure_inside_bounds() {
        let binding = GridBinding::new()
            .with_kind(StructureKind::Village, Dimension::Overworld, 32)
            .with_position(StructureKind::Village, 0, 0, 100, 100);
        let outcome = search(
            &binding,
            BoundingBox::new(0, 0, 500, 500),
            &[StructureKind::Village],
            10,
        );
        assert_eq!(
            outcome.hits,
            vec![StructureHit {
                kind: StructureKind::Village,
                x: 100,
                z: 100
            }]
        );
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_padding_catches_structure_owned_by_neighbor_region() {
        // Region size 16 chunks = 256 blocks. The structure is owned by
        // region (-1, 0) but its position lands just inside a box that only
        // spans region (0, 0); the unpadded range would never visit it.
        let binding = GridBinding::new()
            .with_kind(StructureKind::SwampHut, Dimension::Overworld, 16)
            .with_position(StructureKind::SwampHut, -1, 0, 4, 40);
        let outcome = search(
            &binding,
            BoundingBox::new(0, 0, 255, 255),
            &[StructureKind::SwampHut],
            10,
        );
        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.hits[0].x, 4);
        assert_eq!(outcome.hits[0].z, 40);
    }

    #[test]
    fn test_hits_outside_bounds_are_discarded() {
        let binding = GridBinding::new()
            .with_kind(StructureKind::Village, Dimension::Overworld, 32)
            .with_position(StructureKind::Village, 0, 0, 100, 100)
            .with_position(StructureKind::Village, 1, 0, 600, 100);
        let bounds = BoundingBox::new(0, 0, 500, 500);
        let outcome = search(&binding, bounds, &[StructureKind::Village], 10);
        for hit in &outcome.hits {
            assert!(bounds.contains(hit.x, hit.z));
        }
        assert_eq!(outcome.count(), 1);
    }

    #[test]
    fn test_viability_rejection_filters_hit() {
        let mut binding = GridBinding::new()
            .with_kind(StructureKind::Monument, Dimension::Overworld, 32)
            .with_position(StructureKind::Monument, 0, 0, 100, 100);
        binding.rejected.push(BlockPos { x: 100, z: 100 });
        let outcome = search(
            &binding,
            BoundingBox::new(0, 0, 500, 500),
            &[StructureKind::Monument],
            10,
        );
        assert_eq!(outcome.count(), 0);
    }

    #[test]
    fn test_wrong_dimension_and_unknown_kinds_are_skipped() {
        let binding = GridBinding::new()
            .with_kind(StructureKind::Fortress, Dimension::Nether, 27)
            .with_position(StructureKind::Fortress, 0, 0, 100, 100)
            .with_kind(StructureKind::Mineshaft, Dimension::Overworld, 0)
            .with_position(StructureKind::Mineshaft, 0, 0, 50, 50)
            .with_kind(StructureKind::Village, Dimension::Overworld, 32)
            .with_position(StructureKind::Village, 0, 0, 100, 100);
        // Fortress is nether-only, Mineshaft has a degenerate region size,
        // Igloo has no spec at all; only the village survives.
        let outcome = search(
            &binding,
            BoundingBox::new(0, 0, 500, 500),
            &[
                StructureKind::Fortress,
                StructureKind::Mineshaft,
                StructureKind::Igloo,
                StructureKind::Village,
            ],
            10,
        );
        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.hits[0].kind, StructureKind::Village);
    }

    #[test]
    fn test_capacity_truncates_hard() {
        let mut binding =
            GridBinding::new().with_kind(StructureKind::Shipwreck, Dimension::Overworld, 2);
        // 2-chunk regions, 32 blocks each: a 10x10 region area full of hits.
        for rz in 0..10 {
            for rx in 0..10 {
                binding = binding.with_position(
                    StructureKind::Shipwreck,
                    rx,
                    rz,
                    rx * 32 + 8,
                    rz * 32 + 8,
                );
            }
        }
        let bounds = BoundingBox::new(0, 0, 319, 319);
        let outcome = search(&binding, bounds, &[StructureKind::Shipwreck], 7);
        assert_eq!(outcome.count(), 7);
        assert!(outcome.truncated);

        // Enough capacity: all 100 come back, untruncated.
        let outcome = search(&binding, bounds, &[StructureKind::Shipwreck], 500);
        assert_eq!(outcome.count(), 100);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_negative_coordinates_use_floored_regions() {
        // A box entirely on the negative side: truncating division would
        // aim the scan at the wrong regions entirely.
        let binding = GridBinding::new()
            .with_kind(StructureKind::Igloo, Dimension::Overworld, 32)
            .with_position(StructureKind::Igloo, -1, -1, -300, -300);
        let outcome = search(
            &binding,
            BoundingBox::new(-400, -400, -200, -200),
            &[StructureKind::Igloo],
            10,
        );
        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.hits[0].x, -300);
    }

    #[test]
    fn test_hit_serializes_with_resource_id() {
        let hit = StructureHit {
            kind: StructureKind::Village,
            x: 12,
            z: -7,
        };
        let json = serde_json::to_string(&hit).unwrap();
        assert_eq!(json, r#"{"structure":"minecraft:village","x":12,"z":-7}"#);
    }
}
