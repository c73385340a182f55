//! A deterministic, pure-Rust stand-in for the native generator.
//!
//! Used when no cubiomes library is available: biomes come from a mix64
//! hash of the seed, a per-version salt and the sample coordinate, and
//! structure placement uses fixed per-kind region sizes with hash-derived
//! in-region offsets. The output is plausible and stable but approximate;
//! it does not match real world generation.

use crate::catalog::{Dimension, McVersion, StructureKind};
use crate::{BlockPos, GeneratorBinding, GeneratorSession, RegionSpec};

const BASE_SALT: u64 = 0x1F12_3BB5;
const X_STRIDE: i64 = 341_873_128_712;
const Z_STRIDE: i64 = 132_897_987_541;

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 33)).wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    z = (z ^ (z >> 33)).wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    z ^ (z >> 33)
}

fn version_salt(version: McVersion) -> u64 {
    mix64(BASE_SALT ^ version.id() as u64)
}

/// Offline generator binding. Stateless; construct freely per use.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackBinding;

struct FallbackSession {
    seed: u64,
    salt: u64,
}

impl FallbackSession {
    fn coordinate_hash(&self, x: i32, z: i32) -> u64 {
        let h = self.seed
            ^ self.salt
            ^ (x as i64).wrapping_mul(X_STRIDE) as u64
            ^ (z as i64).wrapping_mul(Z_STRIDE) as u64;
        mix64(h)
    }
}

impl GeneratorSession for FallbackSession {
    fn biome_at(&mut self, _scale: i32, x: i32, _y: i32, z: i32) -> i32 {
        (self.coordinate_hash(x, z) % 256) as i32
    }

    fn structure_viable(&mut self, kind: StructureKind, x: i32, z: i32) -> bool {
        // Thin out roughly a quarter of placements so the viability path is
        // exercised in offline runs.
        self.coordinate_hash(x ^ kind.id(), z) % 4 != 0
    }
}

impl GeneratorBinding for FallbackBinding {
    fn open_session(
        &self,
        version: McVersion,
        _dimension: Dimension,
        seed: u64,
    ) -> Box<dyn GeneratorSession + '_> {
        Box::new(FallbackSession {
            seed,
            salt: version_salt(version),
        })
    }

    fn biome_palette(&self) -> [[u8; 3]; 256] {
        let mut palette = [[0u8; 3]; 256];
        for (id, color) in palette.iter_mut().enumerate() {
            let h = mix64(BASE_SALT.wrapping_add(id as u64));
            *color = [(h >> 16) as u8, (h >> 8) as u8, h as u8];
        }
        palette
    }

    fn structure_region_spec(&self, kind: StructureKind, _version: McVersion) -> Option<RegionSpec> {
        // Region sizes are rough stand-ins for the real per-kind configs.
        let region_size = match kind {
            StructureKind::BuriedTreasure | StructureKind::Mineshaft => 1,
            StructureKind::OceanRuin | StructureKind::EndCity => 20,
            StructureKind::Shipwreck | StructureKind::AncientCity => 24,
            StructureKind::Fortress | StructureKind::BastionRemnant => 27,
            StructureKind::Village
            | StructureKind::TrailRuins
            | StructureKind::TrialChambers => 34,
            StructureKind::RuinedPortal | StructureKind::RuinedPortalNether => 40,
            StructureKind::Mansion => 80,
            _ => 32,
        };
        Some(RegionSpec {
            dimension: kind.dimension(),
            region_size,
        })
    }

    fn structure_position(
        &self,
        kind: StructureKind,
        version: McVersion,
        seed: u64,
        region_x: i32,
        region_z: i32,
    ) -> Option<BlockPos> {
        let spec = self.structure_region_spec(kind, version)?;
        let h = mix64(
            seed ^ version_salt(version)
                ^ ((kind.id() as u64) << 48)
                ^ (region_x as i64).wrapping_mul(X_STRIDE) as u64
                ^ (region_z as i64).wrapping_mul(Z_STRIDE) as u64,
        );
        let size = spec.region_size;
        let chunk_x = region_x * size + (h % size as u64) as i32;
        let chunk_z = region_z * size + ((h >> 32) % size as u64) as i32;
        Some(BlockPos {
            x: chunk_x * 16 + 8,
            z: chunk_z * 16 + 8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::BoundingBox;
    use crate::{find_structures, render_biome_image};

    #[test]
    fn test_biome_ids_stay_in_palette_range() {
        let binding = FallbackBinding;
        let mut session = binding.open_session(McVersion::V1_21, Dimension::Overworld, 123);
        for x in -50..50 {
            for z in -50..50 {
                let id = session.biome_at(1, x * 37, 63, z * 37);
                assert!((0..256).contains(&id));
            }
        }
    }

    #[test]
    fn test_render_is_deterministic_across_sessions() {
        let binding = FallbackBinding;
        let first = render_biome_image(
            &binding,
            9001,
            McVersion::V1_20_6,
            Dimension::Overworld,
            0,
            0,
            512,
            32,
            32,
        )
        .unwrap();
        let second = render_biome_image(
            &binding,
            9001,
            McVersion::V1_20_6,
            Dimension::Overworld,
            0,
            0,
            512,
            32,
            32,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_versions_produce_different_samples() {
        let binding = FallbackBinding;
        let mut old = binding.open_session(McVersion::V1_16_5, Dimension::Overworld, 7);
        let mut new = binding.open_session(McVersion::V1_21, Dimension::Overworld, 7);
        let differs = (0..64).any(|i| old.biome_at(1, i, 63, -i) != new.biome_at(1, i, 63, -i));
        assert!(differs);
    }

    #[test]
    fn test_positions_fall_inside_their_region() {
        let binding = FallbackBinding;
        for (rx, rz) in [(0, 0), (-1, 0), (3, -2), (-5, -5)] {
            let pos = binding
                .structure_position(StructureKind::Village, McVersion::V1_21, 42, rx, rz)
                .unwrap();
            let spec = binding
                .structure_region_spec(StructureKind::Village, McVersion::V1_21)
                .unwrap();
            let region_blocks = spec.region_size * 16;
            assert_eq!(pos.x.div_euclid(region_blocks), rx);
            assert_eq!(pos.z.div_euclid(region_blocks), rz);
        }
    }

    #[test]
    fn test_search_returns_hits_inside_bounds() {
        let binding = FallbackBinding;
        let bounds = BoundingBox::new(-2000, -2000, 2000, 2000);
        let outcome = find_structures(
            &binding,
            42,
            McVersion::V1_21,
            Dimension::Overworld,
            bounds,
            &[StructureKind::Village, StructureKind::DesertPyramid],
            64,
        );
        assert!(outcome.count() > 0);
        for hit in &outcome.hits {
            assert!(bounds.contains(hit.x, hit.z));
        }
    }
}
