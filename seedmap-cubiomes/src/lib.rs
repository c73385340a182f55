//! Generator binding over a cubiomes shared library.
//!
//! Loads the library at runtime with `libloading`, resolves the seven
//! exports the core contract needs and exposes them as a
//! [`seedmap_core::GeneratorBinding`]. All load and resolution failures
//! surface here, as typed errors, before any core operation runs; the
//! binding itself owns the library handle, so there is no process-wide
//! state.

use std::path::Path;

use libloading::Library;
use thiserror::Error;

use seedmap_core::catalog::{Dimension, McVersion, StructureKind};
use seedmap_core::{BlockPos, GeneratorBinding, GeneratorSession, RegionSpec};

#[derive(Debug, Error)]
pub enum CubiomesError {
    #[error("failed to load cubiomes library: {0}")]
    LibraryLoad(String),
    #[error("missing cubiomes export `{0}`")]
    MissingSymbol(&'static str),
}

/// The platform's conventional file name for the cubiomes library.
pub fn default_library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "cubiomes.dll"
    } else if cfg!(target_os = "macos") {
        "libcubiomes.dylib"
    } else {
        "libcubiomes.so"
    }
}

// Mirrors cubiomes' StructureConfig from finders.h. Only region_size and
// dim are read, but every field is needed for the C layout.
#[repr(C)]
#[derive(Clone, Copy, Default)]
#[allow(dead_code)]
struct RawStructureConfig {
    salt: i32,
    region_size: i8,
    chunk_range: i8,
    struct_type: u8,
    dim: i8,
    rarity: f32,
}

// Mirrors cubiomes' Pos.
#[repr(C)]
#[derive(Clone, Copy, Default)]
struct RawPos {
    x: i32,
    z: i32,
}

type SetupGeneratorFn = unsafe extern "C" fn(*mut u64, i32, u32);
type ApplySeedFn = unsafe extern "C" fn(*mut u64, i32, u64);
type GetBiomeAtFn = unsafe extern "C" fn(*const u64, i32, i32, i32, i32) -> i32;
type InitBiomeColorsFn = unsafe extern "C" fn(*mut [u8; 3]);
type GetStructureConfigFn = unsafe extern "C" fn(i32, i32, *mut RawStructureConfig) -> i32;
type GetStructurePosFn = unsafe extern "C" fn(i32, i32, u64, i32, i32, *mut RawPos) -> i32;
type IsViableStructurePosFn = unsafe extern "C" fn(i32, *mut u64, i32, i32, u32) -> i32;

// Opaque storage for cubiomes' Generator struct, allocated as u64 words for
// alignment. The real size depends on the cubiomes build; this must cover
// sizeof(Generator) for every supported build, which is well under this.
const GENERATOR_STATE_WORDS: usize = (1 << 20) / size_of::<u64>();

/// A cubiomes shared library with its exports resolved.
#[derive(Debug)]
pub struct CubiomesBinding {
    setup_generator: SetupGeneratorFn,
    apply_seed: ApplySeedFn,
    get_biome_at: GetBiomeAtFn,
    init_biome_colors: InitBiomeColorsFn,
    get_structure_config: GetStructureConfigFn,
    get_structure_pos: GetStructurePosFn,
    is_viable_structure_pos: IsViableStructurePosFn,
    // Must outlive every resolved function pointer above.
    _library: Library,
}

macro_rules! resolve {
    ($library:expr, $ty:ty, $name:literal) => {
        *$library
            .get::<$ty>(concat!($name, "\0").as_bytes())
            .map_err(|_| CubiomesError::MissingSymbol($name))?
    };
}

impl CubiomesBinding {
    /// Load the cubiomes library at `path` and resolve its exports.
    ///
    /// # Safety-adjacent caveat
    ///
    /// The library must actually be a cubiomes build; the symbol signatures
    /// cannot be verified at load time.
    pub fn load(path: &Path) -> Result<Self, CubiomesError> {
        let library = unsafe { Library::new(path) }
            .map_err(|e| CubiomesError::LibraryLoad(e.to_string()))?;
        log::info!("loaded cubiomes library from {}", path.display());

        unsafe {
            let setup_generator = resolve!(library, SetupGeneratorFn, "setupGenerator");
            let apply_seed = resolve!(library, ApplySeedFn, "applySeed");
            let get_biome_at = resolve!(library, GetBiomeAtFn, "getBiomeAt");
            let init_biome_colors = resolve!(library, InitBiomeColorsFn, "initBiomeColors");
            let get_structure_config = resolve!(library, GetStructureConfigFn, "getStructureConfig");
            let get_structure_pos = resolve!(library, GetStructurePosFn, "getStructurePos");
            let is_viable_structure_pos =
                resolve!(library, IsViableStructurePosFn, "isViableStructurePos");
            Ok(Self {
                setup_generator,
                apply_seed,
                get_biome_at,
                init_biome_colors,
                get_structure_config,
                get_structure_pos,
                is_viable_structure_pos,
                _library: library,
            })
        }
    }
}

struct CubiomesSession<'a> {
    binding: &'a CubiomesBinding,
    state: Box<[u64]>,
}

impl GeneratorSession for CubiomesSession<'_> {
    fn biome_at(&mut self, scale: i32, x: i32, y: i32, z: i32) -> i32 {
        unsafe { (self.binding.get_biome_at)(self.state.as_ptr(), scale, x, y, z) }
    }

    fn structure_viable(&mut self, kind: StructureKind, x: i32, z: i32) -> bool {
        unsafe {
            (self.binding.is_viable_structure_pos)(kind.id(), self.state.as_mut_ptr(), x, z, 0) != 0
        }
    }
}

impl GeneratorBinding for CubiomesBinding {
    fn open_session(
        &self,
        version: McVersion,
        dimension: Dimension,
        seed: u64,
    ) -> Box<dyn GeneratorSession + '_> {
        let mut state = vec![0u64; GENERATOR_STATE_WORDS].into_boxed_slice();
        unsafe {
            (self.setup_generator)(state.as_mut_ptr(), version.id(), 0);
            (self.apply_seed)(state.as_mut_ptr(), dimension.id(), seed);
        }
        Box::new(CubiomesSession {
            binding: self,
            state,
        })
    }

    fn biome_palette(&self) -> [[u8; 3]; 256] {
        let mut colors = [[0u8; 3]; 256];
        unsafe { (self.init_biome_colors)(colors.as_mut_ptr()) };
        colors
    }

    fn structure_region_spec(&self, kind: StructureKind, version: McVersion) -> Option<RegionSpec> {
        let mut raw = RawStructureConfig::default();
        let ok = unsafe { (self.get_structure_config)(kind.id(), version.id(), &mut raw) };
        if ok == 0 {
            return None;
        }
        Some(RegionSpec {
            dimension: Dimension::from_id(i32::from(raw.dim))?,
            region_size: i32::from(raw.region_size),
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
        let mut raw = RawPos::default();
        let ok = unsafe {
            (self.get_structure_pos)(kind.id(), version.id(), seed, region_x, region_z, &mut raw)
        };
        (ok != 0).then_some(BlockPos { x: raw.x, z: raw.z })
    }
}
