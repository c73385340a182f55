//! Biome preview rendering: maps every output pixel to a world coordinate,
//! samples the biome there and colors it from the generator's palette.

use crate::catalog::{Dimension, McVersion};
use crate::{GeneratorBinding, MapError};

/// Opaque dark gray, used for biome ids the 256-entry palette cannot cover.
pub const FALLBACK_COLOR: u32 = 0xFF30_3030;

// Preview sampling is fixed to scale 1 at y = 63, a representative surface
// height, regardless of the requested dimension. The dimension still selects
// the generator ruleset through the session binding.
const SAMPLE_SCALE: i32 = 1;
const SAMPLE_Y: i32 = 63;

/// A width x height grid of 32-bit ARGB pixels, row-major, top-to-bottom,
/// left-to-right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The ARGB value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    fn set_pixel(&mut self, x: u32, y: u32, argb: u32) {
        self.pixels[(y * self.width + x) as usize] = argb;
    }

    /// Flatten to row-major RGBA bytes, the layout image encoders expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for argb in &self.pixels {
            bytes.push((argb >> 16) as u8);
            bytes.push((argb >> 8) as u8);
            bytes.push(*argb as u8);
            bytes.push((argb >> 24) as u8);
        }
        bytes
    }
}

/// Render a square world window centered on (`center_x`, `center_z`) with
/// half-extent `radius` blocks into a `width` x `height` ARGB buffer.
///
/// Each pixel center is normalized into (-1, 1) on both axes and scaled by
/// the radius; the world coordinate is rounded half-away-from-zero. Biomes
/// are sampled on the fixed y = 63 plane (a preview simplification carried
/// over from the native bridge, even for nether and end requests). Ids the
/// palette cannot cover map to [`FALLBACK_COLOR`]; alpha is always forced
/// opaque.
///
/// Deterministic: the same arguments against a deterministic binding always
/// produce a bit-identical buffer.
pub fn render_biome_image<B: GeneratorBinding + ?Sized>(
    binding: &B,
    seed: u64,
    version: McVersion,
    dimension: Dimension,
    center_x: i32,
    center_z: i32,
    radius: i32,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, MapError> {
    if width == 0 || height == 0 {
        return Err(MapError::InvalidArgument(
            "render dimensions must be positive",
        ));
    }
    if radius <= 0 {
        return Err(MapError::InvalidArgument("radius must be positive"));
    }

    log::debug!(
        "rendering {width}x{height} preview of {dimension} around ({center_x}, {center_z}), radius {radius}"
    );

    let mut session = binding.open_session(version, dimension, seed);
    let palette = binding.biome_palette();
    let mut buffer = PixelBuffer::new(width, height);

    for py in 0..height {
        for px in 0..width {
            let nx = ((px as f64 + 0.5) / width as f64) * 2.0 - 1.0;
            let nz = ((py as f64 + 0.5) / height as f64) * 2.0 - 1.0;
            let wx = (center_x as f64 + nx * radius as f64).round() as i32;
            let wz = (center_z as f64 + nz * radius as f64).round() as i32;

            let id = session.biome_at(SAMPLE_SCALE, wx, SAMPLE_Y, wz);
            let argb = match usize::try_from(id).ok().and_then(|i| palette.get(i)) {
                Some([r, g, b]) => {
                    0xFF00_0000 | (u32::from(*r) << 16) | (u32::from(*g) << 8) | u32::from(*b)
                }
                None => FALLBACK_COLOR,
            };
            buffer.set_pixel(px, py, argb);
        }
    }

    Ok(buffer)
}
