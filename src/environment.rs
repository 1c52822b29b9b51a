use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result};

/// Flat background color used until the environment arrives, and kept when
/// decoding fails
pub const FALLBACK_COLOR_HEX: u32 = 0xFEFEFE;

/// Background blur applied when sampling the environment behind the scene
pub const BACKGROUND_BLURRINESS: f32 = 0.05;

/// Scale on environment radiance for both background and lighting
pub const ENVIRONMENT_INTENSITY: f32 = 1.0;

/// What the renderer should draw behind the scene
pub enum Background {
    /// Environment still decoding on the loader thread
    Pending,
    Environment(EnvironmentMap),
    /// Flat linear color, used when the environment cannot be loaded
    Fallback([f32; 3]),
}

/// One level of the equirectangular mip pyramid
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 4]>,
}

/// Decoded equirectangular radiance map with a full mip pyramid
///
/// Levels are box-filtered halvings of the previous level down to 1x1, so
/// the pyramid can be uploaded directly as texture mips and sampled at a
/// fractional LOD for background blur.
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    pub mips: Vec<MipLevel>,
}

impl EnvironmentMap {
    pub fn from_texels(width: u32, height: u32, texels: Vec<[f32; 4]>) -> Self {
        let mut mips = vec![MipLevel {
            width,
            height,
            texels,
        }];
        while mips[mips.len() - 1].width > 1 || mips[mips.len() - 1].height > 1 {
            let next = downsample(&mips[mips.len() - 1]);
            mips.push(next);
        }
        Self {
            width,
            height,
            mips,
        }
    }

    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }

    /// Raw bytes of one mip level, ready for a texture upload
    pub fn level_bytes(&self, level: usize) -> &[u8] {
        bytemuck::cast_slice(&self.mips[level].texels)
    }

    /// Maps a blurriness in [0, 1] onto a mip LOD for this pyramid
    pub fn blur_lod(&self, blurriness: f32) -> f32 {
        blurriness.clamp(0.0, 1.0) * (self.mips.len() as f32 - 1.0)
    }
}

/// Box-filters a level down to half dimensions (clamped at 1)
fn downsample(level: &MipLevel) -> MipLevel {
    let width = (level.width / 2).max(1);
    let height = (level.height / 2).max(1);
    let mut texels = Vec::with_capacity((width * height) as usize);

    for y in 0..height {
        for x in 0..width {
            // Clamp so odd source dimensions reuse their edge texels
            let x0 = (x * 2).min(level.width - 1);
            let x1 = (x * 2 + 1).min(level.width - 1);
            let y0 = (y * 2).min(level.height - 1);
            let y1 = (y * 2 + 1).min(level.height - 1);

            let mut sum = [0.0_f32; 4];
            for (sx, sy) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
                let texel = level.texels[(sy * level.width + sx) as usize];
                for (acc, component) in sum.iter_mut().zip(texel) {
                    *acc += component;
                }
            }
            texels.push(sum.map(|component| component / 4.0));
        }
    }

    MipLevel {
        width,
        height,
        texels,
    }
}

/// Decodes Radiance HDR bytes into an environment map with mips
pub fn decode_hdr(bytes: &[u8]) -> Result<EnvironmentMap> {
    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Hdr)
        .context("Failed to decode Radiance HDR data")?;
    let image = image.to_rgba32f();
    let (width, height) = image.dimensions();
    let texels: Vec<[f32; 4]> = image.pixels().map(|pixel| pixel.0).collect();
    Ok(EnvironmentMap::from_texels(width, height, texels))
}

/// Reads and decodes an environment map from disk
pub fn load_environment(path: impl AsRef<Path>) -> Result<EnvironmentMap> {
    let path = path.as_ref();
    println!("Loading environment map: {:?}", path);

    let bytes = std::fs::read(path)
        .context(format!("Failed to read environment map: {:?}", path))?;
    let map = decode_hdr(&bytes)?;

    println!(
        "Environment map ready: {}x{} ({} mip levels)",
        map.width,
        map.height,
        map.mip_count()
    );
    Ok(map)
}

/// Decodes the environment on a worker thread so startup is not blocked
/// on a multi-megabyte HDR
pub struct EnvironmentLoader {
    receiver: mpsc::Receiver<Result<EnvironmentMap>>,
}

impl EnvironmentLoader {
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let result = load_environment(&path);
            // The app may have exited before the decode finished
            let _ = sender.send(result);
        });
        Self { receiver }
    }

    /// Non-blocking poll; Some exactly once, when the decode finishes
    pub fn try_take(&self) -> Option<Result<EnvironmentMap>> {
        self.receiver.try_recv().ok()
    }
}
