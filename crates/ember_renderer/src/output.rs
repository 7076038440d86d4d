//! Image output: tonemapping and file writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ember_math::Color;
use thiserror::Error;

/// Display gamma applied by the tonemap.
const GAMMA: f64 = 2.2;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image size {width}x{height} does not fit the encoder")]
    TooLarge { width: usize, height: usize },
}

/// Convert linear radiance to an 8-bit RGB triple.
///
/// Each channel is scaled by `exposure`, clamped below at zero (which also
/// maps NaN to zero), gamma encoded, clamped to 1 and rounded.
pub fn tonemap(color: Color, exposure: f64) -> [u8; 3] {
    let encode = |x: f64| {
        let linear = (x * exposure).max(0.0);
        let display = linear.powf(1.0 / GAMMA).min(1.0);
        (255.0 * display).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// RGB8 image stored top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Pixel at column `x` of output row `y` (row 0 is the top).
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrite output row `y` (row 0 is the top).
    pub fn set_row(&mut self, y: usize, pixels: &[[u8; 3]]) {
        let start = y * self.width * 3;
        let row = &mut self.data[start..start + self.width * 3];
        for (dst, src) in row.chunks_exact_mut(3).zip(pixels) {
            dst.copy_from_slice(src);
        }
    }

    /// Write the image as binary PPM (P6).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.data)?;
        writer.flush()
    }

    /// Save to `path`: PNG for a `.png` extension, PPM otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            let too_large = || OutputError::TooLarge {
                width: self.width,
                height: self.height,
            };
            let width = u32::try_from(self.width).map_err(|_| too_large())?;
            let height = u32::try_from(self.height).map_err(|_| too_large())?;
            image::save_buffer(path, &self.data, width, height, image::ColorType::Rgb8)?;
        } else {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
