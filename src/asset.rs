use image::imageops::FilterType;
use std::path::Path;

use crate::error::SessionError;

/// Samples per side of the colour grid the icon is reduced to.
pub const ICON_SAMPLES: u32 = 16;

/// The cartoon icon, reduced to a square grid of RGB samples for the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    samples: Vec<[u8; 3]>,
}

impl IconImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SessionError::MissingAsset(path.to_path_buf()));
        }

        let img = image::open(path)?;
        log::info!(
            "loaded icon {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(&img))
    }

    pub fn from_image(img: &image::DynamicImage) -> Self {
        let small = img
            .resize_exact(ICON_SAMPLES, ICON_SAMPLES, FilterType::Triangle)
            .to_rgb8();
        let samples = small.pixels().map(|p| p.0).collect();
        Self { samples }
    }

    /// Colour at column `col`, row `row`; row 0 is the top of the picture.
    pub fn sample(&self, col: u32, row: u32) -> [u8; 3] {
        let idx = (row.min(ICON_SAMPLES - 1) * ICON_SAMPLES + col.min(ICON_SAMPLES - 1)) as usize;
        self.samples[idx]
    }
}
