//! Image-backed render surface
//!
//! Lets the sampler run against a screenshot or any decoded image, which
//! is how the CLI samples offline.

use std::path::Path;

use image::RgbaImage;

use crate::error::{Result, ShellError};
use crate::theme::color::Rgb;
use crate::theme::sampler::{PixelRow, RenderSurface};

/// A [`RenderSurface`] over a decoded RGBA image
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Decode an image file from disk
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl RenderSurface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn render_row(&self, y: u32, row: &mut PixelRow) -> Result<()> {
        if y >= self.image.height() || row.width() != self.image.width() as usize {
            return Err(ShellError::RenderBuffer(format!(
                "row {} does not fit a {}x{} image",
                y,
                self.image.width(),
                self.image.height()
            )));
        }

        for (x, slot) in row.pixels_mut().iter_mut().enumerate() {
            let pixel = self.image.get_pixel(x as u32, y);
            *slot = Rgb::new(pixel[0], pixel[1], pixel[2]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::sampler::sample_dominant;
    use image::Rgba;

    /// 6x4 image: a dark header band over a light page body.
    fn header_image() -> RgbaImage {
        RgbaImage::from_fn(6, 4, |x, y| match (x, y) {
            (_, 0) => Rgba([20, 20, 20, 255]),
            (0, _) => Rgba([255, 0, 0, 255]),
            _ => Rgba([240, 240, 240, 255]),
        })
    }

    #[test]
    fn test_samples_row_below_offset() {
        let surface = ImageSurface::from_image(header_image());
        assert_eq!(sample_dominant(&surface, 0).unwrap(), Rgb::new(20, 20, 20));
        assert_eq!(sample_dominant(&surface, 1).unwrap(), Rgb::new(240, 240, 240));
    }

    #[test]
    fn test_open_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        header_image().save(&path).unwrap();

        let surface = ImageSurface::open(&path).unwrap();
        assert_eq!(surface.width(), 6);
        assert_eq!(surface.height(), 4);
        assert_eq!(sample_dominant(&surface, 2).unwrap(), Rgb::new(240, 240, 240));
    }

    #[test]
    fn test_missing_file_is_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageSurface::open(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, ShellError::Image(_)));
    }
}
