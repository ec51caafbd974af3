//! Page image type holding the pixels regions are cropped from

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::domain::{BoundingBox, Size};

/// A loaded page image with raw RGBA data
#[derive(Clone, Debug)]
pub struct PageImage {
    pub rgba: RgbaImage,
}

impl PageImage {
    /// Wrap an already-decoded RGBA buffer
    pub fn new(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Decode a page image from disk
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .with_context(|| format!("failed to open page image {}", path.display()))?
            .into_rgba8();
        log::debug!(
            "page image loaded: {} ({}x{})",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self { rgba })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Logical size for viewport fitting
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    /// Crop the pixels under `bounds`, clipped to the image.
    /// Returns `None` when the box lies entirely outside.
    pub fn crop(&self, bounds: BoundingBox) -> Option<RgbaImage> {
        let clipped = bounds.clip_to(self.width(), self.height())?;
        Some(
            image::imageops::crop_imm(
                &self.rgba,
                clipped.x as u32,
                clipped.y as u32,
                clipped.width as u32,
                clipped.height as u32,
            )
            .to_image(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> PageImage {
        let rgba = RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        PageImage::new(rgba)
    }

    #[test]
    fn test_crop_inside() {
        let img = checker(100, 80);
        let crop = img
            .crop(BoundingBox {
                x: 10,
                y: 20,
                width: 30,
                height: 40,
            })
            .unwrap();
        assert_eq!((crop.width(), crop.height()), (30, 40));
        assert_eq!(crop.get_pixel(0, 0), img.rgba.get_pixel(10, 20));
    }

    #[test]
    fn test_crop_clips_to_image() {
        let img = checker(50, 50);
        let crop = img
            .crop(BoundingBox {
                x: -10,
                y: 40,
                width: 30,
                height: 100,
            })
            .unwrap();
        assert_eq!((crop.width(), crop.height()), (20, 10));
    }

    #[test]
    fn test_crop_outside_is_none() {
        let img = checker(50, 50);
        assert!(
            img.crop(BoundingBox {
                x: 100,
                y: 100,
                width: 10,
                height: 10
            })
            .is_none()
        );
    }
}
