use crate::error::{Error, Result};
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;

/// A decoded image, ready to be uploaded or blitted.
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub image: DynamicImage,
}

impl Sprite {
    pub fn load(path: &Path) -> Result<Self> {
        let image = ImageReader::open(path)
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?
            .decode()
            .map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        self.image.to_rgba8()
    }
}

impl From<DynamicImage> for Sprite {
    fn from(image: DynamicImage) -> Self {
        Self { image }
    }
}

impl From<RgbaImage> for Sprite {
    fn from(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
        }
    }
}
