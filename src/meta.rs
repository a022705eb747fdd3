//! Image metadata probing.
//!
//! Reads intrinsic width/height (and detected format) from a file header
//! without decoding pixel data, so scanning a large tree stays cheap.

use image::{ImageFormat, ImageReader};
use std::path::Path;

use crate::error::Error;

/// Intrinsic properties of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Format detected from the file header, if recognized.
    pub format: Option<ImageFormat>,
}

impl ImageInfo {
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Read width/height/format from the image header.
///
/// Returns [`Error::UnreadableImage`] if the file is missing, truncated, or
/// not a decodable raster.
pub fn read_info(path: &Path) -> Result<ImageInfo, Error> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| Error::unreadable(path, image::ImageError::IoError(e)))?;

    let format = reader.format();
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::unreadable(path, e))?;

    Ok(ImageInfo {
        width,
        height,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn reads_png_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        RgbaImage::new(12, 34).save(&path).unwrap();

        let info = read_info(&path).unwrap();
        assert_eq!((info.width, info.height), (12, 34));
        assert_eq!(info.format, Some(ImageFormat::Png));
        assert!(!info.is_square());
    }

    #[test]
    fn rejects_non_image_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        assert!(matches!(
            read_info(&path),
            Err(Error::UnreadableImage { .. })
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_info(&dir.path().join("nope.png")).is_err());
    }
}
