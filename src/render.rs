//! Rendering one source image into one target file.
//!
//! The transform is deterministic: decode, forced resize to the exact target
//! dimensions (aspect ratio is not preserved), then either rounded-corner
//! alpha masking or flattening onto an opaque background, then encode and
//! write. Writes go through a temp file so a failure never leaves a
//! truncated file at the destination.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage, imageops::FilterType};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Error;

/// Render `source` to `out_path` at exactly `width` x `height`.
///
/// A positive `corner_radius_percent` masks the corners with radii
/// `(width * p/100, height * p/100)`, keeping pixels only where the rounded
/// rectangle is opaque; zero flattens to an alpha-free image instead. The
/// two modes are mutually exclusive. Masked output is always PNG (it needs
/// an alpha channel); flattened output is encoded per the target extension.
pub fn render(
    source: &Path,
    width: u32,
    height: u32,
    corner_radius_percent: f32,
    out_path: &Path,
) -> Result<(), Error> {
    let img = image::open(source).map_err(|e| Error::render(out_path, e))?;
    let resized = img
        .resize_exact(width, height, FilterType::Lanczos3)
        .into_rgba8();

    let (output, format) = if corner_radius_percent > 0.0 {
        let rounded = round_corners(resized, corner_radius_percent);
        (DynamicImage::ImageRgba8(rounded), ImageFormat::Png)
    } else {
        (
            DynamicImage::ImageRgb8(flatten(&resized)),
            output_format(out_path),
        )
    };

    write_atomic(&output, format, out_path)
}

/// Mask the image corners with quarter-ellipses of radii derived from
/// `percent`, destination-in: alpha is kept only under the rounded
/// rectangle. Radii are clamped to half the image size.
fn round_corners(mut img: RgbaImage, percent: f32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let w = width as f32;
    let h = height as f32;
    let rx = (w * percent / 100.0).min(w / 2.0);
    let ry = (h * percent / 100.0).min(h / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return img;
    }

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let coverage = corner_coverage(x as f32 + 0.5, y as f32 + 0.5, w, h, rx, ry);
        if coverage < 1.0 {
            pixel[3] = (pixel[3] as f32 * coverage).round() as u8;
        }
    }
    img
}

/// Mask coverage at a pixel center, 0.0 (outside the rounded rectangle) to
/// 1.0 (inside), with a one-pixel feather along the ellipse boundary.
fn corner_coverage(x: f32, y: f32, w: f32, h: f32, rx: f32, ry: f32) -> f32 {
    let cx = if x < rx {
        rx
    } else if x > w - rx {
        w - rx
    } else {
        return 1.0;
    };
    let cy = if y < ry {
        ry
    } else if y > h - ry {
        h - ry
    } else {
        return 1.0;
    };

    let dx = (x - cx) / rx;
    let dy = (y - cy) / ry;
    let norm = (dx * dx + dy * dy).sqrt();
    ((1.0 - norm) * rx.min(ry) + 0.5).clamp(0.0, 1.0)
}

/// Composite onto an opaque black background, discarding the alpha channel.
fn flatten(img: &RgbaImage) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = RgbImage::new(width, height);
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let a = src[3] as u32;
        *dst = Rgb([
            (src[0] as u32 * a / 255) as u8,
            (src[1] as u32 * a / 255) as u8,
            (src[2] as u32 * a / 255) as u8,
        ]);
    }
    out
}

/// Encoding format for flattened output: follow the target extension,
/// falling back to PNG for anything unrecognized.
fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => f,
        _ => ImageFormat::Png,
    }
}

/// Encode to memory, write to a temp sibling, then rename into place.
fn write_atomic(img: &DynamicImage, format: ImageFormat, out_path: &Path) -> Result<(), Error> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::render_io(out_path, e))?;
    }

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| Error::render(out_path, e))?;

    let tmp = tmp_sibling(out_path);
    fs::write(&tmp, &buf).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::render_io(out_path, e)
    })?;
    fs::rename(&tmp, out_path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::render_io(out_path, e)
    })
}

/// Process-unique temp path next to the destination, so concurrent renders
/// never collide before the rename.
fn tmp_sibling(out_path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = out_path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!(".tmp{n}"));
    out_path.with_file_name(name)
}
