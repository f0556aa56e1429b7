use std::borrow::Cow;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::color::Color;
use crate::error::DecodeError;

/// Images are downsampled to fit within this square before clustering.
pub const MAX_DIMENSION: u32 = 150;

const SUPPORTED_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
];

/// Decode raw image bytes into a flat list of sampled pixels.
///
/// The format is sniffed from the bytes. Images larger than
/// `max_dimension` on either side are area-averaged down to fit (aspect
/// ratio preserved); alpha is dropped.
pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Vec<Color>, DecodeError> {
    let format = image::guess_format(bytes).map_err(|err| DecodeError::UnsupportedFormat {
        reason: err.to_string(),
    })?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(DecodeError::UnsupportedFormat {
            reason: format!("{format:?} images are not supported"),
        });
    }

    let img = image::load_from_memory_with_format(bytes, format).map_err(|err| {
        DecodeError::UnsupportedFormat {
            reason: err.to_string(),
        }
    })?;
    log::debug!(
        "decoded {format:?} image {}x{}",
        img.width(),
        img.height()
    );

    Ok(sample_pixels(&img, max_dimension))
}

/// Read an image file and decode it. See [`decode`].
pub fn decode_file(path: &Path, max_dimension: u32) -> Result<Vec<Color>, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes, max_dimension)
}

/// Downsample (if needed) and flatten an already-decoded image.
pub fn sample_pixels(img: &DynamicImage, max_dimension: u32) -> Vec<Color> {
    let max_dimension = max_dimension.max(1);
    let img = if img.width() > max_dimension || img.height() > max_dimension {
        // thumbnail() averages every source pixel into its target cell
        Cow::Owned(img.thumbnail(max_dimension, max_dimension))
    } else {
        Cow::Borrowed(img)
    };

    img.to_rgb8()
        .pixels()
        .map(|p| Color::new(p[0], p[1], p[2]))
        .collect()
}
