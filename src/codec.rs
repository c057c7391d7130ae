//! Decoding and encoding of pixel buffers through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Decode an image file into an RGB pixel buffer.
///
/// Any alpha channel in the source is discarded.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_buffer(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)?.to_rgb8();
    debug!(
        "{}: decoded {}x{}",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(PixelBuffer::from(&img))
}

/// The encoder format for `path`, judged by its extension.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] unless the extension names JPEG, PNG,
/// WebP or BMP.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => Ok(format),
        _ => Err(Error::UnsupportedFormat(format!("{format:?}"))),
    }
}

/// Whether [`save_buffer`] can write to `path`.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    output_format(path).is_ok()
}

/// Encode a pixel buffer, choosing the format from the file extension.
///
/// WebP is written lossless so recovered pixels survive exactly. JPEG uses
/// quality 100. A file left half-written by a failed encode is removed.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_buffer(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    let dyn_img = DynamicImage::ImageRgb8(RgbImage::from(buffer));

    let mut writer = BufWriter::new(File::create(path)?);
    let written = encode(&dyn_img, format, &mut writer)
        .and_then(|()| writer.flush().map_err(Error::from));

    if let Err(e) = written {
        drop(writer);
        if let Err(rm) = std::fs::remove_file(path) {
            warn!("{}: could not remove partial output: {rm}", path.display());
        }
        return Err(e);
    }

    debug!("{}: encoded as {format:?}", path.display());
    Ok(())
}

fn encode<W: Write + Seek>(img: &DynamicImage, format: ImageFormat, w: &mut W) -> Result<()> {
    match format {
        ImageFormat::Jpeg => {
            image::codecs::jpeg::JpegEncoder::new_with_quality(w, 100).encode_image(img)?;
        }
        ImageFormat::WebP => {
            img.write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(w))?;
        }
        _ => img.write_to(w, format)?,
    }
    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"photo.webp"` becomes `"photo_recovered.webp"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_recovered.{ext}"))
}
