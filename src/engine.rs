//! Core overlay removal engine.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::blending;
use crate::buffer::PixelBuffer;
use crate::codec;
use crate::error::{Error, Result};
use crate::params::BlendParams;
use crate::pixel::Pixel;

/// Result of processing one composite/mask pair from disk.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the composite image.
    pub path: PathBuf,
    /// Path the recovered image was written to.
    pub output: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Number of pixels the mask marked for recovery.
    pub recovered: usize,
    /// Human-readable status message.
    pub message: String,
}

/// Inverts a known solid-color overlay under a mask.
///
/// Create once with [`UnblendEngine::new()`] and reuse for any number of images
/// that share the same blend parameters.
#[derive(Debug, Clone, Copy)]
pub struct UnblendEngine {
    params: BlendParams,
}

impl UnblendEngine {
    /// Create an engine for the given blend parameters.
    #[must_use]
    pub fn new(params: BlendParams) -> Self {
        Self { params }
    }

    /// The blend parameters this engine inverts.
    #[must_use]
    pub fn params(&self) -> &BlendParams {
        &self.params
    }

    /// Recover the original image from `composite`.
    ///
    /// Pixels whose mask value is exactly black are copied through unchanged;
    /// every other pixel is reverse-blended. Each output pixel depends only on
    /// the composite and mask pixels at the same position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `mask` and `composite` differ in
    /// size. Nothing is computed in that case.
    pub fn unblend(&self, composite: &PixelBuffer, mask: &PixelBuffer) -> Result<PixelBuffer> {
        check_dimensions(composite, mask)?;
        debug!(
            "unblending {}x{} image, {} masked pixels, alpha={}, overlay={:?}",
            composite.width(),
            composite.height(),
            mask.count_non_black(),
            self.params.alpha(),
            self.params.overlay().channels(),
        );

        let params = self.params;
        let mut recovered = composite.clone();
        map_masked(&mut recovered, mask, |px| blending::unblend_pixel(px, &params));
        Ok(recovered)
    }

    /// Composite `original` with the overlay wherever `mask` is not black.
    ///
    /// This is the forward model [`UnblendEngine::unblend`] inverts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `mask` and `original` differ in
    /// size.
    pub fn composite(&self, original: &PixelBuffer, mask: &PixelBuffer) -> Result<PixelBuffer> {
        check_dimensions(original, mask)?;

        let params = self.params;
        let mut composited = original.clone();
        map_masked(&mut composited, mask, |px| blending::blend_pixel(px, &params));
        Ok(composited)
    }

    /// Process a composite/mask pair of files: load, unblend, save.
    ///
    /// An output path without a writable image extension is rejected before
    /// either input is decoded. Returns a [`ProcessResult`] describing success
    /// or failure.
    #[must_use]
    pub fn process_files(&self, image: &Path, mask: &Path, output: &Path) -> ProcessResult {
        let mut result = ProcessResult {
            path: image.to_path_buf(),
            output: output.to_path_buf(),
            success: false,
            recovered: 0,
            message: String::new(),
        };

        if let Err(e) = codec::output_format(output) {
            result.message = e.to_string();
            return result;
        }

        let composite = match codec::load_buffer(image) {
            Ok(buf) => buf,
            Err(e) => {
                result.message = format!("Failed to load image: {e}");
                return result;
            }
        };
        let mask = match codec::load_buffer(mask) {
            Ok(buf) => buf,
            Err(e) => {
                result.message = format!("Failed to load mask: {e}");
                return result;
            }
        };

        let recovered = match self.unblend(&composite, &mask) {
            Ok(buf) => buf,
            Err(e) => {
                result.message = e.to_string();
                return result;
            }
        };
        result.recovered = mask.count_non_black();

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match codec::save_buffer(&recovered, output) {
            Ok(()) => {
                info!("saved {}", output.display());
                result.success = true;
                result.message = format!("Recovered {} pixels", result.recovered);
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }
}

fn check_dimensions(image: &PixelBuffer, mask: &PixelBuffer) -> Result<()> {
    if image.dimensions() == mask.dimensions() {
        return Ok(());
    }
    Err(Error::DimensionMismatch {
        width: image.width(),
        height: image.height(),
        mask_width: mask.width(),
        mask_height: mask.height(),
    })
}

/// Replace every pixel of `target` whose mask pixel is not black with `f(pixel)`.
///
/// Runs on rayon when the `parallel` feature is enabled.
fn map_masked<F>(target: &mut PixelBuffer, mask: &PixelBuffer, f: F)
where
    F: Fn(Pixel) -> Pixel + Sync,
{
    debug_assert_eq!(target.len(), mask.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        target
            .pixels_mut()
            .par_iter_mut()
            .zip(mask.pixels().par_iter())
            .filter(|(_, m)| !m.is_black())
            .for_each(|(px, _)| *px = f(*px));
    }

    #[cfg(not(feature = "parallel"))]
    {
        target
            .pixels_mut()
            .iter_mut()
            .zip(mask.pixels())
            .filter(|(_, m)| !m.is_black())
            .for_each(|(px, _)| *px = f(*px));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(alpha: f32, overlay: [i32; 3]) -> UnblendEngine {
        UnblendEngine::new(BlendParams::new(alpha, overlay).unwrap())
    }

    fn filled(width: u32, height: u32, px: Pixel) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        buf.pixels_mut().fill(px);
        buf
    }

    #[test]
    fn masked_pixel_is_recovered() {
        let composite = filled(1, 1, Pixel::new(200, 200, 200));
        let mask = filled(1, 1, Pixel::WHITE);
        let out = engine(0.5, [255, 255, 255])
            .unblend(&composite, &mask)
            .unwrap();
        assert_eq!(out.get_pixel(0, 0), Pixel::new(145, 145, 145));
    }

    #[test]
    fn black_mask_pixel_is_left_alone() {
        let composite = filled(1, 1, Pixel::new(200, 200, 200));
        let mask = PixelBuffer::new(1, 1);
        let out = engine(0.5, [255, 255, 255])
            .unblend(&composite, &mask)
            .unwrap();
        assert_eq!(out.get_pixel(0, 0), Pixel::new(200, 200, 200));
    }

    #[test]
    fn any_non_black_mask_value_marks_overlay() {
        let composite = filled(3, 1, Pixel::new(200, 200, 200));
        let mut mask = PixelBuffer::new(3, 1);
        mask.set_pixel(0, 0, Pixel::new(1, 0, 0));
        mask.set_pixel(1, 0, Pixel::new(128, 128, 128));
        let out = engine(0.5, [255, 255, 255])
            .unblend(&composite, &mask)
            .unwrap();
        assert_eq!(out.get_pixel(0, 0), Pixel::new(145, 145, 145));
        assert_eq!(out.get_pixel(1, 0), Pixel::new(145, 145, 145));
        assert_eq!(out.get_pixel(2, 0), Pixel::new(200, 200, 200));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let composite = PixelBuffer::new(4, 4);
        let mask = PixelBuffer::new(4, 5);
        let err = engine(0.5, [0, 0, 0])
            .unblend(&composite, &mask)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                width: 4,
                height: 4,
                mask_width: 4,
                mask_height: 5
            }
        ));
        assert!(engine(0.5, [0, 0, 0])
            .composite(&composite, &mask)
            .is_err());
    }

    #[test]
    fn empty_buffers_unblend_to_empty() {
        let empty = PixelBuffer::new(0, 0);
        let out = engine(0.5, [0, 0, 0]).unblend(&empty, &empty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn composite_then_unblend_round_trips() {
        let original = PixelBuffer::from_raw(
            2,
            2,
            &[0, 50, 100, 150, 200, 250, 255, 1, 2, 33, 66, 99],
        )
        .unwrap();
        let mask = filled(2, 2, Pixel::WHITE);
        let eng = engine(0.75, [255, 0, 128]);

        let composite = eng.composite(&original, &mask).unwrap();
        let restored = eng.unblend(&composite, &mask).unwrap();

        for (a, b) in restored.pixels().iter().zip(original.pixels()) {
            for (ra, rb) in a.channels().iter().zip(b.channels()) {
                assert!(
                    (i32::from(*ra) - i32::from(rb)).abs() <= 1,
                    "restored {a:?} vs original {b:?}"
                );
            }
        }
    }
}
