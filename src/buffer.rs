//! Row-major RGB pixel storage.

use image::RgbImage;

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// A `width x height` grid of RGB pixels in row-major order.
///
/// Pixel `(x, y)` lives at index `y * width + x`. The pixel vector always holds
/// exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl PixelBuffer {
    /// Allocate a black buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Pixel::BLACK; pixel_count(width, height)],
            width,
            height,
        }
    }

    /// Build a buffer from interleaved RGB bytes, as produced by a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] unless `bytes.len() == width * height * 3`.
    pub fn from_raw(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = pixel_count(width, height) * 3;
        if bytes.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Interleaved RGB bytes in row-major order, ready for an encoder.
    #[must_use]
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.channels()).collect()
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the buffer has no pixels (zero width or height).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access to all pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Whether `(x, y)` addresses a pixel of this buffer.
    ///
    /// Every accessor goes through this check, so an index equal to the width
    /// or height is out of range.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or [`Pixel::BLACK`] when out of range.
    ///
    /// Use [`PixelBuffer::try_get_pixel`] to treat out-of-range reads as errors.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        if self.contains(x, y) {
            self.pixels[self.index(x, y)]
        } else {
            Pixel::BLACK
        }
    }

    /// Write `value` at `(x, y)`. Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: Pixel) {
        if self.contains(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = value;
        }
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` is outside the buffer.
    pub fn try_get_pixel(&self, x: u32, y: u32) -> Result<Pixel> {
        self.check(x, y)?;
        Ok(self.pixels[self.index(x, y)])
    }

    /// Write `value` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` is outside the buffer.
    pub fn try_set_pixel(&mut self, x: u32, y: u32, value: Pixel) -> Result<()> {
        self.check(x, y)?;
        let idx = self.index(x, y);
        self.pixels[idx] = value;
        Ok(())
    }

    fn check(&self, x: u32, y: u32) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Number of pixels that are not pure black.
    ///
    /// For a mask this is the number of pixels an unblend pass rewrites.
    #[must_use]
    pub fn count_non_black(&self) -> usize {
        self.pixels.iter().filter(|px| !px.is_black()).count()
    }
}

impl From<&RgbImage> for PixelBuffer {
    fn from(img: &RgbImage) -> Self {
        Self {
            pixels: img.pixels().map(|px| Pixel::from(*px)).collect(),
            width: img.width(),
            height: img.height(),
        }
    }
}

impl From<&PixelBuffer> for RgbImage {
    fn from(buf: &PixelBuffer) -> Self {
        RgbImage::from_fn(buf.width, buf.height, |x, y| buf.get_pixel(x, y).into())
    }
}
