//! RGB pixel value type.

use image::Rgb;

/// A single 8-bit RGB triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red intensity.
    pub r: u8,
    /// Green intensity.
    pub g: u8,
    /// Blue intensity.
    pub b: u8,
}

impl Pixel {
    /// Pure black. In a mask this marks a pixel that was not overlaid.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white, the conventional "overlaid" mask marker.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a pixel from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether this pixel is exactly `(0, 0, 0)`.
    ///
    /// Mask lookups only special-case exact black: every other value, including
    /// near-black noise from lossy mask encodings, counts as overlaid.
    #[must_use]
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Channels as an array in `[r, g, b]` order.
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(px: Pixel) -> Self {
        px.channels()
    }
}

impl From<Rgb<u8>> for Pixel {
    fn from(px: Rgb<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Pixel> for Rgb<u8> {
    fn from(px: Pixel) -> Self {
        Rgb(px.channels())
    }
}
