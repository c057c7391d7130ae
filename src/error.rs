//! Error types for the overlay-unblend crate.

/// Errors that can occur while recovering an overlaid image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mask does not have the same dimensions as the composite image.
    #[error(
        "mask is {mask_width}x{mask_height} but composite is {width}x{height}"
    )]
    DimensionMismatch {
        /// Composite width in pixels.
        width: u32,
        /// Composite height in pixels.
        height: u32,
        /// Mask width in pixels.
        mask_width: u32,
        /// Mask height in pixels.
        mask_height: u32,
    },

    /// Alpha is zero, negative, above one, or not finite.
    #[error("alpha must be in (0, 1], got {0}")]
    DegenerateAlpha(f32),

    /// An overlay color channel is outside `[0, 255]`.
    #[error("overlay {channel} channel must be in [0, 255], got {value}")]
    OverlayOutOfRange {
        /// Channel name (`red`, `green` or `blue`).
        channel: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// A coordinate lies outside the buffer.
    #[error("pixel ({x}, {y}) is outside {width}x{height} buffer")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },

    /// Raw channel data does not match `width * height * 3`.
    #[error("expected {expected} bytes of RGB data, got {actual}")]
    BufferSize {
        /// Required byte count.
        expected: usize,
        /// Supplied byte count.
        actual: usize,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
