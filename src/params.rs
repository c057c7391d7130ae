//! Validated compositing parameters.

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// The known parameters of the forward composite: how much of the original
/// survived (`alpha`) and the solid color that was laid over it.
///
/// Construction validates both, so every `BlendParams` value describes an
/// invertible blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParams {
    alpha: f32,
    overlay: Pixel,
}

impl BlendParams {
    /// Validate and build blend parameters.
    ///
    /// # Errors
    ///
    /// - [`Error::DegenerateAlpha`] unless `alpha` is finite and in `(0, 1]`.
    /// - [`Error::OverlayOutOfRange`] if any overlay channel is outside `[0, 255]`.
    pub fn new(alpha: f32, overlay: [i32; 3]) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(Error::DegenerateAlpha(alpha));
        }

        let [r, g, b] = overlay;
        Ok(Self {
            alpha,
            overlay: Pixel::new(
                channel("red", r)?,
                channel("green", g)?,
                channel("blue", b)?,
            ),
        })
    }

    /// Fraction of the original color retained in the composite.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The overlay color.
    #[must_use]
    pub fn overlay(&self) -> Pixel {
        self.overlay
    }
}

fn channel(name: &'static str, value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::OverlayOutOfRange {
        channel: name,
        value,
    })
}
