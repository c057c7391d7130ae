//! Alpha blending math for overlay removal.
//!
//! A solid overlay is composited with linear alpha blending:
//! `final = alpha * original + (1 - alpha) * overlay`
//!
//! Solving for `original` gives the reverse operation used to recover pixels:
//! `original = (final - (1 - alpha) * overlay) / alpha`
//!
//! Channels are blended independently, so both directions work per channel.

use crate::params::BlendParams;
use crate::pixel::Pixel;

/// Narrow a float channel value to `u8`: clamp to `[0, 255]`, round to nearest.
///
/// NaN maps to 0.
#[inline]
fn to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.clamp(0.0, 255.0).round() as u8
    }
}

/// Recover one original channel from its composited value.
///
/// Applies `clamp((final - overlay * (1 - alpha)) / alpha, 0, 255)` and rounds to
/// the nearest integer. `alpha` is not validated here; a zero alpha yields 0 or
/// 255 depending on the sign of the numerator. Use [`BlendParams`] to reject it
/// up front.
#[inline]
#[must_use]
pub fn unblend_channel(composite: u8, overlay: u8, alpha: f32) -> u8 {
    let value = (f32::from(composite) - f32::from(overlay) * (1.0 - alpha)) / alpha;
    to_channel(value)
}

/// Composite one original channel with the overlay.
///
/// Applies `original * alpha + overlay * (1 - alpha)`, clamped and rounded.
#[inline]
#[must_use]
pub fn blend_channel(original: u8, overlay: u8, alpha: f32) -> u8 {
    to_channel(f32::from(original) * alpha + f32::from(overlay) * (1.0 - alpha))
}

/// Recover a full pixel from its composited value.
#[inline]
#[must_use]
pub fn unblend_pixel(composite: Pixel, params: &BlendParams) -> Pixel {
    let (overlay, alpha) = (params.overlay(), params.alpha());
    Pixel::new(
        unblend_channel(composite.r, overlay.r, alpha),
        unblend_channel(composite.g, overlay.g, alpha),
        unblend_channel(composite.b, overlay.b, alpha),
    )
}

/// Composite a full pixel with the overlay.
#[inline]
#[must_use]
pub fn blend_pixel(original: Pixel, params: &BlendParams) -> Pixel {
    let (overlay, alpha) = (params.overlay(), params.alpha());
    Pixel::new(
        blend_channel(original.r, overlay.r, alpha),
        blend_channel(original.g, overlay.g, alpha),
        blend_channel(original.b, overlay.b, alpha),
    )
}
