//! Recover original pixels from a solid-color overlay via reverse alpha blending.
//!
//! Given a composited image, a mask marking which pixels were overlaid, and the
//! overlay color and alpha used to produce the composite, this crate solves the
//! linear blend equation per channel to get the original pixels back.
//!
//! # Quick Start
//!
//! ```no_run
//! use overlay_unblend::{codec, BlendParams, UnblendEngine};
//!
//! let params = BlendParams::new(0.5, [255, 255, 255]).expect("invalid parameters");
//! let engine = UnblendEngine::new(params);
//!
//! let composite = codec::load_buffer("photo.webp".as_ref()).unwrap();
//! let mask = codec::load_buffer("mask.webp".as_ref()).unwrap();
//! let recovered = engine.unblend(&composite, &mask).unwrap();
//! codec::save_buffer(&recovered, "recovered.webp".as_ref()).unwrap();
//! ```
//!
//! # Masks
//!
//! A mask pixel that is exactly black `(0, 0, 0)` means "not overlaid" and the
//! composite pixel is copied through. Any other value, conventionally white,
//! marks the pixel for recovery.

#![deny(missing_docs)]

pub mod blending;
mod buffer;
pub mod codec;
mod engine;
pub mod error;
mod params;
mod pixel;

pub use buffer::PixelBuffer;
pub use codec::{default_output_path, is_supported_image};
pub use engine::{ProcessResult, UnblendEngine};
pub use error::{Error, Result};
pub use params::BlendParams;
pub use pixel::Pixel;
