//! Color types and conversion utilities
//!
//! Colormaps hand the engine device colors ([`Srgb`]); every perceptual
//! computation runs on [`Lab`], reached through [`Xyz`].
//!
//! # Example
//!
//! ```
//! use jnd_engine::{GamutPolicy, Lab, Srgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let lab = Lab::from(srgb);
//! let back = lab.to_srgb(GamutPolicy::Report).unwrap();
//! assert_eq!(back.to_bytes(), [128, 64, 32]);
//! ```

mod gamut;
mod lab;
mod srgb;
mod xyz;

pub use gamut::GamutPolicy;
pub use lab::{Lab, Lch};
pub use srgb::{linear_to_srgb, srgb_to_linear, Srgb};
pub use xyz::{Xyz, WHITE_X, WHITE_Y, WHITE_Z};
