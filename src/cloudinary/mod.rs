//! Responsive image URLs for Cloudinary-hosted assets.
//!
//! Nothing is resized here: Cloudinary transforms on delivery, so deriving a
//! breakpoint is purely a matter of rewriting the delivery URL.
//!
//! - [`delivery`]: structured parser for `/upload/<transformations>/v<n>/<id>`
//! - [`params`]: breakpoint widths and per-call layout flags
//! - [`derive`]: the breakpoint rules proper

pub mod delivery;
mod derive;
mod params;

pub use delivery::{DeliveryUrl, ImageError};
pub use derive::derive_image;
pub use params::{ANIMATED_WEBP, AUTO_FORMAT_BEST_QUALITY, Breakpoints, DeriveOptions};
