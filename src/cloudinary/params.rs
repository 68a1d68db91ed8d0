//! Parameter types for image derivation.
//!
//! - [`Breakpoints`]: the pixel widths requested for each size tier. Part of
//!   the site config (`[images]`), with defaults matching the widths the
//!   front-end's `srcset`s are tuned for.
//! - [`DeriveOptions`]: per-call layout flags.

use serde::{Deserialize, Serialize};

/// Automatic format, best automatic quality.
pub const AUTO_FORMAT_BEST_QUALITY: &str = "f_auto,q_auto:best";

/// Deliver an animated GIF as animated WebP.
pub const ANIMATED_WEBP: &str = "fl_awebp";

/// Widths (in pixels) requested for each breakpoint variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Breakpoints {
    /// `sm` variant.
    pub small: u32,
    /// `md` variant.
    pub medium: u32,
    /// `lg` variant when the image shares a row (pairs, trios).
    pub large: u32,
    /// `lg` variant when the image spans the full width.
    pub large_single: u32,
    /// Width of the mobile-specific image that replaces `sm`.
    pub mobile: u32,
}

impl Breakpoints {
    pub fn large_for(&self, is_single: bool) -> u32 {
        if is_single {
            self.large_single
        } else {
            self.large
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            small: 900,
            medium: 1600,
            large: 1600,
            large_single: 3200,
            mobile: 900,
        }
    }
}

/// Layout flags for a single derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Serve the untouched original as `lg`.
    pub use_original_quality: bool,
    /// The image spans the full width rather than sharing a row.
    pub is_single: bool,
}

impl DeriveOptions {
    /// Options for a member of a pair or trio.
    pub fn grouped() -> Self {
        Self {
            is_single: false,
            ..Self::default()
        }
    }

    pub fn single(is_single: bool) -> Self {
        Self {
            is_single,
            ..Self::default()
        }
    }

    pub fn original_quality(self, use_original_quality: bool) -> Self {
        Self {
            use_original_quality,
            ..self
        }
    }
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            use_original_quality: false,
            is_single: true,
        }
    }
}
