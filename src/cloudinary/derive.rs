//! Breakpoint derivation: one raw image record in, one [`CloudinaryImage`] out.
//!
//! ## Animated images
//!
//! GIFs are delivered as animated WebP (`.gif` → `.webp`, `fl_awebp`). Resizing
//! an animation per breakpoint is not worth the transformation cost, so all
//! three sizes point at the same URL and no mobile override applies.
//!
//! ## Everything else
//!
//! 1. Base URL: the CMS-precomputed `derived[0]` variant if there is one,
//!    otherwise the original with `f_auto,q_auto:best`.
//! 2. If the base already pins a width, every size reuses it verbatim.
//!    Otherwise `sm`/`md`/`lg` append `w_900`/`w_1600`/`w_1600|3200`.
//! 3. `use_original_quality` swaps `lg` for the untouched original.
//! 4. A mobile image replaces `sm` outright.

use super::delivery::{DeliveryUrl, ImageError};
use super::params::{ANIMATED_WEBP, AUTO_FORMAT_BEST_QUALITY, Breakpoints, DeriveOptions};
use crate::raw::RawImage;
use crate::types::{CloudinaryImage, ImageSizes};

/// Derive breakpoint URLs for `image`, optionally overriding `sm` with
/// `mobile`. Returns `Ok(None)` when there is no image.
pub fn derive_image(
    image: Option<&RawImage>,
    mobile: Option<&RawImage>,
    options: DeriveOptions,
    widths: &Breakpoints,
) -> Result<Option<CloudinaryImage>, ImageError> {
    let Some(image) = image else {
        return Ok(None);
    };
    let width = image.width.unwrap_or_default();
    let height = image.height.unwrap_or_default();

    if image.format.as_deref() == Some("gif") {
        let secure_url = image
            .secure_url
            .as_deref()
            .ok_or(ImageError::MissingSecureUrl)?;
        let url = animated_url(secure_url)?;
        return Ok(Some(CloudinaryImage {
            sizes: Some(ImageSizes {
                sm: url.clone(),
                md: url.clone(),
                lg: url.clone(),
            }),
            url,
            width,
            height,
        }));
    }

    let original = image
        .derived_url()
        .or(image.secure_url.as_deref())
        .ok_or(ImageError::MissingSecureUrl)?;
    let url = match image.derived_url() {
        Some(derived) => derived.to_string(),
        None => DeliveryUrl::parse(original)?
            .with_default_transformation(AUTO_FORMAT_BEST_QUALITY)
            .to_string(),
    };

    let base = DeliveryUrl::parse(&url)?;
    let mut sizes = if base.has_width() {
        ImageSizes {
            sm: url.clone(),
            md: url.clone(),
            lg: url.clone(),
        }
    } else {
        ImageSizes {
            sm: base.clone().with_width(widths.small).to_string(),
            md: base.clone().with_width(widths.medium).to_string(),
            lg: base.with_width(widths.large_for(options.is_single)).to_string(),
        }
    };

    if options.use_original_quality {
        sizes.lg = original.to_string();
    }
    if let Some(mobile) = mobile {
        sizes.sm = mobile_url(mobile, widths.mobile)?;
    }

    Ok(Some(CloudinaryImage {
        url,
        sizes: Some(sizes),
        width,
        height,
    }))
}

fn animated_url(secure_url: &str) -> Result<String, ImageError> {
    let webp = match secure_url.strip_suffix(".gif") {
        Some(stem) => format!("{stem}.webp"),
        None => secure_url.to_string(),
    };
    Ok(DeliveryUrl::parse(&webp)?
        .with_default_transformation(ANIMATED_WEBP)
        .to_string())
}

fn mobile_url(mobile: &RawImage, width: u32) -> Result<String, ImageError> {
    if let Some(derived) = mobile.derived_url() {
        return Ok(derived.to_string());
    }
    let secure_url = mobile
        .secure_url
        .as_deref()
        .ok_or(ImageError::MissingSecureUrl)?;
    let directives = format!("{AUTO_FORMAT_BEST_QUALITY},w_{width}");
    Ok(DeliveryUrl::parse(secure_url)?
        .with_default_transformation(&directives)
        .to_string())
}
